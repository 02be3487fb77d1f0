//! Duel simulation modules

pub mod ai;
pub mod character;
pub mod combat;
pub mod events;
pub mod fsm;
pub mod r#match;
pub mod physics;
pub mod roster;
pub mod snapshot;

pub use ai::{CommandQueue, Controller, OpponentAi};
pub use character::{CharacterState, DamageOutcome};
pub use combat::{CombatResolver, HitResult};
pub use events::DuelEvent;
pub use fsm::{ActionState, Skill};
pub use physics::{Arena, FighterStats};
pub use r#match::{DuelMatch, MatchHandle, MatchOutcome, MatchSettings, MatchState, MatchSummary};
pub use roster::{ArenaId, FighterId};
pub use snapshot::{FighterSnapshot, MatchSnapshot};

use serde::{Deserialize, Serialize};

/// Which corner a fighter belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Driven by the input layer
    Player,
    /// Driven by the opponent controller
    Opponent,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        }
    }
}

/// A discrete command issued to one fighter for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Walk left for `dt` seconds
    MoveLeft { dt: f32 },
    /// Walk right for `dt` seconds
    MoveRight { dt: f32 },
    StopMoving,
    Jump,
    Block,
    StopBlocking,
    AttackNormal,
    UseSkill { skill: Skill },
    /// Turn to face a direction without moving
    Face { right: bool },
}

impl Command {
    /// Walk toward the requested direction for `dt` seconds
    pub fn walk(right: bool, dt: f32) -> Self {
        if right {
            Command::MoveRight { dt }
        } else {
            Command::MoveLeft { dt }
        }
    }
}
