//! Action state machine scaffolding.
//! Tracks the fighter's pose tag and the timed actions that decay back to idle.

use serde::{Deserialize, Serialize};

/// Skill tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    One,
    Two,
    Three,
}

impl Skill {
    pub const ALL: [Skill; 3] = [Skill::One, Skill::Two, Skill::Three];

    /// Zero-based index into per-tier tables
    pub fn index(self) -> usize {
        match self {
            Skill::One => 0,
            Skill::Two => 1,
            Skill::Three => 2,
        }
    }

    pub fn action(self) -> ActionState {
        match self {
            Skill::One => ActionState::Skill1,
            Skill::Two => ActionState::Skill2,
            Skill::Three => ActionState::Skill3,
        }
    }
}

/// What a fighter is doing this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionState {
    Idle,
    Run,
    Jump,
    Block,
    Hit,
    AttackNormal,
    Skill1,
    Skill2,
    Skill3,
}

impl Default for ActionState {
    fn default() -> Self {
        Self::Idle
    }
}

impl ActionState {
    /// Busy states reject new commands until their timer runs out
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            Self::Hit | Self::AttackNormal | Self::Skill1 | Self::Skill2 | Self::Skill3
        )
    }

    /// States whose activation may land a hit
    pub fn is_damaging(self) -> bool {
        matches!(
            self,
            Self::AttackNormal | Self::Skill1 | Self::Skill2 | Self::Skill3
        )
    }

    /// Skill tier of a skill state
    pub fn skill(self) -> Option<Skill> {
        match self {
            Self::Skill1 => Some(Skill::One),
            Self::Skill2 => Some(Skill::Two),
            Self::Skill3 => Some(Skill::Three),
            _ => None,
        }
    }
}

/// Advance a timed action by `dt`.
///
/// A running timer that crosses zero returns the state to `Idle`. A zero timer
/// leaves the state untouched, which is how `Block` persists until released.
pub fn decay_action(state: ActionState, timer: f32, dt: f32) -> (ActionState, f32) {
    if timer <= 0.0 {
        return (state, timer);
    }

    let timer = timer - dt;
    if timer <= 0.0 {
        (ActionState::Idle, 0.0)
    } else {
        (state, timer)
    }
}
