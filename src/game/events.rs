//! Events emitted by the simulation for the presentation layer

use serde::{Deserialize, Serialize};

use super::character::DamageOutcome;
use super::combat::HitResult;
use super::fsm::ActionState;
use super::r#match::MatchOutcome;
use super::Side;

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DuelEvent {
    /// An attack connected and took health
    Hit {
        attacker: Side,
        defender: Side,
        action: ActionState,
        damage: i32,
        defender_hp: i32,
        x: f32,
        y: f32,
    },
    /// An attack connected with a raised guard
    Blocked {
        attacker: Side,
        defender: Side,
        action: ActionState,
    },
    /// A fighter ran out of health
    Knockout { side: Side },
    /// The countdown ran out
    TimeUp { player_hp: i32, opponent_hp: i32 },
    /// The match left the running state
    Outcome { outcome: MatchOutcome },
}

impl DuelEvent {
    /// Translate a landed hit into its events
    pub fn from_hit(hit: &HitResult) -> Vec<DuelEvent> {
        match hit.outcome {
            DamageOutcome::Ignored => Vec::new(),
            DamageOutcome::Blocked => vec![DuelEvent::Blocked {
                attacker: hit.attacker,
                defender: hit.defender,
                action: hit.action,
            }],
            DamageOutcome::Damaged { hp } => vec![DuelEvent::Hit {
                attacker: hit.attacker,
                defender: hit.defender,
                action: hit.action,
                damage: hit.damage,
                defender_hp: hp,
                x: hit.x,
                y: hit.y,
            }],
            DamageOutcome::Defeated => vec![
                DuelEvent::Hit {
                    attacker: hit.attacker,
                    defender: hit.defender,
                    action: hit.action,
                    damage: hit.damage,
                    defender_hp: 0,
                    x: hit.x,
                    y: hit.y,
                },
                DuelEvent::Knockout { side: hit.defender },
            ],
        }
    }
}
