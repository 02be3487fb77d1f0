//! Combat system - attack profiles, hit detection, damage

use serde::{Deserialize, Serialize};

use super::character::{CharacterState, DamageOutcome};
use super::fsm::ActionState;
use super::physics::{FighterStats, PhysicsSystem};
use super::Side;

/// Reach and damage of a damaging action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackProfile {
    /// Hits land strictly inside this horizontal distance
    pub range: f32,
    /// Damage per hit
    pub damage: i32,
}

impl AttackProfile {
    /// Profile of the action, or `None` for states that cannot hit
    pub fn for_state(state: ActionState, stats: &FighterStats) -> Option<Self> {
        match state {
            ActionState::AttackNormal => Some(Self {
                range: stats.attack_range,
                damage: stats.attack_damage,
            }),
            _ => state.skill().map(|skill| Self {
                range: stats.skill_range,
                damage: stats.skill_damage(skill),
            }),
        }
    }
}

/// Hit result from combat resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitResult {
    pub attacker: Side,
    pub defender: Side,
    pub action: ActionState,
    pub damage: i32,
    pub outcome: DamageOutcome,
    /// Defender position when the hit landed
    pub x: f32,
    pub y: f32,
}

/// Resolves hits between the two fighters once per frame
pub struct CombatResolver;

impl CombatResolver {
    /// Check if the attacker is turned toward the defender
    pub fn is_facing(attacker: &CharacterState, defender: &CharacterState) -> bool {
        attacker.facing_right() == (defender.x() > attacker.x())
    }

    /// Evaluate both directions: player on opponent, then opponent on player
    pub fn resolve(player: &mut CharacterState, opponent: &mut CharacterState) -> Vec<HitResult> {
        let mut hits = Vec::new();
        if let Some(hit) = Self::resolve_attack(player, opponent) {
            hits.push(hit);
        }
        if let Some(hit) = Self::resolve_attack(opponent, player) {
            hits.push(hit);
        }
        hits
    }

    /// Land the attacker's active hit on the defender if the gates pass.
    /// A landed hit spends the activation, blocked or not. An attacker knocked
    /// out earlier in the same tick still lands its pending swing.
    pub fn resolve_attack(
        attacker: &mut CharacterState,
        defender: &mut CharacterState,
    ) -> Option<HitResult> {
        if !attacker.can_deal_damage() {
            return None;
        }

        if !Self::is_facing(attacker, defender) {
            return None;
        }

        let action = attacker.state();
        let profile = AttackProfile::for_state(action, attacker.stats())?;
        if PhysicsSystem::distance_x(attacker.x(), defender.x()) >= profile.range {
            return None;
        }

        let outcome = defender.take_damage(profile.damage);
        attacker.disarm();

        Some(HitResult {
            attacker: attacker.side(),
            defender: defender.side(),
            action,
            damage: profile.damage,
            outcome,
            x: defender.x(),
            y: defender.y(),
        })
    }
}
