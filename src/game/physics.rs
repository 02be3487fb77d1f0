//! Fighter physics constants, vertical integration and arena bounds

use serde::{Deserialize, Serialize};

use super::fsm::Skill;
use super::roster::{ArenaId, FighterId};

/// Per-fighter constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FighterStats {
    /// Horizontal speed (units per second)
    pub speed: f32,
    /// Initial upward velocity of a jump
    pub jump_force: f32,
    /// Vertical acceleration (negative pulls down)
    pub gravity: f32,
    pub max_hp: i32,
    pub max_mp: i32,
    /// Mana regenerated per second, applied in whole units
    pub mp_regen_rate: f32,
    /// Mana required to raise a block (the whole pool is spent)
    pub block_cost: i32,
    /// Mana cost per skill tier
    pub skill_costs: [i32; 3],
    /// Duration of the normal attack (seconds)
    pub attack_duration: f32,
    /// Duration per skill tier (seconds)
    pub skill_durations: [f32; 3],
    /// Stun applied when a hit lands
    pub hit_stun_duration: f32,
    /// Reach of the normal attack
    pub attack_range: f32,
    /// Reach shared by every skill
    pub skill_range: f32,
    /// Damage of the normal attack
    pub attack_damage: i32,
    /// Damage per skill tier
    pub skill_damage: [i32; 3],
    /// Collision width used for arena clamping
    pub body_width: f32,
}

impl FighterStats {
    pub fn for_fighter(fighter: FighterId) -> Self {
        match fighter {
            FighterId::Naruto => Self::default(),
            FighterId::Luffy => Self {
                speed: 180.0,
                jump_force: 380.0,
                ..Self::default()
            },
        }
    }

    pub fn skill_cost(&self, skill: Skill) -> i32 {
        self.skill_costs[skill.index()]
    }

    pub fn skill_duration(&self, skill: Skill) -> f32 {
        self.skill_durations[skill.index()]
    }

    pub fn skill_damage(&self, skill: Skill) -> i32 {
        self.skill_damage[skill.index()]
    }
}

impl Default for FighterStats {
    fn default() -> Self {
        Self {
            speed: 200.0,
            jump_force: 400.0,
            gravity: -900.0,
            max_hp: 100,
            max_mp: 100,
            mp_regen_rate: 5.0,
            block_cost: 50,
            skill_costs: [15, 25, 40],
            attack_duration: 0.4,
            skill_durations: [0.5, 0.7, 1.2],
            hit_stun_duration: 0.3,
            attack_range: 250.0,
            skill_range: 270.0,
            attack_damage: 10,
            skill_damage: [15, 20, 25],
            body_width: 120.0,
        }
    }
}

/// Arena geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub id: ArenaId,
    /// Playable width, left edge at x = 0
    pub width: f32,
    /// Height of the floor
    pub ground_y: f32,
}

impl Arena {
    pub fn for_arena(id: ArenaId) -> Self {
        match id {
            ArenaId::Konoha => Self {
                id,
                width: 1280.0,
                ground_y: 120.0,
            },
            ArenaId::ThousandSunny => Self {
                id,
                width: 1440.0,
                ground_y: 120.0,
            },
        }
    }

    /// Spawn x for the player (left quarter)
    pub fn player_spawn_x(&self) -> f32 {
        self.width / 4.0
    }

    /// Spawn x for the opponent (right quarter)
    pub fn opponent_spawn_x(&self) -> f32 {
        self.width * 0.75
    }

    /// Keep a body of `body_width` inside the arena
    pub fn clamp_x(&self, x: f32, body_width: f32) -> f32 {
        let max_x = (self.width - body_width).max(0.0);
        x.clamp(0.0, max_x)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::for_arena(ArenaId::default())
    }
}

/// Result of one vertical integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalStep {
    pub y: f32,
    pub velocity_y: f32,
    pub grounded: bool,
}

/// Physics system for the side-view duel
pub struct PhysicsSystem;

impl PhysicsSystem {
    /// Integrate gravity into velocity and velocity into height, settling on the ground
    pub fn integrate_vertical(
        y: f32,
        velocity_y: f32,
        gravity: f32,
        dt: f32,
        ground_y: f32,
    ) -> VerticalStep {
        let velocity_y = velocity_y + gravity * dt;
        let y = y + velocity_y * dt;

        if y <= ground_y {
            VerticalStep {
                y: ground_y,
                velocity_y: 0.0,
                grounded: true,
            }
        } else {
            VerticalStep {
                y,
                velocity_y,
                grounded: false,
            }
        }
    }

    /// Horizontal gap between two fighters
    pub fn distance_x(a_x: f32, b_x: f32) -> f32 {
        (a_x - b_x).abs()
    }
}
