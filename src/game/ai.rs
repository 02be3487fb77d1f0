//! Control sources that decide what a fighter does each frame

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::character::CharacterState;
use super::fsm::{ActionState, Skill};
use super::Command;

/// Seconds between two opponent decisions
pub const AI_DECISION_INTERVAL: f32 = 1.0;
/// Horizontal distance under which the opponent attacks instead of walking
pub const AI_MELEE_THRESHOLD: f32 = 100.0;
/// A walking decision covers this many frames worth of movement at once
pub const AI_STEP_SCALE: f32 = 10.0;

/// Decides the commands for one fighter given both fighters' state
pub trait Controller: Send {
    fn decide(&mut self, dt: f32, me: &CharacterState, foe: &CharacterState) -> Vec<Command>;
}

/// Commands queued by an input layer or a script, drained every frame
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Extend<Command> for CommandQueue {
    fn extend<T: IntoIterator<Item = Command>>(&mut self, iter: T) {
        self.pending.extend(iter);
    }
}

impl Controller for CommandQueue {
    fn decide(&mut self, _dt: f32, _me: &CharacterState, _foe: &CharacterState) -> Vec<Command> {
        self.pending.drain(..).collect()
    }
}

/// Timed-decision opponent.
///
/// Once per decision interval it either swings at a close target with a random
/// move or takes one long step toward a distant one. It never checks whether it
/// can afford the skill it picked.
#[derive(Debug, Clone)]
pub struct OpponentAi {
    decision_timer: f32,
    decision_interval: f32,
    melee_threshold: f32,
    step_scale: f32,
    rng: ChaCha8Rng,
}

impl OpponentAi {
    pub fn new(seed: u64) -> Self {
        Self {
            decision_timer: 0.0,
            decision_interval: AI_DECISION_INTERVAL,
            melee_threshold: AI_MELEE_THRESHOLD,
            step_scale: AI_STEP_SCALE,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn with_decision_interval(mut self, interval: f32) -> Self {
        self.decision_interval = interval;
        self
    }

    /// Time left before the next decision
    pub fn decision_timer(&self) -> f32 {
        self.decision_timer
    }

    fn pick_attack(&mut self) -> Command {
        match self.rng.gen_range(0..4) {
            0 => Command::AttackNormal,
            1 => Command::UseSkill { skill: Skill::One },
            2 => Command::UseSkill { skill: Skill::Two },
            _ => Command::UseSkill { skill: Skill::Three },
        }
    }
}

impl Controller for OpponentAi {
    fn decide(&mut self, dt: f32, me: &CharacterState, foe: &CharacterState) -> Vec<Command> {
        self.decision_timer -= dt;

        if !me.is_alive() || !foe.is_alive() || me.is_busy() {
            if me.state() == ActionState::Run {
                return vec![Command::StopMoving];
            }
            return Vec::new();
        }

        if self.decision_timer > 0.0 {
            return Vec::new();
        }
        self.decision_timer = self.decision_interval;

        let toward_right = foe.x() > me.x();
        let distance = (foe.x() - me.x()).abs();

        if distance < self.melee_threshold {
            vec![Command::Face { right: toward_right }, self.pick_attack()]
        } else {
            vec![Command::walk(toward_right, dt * self.step_scale)]
        }
    }
}
