//! Per-fighter state: physics, resources, action state machine and timers

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::fsm::{decay_action, ActionState, Skill};
use super::physics::{Arena, FighterStats, PhysicsSystem};
use super::roster::FighterId;
use super::{Command, Side};

/// Cooldown between normal attacks for the input-driven fighter (seconds)
pub const PLAYER_ATTACK_COOLDOWN: f32 = 1.6;

/// What a call to [`CharacterState::take_damage`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DamageOutcome {
    /// Target was already defeated
    Ignored,
    /// Target was blocking; nothing changed
    Blocked,
    /// Target lost health and is stunned
    Damaged { hp: i32 },
    /// Target ran out of health
    Defeated,
}

/// Authoritative state of one fighter
#[derive(Debug, Clone)]
pub struct CharacterState {
    side: Side,
    fighter: FighterId,
    stats: FighterStats,

    // Position and movement
    x: f32,
    y: f32,
    velocity_y: f32,
    grounded: bool,
    facing_right: bool,

    // Resources
    hp: i32,
    mp: i32,
    alive: bool,
    mp_regen_accumulator: f32,

    // Actions
    state: ActionState,
    action_timer: f32,
    can_deal_damage: bool,
    attack_cooldown: Option<f32>,
    attack_cooldown_timer: f32,
}

impl CharacterState {
    /// Create a grounded fighter at full health and mana
    pub fn new(side: Side, fighter: FighterId, stats: FighterStats, x: f32, y: f32) -> Self {
        Self {
            side,
            fighter,
            stats,
            x,
            y,
            velocity_y: 0.0,
            grounded: true,
            facing_right: side == Side::Player,
            hp: stats.max_hp,
            mp: stats.max_mp,
            alive: true,
            mp_regen_accumulator: 0.0,
            state: ActionState::Idle,
            action_timer: 0.0,
            can_deal_damage: false,
            attack_cooldown: None,
            attack_cooldown_timer: 0.0,
        }
    }

    /// Place a fighter at its corner of the arena with its fighter's stat table.
    /// The player gets the normal attack cooldown; the opponent attacks freely.
    pub fn spawn(side: Side, fighter: FighterId, arena: &Arena) -> Self {
        let stats = FighterStats::for_fighter(fighter);
        let x = match side {
            Side::Player => arena.player_spawn_x(),
            Side::Opponent => arena.opponent_spawn_x(),
        };
        let character = Self::new(side, fighter, stats, x, arena.ground_y);
        match side {
            Side::Player => character.with_attack_cooldown(Some(PLAYER_ATTACK_COOLDOWN)),
            Side::Opponent => character,
        }
    }

    /// Set (or clear) the minimum time between normal attacks
    pub fn with_attack_cooldown(mut self, cooldown: Option<f32>) -> Self {
        self.attack_cooldown = cooldown;
        self
    }

    /// Override the facing direction
    pub fn with_facing(mut self, facing_right: bool) -> Self {
        self.facing_right = facing_right;
        self
    }

    /// Override the starting mana (clamped to the pool)
    pub fn with_mp(mut self, mp: i32) -> Self {
        self.mp = mp.clamp(0, self.stats.max_mp);
        self
    }

    // ---- queries ----

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn fighter(&self) -> FighterId {
        self.fighter
    }

    pub fn stats(&self) -> &FighterStats {
        &self.stats
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn velocity_y(&self) -> f32 {
        self.velocity_y
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.stats.max_hp
    }

    pub fn mp(&self) -> i32 {
        self.mp
    }

    pub fn max_mp(&self) -> i32 {
        self.stats.max_mp
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    pub fn action_timer(&self) -> f32 {
        self.action_timer
    }

    /// Whether the current activation may still land a hit
    pub fn can_deal_damage(&self) -> bool {
        self.can_deal_damage
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn is_blocking(&self) -> bool {
        self.state == ActionState::Block
    }

    /// Alive, not busy and not holding a block
    fn is_free(&self) -> bool {
        self.alive && !self.is_busy() && !self.is_blocking()
    }

    // ---- commands ----

    /// Dispatch a command to the matching method
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft { dt } => self.move_left(dt),
            Command::MoveRight { dt } => self.move_right(dt),
            Command::StopMoving => self.stop_moving(),
            Command::Jump => self.jump(),
            Command::Block => self.block(),
            Command::StopBlocking => self.stop_blocking(),
            Command::AttackNormal => self.attack_normal(),
            Command::UseSkill { skill } => self.use_skill(skill),
            Command::Face { right } => self.face(right),
        }
    }

    pub fn move_left(&mut self, dt: f32) {
        self.walk(false, dt);
    }

    pub fn move_right(&mut self, dt: f32) {
        self.walk(true, dt);
    }

    fn walk(&mut self, right: bool, dt: f32) {
        if !self.is_free() {
            return;
        }

        let step = self.stats.speed * dt;
        self.x += if right { step } else { -step };
        self.facing_right = right;
        if self.grounded {
            self.state = ActionState::Run;
        }
    }

    pub fn stop_moving(&mut self) {
        if self.alive && self.state == ActionState::Run {
            self.state = ActionState::Idle;
        }
    }

    pub fn face(&mut self, right: bool) {
        if self.alive {
            self.facing_right = right;
        }
    }

    pub fn jump(&mut self) {
        if !self.grounded || !self.is_free() {
            return;
        }

        self.velocity_y = self.stats.jump_force;
        self.grounded = false;
        self.state = ActionState::Jump;
    }

    /// Raise a guard. Costs the entire mana pool once `block_cost` is available.
    pub fn block(&mut self) {
        if !self.alive || self.is_blocking() {
            return;
        }
        if !self.grounded || self.is_busy() || self.mp < self.stats.block_cost {
            return;
        }

        self.state = ActionState::Block;
        self.mp = 0;
        debug!(side = self.side.label(), "Guard raised");
    }

    pub fn stop_blocking(&mut self) {
        if self.alive && self.is_blocking() {
            self.state = ActionState::Idle;
        }
    }

    pub fn attack_normal(&mut self) {
        if self.attack_cooldown.is_some() && self.attack_cooldown_timer > 0.0 {
            return;
        }
        if !self.grounded || !self.is_free() {
            return;
        }

        self.begin_action(ActionState::AttackNormal, self.stats.attack_duration);
        if let Some(cooldown) = self.attack_cooldown {
            self.attack_cooldown_timer = cooldown;
        }
    }

    /// Cast a skill tier. Lacking mana is a silent no-op.
    pub fn use_skill(&mut self, skill: Skill) {
        if !self.grounded || !self.is_free() {
            return;
        }

        let cost = self.stats.skill_cost(skill);
        if self.mp < cost {
            return;
        }

        self.mp -= cost;
        self.begin_action(skill.action(), self.stats.skill_duration(skill));
    }

    fn begin_action(&mut self, state: ActionState, duration: f32) {
        self.state = state;
        self.action_timer = duration;
        self.can_deal_damage = true;
    }

    /// Stop the current activation from landing any further hit
    pub(crate) fn disarm(&mut self) {
        self.can_deal_damage = false;
    }

    /// Apply incoming damage. Blocking negates it fully.
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if !self.alive {
            return DamageOutcome::Ignored;
        }

        if self.is_blocking() {
            debug!(side = self.side.label(), damage = amount, "Blocked attack");
            return DamageOutcome::Blocked;
        }

        self.hp = (self.hp - amount.max(0)).max(0);
        if self.hp == 0 {
            self.alive = false;
            info!(side = self.side.label(), fighter = %self.fighter, "Fighter defeated");
            return DamageOutcome::Defeated;
        }

        self.state = ActionState::Hit;
        self.action_timer = self.stats.hit_stun_duration;
        self.velocity_y = 0.0;
        debug!(
            side = self.side.label(),
            damage = amount,
            hp = self.hp,
            max_hp = self.stats.max_hp,
            "Took damage"
        );
        DamageOutcome::Damaged { hp: self.hp }
    }

    // ---- per-frame update ----

    /// Advance physics, mana and timers by `dt`
    pub fn update(&mut self, dt: f32, ground_y: f32) {
        if !self.alive {
            return;
        }

        let was_grounded = self.grounded;
        let step = PhysicsSystem::integrate_vertical(
            self.y,
            self.velocity_y,
            self.stats.gravity,
            dt,
            ground_y,
        );
        self.y = step.y;
        self.velocity_y = step.velocity_y;
        self.grounded = step.grounded;

        if step.grounded && !was_grounded {
            match self.state {
                ActionState::Jump => self.state = ActionState::Idle,
                ActionState::Hit => {
                    self.state = ActionState::Idle;
                    self.action_timer = 0.0;
                }
                _ => {}
            }
        }

        self.regenerate_mana(dt);

        let (state, timer) = decay_action(self.state, self.action_timer, dt);
        self.state = state;
        self.action_timer = timer;

        if self.attack_cooldown_timer > 0.0 {
            self.attack_cooldown_timer = (self.attack_cooldown_timer - dt).max(0.0);
        }
    }

    /// Accumulate fractional regen and apply it in whole units
    fn regenerate_mana(&mut self, dt: f32) {
        if self.mp >= self.stats.max_mp {
            return;
        }

        self.mp_regen_accumulator += self.stats.mp_regen_rate * dt;
        if self.mp_regen_accumulator >= 1.0 {
            let whole = self.mp_regen_accumulator.floor();
            self.mp = self.mp.saturating_add(whole as i32).min(self.stats.max_mp);
            self.mp_regen_accumulator -= whole;
        }
    }

    /// Keep the fighter inside the arena walls
    pub fn clamp_to(&mut self, arena: &Arena) {
        self.x = arena.clamp_x(self.x, self.stats.body_width);
    }

    /// Move the fighter horizontally without any gameplay checks
    pub fn set_x(&mut self, x: f32) {
        self.x = x;
    }
}
