//! Match state and authoritative tick loop

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};
use tokio::time::interval;
use tracing::{debug, info};
use uuid::Uuid;

use crate::util::time::{
    snapshot_interval, tick_delta, DEFAULT_SIMULATION_TPS, DEFAULT_SNAPSHOT_TPS,
    POST_OUTCOME_DELAY_SECS,
};

use super::ai::{Controller, OpponentAi};
use super::character::CharacterState;
use super::combat::CombatResolver;
use super::events::DuelEvent;
use super::physics::Arena;
use super::roster::{ArenaId, FighterId};
use super::snapshot::{FighterSnapshot, MatchSnapshot, SnapshotBuilder};
use super::{Command, Side};

/// Default countdown length (seconds)
pub const DEFAULT_MATCH_SECONDS: f32 = 60.0;

/// Match result as seen from the player's corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Fighting continues
    Running,
    PlayerWin,
    PlayerLose,
}

impl MatchOutcome {
    pub fn is_decided(self) -> bool {
        self != MatchOutcome::Running
    }
}

/// Knobs for one match
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSettings {
    pub player: FighterId,
    pub opponent: FighterId,
    pub arena: ArenaId,
    /// Countdown length (seconds)
    pub match_seconds: f32,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Snapshots broadcast per second
    pub snapshot_rate: u32,
    /// Pace ticks on the wall clock instead of running flat out
    pub realtime: bool,
    /// Seed for the opponent's decisions
    pub seed: u64,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            player: FighterId::Naruto,
            opponent: FighterId::Luffy,
            arena: ArenaId::Konoha,
            match_seconds: DEFAULT_MATCH_SECONDS,
            tick_rate: DEFAULT_SIMULATION_TPS,
            snapshot_rate: DEFAULT_SNAPSHOT_TPS,
            realtime: false,
            seed: 0,
        }
    }
}

/// Match state (owned by the match)
#[derive(Debug, Clone)]
pub struct MatchState {
    pub id: Uuid,
    pub seed: u64,
    pub tick: u64,
    pub arena: Arena,
    pub player: CharacterState,
    pub opponent: CharacterState,
    pub time_remaining: f32,
    pub outcome: MatchOutcome,
    /// Time spent since the outcome was decided
    pub post_outcome_timer: f32,
    pub post_outcome_delay: f32,
    /// Every event since the match began
    pub events: Vec<DuelEvent>,
}

impl MatchState {
    pub fn new(
        seed: u64,
        arena: Arena,
        player: CharacterState,
        opponent: CharacterState,
        match_seconds: f32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            seed,
            tick: 0,
            arena,
            player,
            opponent,
            time_remaining: match_seconds,
            outcome: MatchOutcome::Running,
            post_outcome_timer: 0.0,
            post_outcome_delay: POST_OUTCOME_DELAY_SECS,
            events: Vec::new(),
        }
    }

    /// Fresh fighters at their spawn points
    pub fn from_settings(settings: &MatchSettings) -> Self {
        let arena = Arena::for_arena(settings.arena);
        let player = CharacterState::spawn(Side::Player, settings.player, &arena);
        let opponent = CharacterState::spawn(Side::Opponent, settings.opponent, &arena);
        Self::new(settings.seed, arena, player, opponent, settings.match_seconds)
    }
}

/// Handle to a running match
#[derive(Clone)]
pub struct MatchHandle {
    pub id: Uuid,
    pub input_tx: mpsc::Sender<Command>,
    pub snapshot_tx: broadcast::Sender<MatchSnapshot>,
}

impl MatchHandle {
    /// Receive snapshots from now on
    pub fn subscribe(&self) -> broadcast::Receiver<MatchSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Queue a player command for the next tick
    pub async fn send(&self, command: Command) -> bool {
        self.input_tx.send(command).await.is_ok()
    }
}

/// Final report of a finished match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: Uuid,
    pub seed: u64,
    pub arena: ArenaId,
    pub outcome: MatchOutcome,
    pub ticks: u64,
    pub time_remaining: f32,
    pub player: FighterSnapshot,
    pub opponent: FighterSnapshot,
    pub events: Vec<DuelEvent>,
    pub finished_at: DateTime<Utc>,
}

/// The authoritative duel
pub struct DuelMatch {
    state: MatchState,
    opponent_control: Box<dyn Controller>,
    player_autopilot: Option<Box<dyn Controller>>,
    input_rx: mpsc::Receiver<Command>,
    snapshot_tx: broadcast::Sender<MatchSnapshot>,
    snapshot_builder: SnapshotBuilder,
    pending_events: Vec<DuelEvent>,
    tick_rate: u32,
    realtime: bool,
}

impl DuelMatch {
    /// Create a match with spawned fighters and the timed opponent
    pub fn new(settings: &MatchSettings) -> (Self, MatchHandle) {
        let state = MatchState::from_settings(settings);
        let opponent = Box::new(OpponentAi::new(settings.seed));
        Self::with_state(state, opponent, settings)
    }

    /// Create a match around prepared state and a custom opponent controller
    pub fn with_state(
        state: MatchState,
        opponent_control: Box<dyn Controller>,
        settings: &MatchSettings,
    ) -> (Self, MatchHandle) {
        let (input_tx, input_rx) = mpsc::channel(256);
        let (snapshot_tx, _) = broadcast::channel(64);

        let handle = MatchHandle {
            id: state.id,
            input_tx,
            snapshot_tx: snapshot_tx.clone(),
        };

        let interval = snapshot_interval(settings.tick_rate, settings.snapshot_rate);
        let duel = Self {
            state,
            opponent_control,
            player_autopilot: None,
            input_rx,
            snapshot_tx,
            snapshot_builder: SnapshotBuilder::new(interval),
            pending_events: Vec::new(),
            tick_rate: settings.tick_rate,
            realtime: settings.realtime,
        };

        (duel, handle)
    }

    /// Let a controller issue player commands alongside the input channel
    pub fn with_autopilot(mut self, autopilot: Box<dyn Controller>) -> Self {
        self.player_autopilot = Some(autopilot);
        self
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn player(&self) -> &CharacterState {
        &self.state.player
    }

    pub fn opponent(&self) -> &CharacterState {
        &self.state.opponent
    }

    pub fn outcome(&self) -> MatchOutcome {
        self.state.outcome
    }

    pub fn time_remaining(&self) -> f32 {
        self.state.time_remaining
    }

    /// True once the post-outcome delay has elapsed
    pub fn transition_due(&self) -> bool {
        self.state.outcome.is_decided()
            && self.state.post_outcome_timer >= self.state.post_outcome_delay
    }

    /// Current frame for rendering
    pub fn snapshot(&self) -> MatchSnapshot {
        self.snapshot_builder.build(
            self.state.tick,
            self.state.time_remaining,
            self.state.outcome,
            &self.state.player,
            &self.state.opponent,
            Vec::new(),
        )
    }

    /// Run the authoritative tick loop until the post-outcome delay elapses
    pub async fn run(mut self) -> MatchSummary {
        info!(
            match_id = %self.state.id,
            seed = self.state.seed,
            player = %self.state.player.fighter(),
            opponent = %self.state.opponent.fighter(),
            arena = %self.state.arena.id,
            "Match started"
        );

        let dt = tick_delta(self.tick_rate);
        let mut ticker = if self.realtime {
            let tick_duration = Duration::from_micros(1_000_000 / self.tick_rate.max(1) as u64);
            let mut ticker = interval(tick_duration);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            Some(ticker)
        } else {
            None
        };

        loop {
            match ticker.as_mut() {
                Some(ticker) => {
                    ticker.tick().await;
                }
                None => tokio::task::yield_now().await,
            }

            // Drain input queue
            let commands = self.drain_inputs();

            // Run simulation tick
            let was_running = !self.state.outcome.is_decided();
            let events = self.tick(dt, &commands);
            self.pending_events.extend(events);
            if was_running && self.state.outcome.is_decided() {
                self.snapshot_builder.force_next();
            }

            // Build and broadcast snapshot if needed
            if self.snapshot_builder.should_send() {
                let events = std::mem::take(&mut self.pending_events);
                let snapshot = self.snapshot_builder.build(
                    self.state.tick,
                    self.state.time_remaining,
                    self.state.outcome,
                    &self.state.player,
                    &self.state.opponent,
                    events,
                );
                let _ = self.snapshot_tx.send(snapshot);
            }

            if self.transition_due() {
                break;
            }
        }

        info!(
            match_id = %self.state.id,
            outcome = ?self.state.outcome,
            ticks = self.state.tick,
            "Match ended"
        );
        self.summary()
    }

    /// Collect all queued player commands
    fn drain_inputs(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        while let Ok(command) = self.input_rx.try_recv() {
            commands.push(command);
        }
        commands
    }

    /// Advance the match by one frame and return what happened
    pub fn tick(&mut self, dt: f32, player_commands: &[Command]) -> Vec<DuelEvent> {
        self.state.tick += 1;

        if self.state.outcome.is_decided() {
            self.state.post_outcome_timer += dt;
            return Vec::new();
        }

        let mut events = Vec::new();

        // Countdown
        self.state.time_remaining = (self.state.time_remaining - dt).max(0.0);
        if self.state.time_remaining <= 0.0 {
            self.decide_by_time(&mut events);
            self.state.events.extend(events.iter().cloned());
            return events;
        }

        // Player input
        for command in player_commands {
            self.state.player.apply(*command);
        }
        if let Some(autopilot) = self.player_autopilot.as_mut() {
            let commands = autopilot.decide(dt, &self.state.player, &self.state.opponent);
            for command in commands {
                self.state.player.apply(command);
            }
        }

        // Physics, mana and action timers
        let ground_y = self.state.arena.ground_y;
        self.state.player.update(dt, ground_y);
        self.state.opponent.update(dt, ground_y);

        // Opponent decisions
        let commands = self
            .opponent_control
            .decide(dt, &self.state.opponent, &self.state.player);
        for command in commands {
            self.state.opponent.apply(command);
        }

        self.state.player.clamp_to(&self.state.arena);
        self.state.opponent.clamp_to(&self.state.arena);

        // Hits
        for hit in CombatResolver::resolve(&mut self.state.player, &mut self.state.opponent) {
            debug!(
                attacker = hit.attacker.label(),
                action = ?hit.action,
                damage = hit.damage,
                outcome = ?hit.outcome,
                "Hit landed"
            );
            events.extend(DuelEvent::from_hit(&hit));
        }

        self.check_knockout(&mut events);
        self.state.events.extend(events.iter().cloned());
        events
    }

    /// Countdown expired: more health wins, a tie goes against the player
    fn decide_by_time(&mut self, events: &mut Vec<DuelEvent>) {
        let player_hp = self.state.player.hp();
        let opponent_hp = self.state.opponent.hp();
        events.push(DuelEvent::TimeUp {
            player_hp,
            opponent_hp,
        });

        let outcome = if player_hp > opponent_hp {
            MatchOutcome::PlayerWin
        } else {
            MatchOutcome::PlayerLose
        };
        self.finish(outcome, events);
    }

    /// A knocked out player loses even if the opponent fell on the same tick
    fn check_knockout(&mut self, events: &mut Vec<DuelEvent>) {
        if !self.state.player.is_alive() {
            self.finish(MatchOutcome::PlayerLose, events);
        } else if !self.state.opponent.is_alive() {
            self.finish(MatchOutcome::PlayerWin, events);
        }
    }

    fn finish(&mut self, outcome: MatchOutcome, events: &mut Vec<DuelEvent>) {
        if self.state.outcome.is_decided() {
            return;
        }

        self.state.outcome = outcome;
        events.push(DuelEvent::Outcome { outcome });
        info!(
            match_id = %self.state.id,
            outcome = ?outcome,
            player_hp = self.state.player.hp(),
            opponent_hp = self.state.opponent.hp(),
            time_remaining = self.state.time_remaining,
            "Match decided"
        );
    }

    /// Build the final report
    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            match_id: self.state.id,
            seed: self.state.seed,
            arena: self.state.arena.id,
            outcome: self.state.outcome,
            ticks: self.state.tick,
            time_remaining: self.state.time_remaining,
            player: FighterSnapshot::from(&self.state.player),
            opponent: FighterSnapshot::from(&self.state.opponent),
            events: self.state.events.clone(),
            finished_at: Utc::now(),
        }
    }
}
