//! Snapshot building for the presentation layer

use serde::{Deserialize, Serialize};

use super::character::CharacterState;
use super::events::DuelEvent;
use super::fsm::ActionState;
use super::r#match::MatchOutcome;
use super::roster::FighterId;
use super::Side;

/// Everything needed to draw one fighter and its bars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterSnapshot {
    pub side: Side,
    pub fighter: FighterId,
    pub state: ActionState,
    pub x: f32,
    pub y: f32,
    pub facing_right: bool,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    pub alive: bool,
}

impl From<&CharacterState> for FighterSnapshot {
    fn from(c: &CharacterState) -> Self {
        Self {
            side: c.side(),
            fighter: c.fighter(),
            state: c.state(),
            x: c.x(),
            y: c.y(),
            facing_right: c.facing_right(),
            hp: c.hp(),
            max_hp: c.max_hp(),
            mp: c.mp(),
            max_mp: c.max_mp(),
            alive: c.is_alive(),
        }
    }
}

/// One frame of the match as seen by the HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub tick: u64,
    pub time_remaining: f32,
    pub outcome: MatchOutcome,
    pub player: FighterSnapshot,
    pub opponent: FighterSnapshot,
    pub events: Vec<DuelEvent>,
}

impl MatchSnapshot {
    /// Whole seconds shown on the countdown
    pub fn countdown_secs(&self) -> u32 {
        self.time_remaining.max(0.0) as u32
    }
}

/// Builds snapshots on a fixed tick interval
pub struct SnapshotBuilder {
    /// Tick counter since last snapshot
    ticks_since_snapshot: u32,
    /// Snapshot interval in ticks
    snapshot_interval: u32,
}

impl SnapshotBuilder {
    pub fn new(snapshot_interval: u32) -> Self {
        Self {
            ticks_since_snapshot: 0,
            snapshot_interval: snapshot_interval.max(1),
        }
    }

    /// Check if it's time to send a snapshot
    pub fn should_send(&mut self) -> bool {
        self.ticks_since_snapshot += 1;
        if self.ticks_since_snapshot >= self.snapshot_interval {
            self.ticks_since_snapshot = 0;
            true
        } else {
            false
        }
    }

    /// Force snapshot on next check (used for important events)
    pub fn force_next(&mut self) {
        self.ticks_since_snapshot = self.snapshot_interval;
    }

    /// Build a snapshot message
    pub fn build(
        &self,
        tick: u64,
        time_remaining: f32,
        outcome: MatchOutcome,
        player: &CharacterState,
        opponent: &CharacterState,
        events: Vec<DuelEvent>,
    ) -> MatchSnapshot {
        MatchSnapshot {
            tick,
            time_remaining,
            outcome,
            player: player.into(),
            opponent: opponent.into(),
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::physics::FighterStats;

    #[test]
    fn test_should_send_on_interval() {
        let mut builder = SnapshotBuilder::new(3);
        let sent: Vec<bool> = (0..6).map(|_| builder.should_send()).collect();
        assert_eq!(sent, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn test_force_next() {
        let mut builder = SnapshotBuilder::new(10);
        assert!(!builder.should_send());
        builder.force_next();
        assert!(builder.should_send());
        assert!(!builder.should_send());
    }

    #[test]
    fn test_fighter_snapshot_mirrors_state() {
        let mut c = CharacterState::new(
            Side::Opponent,
            FighterId::Luffy,
            FighterStats::default(),
            700.0,
            120.0,
        );
        c.use_skill(crate::game::fsm::Skill::Two);
        let snap = FighterSnapshot::from(&c);
        assert_eq!(snap.side, Side::Opponent);
        assert_eq!(snap.state, ActionState::Skill2);
        assert_eq!(snap.mp, 75);
        assert_eq!(snap.max_hp, 100);
        assert!(!snap.facing_right);
        assert!(snap.alive);
    }

    #[test]
    fn test_countdown_secs_truncates() {
        let c = CharacterState::new(
            Side::Player,
            FighterId::Naruto,
            FighterStats::default(),
            0.0,
            120.0,
        );
        let builder = SnapshotBuilder::new(1);
        let snap = builder.build(5, 12.9, MatchOutcome::Running, &c, &c, Vec::new());
        assert_eq!(snap.countdown_secs(), 12);
    }
}
