//! Time utilities for the duel simulation

use std::time::Instant;

/// Tick rate configuration
pub const DEFAULT_SIMULATION_TPS: u32 = 60; // 60 ticks per second
pub const DEFAULT_SNAPSHOT_TPS: u32 = 20; // 20 snapshots per second

/// Delay between a decided outcome and the presentation layer leaving the arena
pub const POST_OUTCOME_DELAY_SECS: f32 = 3.0;

/// Calculate delta time for a tick rate (in seconds)
pub fn tick_delta(tps: u32) -> f32 {
    1.0 / tps.max(1) as f32
}

/// Number of simulation ticks between two snapshots.
/// A zero snapshot rate falls back to a snapshot every tick.
pub fn snapshot_interval(simulation_tps: u32, snapshot_tps: u32) -> u32 {
    if snapshot_tps == 0 {
        return 1;
    }
    (simulation_tps / snapshot_tps).max(1)
}

/// A simple timer for measuring durations
#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
