//! Arena Duel - frame-driven combat simulation for a two-fighter side-view duel
//!
//! The crate covers:
//! - Fighter physics, mana and the action state machine
//! - Facing and range gated hit resolution
//! - A timed-decision opponent
//! - Countdown, knockout and timeout arbitration

pub mod config;
pub mod game;
pub mod util;

pub use config::{Config, ConfigError};
pub use game::{
    ActionState, Command, CommandQueue, Controller, DuelMatch, MatchOutcome, MatchSettings, Side,
    Skill,
};
