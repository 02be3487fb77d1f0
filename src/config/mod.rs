//! Configuration module - environment variable parsing

use std::env;
use std::str::FromStr;

use crate::game::r#match::{MatchSettings, DEFAULT_MATCH_SECONDS};
use crate::game::roster::{ArenaId, FighterId, RosterError};
use crate::util::time::{DEFAULT_SIMULATION_TPS, DEFAULT_SNAPSHOT_TPS};

/// Application configuration loaded from environment variables
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Snapshots broadcast per second
    pub snapshot_rate: u32,
    /// Countdown length in seconds
    pub match_seconds: f32,
    /// Opponent RNG seed; random when unset
    pub seed: Option<u64>,
    /// Pace the simulation on the wall clock
    pub realtime: bool,

    pub player: FighterId,
    pub opponent: FighterId,
    pub arena: ArenaId,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tick_rate = parse_or(&lookup, "DUEL_TICK_RATE", DEFAULT_SIMULATION_TPS)?;
        if tick_rate == 0 {
            return Err(ConfigError::Invalid {
                var: "DUEL_TICK_RATE",
                value: "0".to_string(),
            });
        }

        let snapshot_rate = parse_or(&lookup, "DUEL_SNAPSHOT_RATE", DEFAULT_SNAPSHOT_TPS)?;
        if snapshot_rate == 0 {
            return Err(ConfigError::Invalid {
                var: "DUEL_SNAPSHOT_RATE",
                value: "0".to_string(),
            });
        }

        let match_seconds = parse_or(&lookup, "DUEL_MATCH_SECONDS", DEFAULT_MATCH_SECONDS)?;
        if !(match_seconds > 0.0) {
            return Err(ConfigError::Invalid {
                var: "DUEL_MATCH_SECONDS",
                value: match_seconds.to_string(),
            });
        }

        Ok(Self {
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),

            tick_rate,
            snapshot_rate,
            match_seconds,
            seed: lookup("DUEL_SEED")
                .map(|raw| parse_value("DUEL_SEED", &raw))
                .transpose()?,
            realtime: parse_or(&lookup, "DUEL_REALTIME", false)?,

            player: roster_or(&lookup, "DUEL_PLAYER", FighterId::Naruto)?,
            opponent: roster_or(&lookup, "DUEL_OPPONENT", FighterId::Luffy)?,
            arena: roster_or(&lookup, "DUEL_ARENA", ArenaId::Konoha)?,
        })
    }

    /// Match settings for this configuration, drawing a seed if none was given
    pub fn match_settings(&self) -> MatchSettings {
        MatchSettings {
            player: self.player,
            opponent: self.opponent,
            arena: self.arena,
            match_seconds: self.match_seconds,
            tick_rate: self.tick_rate,
            snapshot_rate: self.snapshot_rate,
            realtime: self.realtime,
            seed: self.seed.unwrap_or_else(rand::random),
        }
    }
}

fn parse_value<T: FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: raw.to_string(),
    })
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        Some(raw) => parse_value(var, &raw),
        None => Ok(default),
    }
}

fn roster_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr<Err = RosterError>,
{
    match lookup(var) {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error(transparent)]
    Roster(#[from] RosterError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.snapshot_rate, 20);
        assert_eq!(config.match_seconds, 60.0);
        assert_eq!(config.seed, None);
        assert!(!config.realtime);
        assert_eq!(config.player, FighterId::Naruto);
        assert_eq!(config.opponent, FighterId::Luffy);
        assert_eq!(config.arena, ArenaId::Konoha);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("LOG_LEVEL", "debug"),
            ("DUEL_TICK_RATE", "120"),
            ("DUEL_MATCH_SECONDS", "90"),
            ("DUEL_SEED", "1234"),
            ("DUEL_REALTIME", "true"),
            ("DUEL_PLAYER", "luffy"),
            ("DUEL_OPPONENT", "naruto"),
            ("DUEL_ARENA", "thousand_sunny"),
        ])
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.tick_rate, 120);
        assert_eq!(config.match_seconds, 90.0);
        assert_eq!(config.seed, Some(1234));
        assert!(config.realtime);
        assert_eq!(config.player, FighterId::Luffy);
        assert_eq!(config.arena, ArenaId::ThousandSunny);

        let settings = config.match_settings();
        assert_eq!(settings.seed, 1234);
        assert_eq!(settings.tick_rate, 120);
        assert_eq!(settings.opponent, FighterId::Naruto);
    }

    #[test]
    fn test_invalid_number() {
        let err = config_from(&[("DUEL_TICK_RATE", "fast")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "DUEL_TICK_RATE",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        assert!(config_from(&[("DUEL_TICK_RATE", "0")]).is_err());
    }

    #[test]
    fn test_zero_snapshot_rate_rejected() {
        let err = config_from(&[("DUEL_SNAPSHOT_RATE", "0")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "DUEL_SNAPSHOT_RATE",
                ..
            }
        ));
        assert_eq!(config_from(&[("DUEL_SNAPSHOT_RATE", "30")]).unwrap().snapshot_rate, 30);
    }

    #[test]
    fn test_non_positive_match_length_rejected() {
        assert!(config_from(&[("DUEL_MATCH_SECONDS", "0")]).is_err());
        assert!(config_from(&[("DUEL_MATCH_SECONDS", "-5")]).is_err());
    }

    #[test]
    fn test_unknown_fighter() {
        let err = config_from(&[("DUEL_PLAYER", "goku")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Roster(RosterError::UnknownFighter(_))
        ));
        assert_eq!(err.to_string(), "Unknown fighter: goku");
    }
}
