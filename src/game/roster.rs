//! Fighter and arena identity tokens
//!
//! The simulation never touches assets. These tokens select a stat table and
//! carry asset paths that the presentation layer resolves on its own.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fighters available for selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FighterId {
    /// Quick on his feet, average hitter
    Naruto,
    /// Heavier and slower
    Luffy,
}

impl FighterId {
    pub const ALL: [FighterId; 2] = [FighterId::Naruto, FighterId::Luffy];

    /// Directory holding this fighter's pose textures
    pub fn asset_path(self) -> &'static str {
        match self {
            FighterId::Naruto => "characters/naruto",
            FighterId::Luffy => "characters/luffy",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FighterId::Naruto => "Naruto",
            FighterId::Luffy => "Luffy",
        }
    }
}

impl Default for FighterId {
    fn default() -> Self {
        Self::Naruto
    }
}

impl fmt::Display for FighterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for FighterId {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "naruto" => Ok(FighterId::Naruto),
            "luffy" => Ok(FighterId::Luffy),
            _ => Err(RosterError::UnknownFighter(s.to_string())),
        }
    }
}

/// Arenas available for selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArenaId {
    Konoha,
    ThousandSunny,
}

impl ArenaId {
    pub const ALL: [ArenaId; 2] = [ArenaId::Konoha, ArenaId::ThousandSunny];

    /// Background texture for this arena
    pub fn asset_path(self) -> &'static str {
        match self {
            ArenaId::Konoha => "arenas/konoha.png",
            ArenaId::ThousandSunny => "arenas/thousandsunny.png",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ArenaId::Konoha => "Konoha",
            ArenaId::ThousandSunny => "Thousand Sunny",
        }
    }
}

impl Default for ArenaId {
    fn default() -> Self {
        Self::Konoha
    }
}

impl fmt::Display for ArenaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ArenaId {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "konoha" => Ok(ArenaId::Konoha),
            "thousandsunny" => Ok(ArenaId::ThousandSunny),
            _ => Err(RosterError::UnknownArena(s.to_string())),
        }
    }
}

/// Roster lookup errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("Unknown fighter: {0}")]
    UnknownFighter(String),

    #[error("Unknown arena: {0}")]
    UnknownArena(String),
}
