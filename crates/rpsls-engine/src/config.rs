//! Game settings
//!
//! Loaded from an optional JSON file; every field has a default so a
//! partial file is fine.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::strategy::Difficulty;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Rounds offered when the player does not choose
    pub rounds_target: u32,
    pub difficulty: Difficulty,
    /// Milliseconds between countdown ticks
    pub tick_interval_ms: u64,
    pub leaderboard_path: PathBuf,
    /// Fixed RNG seed for reproducible matches
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            rounds_target: 5,
            difficulty: Difficulty::Easy,
            tick_interval_ms: 1000,
            leaderboard_path: PathBuf::from("leaderboard.txt"),
            seed: None,
        }
    }
}

impl GameSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| GameError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| GameError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
