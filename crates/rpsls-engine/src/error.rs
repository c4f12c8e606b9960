//! Engine error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("Please enter a positive integer for rounds (got {rounds})")]
    InvalidConfig { rounds: i64 },

    #[error("Leaderboard at {} is unavailable: {source}", .path.display())]
    PersistenceFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read settings file {}: {source}", .path.display())]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid settings file {}: {source}", .path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
