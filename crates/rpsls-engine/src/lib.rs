//! Rock Paper Scissors Lizard Spock engine
//!
//! Core game logic for a single player against an adaptive computer
//! opponent: the rules, the opponent's strategies, round resolution, the
//! match state machine with its per-round countdown, and the leaderboard.
//! This crate is compiled to:
//! - Native (for the terminal front-end)
//! - WASM (for a browser front-end)

mod config;
mod controller;
mod error;
mod events;
mod game;
mod leaderboard;
mod moves;
mod random;
mod round;
mod strategy;
mod timer;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::GameSettings;
pub use controller::{Command, GameController};
pub use error::{GameError, Result};
pub use events::{EventSink, MatchEvent, NullSink};
pub use game::{replay_match, MatchConfig, MatchState, MatchSummary, Phase, RoundId, Submission, TIMEOUT_SECONDS};
pub use leaderboard::{Leaderboard, LeaderboardEntry, LeaderboardReport, LeaderboardStats, ParseEntryError, NO_ENTRIES};
pub use moves::{Move, ParseMoveError};
pub use random::{from_entropy, seeded, GameRng};
pub use round::{resolve, MoveSource, Outcome, RoundRecord, Score};
pub use strategy::{choose_computer_move, move_weights, Difficulty, ParseDifficultyError, BASE_WEIGHT, COUNTER_WEIGHT};
pub use timer::{start_countdown, CountdownHandle};

/// Whether `a` defeats `b`
///
/// Each move defeats exactly two others; a move never defeats itself.
pub fn beats(a: Move, b: Move) -> bool {
    a.defeats().contains(&b)
}
