//! Computer opponent strategies

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::moves::Move;
use crate::random::{choose_from, uniform_move, weighted_move};

/// Weight given to a move that defeats the player's last move (Hard)
pub const COUNTER_WEIGHT: f64 = 0.4;

/// Weight given to every other move (Hard)
pub const BASE_WEIGHT: f64 = 0.12;

/// Opponent difficulty level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Uniform random choice each round.
    #[default]
    Easy,
    /// Always counters the player's previous move.
    Medium,
    /// Leans toward countering the player's previous move.
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Human-readable description of how the opponent plays
    pub fn describe(self) -> &'static str {
        match self {
            Difficulty::Easy => "Picks any move at random.",
            Difficulty::Medium => "Plays a move that beats your previous move.",
            Difficulty::Hard => "Usually plays a move that beats your previous move, sometimes anything else.",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty {0:?} (expected easy, medium or hard)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Choose the computer's move for one round
///
/// # Arguments
/// * `difficulty` - Opponent level, frozen for the match
/// * `last_user_move` - The player's move in the previous round, if any
/// * `rng` - Random number generator for this match
pub fn choose_computer_move<R: Rng + ?Sized>(
    difficulty: Difficulty,
    last_user_move: Option<Move>,
    rng: &mut R,
) -> Move {
    match difficulty {
        Difficulty::Easy => uniform_move(rng),
        Difficulty::Medium => choose_medium(last_user_move, rng),
        Difficulty::Hard => weighted_move(rng, &hard_weights(last_user_move)),
    }
}

/// Medium: counter the last move outright, uniform before the first round
fn choose_medium<R: Rng + ?Sized>(last_user_move: Option<Move>, rng: &mut R) -> Move {
    match last_user_move {
        Some(last) => choose_from(rng, &last.defeated_by()),
        None => uniform_move(rng),
    }
}

/// Hard: counters weigh 0.4, everything else 0.12
fn hard_weights(last_user_move: Option<Move>) -> [f64; 5] {
    let counters = last_user_move.map(Move::defeated_by);
    Move::ALL.map(|c| match counters {
        Some(counters) if counters.contains(&c) => COUNTER_WEIGHT,
        _ => BASE_WEIGHT,
    })
}

/// Effective selection weights over [`Move::ALL`] for a difficulty
///
/// Easy and Medium are expressed as equal weights over their candidate sets.
pub fn move_weights(difficulty: Difficulty, last_user_move: Option<Move>) -> [f64; 5] {
    match (difficulty, last_user_move) {
        (Difficulty::Medium, Some(last)) => {
            let counters = last.defeated_by();
            Move::ALL.map(|c| if counters.contains(&c) { 1.0 } else { 0.0 })
        }
        (Difficulty::Hard, _) => hard_weights(last_user_move),
        _ => [1.0; 5],
    }
}
