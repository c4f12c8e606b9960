//! WASM bindings for a browser front-end

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{beats, move_weights, replay_match, Difficulty, Move};
use crate::round::{resolve, Score};

fn parse_move(text: &str) -> Result<Move, JsError> {
    text.parse::<Move>().map_err(|e| JsError::new(&e.to_string()))
}

fn parse_difficulty(text: &str) -> Result<Difficulty, JsError> {
    text.parse::<Difficulty>().map_err(|e| JsError::new(&e.to_string()))
}

/// Whether move `a` defeats move `b`
#[wasm_bindgen]
pub fn move_beats(a: &str, b: &str) -> Result<bool, JsError> {
    Ok(beats(parse_move(a)?, parse_move(b)?))
}

/// Resolve one round against a score
///
/// # Arguments
/// * `user_move` - Player's move name
/// * `computer_move` - Computer's move name
/// * `score_json` - JSON serialized Score
///
/// # Returns
/// `{outcome, score}` object
#[wasm_bindgen]
pub fn resolve_round(user_move: &str, computer_move: &str, score_json: &str) -> Result<JsValue, JsError> {
    let score: Score = serde_json::from_str(score_json)
        .map_err(|e| JsError::new(&format!("Invalid score: {}", e)))?;
    let (outcome, score) = resolve(parse_move(user_move)?, parse_move(computer_move)?, score);

    serde_wasm_bindgen::to_value(&RoundResolution { outcome: outcome.to_string(), score })
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

#[derive(serde::Serialize)]
struct RoundResolution {
    outcome: String,
    score: Score,
}

/// Replay a seeded match with full round-by-round details
///
/// # Returns
/// JSON serialized MatchState
#[wasm_bindgen]
pub fn replay(
    rounds_target: i32,
    difficulty: &str,
    user_moves: Vec<String>,
    seed: u64,
) -> Result<JsValue, JsError> {
    let difficulty = parse_difficulty(difficulty)?;
    let moves = user_moves
        .iter()
        .map(|m| parse_move(m))
        .collect::<Result<Vec<_>, _>>()?;

    let state = replay_match(i64::from(rounds_target), difficulty, &moves, seed)
        .map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&state)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

#[derive(serde::Serialize)]
struct DifficultyInfo {
    id: String,
    description: String,
}

/// Get all difficulty levels
#[wasm_bindgen]
pub fn get_difficulties() -> Result<JsValue, JsError> {
    let levels: Vec<DifficultyInfo> = Difficulty::ALL
        .iter()
        .map(|d| DifficultyInfo {
            id: d.to_string(),
            description: d.describe().to_string(),
        })
        .collect();

    serde_wasm_bindgen::to_value(&levels)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Opponent selection weights over rock, paper, scissors, lizard, spock
#[wasm_bindgen]
pub fn get_move_weights(difficulty: &str, last_user_move: Option<String>) -> Result<Vec<f64>, JsError> {
    let difficulty = parse_difficulty(difficulty)?;
    let last = last_user_move.as_deref().map(parse_move).transpose()?;
    Ok(move_weights(difficulty, last).to_vec())
}

/// Sentence describing how `winner` defeats `loser`, e.g. "Rock crushes Scissors"
#[wasm_bindgen]
pub fn describe_win(winner: &str, loser: &str) -> Result<JsValue, JsError> {
    let (w, l) = (parse_move(winner)?, parse_move(loser)?);
    Ok(match w.verb_against(l) {
        Some(verb) => JsValue::from_str(&format!("{} {} {}", w, verb, l)),
        None => JsValue::NULL,
    })
}
