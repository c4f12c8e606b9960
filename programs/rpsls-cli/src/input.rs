//! Parsing of typed player input

use rpsls_engine::{Difficulty, Move};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Move(Move),
    Start {
        rounds: Option<i64>,
        difficulty: Option<Difficulty>,
    },
    Leaderboard,
    Help,
    Quit,
}

pub const HELP: &str = "\
moves:  rock (r)  paper (p)  scissors (s)  lizard (l)  spock (k)
start [rounds] [easy|medium|hard]   begin a new match
board                                show the leaderboard
quit                                 leave the game";

/// Interpret one line; `Err` carries a message for the player
pub fn parse_line(line: &str) -> Result<Option<Input>, String> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(None);
    };
    let input = match first.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => Input::Quit,
        "b" | "board" | "leaderboard" => Input::Leaderboard,
        "h" | "help" | "?" => Input::Help,
        "start" | "new" => {
            let mut rounds = None;
            let mut difficulty = None;
            for word in words {
                if let Ok(n) = word.parse::<i64>() {
                    rounds = Some(n);
                } else {
                    difficulty = Some(word.parse::<Difficulty>().map_err(|e| e.to_string())?);
                }
            }
            Input::Start { rounds, difficulty }
        }
        other => Input::Move(other.parse::<Move>().map_err(|e| e.to_string())?),
    };
    Ok(Some(input))
}
