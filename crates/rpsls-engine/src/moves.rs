//! Move definitions and the beats table

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A move in Rock Paper Scissors Lizard Spock
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
    Lizard,
    Spock,
}

impl Move {
    /// All five moves in canonical order
    pub const ALL: [Move; 5] = [
        Move::Rock,
        Move::Paper,
        Move::Scissors,
        Move::Lizard,
        Move::Spock,
    ];

    /// The two moves this move defeats
    pub fn defeats(self) -> [Move; 2] {
        match self {
            Move::Rock => [Move::Scissors, Move::Lizard],
            Move::Paper => [Move::Rock, Move::Spock],
            Move::Scissors => [Move::Paper, Move::Lizard],
            Move::Lizard => [Move::Paper, Move::Spock],
            Move::Spock => [Move::Rock, Move::Scissors],
        }
    }

    /// The two moves that defeat this move
    pub fn defeated_by(self) -> [Move; 2] {
        let mut counters = [self; 2];
        let mut found = 0;
        for candidate in Move::ALL {
            if candidate.defeats().contains(&self) {
                counters[found] = candidate;
                found += 1;
            }
        }
        debug_assert_eq!(found, 2);
        counters
    }

    /// Verb describing how `self` defeats `other`, if it does
    ///
    /// e.g. `Scissors.verb_against(Paper) == Some("cuts")`
    pub fn verb_against(self, other: Move) -> Option<&'static str> {
        let verb = match (self, other) {
            (Move::Rock, Move::Scissors) => "crushes",
            (Move::Rock, Move::Lizard) => "crushes",
            (Move::Paper, Move::Rock) => "covers",
            (Move::Paper, Move::Spock) => "disproves",
            (Move::Scissors, Move::Paper) => "cuts",
            (Move::Scissors, Move::Lizard) => "decapitates",
            (Move::Lizard, Move::Paper) => "eats",
            (Move::Lizard, Move::Spock) => "poisons",
            (Move::Spock, Move::Rock) => "vaporizes",
            (Move::Spock, Move::Scissors) => "smashes",
            _ => return None,
        };
        Some(verb)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
            Move::Lizard => "Lizard",
            Move::Spock => "Spock",
        };
        f.write_str(title)
    }
}

/// Text that does not name a move
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown move {0:?} (expected rock, paper, scissors, lizard or spock)")]
pub struct ParseMoveError(pub String);

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Accepts the lowercase name in any case, or the shortcuts r/p/s/l/k
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" | "r" => Ok(Move::Rock),
            "paper" | "p" => Ok(Move::Paper),
            "scissors" | "s" => Ok(Move::Scissors),
            "lizard" | "l" => Ok(Move::Lizard),
            "spock" | "k" => Ok(Move::Spock),
            _ => Err(ParseMoveError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_move_defeats_two_others() {
        for m in Move::ALL {
            let beaten = m.defeats();
            assert_ne!(beaten[0], beaten[1]);
            assert!(!beaten.contains(&m), "{} must not defeat itself", m);
        }
    }

    #[test]
    fn test_defeated_by_is_inverse_of_defeats() {
        for m in Move::ALL {
            for counter in m.defeated_by() {
                assert!(counter.defeats().contains(&m));
            }
        }
        assert_eq!(Move::Rock.defeated_by(), [Move::Paper, Move::Spock]);
        assert_eq!(Move::Spock.defeated_by(), [Move::Paper, Move::Lizard]);
    }

    #[test]
    fn test_verb_only_for_winning_pairs() {
        for a in Move::ALL {
            for b in Move::ALL {
                assert_eq!(a.verb_against(b).is_some(), a.defeats().contains(&b));
            }
        }
        assert_eq!(Move::Lizard.verb_against(Move::Spock), Some("poisons"));
    }

    #[test]
    fn test_parse_names_and_shortcuts() {
        assert_eq!("rock".parse::<Move>(), Ok(Move::Rock));
        assert_eq!(" SPOCK ".parse::<Move>(), Ok(Move::Spock));
        assert_eq!("k".parse::<Move>(), Ok(Move::Spock));
        assert_eq!("L".parse::<Move>(), Ok(Move::Lizard));
        assert!("dynamite".parse::<Move>().is_err());
    }

    #[test]
    fn test_display_is_title_case() {
        assert_eq!(Move::Scissors.to_string(), "Scissors");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Move::Lizard).unwrap();
        assert_eq!(json, "\"lizard\"");
        let back: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Move::Lizard);
    }
}
