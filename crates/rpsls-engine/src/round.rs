//! Round resolution and score keeping

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::beats;
use crate::moves::Move;

/// Outcome of a single round, from the player's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    UserWin,
    ComputerWin,
    Tie,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::UserWin => "You win!",
            Outcome::ComputerWin => "You lose!",
            Outcome::Tie => "It's a tie!",
        };
        f.write_str(text)
    }
}

/// Cumulative score for a match
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub user_wins: u32,
    pub computer_wins: u32,
    pub ties: u32,
}

impl Score {
    /// Rounds counted so far
    pub fn total(&self) -> u32 {
        self.user_wins + self.computer_wins + self.ties
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User: {}  Computer: {}  Ties: {}",
            self.user_wins, self.computer_wins, self.ties
        )
    }
}

/// Where the player's move came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveSource {
    /// Submitted by the player before the countdown expired
    Player,
    /// Picked at random when the countdown expired
    Timeout,
}

/// Record of one played round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round number
    pub index: u32,
    pub user_move: Move,
    pub computer_move: Move,
    pub outcome: Outcome,
    pub source: MoveSource,
}

impl fmt::Display for RoundRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Round {}: You - {} | Computer - {} | {}",
            self.index, self.user_move, self.computer_move, self.outcome
        )
    }
}

/// Resolve one round and return the outcome with the updated score
///
/// Exactly one counter of the score is incremented.
pub fn resolve(user_move: Move, computer_move: Move, score: Score) -> (Outcome, Score) {
    let mut score = score;
    let outcome = if user_move == computer_move {
        score.ties += 1;
        Outcome::Tie
    } else if beats(computer_move, user_move) {
        score.computer_wins += 1;
        Outcome::ComputerWin
    } else {
        score.user_wins += 1;
        Outcome::UserWin
    };
    (outcome, score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_move() -> impl Strategy<Value = Move> {
        prop::sample::select(Move::ALL.to_vec())
    }

    #[test]
    fn test_rock_beats_scissors() {
        let score0 = Score { user_wins: 2, computer_wins: 1, ties: 4 };
        let (outcome, score) = resolve(Move::Rock, Move::Scissors, score0);
        assert_eq!(outcome, Outcome::UserWin);
        assert_eq!(score.user_wins, 3);
        assert_eq!(score.computer_wins, 1);
        assert_eq!(score.ties, 4);
    }

    #[test]
    fn test_spock_spock_ties() {
        let score0 = Score::default();
        let (outcome, score) = resolve(Move::Spock, Move::Spock, score0);
        assert_eq!(outcome, Outcome::Tie);
        assert_eq!(score, Score { user_wins: 0, computer_wins: 0, ties: 1 });
    }

    #[test]
    fn test_computer_wins() {
        let (outcome, score) = resolve(Move::Paper, Move::Lizard, Score::default());
        assert_eq!(outcome, Outcome::ComputerWin);
        assert_eq!(score.computer_wins, 1);
    }

    #[test]
    fn test_record_display() {
        let record = RoundRecord {
            index: 2,
            user_move: Move::Rock,
            computer_move: Move::Paper,
            outcome: Outcome::ComputerWin,
            source: MoveSource::Player,
        };
        assert_eq!(record.to_string(), "Round 2: You - Rock | Computer - Paper | You lose!");
    }

    #[test]
    fn test_score_display() {
        let score = Score { user_wins: 1, computer_wins: 2, ties: 3 };
        assert_eq!(score.to_string(), "User: 1  Computer: 2  Ties: 3");
    }

    proptest! {
        #[test]
        fn prop_resolve_increments_exactly_one(user in any_move(), computer in any_move(),
                                               u in 0u32..1000, c in 0u32..1000, t in 0u32..1000) {
            let before = Score { user_wins: u, computer_wins: c, ties: t };
            let (outcome, after) = resolve(user, computer, before);
            prop_assert_eq!(after.total(), before.total() + 1);
            match outcome {
                Outcome::UserWin => prop_assert_eq!(after.user_wins, u + 1),
                Outcome::ComputerWin => prop_assert_eq!(after.computer_wins, c + 1),
                Outcome::Tie => prop_assert_eq!(after.ties, t + 1),
            }
        }

        #[test]
        fn prop_resolve_is_symmetric(a in any_move(), b in any_move()) {
            let (ab, _) = resolve(a, b, Score::default());
            let (ba, _) = resolve(b, a, Score::default());
            let mirrored = match ab {
                Outcome::UserWin => Outcome::ComputerWin,
                Outcome::ComputerWin => Outcome::UserWin,
                Outcome::Tie => Outcome::Tie,
            };
            prop_assert_eq!(ba, mirrored);
        }
    }
}
