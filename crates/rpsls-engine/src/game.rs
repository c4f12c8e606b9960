//! Match state machine
//!
//! A match is an explicit [`MatchState`] value. Every transition takes the
//! state by value and hands back the next one, so a front-end (or a test)
//! can drive rounds without any shared mutable controller.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::moves::Move;
use crate::random::{seeded, uniform_move};
use crate::round::{resolve, MoveSource, RoundRecord, Score};
use crate::strategy::{choose_computer_move, Difficulty};

/// Seconds the player has to pick a move each round
pub const TIMEOUT_SECONDS: u32 = 5;

/// Sequence number of a round (1-based)
///
/// Ids keep increasing across matches started with [`MatchState::restart`],
/// so no id is ever reused by one controller. Submissions carry the round
/// they were made for; anything that does not match the current round is
/// dropped.
pub type RoundId = u32;

/// Match parameters, frozen when the match starts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub rounds_target: u32,
    pub difficulty: Difficulty,
    pub timeout_seconds: u32,
}

impl MatchConfig {
    /// Validate raw front-end input
    ///
    /// `rounds_target` arrives as a signed integer because the player types it.
    pub fn new(rounds_target: i64, difficulty: Difficulty) -> Result<Self> {
        let rounds = u32::try_from(rounds_target)
            .ok()
            .filter(|r| *r > 0)
            .ok_or(GameError::InvalidConfig { rounds: rounds_target })?;
        Ok(Self {
            rounds_target: rounds,
            difficulty,
            timeout_seconds: TIMEOUT_SECONDS,
        })
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rounds_target: 5,
            difficulty: Difficulty::Easy,
            timeout_seconds: TIMEOUT_SECONDS,
        }
    }
}

/// Where the match is in its lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    NotStarted,
    /// Waiting for the player's move (or the countdown) for `round`
    InRound { round: RoundId },
    Finished,
}

/// Final verdict of a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchSummary {
    UserWon,
    ComputerWon,
    Tied,
}

impl MatchSummary {
    pub fn from_score(score: &Score) -> Self {
        use std::cmp::Ordering;
        match score.user_wins.cmp(&score.computer_wins) {
            Ordering::Greater => MatchSummary::UserWon,
            Ordering::Less => MatchSummary::ComputerWon,
            Ordering::Equal => MatchSummary::Tied,
        }
    }
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MatchSummary::UserWon => "You won the game!",
            MatchSummary::ComputerWon => "Computer won the game!",
            MatchSummary::Tied => "It's a tie!",
        };
        f.write_str(text)
    }
}

/// Result of submitting a move
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// The round was resolved with this move
    Accepted {
        record: RoundRecord,
        /// Set when this round was the last one
        finished: Option<MatchSummary>,
    },
    /// The round was already resolved, or no match is running
    Stale,
}

/// Complete state of one match
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub config: MatchConfig,
    pub score: Score,
    pub rounds_played: u32,
    pub last_user_move: Option<Move>,
    pub history: Vec<RoundRecord>,
    pub phase: Phase,
    /// Id of this match's first round
    pub first_round: RoundId,
}

impl MatchState {
    /// State before any match has been started
    pub fn not_started() -> Self {
        Self::default()
    }

    /// Start a fresh match
    ///
    /// Fails with [`GameError::InvalidConfig`] when `rounds_target` is not a
    /// positive integer; no state is produced in that case.
    pub fn start(rounds_target: i64, difficulty: Difficulty) -> Result<Self> {
        Self::begin(rounds_target, difficulty, 1)
    }

    /// Start a fresh match that replaces this one
    ///
    /// Round ids continue after every id this match handed out, so a move or
    /// timeout still queued for the old match is stale in the new one.
    pub fn restart(&self, rounds_target: i64, difficulty: Difficulty) -> Result<Self> {
        Self::begin(rounds_target, difficulty, self.next_first_round())
    }

    fn begin(rounds_target: i64, difficulty: Difficulty, first_round: RoundId) -> Result<Self> {
        let config = MatchConfig::new(rounds_target, difficulty)?;
        log::info!(
            "match started: {} rounds, {} difficulty (first round id {})",
            config.rounds_target,
            config.difficulty,
            first_round
        );
        Ok(Self {
            config,
            phase: Phase::InRound { round: first_round },
            first_round,
            ..Self::default()
        })
    }

    /// First id past the current round and everything before it
    fn next_first_round(&self) -> RoundId {
        self.first_round
            .saturating_add(self.rounds_played)
            .saturating_add(1)
    }

    /// Round currently awaiting a move
    pub fn current_round(&self) -> Option<RoundId> {
        match self.phase {
            Phase::InRound { round } => Some(round),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Verdict for the score so far
    pub fn summary(&self) -> MatchSummary {
        MatchSummary::from_score(&self.score)
    }

    /// Move picked on the player's behalf when the countdown expires
    ///
    /// Independent of difficulty: always uniform.
    pub fn random_user_move<R: Rng + ?Sized>(rng: &mut R) -> Move {
        uniform_move(rng)
    }

    /// Resolve `round` with the player's move
    ///
    /// The first submission for a round wins. A submission for any other
    /// round, or outside a running match, returns [`Submission::Stale`] and
    /// leaves the state untouched.
    pub fn submit<R: Rng + ?Sized>(
        mut self,
        round: RoundId,
        user_move: Move,
        source: MoveSource,
        rng: &mut R,
    ) -> (Self, Submission) {
        if self.current_round() != Some(round) {
            log::debug!(
                "dropping {:?} move for round {} (phase {:?})",
                source,
                round,
                self.phase
            );
            return (self, Submission::Stale);
        }

        let computer_move = choose_computer_move(self.config.difficulty, self.last_user_move, rng);
        let (outcome, score) = resolve(user_move, computer_move, self.score);

        self.score = score;
        self.last_user_move = Some(user_move);
        self.rounds_played += 1;

        let record = RoundRecord {
            index: self.rounds_played,
            user_move,
            computer_move,
            outcome,
            source,
        };
        log::debug!("{}", record);
        self.history.push(record.clone());

        let finished = if self.rounds_played < self.config.rounds_target {
            self.phase = Phase::InRound { round: round + 1 };
            None
        } else {
            self.phase = Phase::Finished;
            let summary = self.summary();
            log::info!("match finished: {} ({})", summary, self.score);
            Some(summary)
        };

        (self, Submission::Accepted { record, finished })
    }
}

/// Play a whole match from a list of player moves
///
/// Rounds beyond the supplied moves are auto-played as timeouts.
/// Deterministic for a given seed.
pub fn replay_match(
    rounds_target: i64,
    difficulty: Difficulty,
    user_moves: &[Move],
    seed: u64,
) -> Result<MatchState> {
    let mut rng = seeded(seed);
    let mut state = MatchState::start(rounds_target, difficulty)?;
    let mut moves = user_moves.iter();

    while let Some(round) = state.current_round() {
        let (user_move, source) = match moves.next() {
            Some(m) => (*m, MoveSource::Player),
            None => (MatchState::random_user_move(&mut rng), MoveSource::Timeout),
        };
        let (next, _) = state.submit(round, user_move, source, &mut rng);
        state = next;
    }

    Ok(state)
}
