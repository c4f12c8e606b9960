//! Outbound events for the presentation layer
//!
//! Events are fire-and-forget: nothing a sink does can feed back into the
//! match state.

use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};

use crate::game::{MatchConfig, MatchSummary, RoundId};
use crate::leaderboard::LeaderboardReport;
use crate::round::{RoundRecord, Score};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// Round ids of this match count up from `first_round`
    MatchStarted { config: MatchConfig, first_round: RoundId },
    /// Seconds left to pick a move in `round`
    CountdownTick { round: RoundId, remaining: u32 },
    /// A round was resolved; drives win/lose/tie feedback
    RoundResolved { record: RoundRecord, score: Score },
    ScoreChanged(Score),
    MatchFinished { summary: MatchSummary, score: Score },
    /// Start was rejected; the previous state is kept
    InvalidConfig { message: String },
    Leaderboard(LeaderboardReport),
    /// The leaderboard could not be written or read
    PersistenceWarning { message: String },
}

/// Receiver of [`MatchEvent`]s
pub trait EventSink {
    fn emit(&mut self, event: MatchEvent);
}

impl EventSink for Vec<MatchEvent> {
    fn emit(&mut self, event: MatchEvent) {
        self.push(event);
    }
}

impl EventSink for Sender<MatchEvent> {
    fn emit(&mut self, event: MatchEvent) {
        // A departed front-end is not the engine's problem
        if self.send(event).is_err() {
            log::trace!("event receiver disconnected");
        }
    }
}

/// Sink that discards everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: MatchEvent) {}
}
