//! Single-threaded game controller
//!
//! The controller owns the current [`MatchState`] and is the only thing that
//! mutates it. Front-end input and countdown firings all arrive as
//! [`Command`]s on one channel and are handled strictly in order, so two
//! rounds can never resolve concurrently. Round ids guard against a move and
//! a timeout racing for the same round: whichever is handled first resolves
//! it, the other is dropped as stale. A restart moves on to fresh round ids,
//! so a command queued for the abandoned match cannot touch the new one.

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};

use crate::error::Result;
use crate::events::{EventSink, MatchEvent};
use crate::game::{MatchState, RoundId, Submission};
use crate::leaderboard::{Leaderboard, LeaderboardEntry, LeaderboardReport};
use crate::moves::Move;
use crate::random::{from_entropy, seeded, GameRng};
use crate::round::MoveSource;
use crate::strategy::Difficulty;
use crate::timer::{start_countdown, CountdownHandle};
use crate::GameSettings;

/// Input to the controller
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    StartMatch {
        rounds_target: i64,
        difficulty: Difficulty,
    },
    /// Player picked a move. `round` is the round the front-end displayed;
    /// `None` means whatever round is current.
    UserMove {
        round: Option<RoundId>,
        user_move: Move,
    },
    Tick {
        round: RoundId,
        remaining: u32,
    },
    Timeout {
        round: RoundId,
    },
    ShowLeaderboard,
    Shutdown,
}

pub struct GameController<S: EventSink> {
    state: MatchState,
    rng: GameRng,
    leaderboard: Leaderboard,
    tick_interval: Duration,
    sink: S,
    commands: Sender<Command>,
    countdown: Option<CountdownHandle>,
}

impl<S: EventSink> GameController<S> {
    /// `commands` must feed the receiver later passed to [`run`](Self::run);
    /// countdowns post their ticks and timeouts through it.
    pub fn new(settings: &GameSettings, sink: S, commands: Sender<Command>) -> Self {
        let rng = match settings.seed {
            Some(seed) => seeded(seed),
            None => from_entropy(),
        };
        Self {
            state: MatchState::not_started(),
            rng,
            leaderboard: Leaderboard::new(settings.leaderboard_path.clone()),
            tick_interval: settings.tick_interval(),
            sink,
            commands,
            countdown: None,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Start (or restart) a match
    ///
    /// On invalid input the current state is kept and an
    /// [`MatchEvent::InvalidConfig`] is emitted.
    pub fn on_match_start(&mut self, rounds_target: i64, difficulty: Difficulty) -> Result<()> {
        let state = match self.state.restart(rounds_target, difficulty) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("match not started: {}", e);
                self.sink.emit(MatchEvent::InvalidConfig { message: e.to_string() });
                return Err(e);
            }
        };

        self.stop_countdown();
        self.state = state;
        self.sink.emit(MatchEvent::MatchStarted {
            config: self.state.config,
            first_round: self.state.first_round,
        });
        self.sink.emit(MatchEvent::ScoreChanged(self.state.score));
        self.begin_round();
        Ok(())
    }

    /// Player move for the current round
    pub fn on_user_move(&mut self, user_move: Move) -> Submission {
        match self.state.current_round() {
            Some(round) => self.on_user_move_for(round, user_move),
            None => {
                log::debug!("move {} ignored: no round in progress", user_move);
                Submission::Stale
            }
        }
    }

    /// Player move for a specific round
    pub fn on_user_move_for(&mut self, round: RoundId, user_move: Move) -> Submission {
        self.play(round, user_move, MoveSource::Player)
    }

    /// Countdown display refresh; never changes match state
    pub fn on_timer_tick(&mut self, round: RoundId, remaining: u32) {
        if self.state.current_round() == Some(round) {
            self.sink.emit(MatchEvent::CountdownTick { round, remaining });
        }
    }

    /// Countdown expired: play a random move for the player
    pub fn on_timeout(&mut self, round: RoundId) -> Submission {
        if self.state.current_round() != Some(round) {
            log::debug!("stale timeout for round {}", round);
            return Submission::Stale;
        }
        let user_move = MatchState::random_user_move(&mut self.rng);
        log::debug!("round {} timed out, auto-selected {}", round, user_move);
        self.play(round, user_move, MoveSource::Timeout)
    }

    pub fn on_show_leaderboard(&mut self) -> LeaderboardReport {
        let report = match self.leaderboard.read_all() {
            Ok(report) => report,
            Err(e) => {
                log::warn!("{}", e);
                self.sink.emit(MatchEvent::PersistenceWarning { message: e.to_string() });
                LeaderboardReport::Empty
            }
        };
        self.sink.emit(MatchEvent::Leaderboard(report.clone()));
        report
    }

    /// Dispatch one command. Returns `false` on [`Command::Shutdown`].
    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::StartMatch { rounds_target, difficulty } => {
                // Already reported through the sink
                let _ = self.on_match_start(rounds_target, difficulty);
            }
            Command::UserMove { round: Some(round), user_move } => {
                self.on_user_move_for(round, user_move);
            }
            Command::UserMove { round: None, user_move } => {
                self.on_user_move(user_move);
            }
            Command::Tick { round, remaining } => self.on_timer_tick(round, remaining),
            Command::Timeout { round } => {
                self.on_timeout(round);
            }
            Command::ShowLeaderboard => {
                self.on_show_leaderboard();
            }
            Command::Shutdown => {
                self.stop_countdown();
                return false;
            }
        }
        true
    }

    /// Handle commands until [`Command::Shutdown`]
    ///
    /// The controller holds a sender of its own for countdowns, so the
    /// channel never disconnects while it runs.
    pub fn run(&mut self, commands: Receiver<Command>) {
        for command in commands.iter() {
            if !self.handle(command) {
                break;
            }
        }
        self.stop_countdown();
        log::debug!("controller stopped");
    }

    fn play(&mut self, round: RoundId, user_move: Move, source: MoveSource) -> Submission {
        if self.state.current_round() != Some(round) {
            log::debug!("stale {:?} move {} for round {}", source, user_move, round);
            return Submission::Stale;
        }
        // The round is ours now; a pending timeout must not fire for it
        self.stop_countdown();

        let state = std::mem::take(&mut self.state);
        let (state, submission) = state.submit(round, user_move, source, &mut self.rng);
        self.state = state;

        if let Submission::Accepted { record, finished } = &submission {
            self.sink.emit(MatchEvent::RoundResolved {
                record: record.clone(),
                score: self.state.score,
            });
            self.sink.emit(MatchEvent::ScoreChanged(self.state.score));
            match finished {
                Some(summary) => {
                    self.sink.emit(MatchEvent::MatchFinished {
                        summary: *summary,
                        score: self.state.score,
                    });
                    self.record_result();
                }
                None => self.begin_round(),
            }
        }
        submission
    }

    fn record_result(&mut self) {
        let entry = LeaderboardEntry::from(self.state.score);
        if let Err(e) = self.leaderboard.append(&entry) {
            log::warn!("could not save score: {}", e);
            self.sink.emit(MatchEvent::PersistenceWarning { message: e.to_string() });
        }
    }

    fn begin_round(&mut self) {
        let Some(round) = self.state.current_round() else {
            return;
        };
        match start_countdown(
            round,
            self.state.config.timeout_seconds,
            self.tick_interval,
            self.commands.clone(),
        ) {
            Ok(handle) => self.countdown = Some(handle),
            Err(e) => log::error!("could not start countdown for round {}: {}", round, e),
        }
    }

    fn stop_countdown(&mut self) {
        if let Some(mut countdown) = self.countdown.take() {
            countdown.cancel();
        }
    }
}

impl<S: EventSink> Drop for GameController<S> {
    fn drop(&mut self) {
        self.stop_countdown();
    }
}
