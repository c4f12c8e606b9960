//! Per-round countdown
//!
//! Each round gets its own countdown thread. The thread never touches match
//! state: it only posts [`Command::Tick`] and [`Command::Timeout`] back to the
//! controller's command channel, tagged with the round it was started for.
//! Cancelling disconnects the cancel channel, which wakes the thread at once.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, Sender, TryRecvError};

use crate::controller::Command;
use crate::game::RoundId;

/// Handle to a running countdown. Dropping it cancels the countdown.
#[derive(Debug)]
pub struct CountdownHandle {
    round: RoundId,
    cancel: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl CountdownHandle {
    /// Stop the countdown and wait for its thread to exit
    ///
    /// Once this returns no further message is sent for this countdown.
    pub fn cancel(&mut self) {
        if self.cancel.take().is_none() {
            return;
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("countdown thread for round {} panicked", self.round);
            }
        }
        log::debug!("countdown for round {} cancelled", self.round);
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Start a countdown of `seconds` ticks spaced `interval` apart
///
/// Sends `Tick { remaining }` for `seconds, seconds - 1, ..., 1`, then
/// `Timeout` one interval after the last tick.
pub fn start_countdown(
    round: RoundId,
    seconds: u32,
    interval: Duration,
    commands: Sender<Command>,
) -> io::Result<CountdownHandle> {
    let (cancel_tx, cancel_rx) = crossbeam_channel::bounded::<()>(1);
    let thread = thread::Builder::new()
        .name(format!("countdown-{}", round))
        .spawn(move || run_countdown(round, seconds, interval, cancel_rx, commands))?;
    log::debug!("countdown for round {} started ({}s)", round, seconds);
    Ok(CountdownHandle {
        round,
        cancel: Some(cancel_tx),
        thread: Some(thread),
    })
}

fn run_countdown(
    round: RoundId,
    seconds: u32,
    interval: Duration,
    cancel: crossbeam_channel::Receiver<()>,
    commands: Sender<Command>,
) {
    for remaining in (1..=seconds).rev() {
        if !matches!(cancel.try_recv(), Err(TryRecvError::Empty)) {
            return;
        }
        if commands.send(Command::Tick { round, remaining }).is_err() {
            return;
        }
        match cancel.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {}
            // Explicit cancel or handle dropped
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }
    }
    if commands.send(Command::Timeout { round }).is_err() {
        log::trace!("controller gone before round {} timed out", round);
    }
}
