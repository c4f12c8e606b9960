//! Full matches driven through the controller's command loop with real
//! countdown threads.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver};
use rpsls_engine::{
    Command, Difficulty, GameController, GameSettings, Leaderboard, LeaderboardReport, MatchEvent,
    Move, MoveSource,
};

fn settings(dir: &tempfile::TempDir, tick_interval_ms: u64) -> GameSettings {
    GameSettings {
        tick_interval_ms,
        leaderboard_path: dir.path().join("leaderboard.txt"),
        seed: Some(7),
        ..GameSettings::default()
    }
}

/// Collect events until the match finishes
fn until_finished(events: &Receiver<MatchEvent>) -> Vec<MatchEvent> {
    let mut seen = Vec::new();
    loop {
        let event = events
            .recv_timeout(Duration::from_secs(10))
            .expect("match did not finish in time");
        let done = matches!(event, MatchEvent::MatchFinished { .. });
        seen.push(event);
        if done {
            return seen;
        }
    }
}

#[test]
fn test_timeouts_auto_play_whole_match() {
    let dir = tempfile::tempdir().unwrap();
    let (cmd_tx, cmd_rx) = unbounded();
    let (event_tx, event_rx) = unbounded();

    let mut controller = GameController::new(&settings(&dir, 2), event_tx, cmd_tx.clone());
    let worker = thread::spawn(move || controller.run(cmd_rx));

    cmd_tx
        .send(Command::StartMatch { rounds_target: 3, difficulty: Difficulty::Hard })
        .unwrap();
    let events = until_finished(&event_rx);

    let rounds: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            MatchEvent::RoundResolved { record, .. } => Some(record.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(rounds.len(), 3);
    assert!(rounds.iter().all(|r| r.source == MoveSource::Timeout));
    assert_eq!(rounds.iter().map(|r| r.index).collect::<Vec<_>>(), vec![1, 2, 3]);

    let ticks = events
        .iter()
        .filter(|e| matches!(e, MatchEvent::CountdownTick { .. }))
        .count();
    assert_eq!(ticks, 15, "five ticks per round");

    cmd_tx.send(Command::Shutdown).unwrap();
    worker.join().unwrap();

    let board = Leaderboard::new(dir.path().join("leaderboard.txt"));
    assert_eq!(board.entries().unwrap().len(), 1);
}

#[test]
fn test_player_moves_and_late_timeouts() {
    let dir = tempfile::tempdir().unwrap();
    let (cmd_tx, cmd_rx) = unbounded();
    let (event_tx, event_rx) = unbounded();

    // Slow countdown so the player always answers first
    let mut controller = GameController::new(&settings(&dir, 60_000), event_tx, cmd_tx.clone());
    let worker = thread::spawn(move || controller.run(cmd_rx));

    cmd_tx
        .send(Command::StartMatch { rounds_target: 2, difficulty: Difficulty::Medium })
        .unwrap();
    cmd_tx
        .send(Command::UserMove { round: Some(1), user_move: Move::Rock })
        .unwrap();
    // Same round again, as if the timer fired right after the click
    cmd_tx.send(Command::Timeout { round: 1 }).unwrap();
    cmd_tx
        .send(Command::UserMove { round: Some(1), user_move: Move::Paper })
        .unwrap();
    cmd_tx
        .send(Command::UserMove { round: Some(2), user_move: Move::Lizard })
        .unwrap();

    let events = until_finished(&event_rx);
    let rounds: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            MatchEvent::RoundResolved { record, .. } => Some(record.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(rounds.len(), 2);
    assert_eq!(rounds[0].user_move, Move::Rock);
    assert_eq!(rounds[1].user_move, Move::Lizard);
    assert!(rounds.iter().all(|r| r.source == MoveSource::Player));
    // Medium counters rock in round two
    assert!(rpsls_engine::beats(rounds[1].computer_move, Move::Rock));

    cmd_tx.send(Command::ShowLeaderboard).unwrap();
    let report = loop {
        match event_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            MatchEvent::Leaderboard(report) => break report,
            _ => continue,
        }
    };
    match report {
        LeaderboardReport::Text(text) => assert_eq!(text.lines().count(), 1),
        LeaderboardReport::Empty => panic!("expected one entry"),
    }

    cmd_tx.send(Command::Shutdown).unwrap();
    worker.join().unwrap();
}

#[test]
fn test_invalid_start_over_channel() {
    let dir = tempfile::tempdir().unwrap();
    let (cmd_tx, cmd_rx) = unbounded();
    let (event_tx, event_rx) = unbounded();

    let mut controller = GameController::new(&settings(&dir, 60_000), event_tx, cmd_tx.clone());
    let worker = thread::spawn(move || {
        controller.run(cmd_rx);
        controller
    });

    cmd_tx
        .send(Command::StartMatch { rounds_target: 0, difficulty: Difficulty::Easy })
        .unwrap();
    cmd_tx.send(Command::Shutdown).unwrap();
    let controller = worker.join().unwrap();

    assert!(matches!(
        event_rx.recv_timeout(Duration::from_secs(5)).unwrap(),
        MatchEvent::InvalidConfig { .. }
    ));
    assert_eq!(controller.state().phase, rpsls_engine::Phase::NotStarted);
    assert_eq!(
        Leaderboard::new(dir.path().join("leaderboard.txt")).read_all().unwrap(),
        LeaderboardReport::Empty
    );
}
