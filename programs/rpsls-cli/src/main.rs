use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{unbounded, Sender};
use rpsls_engine::{
    Command as EngineCommand, Difficulty, GameController, GameSettings, Leaderboard, MatchEvent,
    MoveSource, RoundId,
};

mod cli;
mod input;

use cli::{Cli, Command};
use input::{parse_line, Input, HELP};

fn main() {
    setup_logging();
    run().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    match cli.command.unwrap_or(Command::Play { rounds: None, difficulty: None }) {
        Command::Leaderboard => print_leaderboard(&settings),
        Command::Play { rounds, difficulty } => {
            let rounds = rounds.unwrap_or(i64::from(settings.rounds_target));
            let difficulty = difficulty.unwrap_or(settings.difficulty);
            play(settings, rounds, difficulty)
        }
    }
}

fn load_settings(cli: &Cli) -> Result<GameSettings> {
    let mut settings = match &cli.settings {
        Some(path) => GameSettings::load(path)?,
        None => GameSettings::default(),
    };
    if let Some(path) = &cli.leaderboard {
        settings.leaderboard_path = path.clone();
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    log::debug!("settings: {:?}", settings);
    Ok(settings)
}

fn print_leaderboard(settings: &GameSettings) -> Result<()> {
    let board = Leaderboard::new(settings.leaderboard_path.clone());
    println!("{}", board.read_all()?);
    let stats = board.stats()?;
    if stats.matches > 0 {
        println!(
            "{} matches: you won {}, computer won {}, {} tied",
            stats.matches, stats.user_won, stats.computer_won, stats.drawn
        );
    }
    Ok(())
}

fn play(settings: GameSettings, rounds: i64, difficulty: Difficulty) -> Result<()> {
    let (cmd_tx, cmd_rx) = unbounded();
    let (event_tx, event_rx) = unbounded();
    let current_round = Arc::new(AtomicU32::new(0));

    let mut controller = GameController::new(&settings, event_tx, cmd_tx.clone());
    let engine = thread::Builder::new()
        .name("controller".into())
        .spawn(move || controller.run(cmd_rx))
        .context("failed to start game controller")?;

    println!("{}", HELP);
    cmd_tx
        .send(EngineCommand::StartMatch { rounds_target: rounds, difficulty })
        .context("game controller stopped")?;

    // stdin blocks, so it is never joined; the process exits once the controller stops
    let reader_round = Arc::clone(&current_round);
    thread::Builder::new()
        .name("stdin".into())
        .spawn(move || read_input(cmd_tx, reader_round, rounds, difficulty))
        .context("failed to start input reader")?;

    let mut first_round = 1;
    for event in event_rx.iter() {
        render(&event, &current_round, &mut first_round);
    }

    engine
        .join()
        .map_err(|_| anyhow::anyhow!("game controller panicked"))?;
    Ok(())
}

fn read_input(
    commands: Sender<EngineCommand>,
    current_round: Arc<AtomicU32>,
    default_rounds: i64,
    default_difficulty: Difficulty,
) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let command = match parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(Input::Help)) => {
                println!("{}", HELP);
                continue;
            }
            Ok(Some(Input::Quit)) => break,
            Ok(Some(Input::Leaderboard)) => EngineCommand::ShowLeaderboard,
            Ok(Some(Input::Start { rounds, difficulty })) => EngineCommand::StartMatch {
                rounds_target: rounds.unwrap_or(default_rounds),
                difficulty: difficulty.unwrap_or(default_difficulty),
            },
            Ok(Some(Input::Move(user_move))) => {
                let round = match current_round.load(Ordering::Acquire) {
                    0 => None,
                    n => Some(n),
                };
                EngineCommand::UserMove { round, user_move }
            }
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };
        if commands.send(command).is_err() {
            return;
        }
    }
    let _ = commands.send(EngineCommand::Shutdown);
}

/// `current_round` holds the id user moves are tagged with; `first_round`
/// maps ids back to the round numbers the player sees.
fn render(event: &MatchEvent, current_round: &AtomicU32, first_round: &mut RoundId) {
    match event {
        MatchEvent::MatchStarted { config, first_round: first } => {
            *first_round = *first;
            current_round.store(*first, Ordering::Release);
            println!(
                "\nNew match: best of {} on {} ({})",
                config.rounds_target,
                config.difficulty,
                config.difficulty.describe()
            );
        }
        MatchEvent::CountdownTick { round, remaining } => {
            current_round.store(*round, Ordering::Release);
            let number = round.saturating_sub(*first_round) + 1;
            print!("\rRound {}, time left: {}s ", number, remaining);
            let _ = io::stdout().flush();
        }
        MatchEvent::RoundResolved { record, .. } => {
            current_round.store(*first_round + record.index, Ordering::Release);
            if record.source == MoveSource::Timeout {
                println!("\nTime's up! Auto-selected {}", record.user_move);
            } else {
                println!();
            }
            println!("{}", record);
            let flavour = record
                .user_move
                .verb_against(record.computer_move)
                .map(|verb| format!("{} {} {}", record.user_move, verb, record.computer_move))
                .or_else(|| {
                    record
                        .computer_move
                        .verb_against(record.user_move)
                        .map(|verb| format!("{} {} {}", record.computer_move, verb, record.user_move))
                });
            if let Some(line) = flavour {
                println!("  {}", line);
            }
        }
        MatchEvent::ScoreChanged(score) => println!("{}", score),
        MatchEvent::MatchFinished { summary, .. } => {
            current_round.store(0, Ordering::Release);
            println!("\nGame over: {}", summary);
            println!("Type `start` to play again, `board` for the leaderboard, `quit` to leave.");
        }
        MatchEvent::InvalidConfig { message } => eprintln!("Invalid input: {}", message),
        MatchEvent::Leaderboard(report) => println!("\nLeaderboard\n{}", report),
        MatchEvent::PersistenceWarning { message } => eprintln!("Warning: {}", message),
    }
}
