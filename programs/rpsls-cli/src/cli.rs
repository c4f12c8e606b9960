use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rpsls_engine::Difficulty;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rock Paper Scissors Lizard Spock in the terminal")]
pub struct Cli {
    /// JSON settings file
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Leaderboard file (overrides settings)
    #[arg(long)]
    pub leaderboard: Option<PathBuf>,

    /// Fixed RNG seed (overrides settings)
    #[arg(long)]
    pub seed: Option<u64>,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Play interactively (default)
    Play {
        /// Rounds per match
        #[arg(short, long)]
        rounds: Option<i64>,
        /// easy, medium or hard
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
    },
    /// Print the leaderboard and exit
    Leaderboard,
}
