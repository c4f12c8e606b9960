//! Append-only leaderboard log
//!
//! One line per completed match: `User: <n> | Computer: <n> | Ties: <n>`.
//! Lines are never rewritten or reordered.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::round::Score;

/// Text shown when no match has been recorded yet
pub const NO_ENTRIES: &str = "No scores yet.";

/// Final score of one completed match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_wins: u32,
    pub computer_wins: u32,
    pub ties: u32,
}

impl From<Score> for LeaderboardEntry {
    fn from(score: Score) -> Self {
        Self {
            user_wins: score.user_wins,
            computer_wins: score.computer_wins,
            ties: score.ties,
        }
    }
}

impl fmt::Display for LeaderboardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User: {} | Computer: {} | Ties: {}",
            self.user_wins, self.computer_wins, self.ties
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("malformed leaderboard line {0:?}")]
pub struct ParseEntryError(pub String);

impl FromStr for LeaderboardEntry {
    type Err = ParseEntryError;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let malformed = || ParseEntryError(line.to_string());
        let mut fields = line.trim().split(" | ");
        let mut field = |label: &str| -> std::result::Result<u32, ParseEntryError> {
            fields
                .next()
                .and_then(|f| f.strip_prefix(label))
                .and_then(|n| n.trim().parse().ok())
                .ok_or_else(malformed)
        };
        let entry = Self {
            user_wins: field("User:")?,
            computer_wins: field("Computer:")?,
            ties: field("Ties:")?,
        };
        if fields.next().is_some() {
            return Err(malformed());
        }
        Ok(entry)
    }
}

/// Contents of the leaderboard as shown to the player
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaderboardReport {
    /// No match has been recorded yet
    Empty,
    /// The full log, verbatim
    Text(String),
}

impl fmt::Display for LeaderboardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardReport::Empty => f.write_str(NO_ENTRIES),
            LeaderboardReport::Text(text) => f.write_str(text),
        }
    }
}

/// Totals across every recorded match
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardStats {
    pub matches: u32,
    pub user_won: u32,
    pub computer_won: u32,
    pub drawn: u32,
}

impl LeaderboardStats {
    pub fn from_entries(entries: &[LeaderboardEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut stats, e| {
            stats.matches += 1;
            match e.user_wins.cmp(&e.computer_wins) {
                std::cmp::Ordering::Greater => stats.user_won += 1,
                std::cmp::Ordering::Less => stats.computer_won += 1,
                std::cmp::Ordering::Equal => stats.drawn += 1,
            }
            stats
        })
    }
}

/// Leaderboard stored as a text file
#[derive(Clone, Debug)]
pub struct Leaderboard {
    path: PathBuf,
}

impl Leaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn failure(&self, source: io::Error) -> GameError {
        GameError::PersistenceFailure {
            path: self.path.clone(),
            source,
        }
    }

    /// Append one entry as a newline-terminated line
    pub fn append(&self, entry: &LeaderboardEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.failure(e))?;
        // Single write so the line lands atomically under O_APPEND
        let line = format!("{}\n", entry);
        file.write_all(line.as_bytes()).map_err(|e| self.failure(e))?;
        log::debug!("leaderboard {}: appended {}", self.path.display(), entry);
        Ok(())
    }

    /// Full log text, or [`LeaderboardReport::Empty`] if nothing was recorded
    pub fn read_all(&self) -> Result<LeaderboardReport> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(LeaderboardReport::Text(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(LeaderboardReport::Empty),
            Err(e) => Err(self.failure(e)),
        }
    }

    /// Parsed entries in file order; malformed lines are skipped
    pub fn entries(&self) -> Result<Vec<LeaderboardEntry>> {
        let text = match self.read_all()? {
            LeaderboardReport::Empty => return Ok(Vec::new()),
            LeaderboardReport::Text(text) => text,
        };
        let entries = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match line.parse::<LeaderboardEntry>() {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("leaderboard {}: {}", self.path.display(), e);
                    None
                }
            })
            .collect();
        Ok(entries)
    }

    pub fn stats(&self) -> Result<LeaderboardStats> {
        Ok(LeaderboardStats::from_entries(&self.entries()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(u: u32, c: u32, t: u32) -> LeaderboardEntry {
        LeaderboardEntry { user_wins: u, computer_wins: c, ties: t }
    }

    #[test]
    fn test_entry_format() {
        assert_eq!(entry(3, 1, 1).to_string(), "User: 3 | Computer: 1 | Ties: 1");
    }

    #[test]
    fn test_entry_parse() {
        assert_eq!("User: 3 | Computer: 1 | Ties: 1".parse(), Ok(entry(3, 1, 1)));
        assert_eq!("User: 0 | Computer: 12 | Ties: 0\n".parse(), Ok(entry(0, 12, 0)));
        assert!("User: 3 | Computer: 1".parse::<LeaderboardEntry>().is_err());
        assert!("User: x | Computer: 1 | Ties: 1".parse::<LeaderboardEntry>().is_err());
        assert!("User: 1 | Computer: 1 | Ties: 1 | Extra: 2".parse::<LeaderboardEntry>().is_err());
    }

    #[test]
    fn test_missing_file_is_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let board = Leaderboard::new(dir.path().join("leaderboard.txt"));
        assert_eq!(board.read_all().unwrap(), LeaderboardReport::Empty);
        assert_eq!(board.read_all().unwrap().to_string(), NO_ENTRIES);
        assert!(board.entries().unwrap().is_empty());
    }

    #[test]
    fn test_append_then_read_last_line() {
        let dir = tempfile::tempdir().unwrap();
        let board = Leaderboard::new(dir.path().join("leaderboard.txt"));
        board.append(&entry(1, 2, 3)).unwrap();
        board.append(&entry(4, 0, 1)).unwrap();

        let report = board.read_all().unwrap();
        let text = report.to_string();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().last(), Some("User: 4 | Computer: 0 | Ties: 1"));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_append_preserves_existing_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.txt");
        fs::write(&path, "User: 9 | Computer: 9 | Ties: 9\n").unwrap();

        let board = Leaderboard::new(&path);
        board.append(&entry(0, 1, 0)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "User: 9 | Computer: 9 | Ties: 9\nUser: 0 | Computer: 1 | Ties: 0\n"
        );
    }

    #[test]
    fn test_append_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let board = Leaderboard::new(dir.path().join("missing").join("leaderboard.txt"));
        match board.append(&entry(1, 0, 0)) {
            Err(GameError::PersistenceFailure { .. }) => {}
            other => panic!("expected PersistenceFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_entries_skip_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.txt");
        fs::write(
            &path,
            "User: 2 | Computer: 1 | Ties: 0\ngarbage\n\nUser: 0 | Computer: 0 | Ties: 3\n",
        )
        .unwrap();
        let board = Leaderboard::new(&path);
        assert_eq!(board.entries().unwrap(), vec![entry(2, 1, 0), entry(0, 0, 3)]);
    }

    #[test]
    fn test_stats() {
        let stats = LeaderboardStats::from_entries(&[entry(2, 1, 0), entry(0, 3, 0), entry(1, 1, 1)]);
        assert_eq!(
            stats,
            LeaderboardStats { matches: 3, user_won: 1, computer_won: 1, drawn: 1 }
        );
    }
}
