use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("player name must be non-empty and may not contain commas or line breaks")]
    InvalidName,
    #[error("score storage failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: i64,
}

impl ScoreRecord {
    /// Build a record with a trimmed, line-safe player name.
    pub fn new(name: &str, score: i64) -> Result<Self, ScoreError> {
        let name = name.trim();
        if name.is_empty() || name.contains([',', '\n', '\r']) {
            return Err(ScoreError::InvalidName);
        }
        Ok(Self {
            name: name.to_string(),
            score,
        })
    }

    fn parse_line(line: &str) -> Option<Self> {
        let (name, score) = line.trim().split_once(',')?;
        let score = score.trim().parse().ok()?;
        Some(Self {
            name: name.to_string(),
            score,
        })
    }
}

/// Append-only score storage. `records` returns entries in append order.
pub trait ScoreStore: Send + Sync {
    fn append(&self, record: &ScoreRecord) -> Result<(), ScoreError>;
    fn records(&self) -> Result<Vec<ScoreRecord>, ScoreError>;
}

/// Scores kept as `name,score` lines in a text file.
pub struct FileScoreStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }
}

impl ScoreStore for FileScoreStore {
    fn append(&self, record: &ScoreRecord) -> Result<(), ScoreError> {
        let _guard = self.write_lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{},{}", record.name, record.score)?;
        Ok(())
    }

    fn records(&self) -> Result<Vec<ScoreRecord>, ScoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(content.lines().filter_map(ScoreRecord::parse_line).collect())
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryScoreStore {
    records: Mutex<Vec<ScoreRecord>>,
}

#[cfg(test)]
impl ScoreStore for MemoryScoreStore {
    fn append(&self, record: &ScoreRecord) -> Result<(), ScoreError> {
        self.records.lock().push(record.clone());
        Ok(())
    }

    fn records(&self) -> Result<Vec<ScoreRecord>, ScoreError> {
        Ok(self.records.lock().clone())
    }
}

/// Highest scores first, ties kept in storage order.
pub fn top_scores(mut records: Vec<ScoreRecord>, limit: usize) -> Vec<ScoreRecord> {
    records.sort_by(|a, b| b.score.cmp(&a.score));
    records.truncate(limit);
    records
}
