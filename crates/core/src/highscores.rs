//! High-score ledger - the best finished runs, persisted as JSON

use std::fs;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::HighScoreError;
use crate::types::MAX_HIGH_SCORES;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    pub level: u32,
    pub minutes: u64,
    pub seconds: u64,
    pub date: NaiveDate,
}

/// Top runs, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScoreLedger {
    entries: Vec<HighScoreEntry>,
}

impl HighScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert `entry` and keep the best `MAX_HIGH_SCORES`.
    ///
    /// Returns the entry's rank (0-based) or `None` if it did not make the list.
    /// Ties keep earlier entries ahead.
    pub fn record(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let rank = self
            .entries
            .iter()
            .position(|e| e.score < entry.score)
            .unwrap_or(self.entries.len());
        if rank >= MAX_HIGH_SCORES {
            return None;
        }
        self.entries.insert(rank, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Load a ledger; a missing file yields an empty one.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HighScoreError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no high-score file at {}", path.display());
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(HighScoreError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        let mut ledger: Self =
            serde_json::from_str(&text).map_err(|source| HighScoreError::Json {
                path: path.display().to_string(),
                source,
            })?;
        // Files edited by hand may be unsorted or too long.
        ledger.entries.sort_by(|a, b| b.score.cmp(&a.score));
        ledger.entries.truncate(MAX_HIGH_SCORES);
        Ok(ledger)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), HighScoreError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| HighScoreError::Json {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(path, json).map_err(|source| HighScoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!("saved {} high score(s) to {}", self.len(), path.display());
        Ok(())
    }
}
