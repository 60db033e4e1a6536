//! Leaderboard of finished sessions
//!
//! Ranked by survival time; kept in memory for the life of the process.

use serde::{Deserialize, Serialize};

use crate::sim::Status;

/// Maximum number of results to keep
pub const MAX_ENTRIES: usize = 10;

/// Outcome of one finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub player: String,
    pub seconds_survived: u32,
    pub cycles_survived: u32,
    /// `Caught` or `Won`
    pub status: Status,
}

/// Results sorted by survival time, longest first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<SessionRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a survival time earns a spot
    pub fn qualifies(&self, seconds: u32) -> bool {
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries
            .last()
            .map(|e| seconds > e.seconds_survived)
            .unwrap_or(true)
    }

    /// Insert a result; returns the rank achieved (1-indexed) if it made the list
    ///
    /// Ties rank below existing entries with the same time.
    pub fn add(&mut self, record: SessionRecord) -> Option<usize> {
        if !record.status.is_terminal() || !self.qualifies(record.seconds_survived) {
            return None;
        }

        let pos = self
            .entries
            .iter()
            .position(|e| record.seconds_survived > e.seconds_survived)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, record);
        self.entries.truncate(MAX_ENTRIES);
        Some(pos + 1)
    }

    /// The best `n` results
    pub fn top(&self, n: usize) -> &[SessionRecord] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
