//! Persisted record shapes.
//!
//! Session slot:
//!
//! ```json
//! {"grid":[[2,0,0,0],[0,0,0,0],[0,0,4,0],[0,0,0,0]],"score":0,"timestamp":1760000000000}
//! ```
//!
//! History slot, newest first. Bare numbers are entries written by older
//! versions and are still accepted:
//!
//! ```json
//! [{"score":1024,"timestamp":"2026-10-18 21:04:11"},512]
//! ```

use serde::{Deserialize, Serialize};

use crate::core::Rows;

/// A resumable game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub grid: Rows,
    pub score: u64,
    /// Save time, epoch milliseconds.
    pub timestamp: i64,
}

/// One finished game in the score history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreRecord {
    Entry { score: u64, timestamp: String },
    /// Bare score from the old history format.
    Legacy(u64),
}

impl ScoreRecord {
    pub fn score(&self) -> u64 {
        match self {
            ScoreRecord::Entry { score, .. } => *score,
            ScoreRecord::Legacy(score) => *score,
        }
    }

    /// Human-readable save time; legacy entries have none.
    pub fn timestamp(&self) -> Option<&str> {
        match self {
            ScoreRecord::Entry { timestamp, .. } => Some(timestamp),
            ScoreRecord::Legacy(_) => None,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, ScoreRecord::Legacy(_))
    }
}
