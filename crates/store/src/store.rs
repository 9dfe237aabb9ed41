//! Persistence gateway: the resumable session and the score history.

use chrono::{DateTime, Local, Utc};
use log::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::core::{Grid, Rows};
use crate::error::StoreError;
use crate::records::{ScoreRecord, SessionRecord};
use crate::storage::{MemoryStorage, Storage};
use crate::types::{HISTORY_LIMIT, SESSION_TTL_MS};

/// Slot holding the resumable session.
pub const SESSION_KEY: &str = "game2048";

/// Slot holding the score history.
pub const HISTORY_KEY: &str = "game2048Scores";

/// Format of the human-readable history timestamp (local time).
pub const HISTORY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct Store {
    storage: Box<dyn Storage>,
    clock: Box<dyn Clock>,
}

impl Store {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self::with_clock(storage, SystemClock)
    }

    pub fn with_clock(storage: impl Storage + 'static, clock: impl Clock + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            clock: Box::new(clock),
        }
    }

    /// A store that forgets everything when the process exits.
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Overwrite the session slot with `rows` and `score`, stamped now.
    pub fn save_session(&mut self, rows: Rows, score: u64) -> Result<(), StoreError> {
        let record = SessionRecord {
            grid: rows,
            score,
            timestamp: self.now().timestamp_millis(),
        };
        let json = serde_json::to_string(&record)?;
        self.storage.write(SESSION_KEY, &json)
    }

    /// The saved session, if one exists, parses, and is younger than 24h.
    ///
    /// Every failure reads as "no session": a missing slot, unreadable
    /// storage, malformed JSON, a grid holding non-tile values, or an
    /// expired timestamp.
    pub fn load_session(&self) -> Option<SessionRecord> {
        let text = match self.storage.read(SESSION_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                warn!("[Store] Could not read saved session: {}", e);
                return None;
            }
        };

        let record: SessionRecord = match serde_json::from_str(&text) {
            Ok(record) => record,
            Err(e) => {
                warn!("[Store] Discarding malformed session: {}", e);
                return None;
            }
        };

        if !Grid::from_rows(record.grid).is_well_formed() {
            warn!("[Store] Discarding session with invalid tile values");
            return None;
        }

        let Some(age_ms) = self.now().timestamp_millis().checked_sub(record.timestamp) else {
            warn!("[Store] Discarding session with bogus timestamp {}", record.timestamp);
            return None;
        };
        if age_ms >= SESSION_TTL_MS {
            debug!("[Store] Saved session expired ({} ms old)", age_ms);
            return None;
        }

        Some(record)
    }

    /// Delete the session slot.
    pub fn clear_session(&mut self) -> Result<(), StoreError> {
        self.storage.remove(SESSION_KEY)
    }

    /// Prepend a finished game to the history and keep the newest 10.
    pub fn record_score(&mut self, score: u64) -> Result<(), StoreError> {
        let mut history = self.score_history();
        let timestamp = self
            .now()
            .with_timezone(&Local)
            .format(HISTORY_TIME_FORMAT)
            .to_string();
        history.insert(0, ScoreRecord::Entry { score, timestamp });
        history.truncate(HISTORY_LIMIT);

        let json = serde_json::to_string(&history)?;
        self.storage.write(HISTORY_KEY, &json)?;
        debug!("[Store] Recorded score {} ({} entries)", score, history.len());
        Ok(())
    }

    /// The history, newest first. Unreadable or malformed history is empty.
    pub fn score_history(&self) -> Vec<ScoreRecord> {
        let text = match self.storage.read(HISTORY_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("[Store] Could not read score history: {}", e);
                return Vec::new();
            }
        };

        serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!("[Store] Ignoring malformed score history: {}", e);
            Vec::new()
        })
    }

    /// Highest score in the history, legacy entries included; 0 when empty.
    pub fn best_score(&self) -> u64 {
        self.score_history()
            .iter()
            .map(ScoreRecord::score)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const HOUR_MS: i64 = 60 * 60 * 1000;

    fn manual_clock(start_ms: i64) -> (Rc<Cell<i64>>, impl Fn() -> DateTime<Utc>) {
        let now = Rc::new(Cell::new(start_ms));
        let handle = Rc::clone(&now);
        let clock = move || DateTime::<Utc>::from_timestamp_millis(handle.get()).unwrap();
        (now, clock)
    }

    fn rows() -> Rows {
        [[2, 0, 0, 0], [0, 4, 0, 0], [0, 0, 8, 0], [0, 0, 0, 16]]
    }

    #[test]
    fn session_round_trip_within_window() {
        let (now, clock) = manual_clock(1_700_000_000_000);
        let mut store = Store::with_clock(MemoryStorage::new(), clock);

        store.save_session(rows(), 28).unwrap();
        now.set(now.get() + 23 * HOUR_MS);

        let session = store.load_session().unwrap();
        assert_eq!(session.grid, rows());
        assert_eq!(session.score, 28);
        assert_eq!(session.timestamp, 1_700_000_000_000);
    }

    #[test]
    fn session_expires_after_24h() {
        let (now, clock) = manual_clock(1_700_000_000_000);
        let mut store = Store::with_clock(MemoryStorage::new(), clock);

        store.save_session(rows(), 28).unwrap();
        now.set(now.get() + 24 * HOUR_MS);
        assert_eq!(store.load_session(), None);
    }

    #[test]
    fn missing_session_is_none() {
        let store = Store::in_memory();
        assert_eq!(store.load_session(), None);
    }

    #[test]
    fn malformed_session_is_none() {
        let mut storage = MemoryStorage::new();
        storage.write(SESSION_KEY, "{not json").unwrap();
        assert_eq!(Store::new(storage).load_session(), None);
    }

    #[test]
    fn session_with_extreme_timestamp_is_none() {
        let mut storage = MemoryStorage::new();
        let json = format!(
            r#"{{"grid":[[2,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]],"score":0,"timestamp":{}}}"#,
            i64::MIN
        );
        storage.write(SESSION_KEY, &json).unwrap();
        assert_eq!(Store::new(storage).load_session(), None);
    }

    #[test]
    fn session_with_non_tile_values_is_none() {
        let mut storage = MemoryStorage::new();
        let record = SessionRecord {
            grid: [[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]],
            score: 0,
            timestamp: Utc::now().timestamp_millis(),
        };
        storage
            .write(SESSION_KEY, &serde_json::to_string(&record).unwrap())
            .unwrap();
        assert_eq!(Store::new(storage).load_session(), None);
    }

    #[test]
    fn session_with_oversized_tiles_is_none() {
        let mut storage = MemoryStorage::new();
        let record = SessionRecord {
            grid: [[1 << 31, 1 << 31, 0, 0], [0; 4], [0; 4], [0; 4]],
            score: 0,
            timestamp: Utc::now().timestamp_millis(),
        };
        storage
            .write(SESSION_KEY, &serde_json::to_string(&record).unwrap())
            .unwrap();
        assert_eq!(Store::new(storage).load_session(), None);
    }

    #[test]
    fn clear_session_removes_slot() {
        let mut store = Store::in_memory();
        store.save_session(rows(), 4).unwrap();
        assert!(store.load_session().is_some());
        store.clear_session().unwrap();
        assert_eq!(store.load_session(), None);
    }

    #[test]
    fn history_is_newest_first_and_capped() {
        let mut store = Store::in_memory();
        for score in 1..=12 {
            store.record_score(score * 100).unwrap();
        }
        let history = store.score_history();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].score(), 1200);
        assert_eq!(history[9].score(), 300);
        assert!(history.iter().all(|r| r.timestamp().is_some()));
    }

    #[test]
    fn best_score_counts_legacy_entries() {
        let mut storage = MemoryStorage::new();
        storage
            .write(HISTORY_KEY, r#"[{"score":256,"timestamp":"x"},4096,1024]"#)
            .unwrap();
        let mut store = Store::new(storage);
        assert_eq!(store.best_score(), 4096);

        // Recording keeps legacy entries in their original shape.
        store.record_score(8).unwrap();
        let history = store.score_history();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].score(), 8);
        assert_eq!(history[2], ScoreRecord::Legacy(4096));
    }

    #[test]
    fn empty_history_best_is_zero() {
        assert_eq!(Store::in_memory().best_score(), 0);
    }

    #[test]
    fn malformed_history_reads_empty() {
        let mut storage = MemoryStorage::new();
        storage.write(HISTORY_KEY, "[\"oops\"]").unwrap();
        let store = Store::new(storage);
        assert!(store.score_history().is_empty());
        assert_eq!(store.best_score(), 0);
    }

    #[test]
    fn history_timestamp_is_human_readable() {
        let (_now, clock) = manual_clock(1_700_000_000_000);
        let mut store = Store::with_clock(MemoryStorage::new(), clock);
        store.record_score(64).unwrap();

        let history = store.score_history();
        let stamp = history[0].timestamp().unwrap();
        // "YYYY-MM-DD HH:MM:SS" in local time.
        assert_eq!(stamp.len(), 19);
        assert!(stamp.starts_with("2023-11-1"));
    }
}
