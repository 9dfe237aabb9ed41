//! Persistence gateway - resumable sessions and score history
//!
//! The store keeps two independent JSON slots:
//!
//! - **Session** (`game2048`): the grid and score of the game in progress,
//!   stamped with the save time. A session older than 24 hours, or one that
//!   does not parse, is treated as if it had never been saved.
//! - **History** (`game2048Scores`): the last 10 finished games, newest first.
//!   Entries written by older versions as bare numbers are still read.
//!
//! Slots live behind the [`Storage`] trait: [`FileStorage`] for a data
//! directory on disk, [`MemoryStorage`] when persistence is disabled.
//! Time comes from a [`Clock`], so expiry is testable.
//!
//! # Example
//!
//! ```
//! use tui_2048_store::Store;
//!
//! let mut store = Store::in_memory();
//! store.save_session([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2]], 0).unwrap();
//! assert!(store.load_session().is_some());
//!
//! store.record_score(1024).unwrap();
//! store.record_score(512).unwrap();
//! assert_eq!(store.best_score(), 1024);
//! assert_eq!(store.score_history()[0].score(), 512);
//! ```

pub mod clock;
pub mod error;
pub mod records;
pub mod storage;
pub mod store;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use clock::{Clock, SystemClock};
pub use error::StoreError;
pub use records::{ScoreRecord, SessionRecord};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{Store, HISTORY_KEY, SESSION_KEY};
