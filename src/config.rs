//! Runtime configuration read from environment variables.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::store::{FileStorage, Store, StoreError};

/// Default data directory name, placed under `$HOME`.
pub const DATA_DIR_NAME: &str = ".tui-2048";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the session and history files.
    pub data_dir: PathBuf,
    /// When false nothing is written to disk.
    pub persist: bool,
    /// Fixed RNG seed; `None` seeds from the clock.
    pub seed: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DATA_DIR_NAME),
            persist: true,
            seed: None,
        }
    }
}

impl Config {
    /// Create from `T2048_DATA_DIR`, `T2048_NO_SAVE` and `T2048_SEED`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup("T2048_DATA_DIR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .or_else(|| lookup("HOME").map(|home| PathBuf::from(home).join(DATA_DIR_NAME)))
            .unwrap_or_else(|| PathBuf::from(DATA_DIR_NAME));

        let persist = !lookup("T2048_NO_SAVE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let seed = lookup("T2048_SEED").and_then(|s| s.trim().parse().ok());

        Self {
            data_dir,
            persist,
            seed,
        }
    }

    /// The configured seed, or one taken from the clock.
    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }

    /// Open the file-backed store, or an in-memory one when saving is off.
    pub fn open_store(&self) -> Result<Store, StoreError> {
        if !self.persist {
            return Ok(Store::in_memory());
        }
        Ok(Store::new(FileStorage::open(&self.data_dir)?))
    }
}
