use std::io;

/// Storage backend failure.
///
/// The engine never treats these as fatal: it logs them and keeps playing
/// from memory.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
