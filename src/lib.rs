//! TUI 2048 (workspace facade crate).
//!
//! Re-exports the game crates under `tui_2048::{core,engine,input,store,term,types}`
//! and adds the runtime [`config`] used by the binary.

pub mod config;

pub use tui_2048_core as core;
pub use tui_2048_engine as engine;
pub use tui_2048_input as input;
pub use tui_2048_store as store;
pub use tui_2048_term as term;
pub use tui_2048_types as types;

pub use config::Config;
