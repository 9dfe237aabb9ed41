//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. There is no
//! key-repeat handling: one press is one move, and moves arriving while the
//! previous one is still resolving are rejected by the engine.

pub mod map;

pub use tui_2048_types as types;

pub use map::{handle_event, handle_key_event, should_quit};
