//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: views draw into a plain
//! [`FrameBuffer`] and [`TerminalRenderer`] flushes it with crossterm,
//! emitting only the cells that changed since the previous frame.
//!
//! No ratatui widgets or layout; the board is laid out by hand so each tile
//! keeps a fixed, roughly square footprint.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_colors, GameView, ScorePanel, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
