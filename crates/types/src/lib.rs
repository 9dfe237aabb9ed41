//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, persistence, terminal rendering).
//!
//! # Grid Dimensions
//!
//! The playfield is a fixed 4x4 grid:
//!
//! - **Columns**: `x` in `0..4`, left to right
//! - **Rows**: `y` in `0..4`, top to bottom
//!
//! # Tuning Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRID_SIZE` | 4 | Cells per row and per column |
//! | `INITIAL_TILES` | 2 | Tiles spawned when a game starts |
//! | `TWO_PROBABILITY` | 0.9 | Chance a spawned tile is a 2 (otherwise 4) |
//! | `HISTORY_LIMIT` | 10 | Score history entries kept |
//! | `SESSION_TTL_MS` | 86_400_000 | Saved session validity window (24h) |
//! | `NEW_TILE_DELAY_MS` | 100 | Presentation pause between slide and spawn |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, GRID_SIZE};
//!
//! // Parse a direction (case-insensitive)
//! let dir = Direction::from_str("Left").unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert_eq!(dir.vector(), (-1, 0));
//!
//! // Unknown directions are rejected, not guessed
//! assert_eq!(Direction::from_str("diagonal"), None);
//!
//! // Parse a game action
//! let action = GameAction::from_str("moveUp").unwrap();
//! assert_eq!(action, GameAction::Move(Direction::Up));
//!
//! assert_eq!(GRID_SIZE, 4);
//! ```

/// Cells per row and per column.
pub const GRID_SIZE: usize = 4;

/// Total number of cells on the grid.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Largest tile a 4x4 grid can produce (2^17). Restored grids may not exceed
/// it, which keeps every merge well inside `u32`.
pub const MAX_TILE: u32 = 1 << 17;

/// Tiles placed when a new game starts.
pub const INITIAL_TILES: usize = 2;

/// Probability that a spawned tile is a 2 rather than a 4.
pub const TWO_PROBABILITY: f64 = 0.9;

/// Number of finished-game scores kept in the history.
pub const HISTORY_LIMIT: usize = 10;

/// A saved session older than this is discarded on load (24 hours).
pub const SESSION_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// Pause between the slide of a move and the spawn of the next tile.
///
/// Purely a presentation delay; the engine is valid with zero delay.
pub const NEW_TILE_DELAY_MS: u64 = 100;


/// The four move directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit vector `(dx, dy)` of the direction. `y` grows downward.
    pub fn vector(self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// Parse direction from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("right"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("DOWN"), Some(Direction::Down));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// A grid coordinate. `x` is the column, `y` the row.
///
/// Signed so that a walk can step one cell past an edge and be rejected by
/// bounds checks instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// The neighbouring coordinate one step along `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.vector();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn in_bounds(self) -> bool {
        (0..GRID_SIZE as i8).contains(&self.x) && (0..GRID_SIZE as i8).contains(&self.y)
    }

    /// Row-major index into a flat cell array, or `None` when out of bounds.
    #[inline(always)]
    pub fn index(self) -> Option<usize> {
        if !self.in_bounds() {
            return None;
        }
        Some((self.y as usize) * GRID_SIZE + (self.x as usize))
    }

    /// Inverse of [`Coord::index`]. Callers pass indices below [`CELL_COUNT`].
    pub fn from_index(idx: usize) -> Self {
        Self {
            x: (idx % GRID_SIZE) as i8,
            y: (idx / GRID_SIZE) as i8,
        }
    }
}

/// Opaque handle of one visual tile.
///
/// Assigned when a tile spawns and kept while the tile slides, so a renderer
/// can animate the same tile across a move instead of recreating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

/// One tile's movement within a single resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relocation {
    pub from: Coord,
    pub to: Coord,
    /// Value written at `to` (already doubled when `merged`).
    pub value: u32,
    /// The destination held a tile before this one arrived.
    pub merged: bool,
}

/// Coordinator state machine.
///
/// `Idle -> Resolving` on a submitted move, `Resolving -> Idle` once the move
/// settles, any state `-> Finished` on game over, `Finished -> Idle` only on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Idle,
    Resolving,
    Finished,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Resolving => "resolving",
            GamePhase::Finished => "finished",
        }
    }
}

/// Player intents produced by an input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    Move(Direction),
    Restart,
}

impl GameAction {
    /// Parse a game action from string
    ///
    /// Accepts `moveLeft`/`left` style names and `restart`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::Move(Direction::Left)));
    /// assert_eq!(GameAction::from_str("down"), Some(GameAction::Move(Direction::Down)));
    /// assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("undo"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        if lower == "restart" {
            return Some(GameAction::Restart);
        }
        let name = lower.strip_prefix("move").unwrap_or(&lower);
        Direction::from_str(name).map(GameAction::Move)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(Direction::Left) => "moveLeft",
            GameAction::Move(Direction::Right) => "moveRight",
            GameAction::Move(Direction::Up) => "moveUp",
            GameAction::Move(Direction::Down) => "moveDown",
            GameAction::Restart => "restart",
        }
    }
}
