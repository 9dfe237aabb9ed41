//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, storage, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: Zero-allocation move resolution (fixed-size arrays only)
//!
//! # Module Structure
//!
//! - [`grid`]: 4x4 value matrix with bounds-checked access
//! - [`tiles`]: Stable tile handles, rebuilt after every move
//! - [`resolver`]: Traversal order, slide and merge
//! - [`spawner`]: Random 2/4 tile placement with an injected RNG
//! - [`scoring`]: Running score total
//! - [`game_over`]: Terminal-grid detection
//! - [`game_state`]: The move lifecycle state machine tying it all together
//! - [`rng`]: Seeded LCG implementing [`rand::RngCore`]
//!
//! # Game Rules
//!
//! - A move slides every tile as far as it goes toward one edge
//! - Two equal tiles that meet merge into one tile of double value, and the
//!   merged value is added to the score
//! - A tile merges at most once per move
//! - After a move that changed the grid, one new tile appears (2 at 90%, 4 at 10%)
//! - The game ends when the grid is full and no two neighbours are equal
//!
//! # Example
//!
//! ```
//! use tui_2048_core::GameState;
//! use tui_2048_types::{Direction, GamePhase};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//! assert_eq!(game.grid().tile_count(), 2);
//!
//! // Slide, then settle (spawn the next tile).
//! if let Ok(outcome) = game.submit_move(Direction::Left) {
//!     if outcome.moved {
//!         assert_eq!(game.phase(), GamePhase::Resolving);
//!         game.settle();
//!     }
//! }
//! assert_eq!(game.phase(), GamePhase::Idle);
//! ```

pub mod game_over;
pub mod game_state;
pub mod grid;
pub mod resolver;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod spawner;
pub mod tiles;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use game_over::is_game_over;
pub use game_state::{GameState, MoveOutcome, MoveRejected, Settled, SpawnedTile};
pub use grid::{Grid, Rows};
pub use resolver::{can_move, resolve, traversal_order, Resolution};
pub use rng::SimpleRng;
pub use scoring::ScoreTracker;
pub use snapshot::GameSnapshot;
pub use spawner::{spawn_tile, Spawned};
pub use tiles::{TileMap, TileMove};
