//! Game state module - manages the complete game state
//!
//! This module ties together the grid, tile identities, the RNG and scoring.
//! It runs the move lifecycle as an explicit state machine:
//!
//! - `Idle -> Resolving` when [`GameState::submit_move`] slides at least one tile
//! - `Resolving -> Idle` when [`GameState::settle`] spawns the next tile
//! - `* -> Finished` when no move can change the grid any more
//! - `Finished -> Idle` only through [`GameState::reset`]
//!
//! The split between `submit_move` and `settle` leaves room for a renderer
//! to animate the slide; calling them back to back (or using
//! [`GameState::play`]) is equally valid.

use std::fmt;

use arrayvec::ArrayVec;
use rand::RngCore;

use crate::game_over::is_game_over;
use crate::grid::{Grid, Rows};
use crate::resolver::resolve;
use crate::rng::SimpleRng;
use crate::scoring::ScoreTracker;
use crate::snapshot::GameSnapshot;
use crate::spawner::spawn_tile;
use crate::tiles::{TileMap, TileMove};
use crate::types::{Coord, Direction, GamePhase, TileId, CELL_COUNT, GRID_SIZE, INITIAL_TILES};

/// A tile placed by the spawner, with its new identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpawnedTile {
    pub tile: TileId,
    pub coord: Coord,
    pub value: u32,
}

/// Why a move was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveRejected {
    /// [`GameState::start`] (or a restore) has not happened yet.
    NotStarted,
    /// The previous move has not settled.
    InFlight,
    /// The game is over; only a reset is accepted.
    Finished,
}

impl fmt::Display for MoveRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRejected::NotStarted => write!(f, "game not started"),
            MoveRejected::InFlight => write!(f, "previous move still resolving"),
            MoveRejected::Finished => write!(f, "game is over"),
        }
    }
}

impl std::error::Error for MoveRejected {}

/// Everything a renderer needs about one move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub direction: Direction,
    /// At least one tile changed position.
    pub moved: bool,
    /// Per-tile relocations in commit order.
    pub moves: ArrayVec<TileMove, CELL_COUNT>,
    pub score_gained: u64,
    /// Score total after the move.
    pub score: u64,
    /// Filled once the move has settled.
    pub spawned: Option<SpawnedTile>,
    pub game_over: bool,
}

/// Result of the second half of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    pub spawned: Option<SpawnedTile>,
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    grid: Grid,
    tiles: TileMap,
    score: ScoreTracker,
    phase: GamePhase,
    rng: R,
    started: bool,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Moves that changed the grid in this episode.
    moves_made: u32,
}

impl GameState<SimpleRng> {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl<R: RngCore> GameState<R> {
    /// Create a new game drawing tiles from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            grid: Grid::new(),
            tiles: TileMap::new(),
            score: ScoreTracker::new(),
            phase: GamePhase::Idle,
            rng,
            started: false,
            episode_id: 0,
            moves_made: 0,
        }
    }

    /// Start the game: place the initial tiles.
    ///
    /// Does nothing if the game was already started or restored.
    pub fn start(&mut self) -> ArrayVec<SpawnedTile, INITIAL_TILES> {
        let mut placed = ArrayVec::new();
        if self.started {
            return placed;
        }
        self.started = true;
        for _ in 0..INITIAL_TILES {
            if let Some(tile) = self.spawn() {
                placed.push(tile);
            }
        }
        placed
    }

    /// Resume from saved rows and score.
    ///
    /// Returns false, leaving the state untouched, when the rows hold a value
    /// that is neither empty nor a power of two >= 2.
    pub fn restore(&mut self, rows: Rows, score: u64) -> bool {
        let grid = Grid::from_rows(rows);
        if !grid.is_well_formed() {
            return false;
        }
        self.grid = grid;
        self.tiles = TileMap::for_grid(&self.grid);
        self.score = ScoreTracker::resume(score);
        self.phase = GamePhase::Idle;
        self.started = true;
        self.moves_made = 0;
        true
    }

    /// Discard the current game and start a fresh one.
    pub fn reset(&mut self) -> ArrayVec<SpawnedTile, INITIAL_TILES> {
        self.grid.clear();
        self.tiles.clear();
        self.score.reset();
        self.phase = GamePhase::Idle;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.moves_made = 0;
        self.started = false;
        self.start()
    }

    /// First half of a move: slide and merge.
    ///
    /// When tiles moved the state enters `Resolving` and the caller must
    /// [`settle`](Self::settle) before the next move. A move that changes
    /// nothing leaves the state `Idle`, spawns nothing, and still runs
    /// game-over detection.
    pub fn submit_move(&mut self, direction: Direction) -> Result<MoveOutcome, MoveRejected> {
        match self.phase {
            GamePhase::Resolving => return Err(MoveRejected::InFlight),
            GamePhase::Finished => return Err(MoveRejected::Finished),
            GamePhase::Idle => {}
        }
        if !self.started {
            return Err(MoveRejected::NotStarted);
        }

        let resolution = resolve(&mut self.grid, direction);

        if !resolution.moved {
            let game_over = self.check_game_over();
            return Ok(MoveOutcome {
                direction,
                moved: false,
                moves: ArrayVec::new(),
                score_gained: 0,
                score: self.score.total(),
                spawned: None,
                game_over,
            });
        }

        self.score.add(resolution.score_gained);
        let (tiles, moves) = self.tiles.rebuilt(&resolution.relocations);
        self.tiles = tiles;
        self.phase = GamePhase::Resolving;

        Ok(MoveOutcome {
            direction,
            moved: true,
            moves,
            score_gained: resolution.score_gained,
            score: self.score.total(),
            spawned: None,
            game_over: false,
        })
    }

    /// Second half of a move: spawn one tile and check for game over.
    ///
    /// Returns `None` when no move is waiting to settle.
    pub fn settle(&mut self) -> Option<Settled> {
        if self.phase != GamePhase::Resolving {
            return None;
        }

        let spawned = self.spawn();
        self.moves_made = self.moves_made.wrapping_add(1);
        self.phase = GamePhase::Idle;
        let game_over = self.check_game_over();

        debug_assert!(self.tiles.matches(&self.grid));
        Some(Settled { spawned, game_over })
    }

    /// Submit and settle in one call.
    pub fn play(&mut self, direction: Direction) -> Result<MoveOutcome, MoveRejected> {
        let mut outcome = self.submit_move(direction)?;
        if let Some(settled) = self.settle() {
            outcome.spawned = settled.spawned;
            outcome.game_over = settled.game_over;
        }
        Ok(outcome)
    }

    fn spawn(&mut self) -> Option<SpawnedTile> {
        let spawned = spawn_tile(&mut self.grid, &mut self.rng)?;
        let tile = self.tiles.place(spawned.coord)?;
        Some(SpawnedTile {
            tile,
            coord: spawned.coord,
            value: spawned.value,
        })
    }

    fn check_game_over(&mut self) -> bool {
        if is_game_over(&self.grid) {
            self.phase = GamePhase::Finished;
        }
        self.phase == GamePhase::Finished
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    pub fn score(&self) -> u64 {
        self.score.total()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid = self.grid.to_rows();
        out.tiles = [[None; GRID_SIZE]; GRID_SIZE];
        for (coord, id) in self.tiles.iter() {
            out.tiles[coord.y as usize][coord.x as usize] = Some(id);
        }
        out.score = self.score.total();
        out.phase = self.phase;
        out.episode_id = self.episode_id;
        out.moves_made = self.moves_made;
        out.max_tile = self.grid.max_tile();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
