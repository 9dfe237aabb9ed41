use crate::grid::Rows;
use crate::types::{GamePhase, TileId, GRID_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Tile values, `grid[y][x]`.
    pub grid: Rows,
    /// Tile handles, `tiles[y][x]`.
    pub tiles: [[Option<TileId>; GRID_SIZE]; GRID_SIZE],
    pub score: u64,
    pub phase: GamePhase,
    pub episode_id: u32,
    pub moves_made: u32,
    pub max_tile: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Idle
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::Finished
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[0; GRID_SIZE]; GRID_SIZE],
            tiles: [[None; GRID_SIZE]; GRID_SIZE],
            score: 0,
            phase: GamePhase::Idle,
            episode_id: 0,
            moves_made: 0,
            max_tile: 0,
        }
    }
}
