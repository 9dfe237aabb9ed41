//! Game-over detection
//!
//! A grid is terminal when it has no empty cell and no two orthogonally
//! adjacent cells can merge. Only right and lower neighbours are
//! compared; equality is symmetric so that covers every adjacent pair once.

use crate::grid::Grid;
use crate::types::{Coord, Direction, GRID_SIZE};

/// No move in any direction can change `grid`.
pub fn is_game_over(grid: &Grid) -> bool {
    if grid.has_empty() {
        return false;
    }

    for y in 0..GRID_SIZE as i8 {
        for x in 0..GRID_SIZE as i8 {
            let here = Coord::new(x, y);
            if grid.can_merge(here, here.step(Direction::Right))
                || grid.can_merge(here, here.step(Direction::Down))
            {
                return false;
            }
        }
    }

    true
}
