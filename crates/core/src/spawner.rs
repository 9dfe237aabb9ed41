//! Random tile spawner
//!
//! Picks one empty cell uniformly at random and writes a 2 (90%) or a 4 (10%).
//! The random source is injected by the caller.

use rand::Rng;

use crate::grid::Grid;
use crate::types::{Coord, TWO_PROBABILITY};

/// A tile written by the spawner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spawned {
    pub coord: Coord,
    pub value: u32,
}

/// Spawn one tile into a random empty cell.
///
/// Returns `None` (and leaves the grid untouched) when the grid is full.
pub fn spawn_tile<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Option<Spawned> {
    let empty = grid.empty_cells();
    if empty.is_empty() {
        return None;
    }

    let coord = empty[rng.gen_range(0..empty.len())];
    let value = if rng.gen_bool(TWO_PROBABILITY) { 2 } else { 4 };
    grid.put(coord, value);
    Some(Spawned { coord, value })
}
