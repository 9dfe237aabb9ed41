//! Grid module - the 4x4 matrix of tile values
//!
//! Each cell is `0` (empty) or a power-of-two tile value >= 2.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..3 (left to right), y ranges 0..3 (top to bottom)

use arrayvec::ArrayVec;

use crate::types::{Coord, CELL_COUNT, GRID_SIZE, MAX_TILE};

/// Row-major 2D view of the grid, the shape used for persistence.
pub type Rows = [[u32; GRID_SIZE]; GRID_SIZE];

/// The game grid - 4 columns x 4 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * GRID_SIZE + x)
    cells: [u32; CELL_COUNT],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [0; CELL_COUNT],
        }
    }

    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    /// Get the value at (x, y).
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<u32> {
        self.at(Coord::new(x, y))
    }

    /// Set the value at (x, y).
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, value: u32) -> bool {
        self.put(Coord::new(x, y), value)
    }

    pub fn at(&self, coord: Coord) -> Option<u32> {
        coord.index().map(|idx| self.cells[idx])
    }

    pub fn put(&mut self, coord: Coord, value: u32) -> bool {
        match coord.index() {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, coord: Coord) -> bool {
        self.at(coord) == Some(0)
    }

    /// Empty coordinates in row-major order.
    pub fn empty_cells(&self) -> ArrayVec<Coord, CELL_COUNT> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(i, _)| Coord::from_index(i))
            .collect()
    }

    pub fn has_empty(&self) -> bool {
        self.cells.contains(&0)
    }

    /// Both coordinates are in bounds and hold the same non-zero value.
    pub fn same_value(&self, a: Coord, b: Coord) -> bool {
        match (self.at(a), self.at(b)) {
            (Some(va), Some(vb)) => va != 0 && va == vb,
            _ => false,
        }
    }

    /// The tiles at `a` and `b` would merge: equal, non-empty and below
    /// [`MAX_TILE`].
    pub fn can_merge(&self, a: Coord, b: Coord) -> bool {
        self.same_value(a, b) && self.at(a).is_some_and(|v| v < MAX_TILE)
    }

    /// Every cell is empty or a power of two >= 2.
    pub fn is_well_formed(&self) -> bool {
        self.cells.iter().all(|&v| is_tile_value(v))
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// Sum of all tile values.
    pub fn sum(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u32; CELL_COUNT] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells = [0; CELL_COUNT];
    }

    /// Build a grid from rows (`rows[y][x]`).
    pub fn from_rows(rows: Rows) -> Self {
        let mut cells = [0; CELL_COUNT];
        for (y, row) in rows.iter().enumerate() {
            cells[y * GRID_SIZE..(y + 1) * GRID_SIZE].copy_from_slice(row);
        }
        Self { cells }
    }

    /// Convert to rows (`rows[y][x]`).
    pub fn to_rows(&self) -> Rows {
        let mut rows = [[0; GRID_SIZE]; GRID_SIZE];
        for (y, row) in rows.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * GRID_SIZE..(y + 1) * GRID_SIZE]);
        }
        rows
    }
}

/// `0` (empty) or a power of two in `2..=MAX_TILE`.
pub fn is_tile_value(v: u32) -> bool {
    v == 0 || ((2..=MAX_TILE).contains(&v) && v.is_power_of_two())
}
