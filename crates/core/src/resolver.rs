//! Move resolver - slide and merge tiles in one direction
//!
//! A resolution visits every cell in *traversal order* (cells nearest the
//! target edge first) and walks each tile along the direction vector until it
//! hits the edge, a different tile, or an equal tile it can merge with.
//! Each cell write is committed before the next tile is evaluated, so a tile
//! always sees the final position of the tiles ahead of it.
//!
//! A tile merges with at most one other tile per move, and a cell produced by
//! a merge cannot absorb another tile in the same move:
//!
//! ```
//! use tui_2048_core::{resolve, Grid};
//! use tui_2048_core::types::Direction;
//!
//! let mut grid = Grid::from_rows([[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]);
//! let res = resolve(&mut grid, Direction::Left);
//!
//! assert!(res.moved);
//! assert_eq!(res.score_gained, 4);
//! assert_eq!(grid.to_rows()[0], [4, 4, 0, 0]);
//! ```

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{Coord, Direction, Relocation, CELL_COUNT, GRID_SIZE, MAX_TILE};

/// Relocations of a single resolution, in the order they were committed.
pub type Relocations = ArrayVec<Relocation, CELL_COUNT>;

/// Outcome of applying one direction to a grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// At least one tile changed position.
    pub moved: bool,
    pub relocations: Relocations,
    /// Sum of the merged tile values produced by this move.
    pub score_gained: u64,
}

impl Resolution {
    pub fn merge_count(&self) -> usize {
        self.relocations.iter().filter(|r| r.merged).count()
    }
}

/// Coordinate visitation order for `direction`.
///
/// The component aligned with a positive movement vector is visited in
/// descending order; every other component ascends. Moving right therefore
/// resolves column 3 before column 2.
pub fn traversal_order(direction: Direction) -> [Coord; CELL_COUNT] {
    let (dx, dy) = direction.vector();
    let last = GRID_SIZE as i8 - 1;

    let mut order = [Coord::default(); CELL_COUNT];
    let mut i = 0;
    for y in 0..GRID_SIZE as i8 {
        for x in 0..GRID_SIZE as i8 {
            order[i] = Coord::new(
                if dx == 1 { last - x } else { x },
                if dy == 1 { last - y } else { y },
            );
            i += 1;
        }
    }
    order
}

/// Slide and merge every tile of `grid` toward `direction`.
///
/// The grid is mutated in place. When no tile moves the grid is left
/// untouched and `moved` is false.
pub fn resolve(grid: &mut Grid, direction: Direction) -> Resolution {
    let mut res = Resolution::default();
    // Cells written by a merge during this pass.
    let mut merged = [false; CELL_COUNT];

    for from in traversal_order(direction) {
        let value = match grid.at(from) {
            Some(v) if v != 0 => v,
            _ => continue,
        };

        let (to, final_value) = walk(grid, &merged, from, value, direction);
        if to == from {
            continue;
        }

        let was_occupied = !grid.is_empty_at(to);
        grid.put(from, 0);
        grid.put(to, final_value);

        if was_occupied {
            if let Some(idx) = to.index() {
                merged[idx] = true;
            }
            res.score_gained += u64::from(final_value);
        }

        res.moved = true;
        res.relocations.push(Relocation {
            from,
            to,
            value: final_value,
            merged: was_occupied,
        });
    }

    res
}

/// Walk one tile from `from` and return its destination and carried value.
fn walk(
    grid: &Grid,
    merged: &[bool; CELL_COUNT],
    from: Coord,
    value: u32,
    direction: Direction,
) -> (Coord, u32) {
    let mut dest = from;
    let mut carried = value;
    let mut next = from.step(direction);

    while let Some(next_value) = grid.at(next) {
        if next_value == 0 {
            dest = next;
        } else if next_value == carried && carried < MAX_TILE && !is_merge_product(merged, next) {
            dest = next;
            carried *= 2;
            break;
        } else {
            break;
        }
        next = next.step(direction);
    }

    (dest, carried)
}

fn is_merge_product(merged: &[bool; CELL_COUNT], coord: Coord) -> bool {
    coord.index().is_some_and(|idx| merged[idx])
}

/// Whether `direction` would change `grid`. Does not mutate it.
pub fn can_move(grid: &Grid, direction: Direction) -> bool {
    let mut probe = *grid;
    resolve(&mut probe, direction).moved
}
