//! Tile identity - which visual tile occupies which cell
//!
//! Every tile gets a monotonic [`TileId`] when it spawns. When a move
//! resolves, the coordinate map is rebuilt as a new value from the
//! relocation records and swapped in, so observers never see a map with a
//! dangling id or two ids for one cell.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{Coord, Relocation, TileId, CELL_COUNT};

/// A relocation together with the tiles it concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileMove {
    /// The tile that moved. It keeps its id at the destination.
    pub tile: TileId,
    /// The tile that was sitting at the destination and was merged away.
    pub absorbed: Option<TileId>,
    pub relocation: Relocation,
}

/// Coordinate -> tile handle map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileMap {
    slots: [Option<TileId>; CELL_COUNT],
    next_id: u32,
}

impl TileMap {
    pub fn new() -> Self {
        Self {
            slots: [None; CELL_COUNT],
            next_id: 1,
        }
    }

    /// Assign fresh ids to every non-zero cell of `grid` (used on restore).
    pub fn for_grid(grid: &Grid) -> Self {
        let mut map = Self::new();
        for (idx, &value) in grid.cells().iter().enumerate() {
            if value != 0 {
                map.place(Coord::from_index(idx));
            }
        }
        map
    }

    /// Give the tile just spawned at `coord` a new id.
    ///
    /// Returns `None` for an out-of-bounds coordinate.
    pub fn place(&mut self, coord: Coord) -> Option<TileId> {
        let idx = coord.index()?;
        let id = TileId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.slots[idx] = Some(id);
        Some(id)
    }

    pub fn id_at(&self, coord: Coord) -> Option<TileId> {
        coord.index().and_then(|idx| self.slots[idx])
    }

    /// Occupied cells and their ids, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, TileId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.map(|id| (Coord::from_index(idx), id)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The map after `relocations` are applied, plus the per-tile moves.
    ///
    /// Relocations are replayed in commit order, so a tile that slid into a
    /// cell earlier in the same move is the one reported as absorbed when a
    /// later tile merges into that cell.
    pub fn rebuilt(&self, relocations: &[Relocation]) -> (Self, ArrayVec<TileMove, CELL_COUNT>) {
        let mut slots = self.slots;
        let mut moves = ArrayVec::new();

        for &relocation in relocations {
            let (Some(from), Some(to)) = (relocation.from.index(), relocation.to.index()) else {
                continue;
            };
            let Some(tile) = slots[from].take() else {
                continue;
            };
            let absorbed = slots[to].replace(tile);
            moves.push(TileMove {
                tile,
                absorbed,
                relocation,
            });
        }

        let next = Self {
            slots,
            next_id: self.next_id,
        };
        (next, moves)
    }

    /// Occupied cells are exactly the non-zero cells of `grid`.
    pub fn matches(&self, grid: &Grid) -> bool {
        self.slots
            .iter()
            .zip(grid.cells().iter())
            .all(|(slot, &value)| slot.is_some() == (value != 0))
    }

    pub fn clear(&mut self) {
        self.slots = [None; CELL_COUNT];
    }
}

impl Default for TileMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;
    use crate::types::Direction;

    #[test]
    fn test_place_assigns_monotonic_ids() {
        let mut map = TileMap::new();
        let a = map.place(Coord::new(0, 0)).unwrap();
        let b = map.place(Coord::new(1, 0)).unwrap();
        assert!(b > a);
        assert_eq!(map.id_at(Coord::new(1, 0)), Some(b));
        assert_eq!(map.place(Coord::new(4, 0)), None);
    }

    #[test]
    fn test_rebuilt_keeps_mover_and_reports_absorbed() {
        // [0, 2, 0, 2] left: first tile slides to x=0, second merges into it.
        let mut grid = Grid::from_rows([[0, 2, 0, 2], [0; 4], [0; 4], [0; 4]]);
        let map = TileMap::for_grid(&grid);
        let first = map.id_at(Coord::new(1, 0)).unwrap();
        let second = map.id_at(Coord::new(3, 0)).unwrap();

        let res = resolve(&mut grid, Direction::Left);
        let (next, moves) = map.rebuilt(&res.relocations);

        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].tile, first);
        assert_eq!(moves[0].absorbed, None);
        assert_eq!(moves[1].tile, second);
        assert_eq!(moves[1].absorbed, Some(first));

        assert_eq!(next.id_at(Coord::new(0, 0)), Some(second));
        assert_eq!(next.len(), 1);
        assert!(next.matches(&grid));
    }

    #[test]
    fn test_rebuilt_leaves_original_untouched() {
        let mut grid = Grid::from_rows([[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
        let map = TileMap::for_grid(&grid);
        let before = map.clone();

        let res = resolve(&mut grid, Direction::Left);
        let (next, _) = map.rebuilt(&res.relocations);

        assert_eq!(map, before);
        assert_ne!(next, before);
        assert!(next.matches(&grid));
    }
}
