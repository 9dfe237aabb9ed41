//! Move resolver tests - worked examples plus properties over random grids

use tui_2048::core::{can_move, resolve, traversal_order, Grid, Rows, SimpleRng};
use tui_2048::types::{Coord, Direction, GRID_SIZE, MAX_TILE};

fn row(values: [u32; 4]) -> Rows {
    [values, [0; 4], [0; 4], [0; 4]]
}

fn resolve_rows(rows: Rows, direction: Direction) -> (Rows, u64, bool) {
    let mut grid = Grid::from_rows(rows);
    let res = resolve(&mut grid, direction);
    (grid.to_rows(), res.score_gained, res.moved)
}

/// Straightforward single-line slide: compress, merge left-to-right once,
/// compress again.
fn reference_line(line: [u32; 4]) -> ([u32; 4], u64) {
    let tiles: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();
    let mut out = [0u32; 4];
    let mut score = 0;
    let (mut i, mut n) = (0, 0);
    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            out[n] = tiles[i] * 2;
            score += u64::from(out[n]);
            i += 2;
        } else {
            out[n] = tiles[i];
            i += 1;
        }
        n += 1;
    }
    (out, score)
}

/// Cells of line `k` ordered from the target edge backwards.
fn line_coords(direction: Direction, k: usize) -> [(usize, usize); 4] {
    let mut coords = [(0, 0); 4];
    for (i, c) in coords.iter_mut().enumerate() {
        *c = match direction {
            Direction::Left => (i, k),
            Direction::Right => (3 - i, k),
            Direction::Up => (k, i),
            Direction::Down => (k, 3 - i),
        };
    }
    coords
}

fn reference(rows: Rows, direction: Direction) -> (Rows, u64) {
    let mut out = [[0; 4]; 4];
    let mut score = 0;
    for k in 0..GRID_SIZE {
        let coords = line_coords(direction, k);
        let line = coords.map(|(x, y)| rows[y][x]);
        let (merged, gained) = reference_line(line);
        for (i, &(x, y)) in coords.iter().enumerate() {
            out[y][x] = merged[i];
        }
        score += gained;
    }
    (out, score)
}

fn random_rows(rng: &mut SimpleRng) -> Rows {
    const VALUES: [u32; 8] = [0, 0, 0, 2, 2, 4, 8, 16];
    let mut rows = [[0; 4]; 4];
    for cell in rows.iter_mut().flatten() {
        *cell = VALUES[(rng.next_state() % VALUES.len() as u32) as usize];
    }
    rows
}

#[test]
fn test_slide_without_merge() {
    assert_eq!(resolve_rows(row([0, 0, 0, 2]), Direction::Left), (row([2, 0, 0, 0]), 0, true));
    assert_eq!(resolve_rows(row([2, 0, 4, 0]), Direction::Right), (row([0, 0, 2, 4]), 0, true));
}

#[test]
fn test_merged_tile_does_not_merge_again() {
    assert_eq!(resolve_rows(row([2, 2, 4, 0]), Direction::Left), (row([4, 4, 0, 0]), 4, true));
    assert_eq!(resolve_rows(row([4, 4, 8, 0]), Direction::Left), (row([8, 8, 0, 0]), 8, true));
}

#[test]
fn test_four_equal_tiles_make_two_merges() {
    assert_eq!(resolve_rows(row([2, 2, 2, 2]), Direction::Left), (row([4, 4, 0, 0]), 8, true));
    assert_eq!(resolve_rows(row([2, 2, 2, 2]), Direction::Right), (row([0, 0, 4, 4]), 8, true));
}

#[test]
fn test_tiles_nearest_the_edge_merge_first() {
    assert_eq!(resolve_rows(row([2, 2, 2, 0]), Direction::Left), (row([4, 2, 0, 0]), 4, true));
    assert_eq!(resolve_rows(row([2, 2, 2, 0]), Direction::Right), (row([0, 0, 2, 4]), 4, true));
}

#[test]
fn test_merge_across_gap() {
    assert_eq!(resolve_rows(row([4, 0, 0, 4]), Direction::Left), (row([8, 0, 0, 0]), 8, true));
    assert_eq!(resolve_rows(row([2, 0, 0, 2]), Direction::Right), (row([0, 0, 0, 4]), 4, true));
}

#[test]
fn test_grid_of_largest_tiles_is_stuck() {
    let full = [[MAX_TILE; 4]; 4];
    for direction in Direction::ALL {
        assert_eq!(resolve_rows(full, direction), (full, 0, false));
        assert!(!can_move(&Grid::from_rows(full), direction));
    }
    assert!(tui_2048::core::is_game_over(&Grid::from_rows(full)));
}

#[test]
fn test_vertical_moves() {
    let rows = [[2, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0], [0; 4]];
    let (up, score, moved) = resolve_rows(rows, Direction::Up);
    assert!(moved);
    assert_eq!(score, 4);
    assert_eq!(up, [[4, 0, 0, 0], [4, 0, 0, 0], [0; 4], [0; 4]]);

    let (down, score, _) = resolve_rows(rows, Direction::Down);
    assert_eq!(score, 4);
    assert_eq!(down, [[0; 4], [0; 4], [4, 0, 0, 0], [4, 0, 0, 0]]);
}

#[test]
fn test_blocked_move_changes_nothing() {
    let alternating = row([2, 4, 2, 4]);
    assert_eq!(resolve_rows(alternating, Direction::Left), (alternating, 0, false));

    let rows = row([2, 4, 8, 16]);
    assert_eq!(resolve_rows(rows, Direction::Left), (rows, 0, false));
    assert_eq!(resolve_rows(rows, Direction::Up), (rows, 0, false));
    assert!(!can_move(&Grid::from_rows(rows), Direction::Left));
    assert!(can_move(&Grid::from_rows(rows), Direction::Down));
}

#[test]
fn test_traversal_starts_at_target_edge() {
    let right = traversal_order(Direction::Right);
    assert_eq!(right[0], Coord::new(3, 0));
    assert_eq!(right[3], Coord::new(0, 0));

    let down = traversal_order(Direction::Down);
    assert_eq!(down[0], Coord::new(0, 3));
    assert_eq!(down[15], Coord::new(3, 0));

    // Every cell exactly once.
    for dir in Direction::ALL {
        let mut seen = [false; 16];
        for c in traversal_order(dir) {
            let i = c.index().unwrap();
            assert!(!seen[i]);
            seen[i] = true;
        }
    }
}

#[test]
fn test_matches_reference_on_random_grids() {
    let mut rng = SimpleRng::new(2048);
    for _ in 0..500 {
        let rows = random_rows(&mut rng);
        for dir in Direction::ALL {
            let (got, score, moved) = resolve_rows(rows, dir);
            let (want, want_score) = reference(rows, dir);
            assert_eq!(got, want, "{:?} {:?}", rows, dir);
            assert_eq!(score, want_score, "{:?} {:?}", rows, dir);
            assert_eq!(moved, got != rows);
        }
    }
}

#[test]
fn test_random_grid_invariants() {
    let mut rng = SimpleRng::new(7);
    for _ in 0..500 {
        let rows = random_rows(&mut rng);
        let before = Grid::from_rows(rows);
        for dir in Direction::ALL {
            let mut grid = before;
            let res = resolve(&mut grid, dir);

            // Merging never creates or destroys value.
            assert_eq!(grid.sum(), before.sum());
            // Each merge removes exactly one tile.
            assert_eq!(grid.tile_count(), before.tile_count() - res.merge_count());
            // Score is the sum of merged values.
            let merged: u64 = res
                .relocations
                .iter()
                .filter(|r| r.merged)
                .map(|r| u64::from(r.value))
                .sum();
            assert_eq!(res.score_gained, merged);
            assert_eq!(can_move(&before, dir), res.moved);
            assert!(grid.is_well_formed());
        }
    }
}
