//! Move generator - legal destinations for a single tile
//!
//! Given the occupied cells and the index of the tile being moved, produce every
//! destination that keeps the shape connected. A tile whose removal would split
//! the rest of the shape (under the configured adjacency) has no moves at all.
//! Past that precondition, two enumeration policies exist (see [`MovePolicy`]);
//! both reject out-of-bounds cells before any flood fill.
//!
//! - Perimeter: the tile may land on any empty cell orthogonally touching the
//!   rest of the shape.
//! - Direct: the tile may step to one of its own orthogonal neighbours, and each
//!   step is verified on the whole relocated shape under 8-connectivity.
//!
//! Results are sorted by `(x, y)` and contain no duplicates.

use std::collections::{BTreeSet, HashSet};

use crate::connectivity::is_connected;
use crate::types::{Adjacency, BoardBounds, Cell, MovePolicy, ORTHOGONAL_OFFSETS};

/// Legal destinations for `tiles[target]`.
///
/// An out-of-range `target` yields no moves.
pub fn legal_moves(
    tiles: &[Cell],
    target: usize,
    bounds: BoardBounds,
    adjacency: Adjacency,
    policy: MovePolicy,
) -> Vec<Cell> {
    let Some(&moving) = tiles.get(target) else {
        return Vec::new();
    };

    let remaining = remaining_cells(tiles, target);
    if !is_connected(&remaining, adjacency) {
        return Vec::new();
    }

    let occupied: HashSet<Cell> = tiles.iter().copied().collect();
    let moves = match policy {
        MovePolicy::Perimeter => perimeter_moves(&remaining, &occupied, bounds),
        MovePolicy::Direct => direct_moves(moving, remaining, &occupied, bounds),
    };
    moves.into_iter().collect()
}

/// Adjacency under which shapes produced by `policy` stay connected.
pub fn shape_adjacency(policy: MovePolicy, adjacency: Adjacency) -> Adjacency {
    match policy {
        MovePolicy::Perimeter => adjacency,
        MovePolicy::Direct => Adjacency::Eight,
    }
}

/// Whether the tile at `target` may leave without splitting the remaining shape.
pub fn is_perimeter_tile(tiles: &[Cell], target: usize, adjacency: Adjacency) -> bool {
    if target >= tiles.len() {
        return false;
    }
    let remaining = remaining_cells(tiles, target);
    is_connected(&remaining, adjacency)
}

fn remaining_cells(tiles: &[Cell], target: usize) -> HashSet<Cell> {
    tiles
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != target)
        .map(|(_, &c)| c)
        .collect()
}

fn perimeter_moves(
    remaining: &HashSet<Cell>,
    occupied: &HashSet<Cell>,
    bounds: BoardBounds,
) -> BTreeSet<Cell> {
    let mut candidates = BTreeSet::new();
    for &cell in remaining {
        for &(dx, dy) in &ORTHOGONAL_OFFSETS {
            let Some(next) = cell.checked_offset(dx, dy) else {
                continue;
            };
            if bounds.contains(next) && !occupied.contains(&next) {
                candidates.insert(next);
            }
        }
    }
    candidates
}

fn direct_moves(
    moving: Cell,
    mut relocated: HashSet<Cell>,
    occupied: &HashSet<Cell>,
    bounds: BoardBounds,
) -> BTreeSet<Cell> {
    let mut out = BTreeSet::new();
    for &(dx, dy) in &ORTHOGONAL_OFFSETS {
        let Some(next) = moving.checked_offset(dx, dy) else {
            continue;
        };
        if !bounds.contains(next) || occupied.contains(&next) {
            continue;
        }

        relocated.insert(next);
        if is_connected(&relocated, Adjacency::Eight) {
            out.insert(next);
        }
        relocated.remove(&next);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(v: &[(i32, i32)]) -> Vec<Cell> {
        v.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn single_tile_has_no_perimeter_moves() {
        let t = cells(&[(4, 4)]);
        let m = legal_moves(&t, 0, BoardBounds::default(), Adjacency::Four, MovePolicy::Perimeter);
        assert!(m.is_empty());
    }

    #[test]
    fn out_of_range_target_is_empty() {
        let t = cells(&[(4, 4), (5, 4)]);
        let m = legal_moves(&t, 7, BoardBounds::default(), Adjacency::Four, MovePolicy::Direct);
        assert!(m.is_empty());
        assert!(!is_perimeter_tile(&t, 7, Adjacency::Four));
    }

    #[test]
    fn direct_policy_only_uses_own_neighbors() {
        // L shape: (0,0) (1,0) (1,1). Moving (0,0) directly can reach (0,1) only.
        let t = cells(&[(0, 0), (1, 0), (1, 1)]);
        let m = legal_moves(&t, 0, BoardBounds::default(), Adjacency::Four, MovePolicy::Direct);
        assert_eq!(m, cells(&[(0, 1)]));
    }

    #[test]
    fn direct_policy_accepts_diagonal_contact() {
        let t = cells(&[(3, 3), (4, 3)]);
        let four = legal_moves(&t, 0, BoardBounds::default(), Adjacency::Four, MovePolicy::Direct);
        let eight = legal_moves(&t, 0, BoardBounds::default(), Adjacency::Eight, MovePolicy::Direct);
        assert_eq!(four, cells(&[(3, 2), (3, 4)]));
        assert_eq!(four, eight);
    }

    #[test]
    fn perimeter_policy_ignores_configured_diagonals_for_candidates() {
        // Candidates always touch the remainder orthogonally; only the
        // remainder check uses the configured adjacency.
        let t = cells(&[(3, 3), (4, 4)]);
        let four = legal_moves(&t, 0, BoardBounds::default(), Adjacency::Four, MovePolicy::Perimeter);
        let eight = legal_moves(&t, 0, BoardBounds::default(), Adjacency::Eight, MovePolicy::Perimeter);
        assert_eq!(four, eight);
        assert_eq!(four, cells(&[(3, 4), (4, 3), (4, 5), (5, 4)]));
    }

    #[test]
    fn shape_adjacency_follows_policy() {
        assert_eq!(shape_adjacency(MovePolicy::Perimeter, Adjacency::Four), Adjacency::Four);
        assert_eq!(shape_adjacency(MovePolicy::Direct, Adjacency::Four), Adjacency::Eight);
    }
}
