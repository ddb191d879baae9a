//! Connectivity analyzer - flood fill over a set of occupied cells
//!
//! A set of cells is connected when every cell can be reached from any other
//! through a chain of occupied neighbors. What counts as a neighbor is decided
//! by [`Adjacency`]. The empty set is connected.

use std::collections::HashSet;

use crate::types::{Adjacency, Cell};

/// Check whether `cells` forms a single connected component.
///
/// The result does not depend on which cell is used as the flood seed.
pub fn is_connected(cells: &HashSet<Cell>, adjacency: Adjacency) -> bool {
    let Some(&seed) = cells.iter().next() else {
        return true;
    };
    reachable_from(cells, seed, adjacency).len() == cells.len()
}

/// Connectivity check for a slice of cells (duplicates are collapsed).
pub fn is_connected_slice(cells: &[Cell], adjacency: Adjacency) -> bool {
    let set: HashSet<Cell> = cells.iter().copied().collect();
    is_connected(&set, adjacency)
}

/// All cells of `cells` reachable from `seed`.
///
/// Returns an empty set when `seed` is not itself in `cells`.
pub fn reachable_from(cells: &HashSet<Cell>, seed: Cell, adjacency: Adjacency) -> HashSet<Cell> {
    let mut visited = HashSet::with_capacity(cells.len());
    if !cells.contains(&seed) {
        return visited;
    }

    let mut fringe = vec![seed];
    visited.insert(seed);

    while let Some(cell) = fringe.pop() {
        for next in cell.neighbors(adjacency) {
            if cells.contains(&next) && visited.insert(next) {
                fringe.push(next);
            }
        }
    }

    visited
}
