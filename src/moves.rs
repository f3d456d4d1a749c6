//! Move finder.
//!
//! A move is a swap of two adjacent tiles that the grid allows and that
//! either forms a match through one of the swapped cells or puts a
//! powerup in play. Each candidate is tried on a clone of the grid, which
//! is O(1) thanks to the persistent cell store.

use serde::{Deserialize, Serialize};

use crate::core::Position;
use crate::grid::Grid;
use crate::matching::find_matches_with_swap;

/// A candidate swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    #[must_use]
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

/// Every productive swap, in row-major order of `from` (right before down).
#[must_use]
pub fn find_possible_moves(grid: &Grid) -> Vec<Move> {
    candidates(grid).filter(|m| is_productive(grid, *m)).collect()
}

/// Check if any productive swap exists.
#[must_use]
pub fn has_possible_move(grid: &Grid) -> bool {
    candidates(grid).any(|m| is_productive(grid, m))
}

fn candidates(grid: &Grid) -> impl Iterator<Item = Move> + '_ {
    grid.positions().flat_map(move |from| {
        [from.offset(0, 1), from.offset(1, 0)]
            .into_iter()
            .flatten()
            .filter(move |to| grid.in_bounds(*to))
            .map(move |to| Move::new(from, to))
    })
}

fn is_productive(grid: &Grid, candidate: Move) -> bool {
    let (Some(a), Some(b)) = (grid.tile_at(candidate.from), grid.tile_at(candidate.to)) else {
        return false;
    };
    let mut trial = grid.clone();
    if !trial.swap(candidate.from, candidate.to) {
        return false;
    }
    if a.is_powerup() || b.is_powerup() {
        return true;
    }
    let swapped = [candidate.from, candidate.to];
    find_matches_with_swap(&trial, &swapped)
        .iter()
        .any(|m| m.tiles.iter().any(|t| swapped.contains(&t.position())))
}
