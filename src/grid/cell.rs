//! A single board cell.

use serde::{Deserialize, Serialize};

use crate::core::Position;
use crate::obstacles::Obstacle;
use crate::tiles::Tile;

/// One cell of the grid.
///
/// Invariants (maintained by `Grid`, which is the only mutator):
/// - a blocked cell holds neither tile nor obstacle
/// - an obstacle that blocks tiles implies `tile` is `None`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Row of this cell.
    pub row: usize,
    /// Column of this cell.
    pub col: usize,
    /// Tile occupying the cell.
    pub tile: Option<Tile>,
    /// Obstacle occupying the cell.
    pub obstacle: Option<Obstacle>,
    /// Cell is outside the playable area.
    pub blocked: bool,
}

impl Cell {
    /// Create an empty, playable cell.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            tile: None,
            obstacle: None,
            blocked: false,
        }
    }

    /// This cell's position.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// Check if the cell may hold a tile right now.
    #[must_use]
    pub fn accepts_tile(&self) -> bool {
        !self.blocked && self.obstacle.map_or(true, |o| !o.behavior().blocks_tile)
    }

    /// Check if the tile in this cell may be swapped.
    #[must_use]
    pub fn tile_can_move(&self) -> bool {
        !self.blocked && self.tile.is_some() && self.obstacle.map_or(true, |o| o.behavior().can_tile_move)
    }

    /// Check if the tile in this cell may take part in a match.
    #[must_use]
    pub fn tile_can_match(&self) -> bool {
        !self.blocked && self.obstacle.map_or(true, |o| o.behavior().can_be_matched)
    }
}
