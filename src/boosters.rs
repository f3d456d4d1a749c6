//! Player boosters.
//!
//! Boosters are used outside the swap flow. Hammer and arrows clear an
//! area like a powerup would (apply the result with `Grid::apply_clear`,
//! and chain any powerups caught with `PowerupResolver`). Shuffle clears
//! nothing and rearranges the board instead (`Grid::shuffle_tiles`).

use serde::{Deserialize, Serialize};

use crate::core::Position;
use crate::grid::Grid;

/// A booster the player can spend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Booster {
    /// Hits one cell.
    Hammer,
    /// Clears the target's row.
    RowArrow,
    /// Clears the target's column.
    ColumnArrow,
    /// Rearranges the plain tiles.
    Shuffle,
}

impl Booster {
    /// Check if the booster needs a target cell.
    #[must_use]
    pub fn is_targeted(self) -> bool {
        !matches!(self, Booster::Shuffle)
    }
}

/// Cells a booster clears when used on `target`.
///
/// Empty for an out-of-bounds target and for `Shuffle`.
#[must_use]
pub fn booster_positions(grid: &Grid, booster: Booster, target: Position) -> Vec<Position> {
    if !grid.in_bounds(target) {
        return Vec::new();
    }
    match booster {
        Booster::Hammer => vec![target],
        Booster::RowArrow => grid.row_positions(target.row),
        Booster::ColumnArrow => grid.col_positions(target.col),
        Booster::Shuffle => Vec::new(),
    }
}
