//! Board coordinates.
//!
//! Every cell on the board is addressed by a `Position` (row, column),
//! with `(0, 0)` in the top-left corner. Positions are plain values and
//! carry no knowledge of board bounds; bounds are checked by the grid.
//!
//! ## Usage
//!
//! ```
//! use match3_core::core::Position;
//!
//! let pos = Position::new(2, 3);
//!
//! assert_eq!(pos.offset(-1, 0), Some(Position::new(1, 3)));
//! assert_eq!(Position::new(0, 0).offset(-1, 0), None);
//! assert!(pos.is_adjacent(Position::new(2, 4)));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A cell coordinate on the board.
///
/// Ordering is row-major, so sorting positions yields scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row index (0 = top).
    pub row: usize,
    /// Column index (0 = left).
    pub col: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Shift by a signed delta.
    ///
    /// Returns `None` if either coordinate would become negative.
    /// Upper bounds are the grid's concern.
    #[must_use]
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Some(Self { row, col })
    }

    /// The up-to-four orthogonal neighbors that do not underflow.
    ///
    /// Order is up, down, left, right.
    #[must_use]
    pub fn orthogonal(self) -> SmallVec<[Position; 4]> {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(|(dr, dc)| self.offset(dr, dc))
            .collect()
    }

    /// Check if `other` shares an edge with this position.
    #[must_use]
    pub fn is_adjacent(self, other: Position) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
