//! The board: cells, tiles, obstacles and layouts.
//!
//! - `Cell`: one square of the board
//! - `Grid`: the cell store and every board mutation
//! - `Layout`: decoded level layouts
//! - `ClearReport`: what a clear did, for scoring and objectives
//!
//! `Grid::shuffle_tiles` reshuffles a board with no moves left.

mod board;
mod cell;
mod clear;
mod layout;
mod shuffle;

pub use board::{Grid, ObstacleDamage};
pub use cell::Cell;
pub use clear::ClearReport;
pub use layout::{CellCode, Layout, LayoutError};
pub use shuffle::SHUFFLE_ATTEMPTS;
