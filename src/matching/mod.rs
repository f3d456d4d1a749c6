//! Match detection.
//!
//! `find_all_matches` scans a grid and returns a non-overlapping set of
//! matches, each tagged with the powerup it spawns:
//! - 5+ in a line: color bomb
//! - 4 in a line: rocket along the line
//! - L/T of two 3-runs: bomb at the junction
//! - 2×2 square: propeller at the top-left corner
//!
//! ## Example
//!
//! ```
//! use match3_core::core::GridConfig;
//! use match3_core::grid::Grid;
//! use match3_core::matching::{find_all_matches, MatchShape};
//! use match3_core::tiles::{PowerupKind, TileColor};
//!
//! let mut grid = Grid::new(GridConfig::new(3, 4));
//! for col in 0..4 {
//!     grid.place_tile(0, col, TileColor::Red);
//! }
//!
//! let matches = find_all_matches(&grid);
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].shape, MatchShape::Horizontal);
//! assert_eq!(matches[0].powerup_kind(), Some(PowerupKind::RocketH));
//! ```

mod detector;
mod shape;

pub use detector::{find_all_matches, find_matches_with_swap, has_match};
pub use shape::{Match, MatchShape, SpawnedPowerup};

pub(crate) use detector::matchable_color;
