//! Board configuration and engine tuning constants.
//!
//! Level collaborators describe a board with a `GridConfig`:
//! - Dimensions (`rows`, `cols`)
//! - Tile variety (how many colors are in play)
//! - RNG seed (for reproducible boards)
//!
//! Out-of-range values are clamped, never rejected. The engine never
//! panics on configuration input.

use log::warn;
use serde::{Deserialize, Serialize};

/// Run length that spawns a rocket.
pub const ROCKET_MATCH: usize = 4;

/// Minimum combined size of an L/T shape that spawns a bomb.
pub const BOMB_SHAPE_MATCH: usize = 5;

/// Run length that spawns a color bomb.
pub const COLOR_BOMB_MATCH: usize = 5;

/// Radius of a bomb blast (5×5).
pub const BOMB_RADIUS: usize = 2;

/// Radius of a bomb + bomb combination (7×7).
pub const BOMB_COMBO_RADIUS: usize = 3;

/// Radius of a small burst (3×3) used by several combinations.
pub const BURST_RADIUS: usize = 1;

/// Fewest colors a board may use.
pub const MIN_VARIETY: usize = 3;

/// Most colors a board may use.
pub const MAX_VARIETY: usize = 6;

/// Largest supported board edge.
pub const MAX_DIMENSION: usize = 32;

/// Configuration for a single board.
///
/// ## Usage
///
/// ```
/// use match3_core::core::GridConfig;
///
/// let config = GridConfig::new(9, 9).with_variety(5).with_seed(7);
/// assert_eq!(config.variety, 5);
///
/// // Out-of-range values are clamped
/// let clamped = GridConfig::new(0, 100).with_variety(12);
/// assert_eq!((clamped.rows, clamped.cols, clamped.variety), (1, 32, 6));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of rows.
    pub rows: usize,

    /// Number of columns.
    pub cols: usize,

    /// Number of tile colors in play.
    #[serde(default = "default_variety")]
    pub variety: usize,

    /// Seed for the board RNG.
    #[serde(default)]
    pub seed: u64,
}

fn default_variety() -> usize {
    MAX_VARIETY
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 8,
            variety: default_variety(),
            seed: 0,
        }
    }
}

impl GridConfig {
    /// Create a configuration with the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: clamp_dimension(rows),
            cols: clamp_dimension(cols),
            ..Self::default()
        }
    }

    /// Set the number of colors in play.
    #[must_use]
    pub fn with_variety(mut self, variety: usize) -> Self {
        self.variety = clamp_variety(variety);
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Re-apply clamping, e.g. after deserializing untrusted input.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            rows: clamp_dimension(self.rows),
            cols: clamp_dimension(self.cols),
            variety: clamp_variety(self.variety),
            seed: self.seed,
        }
    }
}

/// Clamp a board edge to `1..=MAX_DIMENSION`.
pub(crate) fn clamp_dimension(value: usize) -> usize {
    let clamped = value.clamp(1, MAX_DIMENSION);
    if clamped != value {
        warn!("board dimension {value} clamped to {clamped}");
    }
    clamped
}

/// Clamp a variety to `MIN_VARIETY..=MAX_VARIETY`.
pub(crate) fn clamp_variety(value: usize) -> usize {
    let clamped = value.clamp(MIN_VARIETY, MAX_VARIETY);
    if clamped != value {
        warn!("tile variety {value} clamped to {clamped}");
    }
    clamped
}
