//! Match results.

use serde::{Deserialize, Serialize};

use crate::core::Position;
use crate::tiles::{PowerupKind, Tile, TileColor, TileId};

/// Shape of a detected match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchShape {
    /// Straight run along a row.
    Horizontal,
    /// Straight run along a column.
    Vertical,
    /// Two runs joined at a shared end tile.
    LShape,
    /// Two runs joined where at least one run continues past the junction.
    TShape,
    /// 2×2 block.
    Square,
}

/// Powerup a match creates, and where.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpawnedPowerup {
    pub kind: PowerupKind,
    pub position: Position,
}

/// A detected group of same-colored tiles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Tiles in the match, in scan order along the shape.
    pub tiles: Vec<Tile>,
    /// Recognized shape.
    pub shape: MatchShape,
    /// Powerup created by this match, if any.
    pub spawned_powerup: Option<SpawnedPowerup>,
}

impl Match {
    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Check if the match has no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Shared color of the tiles.
    #[must_use]
    pub fn color(&self) -> Option<TileColor> {
        self.tiles.first().and_then(|t| t.color)
    }

    /// Positions of the tiles.
    #[must_use]
    pub fn positions(&self) -> Vec<Position> {
        self.tiles.iter().map(Tile::position).collect()
    }

    /// Check if a tile belongs to this match.
    #[must_use]
    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.iter().any(|t| t.id == id)
    }

    /// Kind of powerup spawned, if any.
    #[must_use]
    pub fn powerup_kind(&self) -> Option<PowerupKind> {
        self.spawned_powerup.map(|s| s.kind)
    }
}
