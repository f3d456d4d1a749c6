//! Tiles: colored game pieces, optionally powerups.
//!
//! A `Tile` is a small `Copy` value. The grid owns the stored copy; every
//! read hands out a snapshot, so "before" states never need explicit
//! cloning.
//!
//! ## Identity
//!
//! Every tile carries a `TileId` allocated by the grid. Ids are never
//! reused within a grid, so resolution code deduplicates by id rather
//! than by position (the same cell can legitimately hold different tiles
//! over time).

use serde::{Deserialize, Serialize};

use crate::core::Position;

/// Unique identifier for a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for TileId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Tile color.
///
/// Boards use a prefix of `ALL` whose length is the level's variety.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl TileColor {
    /// Every color, in palette order.
    pub const ALL: [TileColor; 6] = [
        TileColor::Red,
        TileColor::Blue,
        TileColor::Green,
        TileColor::Yellow,
        TileColor::Purple,
        TileColor::Orange,
    ];
}

/// Kinds of powerup tile.
///
/// The declaration order is the canonical sort order used by the
/// combination table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Clears its whole row.
    RocketH,
    /// Clears its whole column.
    RocketV,
    /// Clears a 5×5 square.
    Bomb,
    /// Clears every tile of one color.
    ColorBomb,
    /// Clears its neighbors, then flies to one target.
    Propeller,
}

impl PowerupKind {
    /// Check if this is either rocket orientation.
    #[must_use]
    pub const fn is_rocket(self) -> bool {
        matches!(self, PowerupKind::RocketH | PowerupKind::RocketV)
    }
}

/// A tile on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Unique id, immutable once created.
    pub id: TileId,

    /// Color. Colorless tiles (e.g. a pre-placed color bomb) never match.
    pub color: Option<TileColor>,

    /// Current row, kept in sync by the grid.
    pub row: usize,

    /// Current column, kept in sync by the grid.
    pub col: usize,

    /// Powerup kind, if this is a powerup tile.
    #[serde(default)]
    pub powerup: Option<PowerupKind>,
}

impl Tile {
    /// Create a plain colored tile.
    #[must_use]
    pub const fn new(id: TileId, color: TileColor, row: usize, col: usize) -> Self {
        Self {
            id,
            color: Some(color),
            row,
            col,
            powerup: None,
        }
    }

    /// Turn this tile into a powerup of the given kind.
    #[must_use]
    pub const fn with_powerup(mut self, kind: PowerupKind) -> Self {
        self.powerup = Some(kind);
        self
    }

    /// Drop the color (colorless powerups).
    #[must_use]
    pub const fn colorless(mut self) -> Self {
        self.color = None;
        self
    }

    /// Check if this tile is a powerup.
    #[must_use]
    pub const fn is_powerup(&self) -> bool {
        self.powerup.is_some()
    }

    /// The tile's current position.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}
