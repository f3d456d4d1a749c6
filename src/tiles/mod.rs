//! Tile model: ids, colors and powerup kinds.

mod tile;

pub use tile::{PowerupKind, Tile, TileColor, TileId};
