//! Area helpers shared by single activations and combinations.

use rustc_hash::FxHashSet;

use crate::core::Position;
use crate::grid::Grid;
use crate::tiles::{PowerupKind, Tile, TileColor, TileId};

/// The row (RocketH) or column (any other kind) through `origin`.
pub(crate) fn rocket_positions(grid: &Grid, origin: Position, kind: PowerupKind) -> Vec<Position> {
    match kind {
        PowerupKind::RocketH => grid.row_positions(origin.row),
        _ => grid.col_positions(origin.col),
    }
}

/// Full row plus full column through `origin`.
pub(crate) fn cross_positions(grid: &Grid, origin: Position) -> Vec<Position> {
    let mut positions = grid.row_positions(origin.row);
    positions.extend(grid.col_positions(origin.col).into_iter().filter(|p| p.row != origin.row));
    positions
}

/// Rows and columns within `half_width` of `origin`, full length.
pub(crate) fn band_positions(grid: &Grid, origin: Position, half_width: usize) -> Vec<Position> {
    let mut positions = Vec::new();
    for row in origin.row.saturating_sub(half_width)..=origin.row + half_width {
        positions.extend(grid.row_positions(row));
    }
    for col in origin.col.saturating_sub(half_width)..=origin.col + half_width {
        positions.extend(grid.col_positions(col));
    }
    dedup_positions(positions)
}

/// Positions of every tile of `color`, powerups included, row-major.
pub(crate) fn color_positions(grid: &Grid, color: TileColor) -> Vec<Position> {
    grid.tiles()
        .filter(|t| t.color == Some(color))
        .map(|t| t.position())
        .collect()
}

/// Tiles currently at `positions`, skipping `exclude`d ids and duplicates.
pub(crate) fn tiles_at(grid: &Grid, positions: &[Position], exclude: &[TileId]) -> Vec<Tile> {
    let mut seen: FxHashSet<TileId> = exclude.iter().copied().collect();
    positions
        .iter()
        .filter_map(|p| grid.tile_at(*p))
        .filter(|t| seen.insert(t.id))
        .collect()
}

/// Drop repeated positions, keeping first occurrences in order.
pub(crate) fn dedup_positions(positions: Vec<Position>) -> Vec<Position> {
    let mut seen: FxHashSet<Position> = FxHashSet::default();
    positions.into_iter().filter(|p| seen.insert(*p)).collect()
}
