//! Board shuffle.

use log::{debug, warn};

use crate::core::Position;
use crate::matching::{has_match, matchable_color};
use crate::moves::has_possible_move;
use crate::tiles::{Tile, TileColor};

use super::{Cell, Grid};

/// Arrangements tried before settling for a weaker one.
pub const SHUFFLE_ATTEMPTS: usize = 32;

impl Grid {
    /// Permute the plain, movable tiles among their cells.
    ///
    /// Powerups, locked tiles and obstacles stay where they are. Each
    /// attempt shuffles the tiles, then deals them out avoiding obvious
    /// matches. Up to `SHUFFLE_ATTEMPTS` arrangements are tried for one
    /// with a possible move and no ready-made match. Falls back to the first arrangement that
    /// at least has a move, then to the last one tried.
    ///
    /// Returns `true` if the board ends up with a move and no match.
    pub fn shuffle_tiles(&mut self) -> bool {
        let slots: Vec<Position> = self
            .cells()
            .filter(|c| c.tile.is_some_and(|t| !t.is_powerup()) && c.tile_can_move())
            .map(Cell::position)
            .collect();
        if slots.len() < 2 {
            return false;
        }
        let mut tiles: Vec<Tile> = slots.iter().filter_map(|p| self.tile_at(*p)).collect();

        let mut playable: Option<Vec<Tile>> = None;
        for attempt in 0..SHUFFLE_ATTEMPTS {
            self.rng_mut().shuffle(&mut tiles);
            let mut trial = self.clone();
            trial.arrange(&slots, &tiles);
            if !has_possible_move(&trial) {
                continue;
            }
            if !has_match(&trial) {
                debug!("shuffled {} tiles in {} attempts", tiles.len(), attempt + 1);
                self.arrange(&slots, &tiles);
                return true;
            }
            if playable.is_none() {
                playable = Some(tiles.clone());
            }
        }

        warn!("no clean shuffle in {} attempts", SHUFFLE_ATTEMPTS);
        let fallback = playable.unwrap_or(tiles);
        self.arrange(&slots, &fallback);
        false
    }

    /// Deal `tiles` into `slots` (row-major), at each slot preferring the
    /// first tile that does not complete a line or square with the cells
    /// above and to the left.
    fn arrange(&mut self, slots: &[Position], tiles: &[Tile]) {
        let mut pool = tiles.to_vec();
        for pos in slots {
            if pool.is_empty() {
                break;
            }
            let pick = pool
                .iter()
                .position(|t| !self.completes_match(*pos, t.color))
                .unwrap_or(0);
            let tile = pool.remove(pick);
            self.set_tile(pos.row, pos.col, Some(tile));
        }
    }

    fn completes_match(&self, pos: Position, color: Option<TileColor>) -> bool {
        let Some(color) = color else {
            return false;
        };
        let same = |d_row: isize, d_col: isize| {
            pos.offset(d_row, d_col).and_then(|p| matchable_color(self, p)) == Some(color)
        };
        (same(0, -1) && same(0, -2))
            || (same(-1, 0) && same(-2, 0))
            || (same(-1, 0) && same(0, -1) && same(-1, -1))
    }
}
