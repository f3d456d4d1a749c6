//! Applying resolution results to the grid.
//!
//! The resolution engines only report what is affected. These helpers
//! perform the matching mutations and tally what happened so scoring and
//! objective tracking can read one report:
//!
//! - `apply_clear`: clear a blast footprint (tiles + obstacles)
//! - `clear_match`: clear a match, hit adjacent obstacles, spawn its powerup

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::Position;
use crate::matching::Match;
use crate::obstacles::{Obstacle, ObstacleKind};
use crate::tiles::Tile;

use super::{Grid, ObstacleDamage};

/// Tally of one clear operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Tiles removed from the board, in processing order.
    pub tiles: Vec<Tile>,
    /// Every obstacle hit, with its state before the hit.
    pub damage: Vec<ObstacleDamage>,
    /// Obstacles fully cleared, by kind.
    pub obstacles_cleared: FxHashMap<ObstacleKind, u32>,
    /// Cells frozen by ice bucket spills.
    pub frozen: Vec<Position>,
    /// Plain tiles lost under the spilled ice, in `frozen` order.
    pub frozen_tiles: Vec<Tile>,
    /// Powerup placed by a cleared match.
    pub spawned: Option<Tile>,
}

impl ClearReport {
    /// Number of tiles removed.
    #[must_use]
    pub fn tiles_cleared(&self) -> usize {
        self.tiles.len()
    }

    /// Number of obstacles of `kind` fully cleared.
    #[must_use]
    pub fn cleared_count(&self, kind: ObstacleKind) -> u32 {
        self.obstacles_cleared.get(&kind).copied().unwrap_or(0)
    }

    fn record(&mut self, damage: ObstacleDamage) {
        if damage.cleared {
            *self.obstacles_cleared.entry(damage.obstacle.kind).or_insert(0) += 1;
        }
        self.damage.push(damage);
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: ClearReport) {
        self.tiles.extend(other.tiles);
        self.damage.extend(other.damage);
        for (kind, count) in other.obstacles_cleared {
            *self.obstacles_cleared.entry(kind).or_insert(0) += count;
        }
        self.frozen.extend(other.frozen);
        self.frozen_tiles.extend(other.frozen_tiles);
        if other.spawned.is_some() {
            self.spawned = other.spawned;
        }
    }
}

impl Grid {
    /// Clear every cell in a footprint.
    ///
    /// Per cell:
    /// - chain: the chain takes the hit, the tile stays
    /// - grass: the tile is removed and the grass takes a hit
    /// - tile-blocking obstacle: the obstacle takes a hit
    /// - otherwise: the tile is removed
    ///
    /// Positions are processed once each, in the given order. Ice bucket
    /// spills happen after the whole footprint, so fresh ice is never hit
    /// by the blast that created it.
    pub fn apply_clear(&mut self, positions: &[Position]) -> ClearReport {
        let mut report = ClearReport::default();
        let mut seen: FxHashSet<Position> = FxHashSet::default();
        let mut spills = Vec::new();

        for &pos in positions {
            if !seen.insert(pos) || self.is_blocked(pos.row, pos.col) {
                continue;
            }
            match self.obstacle(pos.row, pos.col) {
                Some(obstacle) if obstacle.kind == ObstacleKind::Chain => {
                    if let Some(hit) = self.hit_obstacle(pos.row, pos.col) {
                        report.record(hit);
                    }
                }
                Some(obstacle) if !obstacle.behavior().blocks_tile => {
                    if let Some(tile) = self.take_tile(pos.row, pos.col) {
                        report.tiles.push(tile);
                    }
                    if let Some(hit) = self.hit_obstacle(pos.row, pos.col) {
                        report.record(hit);
                    }
                }
                Some(_) => {
                    if let Some(hit) = self.hit_obstacle(pos.row, pos.col) {
                        if hit.cleared && hit.obstacle.kind == ObstacleKind::IceBucket {
                            spills.push(pos);
                        }
                        report.record(hit);
                    }
                }
                None => {
                    if let Some(tile) = self.take_tile(pos.row, pos.col) {
                        report.tiles.push(tile);
                    }
                }
            }
        }

        for pos in spills {
            self.spill_ice(pos, &mut report);
        }
        report
    }

    /// Clear a match: remove its tiles, hit each neighboring obstacle that
    /// reacts to adjacent matches once, then place the spawned powerup in
    /// the match color.
    pub fn clear_match(&mut self, matched: &Match) -> ClearReport {
        let positions = matched.positions();
        let mut report = self.apply_clear(&positions);

        let mut neighbors: Vec<Position> = Vec::new();
        for pos in &positions {
            for neighbor in self.neighbors(*pos) {
                if !positions.contains(&neighbor) && !neighbors.contains(&neighbor) {
                    neighbors.push(neighbor);
                }
            }
        }
        let mut spills = Vec::new();
        for pos in neighbors {
            let reacts = self
                .obstacle(pos.row, pos.col)
                .is_some_and(|o| o.behavior().cleared_by_adjacent);
            if !reacts {
                continue;
            }
            if let Some(hit) = self.hit_obstacle(pos.row, pos.col) {
                if hit.cleared && hit.obstacle.kind == ObstacleKind::IceBucket {
                    spills.push(pos);
                }
                report.record(hit);
            }
        }
        for pos in spills {
            self.spill_ice(pos, &mut report);
        }

        if let Some(spawn) = matched.spawned_powerup {
            report.spawned = self.place_powerup(
                spawn.position.row,
                spawn.position.col,
                spawn.kind,
                matched.color(),
            );
        }
        report
    }

    /// Freeze the neighbors of a destroyed ice bucket.
    ///
    /// Each playable, obstacle-free neighbor not holding a powerup gets one
    /// layer of ice; its plain tile is lost and reported.
    fn spill_ice(&mut self, origin: Position, report: &mut ClearReport) {
        let before = report.frozen.len();
        for pos in self.neighbors(origin) {
            let Some(cell) = self.cell_at(pos) else {
                continue;
            };
            if cell.blocked || cell.obstacle.is_some() || cell.tile.is_some_and(|t| t.is_powerup()) {
                continue;
            }
            if let Some(tile) = self.take_tile(pos.row, pos.col) {
                report.frozen_tiles.push(tile);
            }
            self.set_obstacle(pos.row, pos.col, Some(Obstacle::single(ObstacleKind::Ice)));
            report.frozen.push(pos);
        }
        let frozen = report.frozen.len() - before;
        if frozen > 0 {
            debug!("ice bucket at {origin} froze {frozen} cells");
        }
    }
}
