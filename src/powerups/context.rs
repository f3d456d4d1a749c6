//! Resolution state: the per-call activation set and the per-move turn
//! context.
//!
//! ## ActivationSet
//!
//! Ids of powerups that already fired in one resolution call tree. It only
//! grows, and every activation checks it first, so chain reactions
//! terminate even when powerups trigger each other in a cycle.
//!
//! ## TurnContext
//!
//! Owned by the caller for one player move. Holds the random stream used
//! for targeting plus two caches:
//! - propeller targets, resolvable before activation so the animation
//!   layer can show the flight, consumed once by the activation
//! - color-bomb colors drawn at random, so the tile and position
//!   footprints of one bomb agree
//!
//! Call `finish` (or drop the context) at the end of the move so no
//! target leaks into the next one.

use log::trace;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::core::{BoardRng, Position};
use crate::grid::Grid;
use crate::tiles::{Tile, TileColor, TileId};

/// Cached propeller targets for one tile.
pub type PropellerTargets = SmallVec<[Position; 3]>;

/// Powerups that already fired in the current resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivationSet {
    ids: FxHashSet<TileId>,
}

impl ActivationSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a tile already fired.
    #[must_use]
    pub fn contains(&self, id: TileId) -> bool {
        self.ids.contains(&id)
    }

    /// Mark a tile as fired. Returns `false` if it already was.
    pub fn insert(&mut self, id: TileId) -> bool {
        self.ids.insert(id)
    }

    /// Number of fired powerups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if nothing fired yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over fired ids (unordered).
    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.ids.iter().copied()
    }
}

/// Per-move targeting state.
#[derive(Clone, Debug)]
pub struct TurnContext {
    rng: BoardRng,
    propeller_targets: FxHashMap<TileId, PropellerTargets>,
    colors: FxHashMap<TileId, TileColor>,
}

impl TurnContext {
    /// Create a context drawing from the given stream.
    #[must_use]
    pub fn new(rng: BoardRng) -> Self {
        Self {
            rng,
            propeller_targets: FxHashMap::default(),
            colors: FxHashMap::default(),
        }
    }

    /// Create a context with a stream forked from the grid's RNG.
    pub fn for_grid(grid: &mut Grid) -> Self {
        Self::new(grid.fork_rng())
    }

    /// Resolve (and cache) where a propeller will fly.
    ///
    /// Repeated calls return the same target until an activation consumes
    /// it. The takeoff cells and the propeller itself are never chosen.
    pub fn resolve_propeller_target(&mut self, grid: &Grid, propeller: &Tile) -> Option<Position> {
        self.resolve_propeller_targets(grid, propeller, 1, &[]).first().copied()
    }

    /// Resolve (and cache) up to `count` distinct targets for a propeller.
    ///
    /// Already cached targets are kept and topped up; `exclude` lists
    /// extra cells that may not be picked.
    pub fn resolve_propeller_targets(
        &mut self,
        grid: &Grid,
        propeller: &Tile,
        count: usize,
        exclude: &[Position],
    ) -> PropellerTargets {
        let origin = propeller.position();
        let mut blocked: FxHashSet<Position> = grid.neighbors(origin).into_iter().collect();
        blocked.insert(origin);
        blocked.extend(exclude.iter().copied());

        let mut targets = self.propeller_targets.remove(&propeller.id).unwrap_or_default();
        blocked.extend(targets.iter().copied());
        while targets.len() < count {
            let Some(target) = self.pick_target(grid, &blocked) else {
                break;
            };
            trace!("{} targets {}", propeller.id, target);
            blocked.insert(target);
            targets.push(target);
        }

        let resolved: PropellerTargets = targets.iter().take(count).copied().collect();
        if !targets.is_empty() {
            self.propeller_targets.insert(propeller.id, targets);
        }
        resolved
    }

    /// Cached targets for a propeller, without resolving new ones.
    #[must_use]
    pub fn cached_propeller_targets(&self, id: TileId) -> &[Position] {
        self.propeller_targets.get(&id).map(|t| t.as_slice()).unwrap_or(&[])
    }

    /// Remove and return a propeller's cached targets.
    pub(crate) fn take_propeller_targets(&mut self, id: TileId) -> PropellerTargets {
        self.propeller_targets.remove(&id).unwrap_or_default()
    }

    /// Resolve up to `count` targets and consume them from the cache.
    pub(crate) fn consume_propeller_targets(
        &mut self,
        grid: &Grid,
        propeller: &Tile,
        count: usize,
        exclude: &[Position],
    ) -> PropellerTargets {
        let targets = self.resolve_propeller_targets(grid, propeller, count, exclude);
        self.take_propeller_targets(propeller.id);
        targets
    }

    /// Random target: a tile sitting on an obstacle if any, else any tile.
    fn pick_target(&mut self, grid: &Grid, exclude: &FxHashSet<Position>) -> Option<Position> {
        let open = |pos: Position| !exclude.contains(&pos);
        let on_obstacle: Vec<Position> = grid
            .cells()
            .filter(|c| c.tile.is_some() && c.obstacle.is_some() && open(c.position()))
            .map(|c| c.position())
            .collect();
        if !on_obstacle.is_empty() {
            return self.rng.choose(&on_obstacle).copied();
        }
        let any_tile: Vec<Position> = grid
            .cells()
            .filter(|c| c.tile.is_some() && open(c.position()))
            .map(|c| c.position())
            .collect();
        self.rng.choose(&any_tile).copied()
    }

    /// Resolve the color a color bomb clears when no color is given.
    ///
    /// Uses the tile's own color, then a color already drawn for it this
    /// turn, then draws uniformly from colors on non-powerup tiles.
    pub fn resolve_color(&mut self, grid: &Grid, tile: &Tile) -> Option<TileColor> {
        if let Some(color) = tile.color.or_else(|| self.cached_color(tile.id)) {
            return Some(color);
        }
        let present = grid.colors_present();
        let color = self.rng.choose(&present).copied()?;
        trace!("{} drew color {:?}", tile.id, color);
        self.colors.insert(tile.id, color);
        Some(color)
    }

    /// Color previously drawn for a tile this turn.
    #[must_use]
    pub fn cached_color(&self, id: TileId) -> Option<TileColor> {
        self.colors.get(&id).copied()
    }

    /// Number of propellers with cached targets.
    #[must_use]
    pub fn pending_targets(&self) -> usize {
        self.propeller_targets.len()
    }

    /// Drop all cached state at the end of a move.
    pub fn finish(&mut self) {
        self.propeller_targets.clear();
        self.colors.clear();
    }
}
