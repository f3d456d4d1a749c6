//! Powerup activation and chain reactions.

use log::{debug, trace};
use rustc_hash::FxHashSet;

use crate::core::{Position, BOMB_RADIUS};
use crate::grid::Grid;
use crate::tiles::{PowerupKind, Tile, TileColor, TileId};

use super::footprint::{color_positions, dedup_positions, rocket_positions, tiles_at};
use super::{ActivationSet, TurnContext};

/// Everything one resolution touched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Affected tiles, deduplicated by id, roots excluded.
    pub tiles: Vec<Tile>,
    /// Every cell in the blast footprint of every powerup that fired,
    /// including cells without tiles.
    pub positions: Vec<Position>,
}

/// Resolves powerup activations.
///
/// ## Usage
///
/// ```
/// use match3_core::core::GridConfig;
/// use match3_core::grid::Grid;
/// use match3_core::powerups::{ActivationSet, PowerupResolver, TurnContext};
/// use match3_core::tiles::{PowerupKind, TileColor};
///
/// let mut grid = Grid::new(GridConfig::new(8, 8).with_seed(3));
/// grid.fill_grid();
/// let rocket = grid.place_powerup(4, 4, PowerupKind::RocketH, Some(TileColor::Red)).unwrap();
///
/// let mut turn = TurnContext::for_grid(&mut grid);
/// let mut activated = ActivationSet::new();
/// let tiles = PowerupResolver::activate(&grid, &rocket, None, &mut activated, &mut turn);
///
/// assert_eq!(tiles.len(), 7);
/// assert!(tiles.iter().all(|t| t.row == 4 && t.id != rocket.id));
/// ```
pub struct PowerupResolver;

impl PowerupResolver {
    /// Activate a powerup and everything its blast sets off.
    ///
    /// Returns an empty list if `tile` is not a powerup or already fired
    /// in this resolution (`activated` is left unchanged in that case).
    pub fn activate(
        grid: &Grid,
        tile: &Tile,
        target_color: Option<TileColor>,
        activated: &mut ActivationSet,
        turn: &mut TurnContext,
    ) -> Vec<Tile> {
        Self::resolve(grid, tile, target_color, activated, turn).tiles
    }

    /// Activate whatever powerup sits at `pos` (tap or booster).
    pub fn activate_at(
        grid: &Grid,
        pos: Position,
        target_color: Option<TileColor>,
        activated: &mut ActivationSet,
        turn: &mut TurnContext,
    ) -> Vec<Tile> {
        match grid.tile_at(pos) {
            Some(tile) => Self::activate(grid, &tile, target_color, activated, turn),
            None => Vec::new(),
        }
    }

    /// Like `activate`, also returning the combined position footprint of
    /// every powerup that fired.
    pub fn resolve(
        grid: &Grid,
        tile: &Tile,
        target_color: Option<TileColor>,
        activated: &mut ActivationSet,
        turn: &mut TurnContext,
    ) -> Resolution {
        let mut positions = Vec::new();
        let tiles = Self::fire(grid, tile, target_color, activated, turn, &mut positions);
        Resolution {
            tiles,
            positions: dedup_positions(positions),
        }
    }

    /// Cells a powerup would hit, without firing it or chaining.
    ///
    /// Includes the powerup's own cell and cells with no tile. A color
    /// bomb with no known color covers only its own cell; a propeller
    /// covers its target only if one is cached in `turn`.
    #[must_use]
    pub fn affected_positions(
        grid: &Grid,
        tile: &Tile,
        target_color: Option<TileColor>,
        turn: &TurnContext,
    ) -> Vec<Position> {
        let Some(kind) = tile.powerup else {
            return Vec::new();
        };
        let color = target_color
            .or(tile.color)
            .or_else(|| turn.cached_color(tile.id));
        let target = turn.cached_propeller_targets(tile.id).first().copied();
        footprint(grid, tile, kind, color, target)
    }

    fn fire(
        grid: &Grid,
        tile: &Tile,
        target_color: Option<TileColor>,
        activated: &mut ActivationSet,
        turn: &mut TurnContext,
        positions: &mut Vec<Position>,
    ) -> Vec<Tile> {
        let Some(kind) = tile.powerup else {
            return Vec::new();
        };
        if !activated.insert(tile.id) {
            trace!("{} already fired", tile.id);
            return Vec::new();
        }
        debug!("activating {:?} {} at {}", kind, tile.id, tile.position());

        let area = resolve_area(grid, tile, kind, target_color, turn, positions.as_slice());
        let direct = tiles_at(grid, &area, &[tile.id]);
        positions.extend(area);

        let hit = chain_react(grid, &[tile.id], direct, activated, turn, positions);
        debug!("{} hit {} tiles", tile.id, hit.len());
        hit
    }
}

/// Area of a single powerup, drawing its color or consuming its target
/// from the turn context as needed.
///
/// `hit` holds the cells already hit in this resolution. A propeller
/// without a cached target never picks one of them.
pub(crate) fn resolve_area(
    grid: &Grid,
    tile: &Tile,
    kind: PowerupKind,
    target_color: Option<TileColor>,
    turn: &mut TurnContext,
    hit: &[Position],
) -> Vec<Position> {
    let (color, target) = match kind {
        PowerupKind::ColorBomb => (target_color.or_else(|| turn.resolve_color(grid, tile)), None),
        PowerupKind::Propeller => {
            let targets = turn.consume_propeller_targets(grid, tile, 1, hit);
            (None, targets.first().copied())
        }
        _ => (None, None),
    };
    footprint(grid, tile, kind, color, target)
}

/// Area of a single powerup, given its resolved color / target.
fn footprint(
    grid: &Grid,
    tile: &Tile,
    kind: PowerupKind,
    color: Option<TileColor>,
    target: Option<Position>,
) -> Vec<Position> {
    let origin = tile.position();
    match kind {
        PowerupKind::RocketH | PowerupKind::RocketV => rocket_positions(grid, origin, kind),
        PowerupKind::Bomb => grid.square_positions(origin, BOMB_RADIUS),
        PowerupKind::ColorBomb => {
            let mut area = vec![origin];
            if let Some(color) = color {
                area.extend(color_positions(grid, color));
            }
            dedup_positions(area)
        }
        PowerupKind::Propeller => {
            let mut area = vec![origin];
            area.extend(grid.neighbors(origin));
            area.extend(target);
            dedup_positions(area)
        }
    }
}

/// Fire every un-fired powerup among `direct`, merging what they hit.
///
/// Results are deduplicated by tile id; `roots` never appear in the
/// output.
pub(crate) fn chain_react(
    grid: &Grid,
    roots: &[TileId],
    direct: Vec<Tile>,
    activated: &mut ActivationSet,
    turn: &mut TurnContext,
    positions: &mut Vec<Position>,
) -> Vec<Tile> {
    let mut seen: FxHashSet<TileId> = roots.iter().copied().collect();
    let mut result: Vec<Tile> = direct.iter().filter(|t| seen.insert(t.id)).copied().collect();

    for tile in direct {
        if !tile.is_powerup() || activated.contains(tile.id) {
            continue;
        }
        trace!("chain reaction reaches {} at {}", tile.id, tile.position());
        let hit = PowerupResolver::fire(grid, &tile, None, activated, turn, positions);
        result.extend(hit.into_iter().filter(|t| seen.insert(t.id)));
    }
    result
}
