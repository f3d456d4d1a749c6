//! Combination resolution.

use log::debug;

use crate::core::{Position, BOMB_COMBO_RADIUS, BOMB_RADIUS, BURST_RADIUS};
use crate::grid::Grid;
use crate::powerups::footprint::{band_positions, color_positions, cross_positions, dedup_positions, tiles_at};
use crate::powerups::{chain_react, resolve_area, ActivationSet, PowerupResolver, Resolution, TurnContext};
use crate::tiles::{PowerupKind, Tile, TileColor};

use super::{combo_effect, ComboClass, ComboEffect};

/// Two powerups in canonical order.
///
/// Sorting by (class, position) makes every decision independent of the
/// order the caller passed the tiles in.
#[derive(Clone, Copy, Debug)]
struct Pair {
    first: Tile,
    second: Tile,
    effect: ComboEffect,
    /// Merge cell: the row-major later of the two cells.
    center: Position,
}

impl Pair {
    fn new(a: &Tile, b: &Tile) -> Option<Self> {
        let (kind_a, kind_b) = (a.powerup?, b.powerup?);
        if a.id == b.id {
            return None;
        }
        let key_a = (ComboClass::from(kind_a), a.position(), a.id);
        let key_b = (ComboClass::from(kind_b), b.position(), b.id);
        let (first, second) = if key_a <= key_b { (*a, *b) } else { (*b, *a) };
        Some(Self {
            first,
            second,
            effect: combo_effect(kind_a, kind_b),
            center: a.position().max(b.position()),
        })
    }

    fn both_propellers(&self) -> bool {
        self.first.powerup == Some(PowerupKind::Propeller) && self.second.powerup == Some(PowerupKind::Propeller)
    }

    /// Cells both tiles occupy plus the takeoff ring of each propeller.
    fn base_area(&self, grid: &Grid) -> Vec<Position> {
        let mut area = vec![self.first.position(), self.second.position()];
        for tile in [self.first, self.second] {
            if tile.powerup == Some(PowerupKind::Propeller) {
                area.extend(grid.neighbors(tile.position()));
            }
        }
        area
    }
}

/// Resolves fused powerup pairs.
///
/// ## Usage
///
/// ```
/// use match3_core::combos::CombinationResolver;
/// use match3_core::core::GridConfig;
/// use match3_core::grid::Grid;
/// use match3_core::powerups::{ActivationSet, TurnContext};
/// use match3_core::tiles::{PowerupKind, TileColor};
///
/// let mut grid = Grid::new(GridConfig::new(8, 8).with_seed(5));
/// grid.fill_grid();
/// let a = grid.place_powerup(3, 3, PowerupKind::RocketH, Some(TileColor::Red)).unwrap();
/// let b = grid.place_powerup(3, 4, PowerupKind::RocketV, Some(TileColor::Blue)).unwrap();
///
/// let mut turn = TurnContext::for_grid(&mut grid);
/// let mut activated = ActivationSet::new();
/// let tiles = CombinationResolver::combine(&grid, &a, &b, &mut activated, &mut turn);
///
/// // Row 3 and column 4, minus the two fused rockets
/// assert_eq!(tiles.len(), 8 + 8 - 1 - 2);
/// ```
pub struct CombinationResolver;

impl CombinationResolver {
    /// Fuse two powerups and chain everything their blast hits.
    ///
    /// Returns an empty list unless both tiles are distinct powerups that
    /// have not fired in this resolution. Both ids are marked activated
    /// before anything is chained.
    pub fn combine(
        grid: &Grid,
        a: &Tile,
        b: &Tile,
        activated: &mut ActivationSet,
        turn: &mut TurnContext,
    ) -> Vec<Tile> {
        Self::resolve(grid, a, b, activated, turn).tiles
    }

    /// Like `combine`, also returning the combined position footprint.
    pub fn resolve(
        grid: &Grid,
        a: &Tile,
        b: &Tile,
        activated: &mut ActivationSet,
        turn: &mut TurnContext,
    ) -> Resolution {
        let Some(pair) = Pair::new(a, b) else {
            return Resolution::default();
        };
        if activated.contains(a.id) || activated.contains(b.id) {
            return Resolution::default();
        }
        activated.insert(a.id);
        activated.insert(b.id);
        debug!("combining {} and {} at {}: {:?}", a.id, b.id, pair.center, pair.effect);

        let area = match pair.effect {
            ComboEffect::Independent => {
                let mut area = Vec::new();
                for tile in [pair.first, pair.second] {
                    if let Some(kind) = tile.powerup {
                        let hit = resolve_area(grid, &tile, kind, None, turn, &area);
                        area.extend(hit);
                    }
                }
                area
            }
            effect => {
                let color = Self::resolve_color(grid, &pair, turn);
                let targets = Self::targets(grid, &pair, turn, true);
                fused_area(grid, &pair, effect, color, &targets)
            }
        };
        let area = dedup_positions(area);

        let direct = tiles_at(grid, &area, &[a.id, b.id]);
        let mut positions = area;
        let tiles = chain_react(grid, &[a.id, b.id], direct, activated, turn, &mut positions);
        debug!("combination hit {} tiles", tiles.len());
        Resolution {
            tiles,
            positions: dedup_positions(positions),
        }
    }

    /// Resolve and cache the random choices of a combination ahead of
    /// time, so they can be animated. Returns the propeller targets.
    pub fn prepare(grid: &Grid, a: &Tile, b: &Tile, turn: &mut TurnContext) -> Vec<Position> {
        let Some(pair) = Pair::new(a, b) else {
            return Vec::new();
        };
        Self::resolve_color(grid, &pair, turn);
        Self::targets(grid, &pair, turn, false)
    }

    /// Cells a combination would hit, without firing or chaining.
    ///
    /// Uses only colors and propeller targets already cached in `turn`.
    #[must_use]
    pub fn combination_positions(grid: &Grid, a: &Tile, b: &Tile, turn: &TurnContext) -> Vec<Position> {
        let Some(pair) = Pair::new(a, b) else {
            return Vec::new();
        };
        let area = match pair.effect {
            ComboEffect::Independent => {
                let mut area = PowerupResolver::affected_positions(grid, &pair.first, None, turn);
                area.extend(PowerupResolver::affected_positions(grid, &pair.second, None, turn));
                area
            }
            effect => {
                let color = Self::cached_color(&pair, turn);
                let targets = Self::cached_targets(&pair, turn);
                fused_area(grid, &pair, effect, color, &targets)
            }
        };
        dedup_positions(area)
    }

    /// Color for color-bomb pairs: the partner's, else the bomb's own,
    /// else one drawn for the bomb this turn.
    fn resolve_color(grid: &Grid, pair: &Pair, turn: &mut TurnContext) -> Option<TileColor> {
        match pair.effect {
            ComboEffect::ColorSweep | ComboEffect::ColorBurst => pair
                .first
                .color
                .or(pair.second.color)
                .or_else(|| turn.resolve_color(grid, &pair.second)),
            _ => None,
        }
    }

    fn cached_color(pair: &Pair, turn: &TurnContext) -> Option<TileColor> {
        match pair.effect {
            ComboEffect::ColorSweep | ComboEffect::ColorBurst => pair
                .first
                .color
                .or(pair.second.color)
                .or_else(|| turn.cached_color(pair.second.id)),
            _ => None,
        }
    }

    /// Propeller targets for the pair, resolved (and consumed if asked).
    ///
    /// Single-propeller pairs: the propeller sorts second. Two propellers
    /// draw one target each, the second avoiding the first's.
    fn targets(grid: &Grid, pair: &Pair, turn: &mut TurnContext, consume: bool) -> Vec<Position> {
        let mut draw = |tile: &Tile, count: usize, exclude: &[Position]| {
            if consume {
                turn.consume_propeller_targets(grid, tile, count, exclude)
            } else {
                turn.resolve_propeller_targets(grid, tile, count, exclude)
            }
        };
        match pair.effect {
            ComboEffect::PropellerCross | ComboEffect::PropellerBomb => {
                draw(&pair.second, 1, &[pair.first.position()]).to_vec()
            }
            ComboEffect::PropellerBursts { count } if pair.both_propellers() => {
                let per_propeller = (count / 2).max(1);
                let mut targets = draw(&pair.first, per_propeller, &[pair.second.position()]).to_vec();
                let mut exclude = vec![pair.first.position()];
                exclude.extend(targets.iter().copied());
                targets.extend(draw(&pair.second, per_propeller, &exclude));
                targets
            }
            ComboEffect::PropellerBursts { count } => {
                draw(&pair.second, count, &[pair.first.position()]).to_vec()
            }
            _ => Vec::new(),
        }
    }

    fn cached_targets(pair: &Pair, turn: &TurnContext) -> Vec<Position> {
        let cached = |tile: &Tile, count: usize| {
            turn.cached_propeller_targets(tile.id)
                .iter()
                .take(count)
                .copied()
                .collect::<Vec<_>>()
        };
        match pair.effect {
            ComboEffect::PropellerCross | ComboEffect::PropellerBomb => cached(&pair.second, 1),
            ComboEffect::PropellerBursts { count } if pair.both_propellers() => {
                let per_propeller = (count / 2).max(1);
                let mut targets = cached(&pair.first, per_propeller);
                targets.extend(cached(&pair.second, per_propeller));
                targets
            }
            ComboEffect::PropellerBursts { count } => cached(&pair.second, count),
            _ => Vec::new(),
        }
    }
}

/// Area of a fused effect with its color and targets already chosen.
fn fused_area(
    grid: &Grid,
    pair: &Pair,
    effect: ComboEffect,
    color: Option<TileColor>,
    targets: &[Position],
) -> Vec<Position> {
    let mut area = pair.base_area(grid);
    match effect {
        ComboEffect::Cross => area.extend(cross_positions(grid, pair.center)),
        ComboEffect::BigExplosion => area.extend(grid.square_positions(pair.center, BOMB_COMBO_RADIUS)),
        ComboEffect::Band => area.extend(band_positions(grid, pair.center, 1)),
        ComboEffect::ColorSweep => {
            if let Some(color) = color {
                for (index, pos) in color_positions(grid, color).into_iter().enumerate() {
                    if index % 2 == 0 {
                        area.extend(grid.row_positions(pos.row));
                    } else {
                        area.extend(grid.col_positions(pos.col));
                    }
                }
            }
        }
        ComboEffect::ColorBurst => {
            if let Some(color) = color {
                for pos in color_positions(grid, color) {
                    area.extend(grid.square_positions(pos, BURST_RADIUS));
                }
            }
        }
        ComboEffect::ClearBoard => area.extend(grid.positions()),
        ComboEffect::PropellerCross => {
            for target in targets.iter().take(1) {
                area.extend(cross_positions(grid, *target));
            }
        }
        ComboEffect::PropellerBomb => {
            for target in targets.iter().take(1) {
                area.extend(grid.square_positions(*target, BOMB_RADIUS));
            }
        }
        ComboEffect::PropellerBursts { .. } => {
            for target in targets {
                area.extend(grid.square_positions(*target, BURST_RADIUS));
            }
        }
        ComboEffect::Independent => {}
    }
    dedup_positions(area)
}
