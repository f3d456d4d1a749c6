//! Property tests for detection and resolution.

use proptest::prelude::*;

use match3_core::combos::CombinationResolver;
use match3_core::core::{BoardRng, GridConfig, Position};
use match3_core::grid::Grid;
use match3_core::matching::find_all_matches;
use match3_core::obstacles::{Obstacle, ObstacleKind};
use match3_core::powerups::{ActivationSet, PowerupResolver, TurnContext};
use match3_core::tiles::{PowerupKind, Tile, TileColor};

const KINDS: [PowerupKind; 5] = [
    PowerupKind::RocketH,
    PowerupKind::RocketV,
    PowerupKind::Bomb,
    PowerupKind::ColorBomb,
    PowerupKind::Propeller,
];

fn filled(rows: usize, cols: usize, variety: usize, seed: u64) -> Grid {
    let mut grid = Grid::new(GridConfig::new(rows, cols).with_variety(variety).with_seed(seed));
    grid.fill_grid();
    grid
}

/// Sprinkle powerups over a filled board; returns the first one placed.
fn sprinkle(grid: &mut Grid, picks: &[(usize, usize, usize)]) -> Option<Tile> {
    let mut first = None;
    for &(row, col, kind) in picks {
        let placed = grid.place_powerup(row % grid.rows(), col % grid.cols(), KINDS[kind % KINDS.len()], None);
        first = first.or(placed);
    }
    // A later placement may have replaced the first one
    first.and_then(|t| grid.tile(t.row, t.col))
}

proptest! {
    // =========================================================================
    // Resolution Properties
    // =========================================================================

    /// Chains terminate, fire each powerup at most once, and never report
    /// a tile twice or the root itself.
    #[test]
    fn prop_resolution_terminates(
        rows in 3usize..10,
        cols in 3usize..10,
        seed in any::<u64>(),
        picks in prop::collection::vec((0usize..10, 0usize..10, 0usize..5), 1..30),
    ) {
        let mut grid = filled(rows, cols, 6, seed);
        let start = sprinkle(&mut grid, &picks);
        prop_assume!(start.is_some());
        let start = start.unwrap();
        let powerups = grid.tiles().filter(Tile::is_powerup).count();

        let mut turn = TurnContext::for_grid(&mut grid);
        let mut activated = ActivationSet::new();
        let resolution = PowerupResolver::resolve(&grid, &start, None, &mut activated, &mut turn);

        prop_assert!(activated.len() <= powerups);
        prop_assert!(activated.contains(start.id));
        let mut ids: Vec<_> = resolution.tiles.iter().map(|t| t.id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
        prop_assert!(!ids.contains(&start.id));
        prop_assert!(resolution.positions.iter().all(|p| grid.in_bounds(*p)));

        // Every powerup that was hit also fired
        for tile in resolution.tiles.iter().filter(|t| t.is_powerup()) {
            prop_assert!(activated.contains(tile.id));
        }

        // A second activation of the root is a no-op
        let again = PowerupResolver::activate(&grid, &start, None, &mut activated, &mut turn);
        prop_assert!(again.is_empty());
    }

    /// A horizontal rocket on a full board hits exactly the rest of its row.
    #[test]
    fn prop_rocket_h_hits_row(rows in 1usize..12, cols in 1usize..12, at in (0usize..12, 0usize..12), seed in any::<u64>()) {
        let mut grid = filled(rows, cols, 6, seed);
        let (row, col) = (at.0 % rows, at.1 % cols);
        let rocket = grid.place_powerup(row, col, PowerupKind::RocketH, None).unwrap();

        let mut turn = TurnContext::for_grid(&mut grid);
        let mut activated = ActivationSet::new();
        let tiles = PowerupResolver::activate(&grid, &rocket, None, &mut activated, &mut turn);
        prop_assert_eq!(tiles.len(), cols - 1);
        prop_assert!(tiles.iter().all(|t| t.row == row));
    }

    /// A corner bomb always hits the 8 other tiles of its 3×3 corner.
    #[test]
    fn prop_corner_bomb(rows in 3usize..12, cols in 3usize..12, corner in 0usize..4, seed in any::<u64>()) {
        let mut grid = filled(rows, cols, 6, seed);
        let row = if corner & 1 == 0 { 0 } else { rows - 1 };
        let col = if corner & 2 == 0 { 0 } else { cols - 1 };
        let bomb = grid.place_powerup(row, col, PowerupKind::Bomb, None).unwrap();

        let mut turn = TurnContext::for_grid(&mut grid);
        let mut activated = ActivationSet::new();
        let tiles = PowerupResolver::activate(&grid, &bomb, None, &mut activated, &mut turn);
        prop_assert_eq!(tiles.len(), 8);
    }

    /// Fusing two powerups gives the same result in either order.
    #[test]
    fn prop_combination_is_symmetric(
        kind_a in 0usize..5,
        kind_b in 0usize..5,
        at in (0usize..7, 0usize..6),
        horizontal in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let mut grid = filled(8, 8, 5, seed);
        let a_pos = Position::new(at.0, at.1);
        let b_pos = if horizontal { Position::new(at.0, at.1 + 1) } else { Position::new(at.0 + 1, at.1) };
        let a = grid.place_powerup(a_pos.row, a_pos.col, KINDS[kind_a], None).unwrap();
        let b = grid.place_powerup(b_pos.row, b_pos.col, KINDS[kind_b], None).unwrap();

        let run = |first: &Tile, second: &Tile| {
            let mut turn = TurnContext::new(BoardRng::new(seed));
            let mut activated = ActivationSet::new();
            let resolution = CombinationResolver::resolve(&grid, first, second, &mut activated, &mut turn);
            let mut ids: Vec<_> = resolution.tiles.iter().map(|t| t.id).collect();
            ids.sort();
            let mut positions = resolution.positions;
            positions.sort();
            (ids, positions)
        };
        prop_assert_eq!(run(&a, &b), run(&b, &a));
    }

    // =========================================================================
    // Detection Properties
    // =========================================================================

    /// No tile belongs to two matches, and every match has at least 3
    /// tiles of one color.
    #[test]
    fn prop_matches_are_disjoint(rows in 2usize..10, cols in 2usize..10, variety in 3usize..5, seed in any::<u64>()) {
        let grid = filled(rows, cols, variety, seed);
        let matches = find_all_matches(&grid);

        let mut ids: Vec<_> = matches.iter().flat_map(|m| m.tiles.iter().map(|t| t.id)).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);

        for m in &matches {
            prop_assert!(m.len() >= 3);
            let color = m.color();
            prop_assert!(m.tiles.iter().all(|t| t.color == color));
        }
    }

    /// A rocket line sharing tiles with a square always wins.
    #[test]
    fn prop_line_beats_square(col in 0usize..4, seed in any::<u64>()) {
        let mut grid = Grid::new(GridConfig::new(4, 8).with_seed(seed));
        let color = match_color(seed);
        for c in col..col + 4 {
            grid.place_tile(1, c, color);
        }
        grid.place_tile(2, col, color);
        grid.place_tile(2, col + 1, color);

        let matches = find_all_matches(&grid);
        prop_assert_eq!(matches.len(), 1);
        prop_assert_eq!(matches[0].powerup_kind(), Some(PowerupKind::RocketH));
    }

    // =========================================================================
    // Obstacle Properties
    // =========================================================================

    /// A two-layer obstacle survives one hit and falls to the second.
    #[test]
    fn prop_two_layer_obstacle(kind in prop::sample::select(vec![
        ObstacleKind::Grass,
        ObstacleKind::Ice,
        ObstacleKind::Box,
        ObstacleKind::Barrel,
    ])) {
        let mut grid = Grid::new(GridConfig::new(3, 3));
        grid.set_obstacle(1, 1, Some(Obstacle::new(kind, 2)));

        prop_assert_eq!(grid.clear_obstacle(1, 1), None);
        prop_assert_eq!(grid.obstacle(1, 1).map(|o| o.layers), Some(1));
        let cleared = grid.clear_obstacle(1, 1);
        prop_assert_eq!(cleared.map(|o| (o.kind, o.layers)), Some((kind, 0)));
        prop_assert!(grid.obstacle(1, 1).is_none());
    }
}

fn match_color(seed: u64) -> TileColor {
    TileColor::ALL[(seed % TileColor::ALL.len() as u64) as usize]
}

/// The canonical scenario: an 8×8 board with a horizontal rocket at (4, 4).
#[test]
fn test_rocket_h_scenario() {
    let mut grid = filled(8, 8, 6, 2024);
    let rocket = grid.place_powerup(4, 4, PowerupKind::RocketH, None).unwrap();
    let mut turn = TurnContext::for_grid(&mut grid);
    let mut activated = ActivationSet::new();

    let resolution = PowerupResolver::resolve(&grid, &rocket, None, &mut activated, &mut turn);
    let mut cols: Vec<usize> = resolution.tiles.iter().map(|t| t.col).collect();
    cols.sort_unstable();
    assert_eq!(cols, vec![0, 1, 2, 3, 5, 6, 7]);
    assert!(resolution.tiles.iter().all(|t| t.row == 4));

    // Clearing the footprint empties the row and leaves the rest alone
    let report = grid.apply_clear(&resolution.positions);
    assert_eq!(report.tiles_cleared(), 8);
    for col in 0..8 {
        assert!(grid.tile(4, col).is_none());
    }
    assert_eq!(grid.tiles().count(), 56);
}
