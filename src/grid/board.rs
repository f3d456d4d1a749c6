//! The grid: rectangular cell store and its mutators.
//!
//! The `Grid` owns every tile and obstacle on the board. It supports:
//! - Bounds-checked queries (`cell`, `tile`, `obstacle`)
//! - Tile placement, creation and swapping
//! - Obstacle damage (`clear_obstacle`, `damage_adjacent_obstacles`)
//! - Layout initialization
//!
//! Nothing here panics on bad coordinates. Invalid requests are no-ops
//! that report `false` / `None`, so an animation layer can poll state
//! instead of handling errors.

use im::Vector;
use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::config::{clamp_dimension, clamp_variety};
use crate::core::{BoardRng, BoardRngState, GridConfig, Position};
use crate::obstacles::Obstacle;
use crate::tiles::{PowerupKind, Tile, TileColor, TileId};

use super::layout::{CellCode, Layout};
use super::Cell;

/// Result of one damage step applied to an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleDamage {
    /// Row of the damaged obstacle.
    pub row: usize,
    /// Column of the damaged obstacle.
    pub col: usize,
    /// The obstacle as it was before the hit.
    pub obstacle: Obstacle,
    /// The hit removed the obstacle.
    pub cleared: bool,
}

/// The board.
///
/// Cells are stored in an `im::Vector`, so cloning a grid is O(1) and
/// clones share structure until mutated.
///
/// ## Usage
///
/// ```
/// use match3_core::core::{GridConfig, Position};
/// use match3_core::grid::Grid;
///
/// let mut grid = Grid::new(GridConfig::new(8, 8).with_seed(1));
/// grid.fill_grid();
///
/// assert!(grid.tile(0, 0).is_some());
/// assert!(grid.tile(8, 0).is_none()); // out of bounds
///
/// let swapped = grid.swap(Position::new(0, 0), Position::new(0, 1));
/// assert!(swapped);
/// ```
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vector<Cell>,
    palette: SmallVec<[TileColor; 6]>,
    next_tile_id: u32,
    rng: BoardRng,
}

impl Grid {
    /// Create an empty grid (no tiles, no obstacles).
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        let config = config.normalized();
        let mut grid = Self {
            rows: config.rows,
            cols: config.cols,
            cells: Vector::new(),
            palette: SmallVec::new(),
            next_tile_id: 0,
            rng: BoardRng::new(config.seed),
        };
        grid.set_variety(config.variety);
        grid.reset_cells();
        grid
    }

    /// Create a grid from a decoded layout.
    ///
    /// The layout's dimensions override those in `config`.
    #[must_use]
    pub fn from_layout(layout: &Layout, config: GridConfig) -> Self {
        let mut grid = Self::new(config);
        grid.apply_layout(layout);
        grid
    }

    fn reset_cells(&mut self) {
        self.cells = (0..self.rows * self.cols)
            .map(|i| Cell::new(i / self.cols, i % self.cols))
            .collect();
    }

    // === Dimensions & palette ===

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Colors currently in play.
    #[must_use]
    pub fn palette(&self) -> &[TileColor] {
        &self.palette
    }

    /// Change the number of colors in play (clamped to the supported range).
    pub fn set_variety(&mut self, variety: usize) {
        let variety = clamp_variety(variety);
        self.palette = TileColor::ALL[..variety].iter().copied().collect();
    }

    /// Resize the grid, discarding all contents.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.rows = clamp_dimension(rows);
        self.cols = clamp_dimension(cols);
        self.reset_cells();
    }

    /// Remove every tile, obstacle and blocked flag.
    pub fn clear(&mut self) {
        self.reset_cells();
    }

    // === Queries ===

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Check if a position lies on the board.
    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        self.index(pos.row, pos.col).is_some()
    }

    /// Get a cell.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(row, col).and_then(|i| self.cells.get(i))
    }

    /// Get a cell by position.
    #[must_use]
    pub fn cell_at(&self, pos: Position) -> Option<&Cell> {
        self.cell(pos.row, pos.col)
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        let index = self.index(row, col)?;
        self.cells.get_mut(index)
    }

    /// Get the tile in a cell.
    #[must_use]
    pub fn tile(&self, row: usize, col: usize) -> Option<Tile> {
        self.cell(row, col).and_then(|c| c.tile)
    }

    /// Get the tile at a position.
    #[must_use]
    pub fn tile_at(&self, pos: Position) -> Option<Tile> {
        self.tile(pos.row, pos.col)
    }

    /// Get the obstacle in a cell.
    #[must_use]
    pub fn obstacle(&self, row: usize, col: usize) -> Option<Obstacle> {
        self.cell(row, col).and_then(|c| c.obstacle)
    }

    /// Check if a cell is blocked. Out-of-bounds cells count as blocked.
    #[must_use]
    pub fn is_blocked(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).map_or(true, |c| c.blocked)
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// Iterate over all tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().filter_map(|c| c.tile)
    }

    /// Iterate over every position on the board in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.cols;
        (0..self.rows * cols).map(move |i| Position::new(i / cols, i % cols))
    }

    /// Find a tile by id.
    #[must_use]
    pub fn find_tile(&self, id: TileId) -> Option<Tile> {
        self.tiles().find(|t| t.id == id)
    }

    /// Colors present on non-powerup tiles, in palette order.
    #[must_use]
    pub fn colors_present(&self) -> SmallVec<[TileColor; 6]> {
        let mut present: SmallVec<[TileColor; 6]> = SmallVec::new();
        for color in self.tiles().filter(|t| !t.is_powerup()).filter_map(|t| t.color) {
            if !present.contains(&color) {
                present.push(color);
            }
        }
        present.sort();
        present
    }

    /// Check if two positions share an edge.
    #[must_use]
    pub fn is_adjacent(&self, a: Position, b: Position) -> bool {
        self.in_bounds(a) && self.in_bounds(b) && a.is_adjacent(b)
    }

    /// In-bounds orthogonal neighbors of a position.
    #[must_use]
    pub fn neighbors(&self, pos: Position) -> SmallVec<[Position; 4]> {
        pos.orthogonal().into_iter().filter(|p| self.in_bounds(*p)).collect()
    }

    /// In-bounds positions of the square of `radius` around `center`.
    ///
    /// Clips silently at the edges; includes `center`.
    #[must_use]
    pub fn square_positions(&self, center: Position, radius: usize) -> Vec<Position> {
        if !self.in_bounds(center) {
            return Vec::new();
        }
        let rows = center.row.saturating_sub(radius)..=(center.row + radius).min(self.rows - 1);
        let cols = center.col.saturating_sub(radius)..=(center.col + radius).min(self.cols - 1);
        rows.flat_map(|r| cols.clone().map(move |c| Position::new(r, c)))
            .collect()
    }

    /// Every position in a row.
    #[must_use]
    pub fn row_positions(&self, row: usize) -> Vec<Position> {
        if row >= self.rows {
            return Vec::new();
        }
        (0..self.cols).map(|c| Position::new(row, c)).collect()
    }

    /// Every position in a column.
    #[must_use]
    pub fn col_positions(&self, col: usize) -> Vec<Position> {
        if col >= self.cols {
            return Vec::new();
        }
        (0..self.rows).map(|r| Position::new(r, col)).collect()
    }

    // === RNG ===

    /// Fork an independent RNG stream (one per player move).
    pub fn fork_rng(&mut self) -> BoardRng {
        self.rng.fork()
    }

    /// Mutable access to the board RNG.
    pub fn rng_mut(&mut self) -> &mut BoardRng {
        &mut self.rng
    }

    /// Snapshot of the board RNG, for replays.
    #[must_use]
    pub fn rng_state(&self) -> BoardRngState {
        self.rng.state()
    }

    // === Tile mutation ===

    /// Put a tile into a cell (or empty it with `None`).
    ///
    /// No-op returning `false` if the cell is out of bounds, blocked, or
    /// its obstacle blocks tiles. On success the stored tile's
    /// coordinates are rewritten to this cell.
    pub fn set_tile(&mut self, row: usize, col: usize, tile: Option<Tile>) -> bool {
        let Some(cell) = self.cell_mut(row, col) else {
            return false;
        };
        if cell.blocked {
            return false;
        }
        match tile {
            Some(mut tile) => {
                if !cell.accepts_tile() {
                    return false;
                }
                tile.row = row;
                tile.col = col;
                cell.tile = Some(tile);
            }
            None => cell.tile = None,
        }
        true
    }

    /// Remove and return the tile in a cell.
    pub fn take_tile(&mut self, row: usize, col: usize) -> Option<Tile> {
        self.cell_mut(row, col).and_then(|c| c.tile.take())
    }

    /// Swap the tiles in two cells.
    ///
    /// Succeeds only if both cells are playable, both hold a tile, and
    /// neither tile is locked by its obstacle. Returns `false` and leaves
    /// the grid untouched otherwise.
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        if a == b {
            return false;
        }
        let (Some(cell_a), Some(cell_b)) = (self.cell_at(a), self.cell_at(b)) else {
            return false;
        };
        if !cell_a.tile_can_move() || !cell_b.tile_can_move() {
            return false;
        }
        let (tile_a, tile_b) = (cell_a.tile, cell_b.tile);
        self.set_tile(a.row, a.col, tile_b);
        self.set_tile(b.row, b.col, tile_a);
        true
    }

    fn allocate_id(&mut self) -> TileId {
        let id = TileId(self.next_tile_id);
        self.next_tile_id += 1;
        id
    }

    /// Create a tile of a given color with a fresh id and place it.
    ///
    /// Replaces any tile already in the cell. Returns `None` (and
    /// allocates nothing) if the cell cannot hold a tile.
    pub fn place_tile(&mut self, row: usize, col: usize, color: TileColor) -> Option<Tile> {
        if !self.cell(row, col)?.accepts_tile() {
            return None;
        }
        let tile = Tile::new(self.allocate_id(), color, row, col);
        self.set_tile(row, col, Some(tile));
        Some(tile)
    }

    /// Create a powerup tile with a fresh id and place it.
    ///
    /// Replaces any tile already in the cell.
    pub fn place_powerup(
        &mut self,
        row: usize,
        col: usize,
        kind: PowerupKind,
        color: Option<TileColor>,
    ) -> Option<Tile> {
        if !self.cell(row, col)?.accepts_tile() {
            return None;
        }
        let mut tile = Tile::new(self.allocate_id(), TileColor::Red, row, col).with_powerup(kind);
        tile.color = color;
        self.set_tile(row, col, Some(tile));
        Some(tile)
    }

    fn random_color(&mut self) -> TileColor {
        let index = self.rng.gen_range_usize(0..self.palette.len());
        self.palette.get(index).copied().unwrap_or(TileColor::Red)
    }

    /// Create a tile of a uniformly random palette color and place it.
    pub fn create_random_tile(&mut self, row: usize, col: usize) -> Option<Tile> {
        if !self.cell(row, col)?.accepts_tile() {
            return None;
        }
        let color = self.random_color();
        self.place_tile(row, col, color)
    }

    /// Fill every empty cell that can hold a tile.
    ///
    /// Returns the created tiles in row-major order.
    pub fn fill_grid(&mut self) -> Vec<Tile> {
        let empty: Vec<Position> = self
            .cells
            .iter()
            .filter(|c| c.tile.is_none() && c.accepts_tile())
            .map(Cell::position)
            .collect();
        empty
            .into_iter()
            .filter_map(|p| self.create_random_tile(p.row, p.col))
            .collect()
    }

    // === Obstacles & blocking ===

    /// Place or remove an obstacle.
    ///
    /// No-op on blocked or out-of-bounds cells. Placing an obstacle that
    /// blocks tiles removes the cell's tile.
    pub fn set_obstacle(&mut self, row: usize, col: usize, obstacle: Option<Obstacle>) -> bool {
        let Some(cell) = self.cell_mut(row, col) else {
            return false;
        };
        if cell.blocked {
            return false;
        }
        if obstacle.is_some_and(|o| o.behavior().blocks_tile) {
            cell.tile = None;
        }
        cell.obstacle = obstacle;
        true
    }

    /// Mark a cell as blocked (or playable). Blocking empties the cell.
    pub fn set_blocked(&mut self, row: usize, col: usize, blocked: bool) -> bool {
        let Some(cell) = self.cell_mut(row, col) else {
            return false;
        };
        cell.blocked = blocked;
        if blocked {
            cell.tile = None;
            cell.obstacle = None;
        }
        true
    }

    /// Apply one damage step to a cell's obstacle.
    ///
    /// Returns `None` if the cell has no obstacle or the obstacle is
    /// indestructible.
    pub(crate) fn hit_obstacle(&mut self, row: usize, col: usize) -> Option<ObstacleDamage> {
        let cell = self.cell_mut(row, col)?;
        let before = cell.obstacle?;
        if before.behavior().is_indestructible {
            return None;
        }
        cell.obstacle = before.damage();
        Some(ObstacleDamage {
            row,
            col,
            obstacle: before,
            cleared: cell.obstacle.is_none(),
        })
    }

    /// Damage the obstacle in a cell.
    ///
    /// Returns the cleared obstacle (with `layers == 0`) only when the hit
    /// removed it. A partial hit returns `None`, the lower layer count
    /// being visible in the cell.
    ///
    /// ```
    /// use match3_core::core::GridConfig;
    /// use match3_core::grid::Grid;
    /// use match3_core::obstacles::{Obstacle, ObstacleKind};
    ///
    /// let mut grid = Grid::new(GridConfig::new(3, 3));
    /// grid.set_obstacle(1, 1, Some(Obstacle::new(ObstacleKind::Box, 2)));
    ///
    /// assert_eq!(grid.clear_obstacle(1, 1), None);
    /// assert_eq!(grid.obstacle(1, 1).unwrap().layers, 1);
    ///
    /// let cleared = grid.clear_obstacle(1, 1).unwrap();
    /// assert_eq!(cleared.layers, 0);
    /// assert!(grid.obstacle(1, 1).is_none());
    /// ```
    pub fn clear_obstacle(&mut self, row: usize, col: usize) -> Option<Obstacle> {
        let damage = self.hit_obstacle(row, col)?;
        damage.cleared.then_some(Obstacle {
            layers: 0,
            ..damage.obstacle
        })
    }

    /// Damage every orthogonal neighbor whose obstacle is cleared by
    /// adjacent matches.
    pub fn damage_adjacent_obstacles(&mut self, row: usize, col: usize) -> Vec<ObstacleDamage> {
        if !self.in_bounds(Position::new(row, col)) {
            return Vec::new();
        }
        let targets: SmallVec<[Position; 4]> = self
            .neighbors(Position::new(row, col))
            .into_iter()
            .filter(|p| self.obstacle(p.row, p.col).is_some_and(|o| o.behavior().cleared_by_adjacent))
            .collect();
        targets
            .into_iter()
            .filter_map(|p| self.hit_obstacle(p.row, p.col))
            .collect()
    }

    // === Layout ===

    /// Initialize from layout rows, one character per cell.
    ///
    /// Lenient: unknown codes become random tiles, short rows are padded
    /// with blocked cells, and the grid is resized to the layout.
    pub fn initialize_from_layout<S: AsRef<str>>(&mut self, layout: &[S], variety: usize) {
        self.set_variety(variety);
        self.apply_layout(&Layout::lenient(layout));
    }

    fn apply_layout(&mut self, layout: &Layout) {
        if layout.is_empty() {
            self.reset_cells();
            return;
        }
        if layout.rows() != self.rows || layout.cols() != self.cols {
            debug!(
                "resizing grid from {}x{} to {}x{} for layout",
                self.rows,
                self.cols,
                layout.rows(),
                layout.cols()
            );
        }
        self.resize(layout.rows(), layout.cols());

        for pos in self.positions().collect::<Vec<_>>() {
            let Some(code) = layout.code(pos.row, pos.col) else {
                continue;
            };
            match code {
                CellCode::Random => {
                    self.create_random_tile(pos.row, pos.col);
                }
                CellCode::Obstacle(obstacle) => {
                    self.set_obstacle(pos.row, pos.col, Some(obstacle));
                    self.create_random_tile(pos.row, pos.col);
                }
                CellCode::Powerup(kind) => {
                    let color = match kind {
                        PowerupKind::ColorBomb => None,
                        _ => Some(self.random_color()),
                    };
                    self.place_powerup(pos.row, pos.col, kind, color);
                }
                CellCode::Blocked => {
                    self.set_blocked(pos.row, pos.col, true);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacles::ObstacleKind;

    fn filled(rows: usize, cols: usize) -> Grid {
        let mut grid = Grid::new(GridConfig::new(rows, cols).with_seed(5));
        grid.fill_grid();
        grid
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(GridConfig::new(4, 5));
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid.tiles().count(), 0);
        assert_eq!(grid.cells().count(), 20);
    }

    #[test]
    fn test_out_of_bounds_queries() {
        let grid = filled(3, 3);
        assert!(grid.cell(3, 0).is_none());
        assert!(grid.tile(0, 3).is_none());
        assert!(grid.obstacle(99, 99).is_none());
        assert!(grid.is_blocked(5, 5));
    }

    #[test]
    fn test_fill_assigns_unique_ids() {
        let grid = filled(6, 6);
        let mut ids: Vec<_> = grid.tiles().map(|t| t.id).collect();
        assert_eq!(ids.len(), 36);
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 36);
    }

    #[test]
    fn test_fill_uses_palette() {
        let mut grid = Grid::new(GridConfig::new(8, 8).with_variety(3).with_seed(11));
        grid.fill_grid();
        for tile in grid.tiles() {
            assert!(grid.palette().contains(&tile.color.unwrap()));
        }
    }

    #[test]
    fn test_fill_skips_blocking_obstacles() {
        let mut grid = Grid::new(GridConfig::new(3, 3));
        grid.set_obstacle(0, 0, Some(Obstacle::single(ObstacleKind::Stone)));
        grid.set_obstacle(0, 1, Some(Obstacle::single(ObstacleKind::Grass)));
        grid.set_blocked(2, 2, true);
        let created = grid.fill_grid();
        assert_eq!(created.len(), 7);
        assert!(grid.tile(0, 0).is_none());
        assert!(grid.tile(0, 1).is_some());
        assert!(grid.tile(2, 2).is_none());
    }

    #[test]
    fn test_set_tile_updates_coordinates() {
        let mut grid = filled(3, 3);
        let tile = grid.tile(0, 0).unwrap();
        assert!(grid.set_tile(2, 1, Some(tile)));
        let moved = grid.tile(2, 1).unwrap();
        assert_eq!(moved.id, tile.id);
        assert_eq!((moved.row, moved.col), (2, 1));
    }

    #[test]
    fn test_set_tile_rejects_blocked() {
        let mut grid = filled(3, 3);
        let tile = grid.tile(0, 0).unwrap();
        grid.set_blocked(1, 1, true);
        assert!(!grid.set_tile(1, 1, Some(tile)));
        assert!(grid.tile(1, 1).is_none());
        assert!(!grid.set_tile(7, 7, Some(tile)));
    }

    #[test]
    fn test_swap() {
        let mut grid = filled(3, 3);
        let a = grid.tile(0, 0).unwrap();
        let b = grid.tile(0, 1).unwrap();
        assert!(grid.swap(Position::new(0, 0), Position::new(0, 1)));
        assert_eq!(grid.tile(0, 0).unwrap().id, b.id);
        assert_eq!(grid.tile(0, 1).unwrap().id, a.id);
        assert_eq!(grid.tile(0, 1).unwrap().col, 1);
    }

    #[test]
    fn test_swap_rejects_chained_tile() {
        let mut grid = filled(3, 3);
        grid.set_obstacle(0, 1, Some(Obstacle::single(ObstacleKind::Chain)));
        let before = grid.clone();
        assert!(!grid.swap(Position::new(0, 0), Position::new(0, 1)));
        assert_eq!(grid.tile(0, 0), before.tile(0, 0));
        assert_eq!(grid.tile(0, 1), before.tile(0, 1));
    }

    #[test]
    fn test_swap_rejects_empty_and_out_of_bounds() {
        let mut grid = filled(3, 3);
        grid.take_tile(1, 1);
        assert!(!grid.swap(Position::new(0, 1), Position::new(1, 1)));
        assert!(!grid.swap(Position::new(0, 0), Position::new(0, 3)));
        assert!(!grid.swap(Position::new(0, 0), Position::new(0, 0)));
    }

    #[test]
    fn test_swap_on_grass_allowed() {
        let mut grid = filled(3, 3);
        grid.set_obstacle(0, 0, Some(Obstacle::new(ObstacleKind::Grass, 2)));
        assert!(grid.swap(Position::new(0, 0), Position::new(1, 0)));
    }

    #[test]
    fn test_blocking_obstacle_removes_tile() {
        let mut grid = filled(3, 3);
        assert!(grid.set_obstacle(1, 1, Some(Obstacle::new(ObstacleKind::Ice, 1))));
        assert!(grid.tile(1, 1).is_none());
        assert!(grid.create_random_tile(1, 1).is_none());
    }

    #[test]
    fn test_clear_obstacle_two_layers() {
        let mut grid = Grid::new(GridConfig::new(3, 3));
        grid.set_obstacle(0, 0, Some(Obstacle::new(ObstacleKind::Grass, 2)));
        assert_eq!(grid.clear_obstacle(0, 0), None);
        assert_eq!(grid.obstacle(0, 0).unwrap().layers, 1);
        let cleared = grid.clear_obstacle(0, 0).unwrap();
        assert_eq!(cleared.kind, ObstacleKind::Grass);
        assert_eq!(cleared.layers, 0);
        assert_eq!(grid.clear_obstacle(0, 0), None);
    }

    #[test]
    fn test_clear_stone_is_noop() {
        let mut grid = Grid::new(GridConfig::new(3, 3));
        grid.set_obstacle(1, 1, Some(Obstacle::single(ObstacleKind::Stone)));
        assert_eq!(grid.clear_obstacle(1, 1), None);
        assert_eq!(grid.obstacle(1, 1), Some(Obstacle::single(ObstacleKind::Stone)));
    }

    #[test]
    fn test_damage_adjacent() {
        let mut grid = filled(3, 3);
        grid.set_obstacle(0, 1, Some(Obstacle::new(ObstacleKind::Box, 2)));
        grid.set_obstacle(1, 0, Some(Obstacle::single(ObstacleKind::Ice)));
        grid.set_obstacle(1, 2, Some(Obstacle::single(ObstacleKind::Stone)));
        grid.set_obstacle(2, 1, Some(Obstacle::single(ObstacleKind::Grass)));

        let results = grid.damage_adjacent_obstacles(1, 1);
        assert_eq!(results.len(), 2);

        let boxed = results.iter().find(|d| (d.row, d.col) == (0, 1)).unwrap();
        assert_eq!(boxed.obstacle.layers, 2);
        assert!(!boxed.cleared);

        let ice = results.iter().find(|d| (d.row, d.col) == (1, 0)).unwrap();
        assert!(ice.cleared);
        assert!(grid.obstacle(1, 0).is_none());
        assert!(grid.obstacle(2, 1).is_some());
    }

    #[test]
    fn test_square_positions_clip() {
        let grid = Grid::new(GridConfig::new(8, 8));
        assert_eq!(grid.square_positions(Position::new(0, 0), 2).len(), 9);
        assert_eq!(grid.square_positions(Position::new(4, 4), 2).len(), 25);
        assert_eq!(grid.square_positions(Position::new(7, 4), 1).len(), 6);
        assert!(grid.square_positions(Position::new(9, 9), 1).is_empty());
    }

    #[test]
    fn test_colors_present_ignores_powerups() {
        let mut grid = Grid::new(GridConfig::new(2, 2));
        grid.place_tile(0, 0, TileColor::Blue);
        grid.place_powerup(0, 1, PowerupKind::Bomb, Some(TileColor::Yellow));
        assert_eq!(grid.colors_present().as_slice(), &[TileColor::Blue]);
    }

    #[test]
    fn test_initialize_from_layout() {
        let mut grid = Grid::new(GridConfig::new(8, 8).with_seed(3));
        grid.initialize_from_layout(&["G.I", "XHR", "3SC"], 4);

        assert_eq!((grid.rows(), grid.cols()), (3, 3));
        assert_eq!(grid.palette().len(), 4);

        assert_eq!(grid.obstacle(0, 0).unwrap().kind, ObstacleKind::Grass);
        assert!(grid.tile(0, 0).is_some());
        assert!(grid.tile(0, 2).is_none());
        assert!(grid.is_blocked(1, 0));
        assert_eq!(grid.obstacle(1, 1).unwrap().kind, ObstacleKind::Chain);
        assert!(grid.tile(1, 1).is_some());
        assert_eq!(grid.tile(1, 2).unwrap().powerup, Some(PowerupKind::RocketH));
        assert_eq!(grid.obstacle(2, 0).unwrap().layers, 3);
        assert_eq!(grid.obstacle(2, 1).unwrap().kind, ObstacleKind::Stone);

        let color_bomb = grid.tile(2, 2).unwrap();
        assert_eq!(color_bomb.powerup, Some(PowerupKind::ColorBomb));
        assert_eq!(color_bomb.color, None);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let rows = ["....", "..K.", "...."];
        let mut a = Grid::new(GridConfig::new(1, 1).with_seed(77));
        let mut b = Grid::new(GridConfig::new(1, 1).with_seed(77));
        a.initialize_from_layout(&rows, 5);
        b.initialize_from_layout(&rows, 5);
        let colors_a: Vec<_> = a.tiles().map(|t| t.color).collect();
        let colors_b: Vec<_> = b.tiles().map(|t| t.color).collect();
        assert_eq!(colors_a, colors_b);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut grid = filled(4, 4);
        let snapshot = grid.clone();
        grid.take_tile(0, 0);
        assert!(grid.tile(0, 0).is_none());
        assert!(snapshot.tile(0, 0).is_some());
    }
}
