//! Match detection with overlapping-shape priority.
//!
//! Detection runs in fixed priority order, each stage only seeing tiles
//! no earlier stage consumed:
//!
//! 1. Straight runs of 5+ (color bomb) and 4 (rocket)
//! 2. L/T shapes from two 3-runs sharing one tile (bomb)
//! 3. Remaining straight 3-runs (no powerup)
//! 4. 2×2 squares (propeller)
//!
//! A run that loses tiles to an earlier stage is split at the consumed
//! tiles, and only segments that still reach 3 survive.

use rustc_hash::FxHashSet;

use crate::core::{Position, BOMB_SHAPE_MATCH, COLOR_BOMB_MATCH, ROCKET_MATCH};
use crate::grid::Grid;
use crate::tiles::{PowerupKind, Tile, TileColor};

use super::{Match, MatchShape, SpawnedPowerup};

const MIN_RUN: usize = 3;

/// A maximal straight run of one color.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Run {
    cells: Vec<Position>,
    horizontal: bool,
}

impl Run {
    fn len(&self) -> usize {
        self.cells.len()
    }

    fn shape(&self) -> MatchShape {
        if self.horizontal {
            MatchShape::Horizontal
        } else {
            MatchShape::Vertical
        }
    }

    fn is_end(&self, pos: Position) -> bool {
        self.cells.first() == Some(&pos) || self.cells.last() == Some(&pos)
    }

    /// Split at consumed cells, keeping segments of at least `MIN_RUN`.
    fn unconsumed_segments(&self, consumed: &FxHashSet<Position>) -> Vec<Run> {
        self.cells
            .split(|p| consumed.contains(p))
            .filter(|segment| segment.len() >= MIN_RUN)
            .map(|segment| Run {
                cells: segment.to_vec(),
                horizontal: self.horizontal,
            })
            .collect()
    }
}

/// Color a tile contributes to matching, if it can match at all.
///
/// Powerups, colorless tiles, and tiles held by unmatchable obstacles
/// break runs.
pub(crate) fn matchable_color(grid: &Grid, pos: Position) -> Option<TileColor> {
    let cell = grid.cell_at(pos)?;
    if !cell.tile_can_match() {
        return None;
    }
    let tile = cell.tile?;
    if tile.is_powerup() {
        return None;
    }
    tile.color
}

fn scan_line(grid: &Grid, line: impl Iterator<Item = Position>, horizontal: bool, runs: &mut Vec<Run>) {
    let mut current: Vec<Position> = Vec::new();
    let mut current_color: Option<TileColor> = None;

    for pos in line {
        let color = matchable_color(grid, pos);
        if color.is_some() && color == current_color {
            current.push(pos);
            continue;
        }
        if current.len() >= MIN_RUN {
            runs.push(Run {
                cells: std::mem::take(&mut current),
                horizontal,
            });
        }
        current.clear();
        current_color = color;
        if color.is_some() {
            current.push(pos);
        }
    }
    if current.len() >= MIN_RUN {
        runs.push(Run {
            cells: current,
            horizontal,
        });
    }
}

/// All maximal runs, horizontal first, each group in row-major order.
fn scan_runs(grid: &Grid) -> Vec<Run> {
    let mut runs = Vec::new();
    for row in 0..grid.rows() {
        scan_line(grid, grid.row_positions(row).into_iter(), true, &mut runs);
    }
    for col in 0..grid.cols() {
        scan_line(grid, grid.col_positions(col).into_iter(), false, &mut runs);
    }
    runs
}

fn tiles_at(grid: &Grid, positions: &[Position]) -> Vec<Tile> {
    positions.iter().filter_map(|p| grid.tile_at(*p)).collect()
}

fn line_powerup(run: &Run) -> Option<PowerupKind> {
    if run.len() >= COLOR_BOMB_MATCH {
        Some(PowerupKind::ColorBomb)
    } else if run.len() >= ROCKET_MATCH {
        Some(if run.horizontal {
            PowerupKind::RocketH
        } else {
            PowerupKind::RocketV
        })
    } else {
        None
    }
}

/// Where a line match puts its powerup: a swapped cell inside the run,
/// otherwise the run's middle cell.
fn line_spawn_position(run: &Run, swapped: &[Position]) -> Position {
    run.cells
        .iter()
        .find(|p| swapped.contains(p))
        .copied()
        .unwrap_or(run.cells[(run.len() - 1) / 2])
}

/// Find every match on the board.
///
/// Does not mutate the grid. Each tile appears in at most one match.
#[must_use]
pub fn find_all_matches(grid: &Grid) -> Vec<Match> {
    find_matches_with_swap(grid, &[])
}

/// Find every match, placing line powerups on a swapped cell when the
/// swapped cell belongs to the line.
#[must_use]
pub fn find_matches_with_swap(grid: &Grid, swapped: &[Position]) -> Vec<Match> {
    let runs = scan_runs(grid);
    let mut consumed: FxHashSet<Position> = FxHashSet::default();
    let mut matches = Vec::new();

    // Straight rocket / color bomb lines, longest first.
    let mut long_runs: Vec<&Run> = runs.iter().filter(|r| r.len() >= ROCKET_MATCH).collect();
    long_runs.sort_by(|a, b| b.len().cmp(&a.len()));
    for run in long_runs {
        for segment in run.unconsumed_segments(&consumed) {
            let Some(kind) = line_powerup(&segment) else {
                continue;
            };
            consumed.extend(segment.cells.iter().copied());
            matches.push(Match {
                tiles: tiles_at(grid, &segment.cells),
                shape: segment.shape(),
                spawned_powerup: Some(SpawnedPowerup {
                    kind,
                    position: line_spawn_position(&segment, swapped),
                }),
            });
        }
    }

    // L/T shapes from what is left.
    let short_runs: Vec<Run> = runs
        .iter()
        .flat_map(|r| r.unconsumed_segments(&consumed))
        .collect();
    let (horizontal, vertical): (Vec<&Run>, Vec<&Run>) = short_runs.iter().partition(|r| r.horizontal);
    let mut used_vertical: FxHashSet<usize> = FxHashSet::default();
    for h in &horizontal {
        for (v_index, v) in vertical.iter().enumerate() {
            if used_vertical.contains(&v_index) {
                continue;
            }
            if h.cells.iter().any(|p| consumed.contains(p)) {
                break;
            }
            if v.cells.iter().any(|p| consumed.contains(p)) {
                continue;
            }
            let shared: Vec<Position> = h.cells.iter().filter(|p| v.cells.contains(p)).copied().collect();
            let [junction] = shared.as_slice() else {
                continue;
            };
            if h.len() + v.len() - 1 < BOMB_SHAPE_MATCH {
                continue;
            }
            let shape = if h.is_end(*junction) && v.is_end(*junction) {
                MatchShape::LShape
            } else {
                MatchShape::TShape
            };
            let cells: Vec<Position> = h
                .cells
                .iter()
                .chain(v.cells.iter().filter(|p| *p != junction))
                .copied()
                .collect();
            consumed.extend(cells.iter().copied());
            used_vertical.insert(v_index);
            matches.push(Match {
                tiles: tiles_at(grid, &cells),
                shape,
                spawned_powerup: Some(SpawnedPowerup {
                    kind: PowerupKind::Bomb,
                    position: *junction,
                }),
            });
            break;
        }
    }

    // Plain 3-lines.
    for run in &short_runs {
        for segment in run.unconsumed_segments(&consumed) {
            consumed.extend(segment.cells.iter().copied());
            matches.push(Match {
                tiles: tiles_at(grid, &segment.cells),
                shape: segment.shape(),
                spawned_powerup: None,
            });
        }
    }

    // 2×2 squares.
    for row in 0..grid.rows().saturating_sub(1) {
        for col in 0..grid.cols().saturating_sub(1) {
            let corner = Position::new(row, col);
            let cells = [
                corner,
                Position::new(row, col + 1),
                Position::new(row + 1, col),
                Position::new(row + 1, col + 1),
            ];
            if cells.iter().any(|p| consumed.contains(p)) {
                continue;
            }
            let Some(color) = matchable_color(grid, corner) else {
                continue;
            };
            if cells.iter().all(|p| matchable_color(grid, *p) == Some(color)) {
                consumed.extend(cells);
                matches.push(Match {
                    tiles: tiles_at(grid, &cells),
                    shape: MatchShape::Square,
                    spawned_powerup: Some(SpawnedPowerup {
                        kind: PowerupKind::Propeller,
                        position: corner,
                    }),
                });
            }
        }
    }

    matches
}

/// Check if the board has any match at all.
#[must_use]
pub fn has_match(grid: &Grid) -> bool {
    !find_all_matches(grid).is_empty()
}
