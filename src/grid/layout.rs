//! Level layouts: one character per cell.
//!
//! ## Code Table
//!
//! | code        | cell                                   |
//! |-------------|----------------------------------------|
//! | `.`         | random tile                            |
//! | `G` / `g`   | grass (1 / 2 layers) under a random tile |
//! | `I` / `D`   | ice (1 / 2 layers)                     |
//! | `H`         | chain around a random tile             |
//! | `O` `2` `3` | box (1 / 2 / 3 layers)                 |
//! | `S`         | stone                                  |
//! | `L` / `M`   | barrel (1 / 2 layers)                  |
//! | `K`         | ice bucket                             |
//! | `R` `V` `B` `C` `P` | rocket (row), rocket (column), bomb, color bomb, propeller |
//! | `X` / `#`   | blocked cell                           |
//!
//! `Layout::parse` is strict and reports the first problem, including a
//! layout larger than the biggest board. The grid's `initialize_from_layout`
//! is lenient: unknown codes become random tiles, short rows are padded with
//! blocked cells and oversized layouts are cut to the board limit.

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::MAX_DIMENSION;
use crate::obstacles::{Obstacle, ObstacleKind};
use crate::tiles::PowerupKind;

/// Decoded meaning of one layout character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellCode {
    /// Random tile, no obstacle.
    Random,
    /// Obstacle only; tile presence follows the obstacle's behavior.
    Obstacle(Obstacle),
    /// Pre-placed powerup.
    Powerup(PowerupKind),
    /// Not part of the board.
    Blocked,
}

impl CellCode {
    /// Decode a layout character.
    #[must_use]
    pub fn from_char(code: char) -> Option<Self> {
        let decoded = match code {
            '.' => CellCode::Random,
            'G' => CellCode::Obstacle(Obstacle::new(ObstacleKind::Grass, 1)),
            'g' => CellCode::Obstacle(Obstacle::new(ObstacleKind::Grass, 2)),
            'I' => CellCode::Obstacle(Obstacle::new(ObstacleKind::Ice, 1)),
            'D' => CellCode::Obstacle(Obstacle::new(ObstacleKind::Ice, 2)),
            'H' => CellCode::Obstacle(Obstacle::single(ObstacleKind::Chain)),
            'O' => CellCode::Obstacle(Obstacle::new(ObstacleKind::Box, 1)),
            '2' => CellCode::Obstacle(Obstacle::new(ObstacleKind::Box, 2)),
            '3' => CellCode::Obstacle(Obstacle::new(ObstacleKind::Box, 3)),
            'S' => CellCode::Obstacle(Obstacle::single(ObstacleKind::Stone)),
            'L' => CellCode::Obstacle(Obstacle::new(ObstacleKind::Barrel, 1)),
            'M' => CellCode::Obstacle(Obstacle::new(ObstacleKind::Barrel, 2)),
            'K' => CellCode::Obstacle(Obstacle::single(ObstacleKind::IceBucket)),
            'R' => CellCode::Powerup(PowerupKind::RocketH),
            'V' => CellCode::Powerup(PowerupKind::RocketV),
            'B' => CellCode::Powerup(PowerupKind::Bomb),
            'C' => CellCode::Powerup(PowerupKind::ColorBomb),
            'P' => CellCode::Powerup(PowerupKind::Propeller),
            'X' | '#' => CellCode::Blocked,
            _ => return None,
        };
        Some(decoded)
    }
}

/// Problems found by the strict layout parser.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },

    #[error("unknown cell code {code:?} at ({row}, {col})")]
    UnknownCode { row: usize, col: usize, code: char },

    #[error("layout is {rows}x{cols}, boards are at most {max}x{max}", max = MAX_DIMENSION)]
    TooLarge { rows: usize, cols: usize },
}

/// A decoded rectangular layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    cells: Vec<Vec<CellCode>>,
    cols: usize,
}

impl Layout {
    /// Parse layout text, one row per line.
    ///
    /// Leading/trailing whitespace on each line and blank lines are
    /// ignored.
    ///
    /// ```
    /// use match3_core::grid::{Layout, LayoutError};
    ///
    /// let layout = Layout::parse("..G\nXIR\n").unwrap();
    /// assert_eq!((layout.rows(), layout.cols()), (2, 3));
    ///
    /// assert!(matches!(Layout::parse("..\n."), Err(LayoutError::Ragged { row: 1, .. })));
    /// ```
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        Self::from_rows(&lines)
    }

    /// Parse pre-split rows strictly.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, LayoutError> {
        let first = rows.first().ok_or(LayoutError::Empty)?;
        let expected = first.as_ref().chars().count();
        if expected == 0 {
            return Err(LayoutError::Empty);
        }
        if rows.len() > MAX_DIMENSION || expected > MAX_DIMENSION {
            return Err(LayoutError::TooLarge {
                rows: rows.len(),
                cols: expected,
            });
        }

        let mut cells = Vec::with_capacity(rows.len());
        for (row, line) in rows.iter().enumerate() {
            let decoded = line
                .as_ref()
                .chars()
                .enumerate()
                .map(|(col, code)| {
                    CellCode::from_char(code).ok_or(LayoutError::UnknownCode { row, col, code })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if decoded.len() != expected {
                return Err(LayoutError::Ragged {
                    row,
                    expected,
                    found: decoded.len(),
                });
            }
            cells.push(decoded);
        }

        Ok(Self { cells, cols: expected })
    }

    /// Decode rows without failing.
    ///
    /// Unknown codes become `Random`; rows shorter than the widest row
    /// are padded with `Blocked`.
    pub fn lenient<S: AsRef<str>>(rows: &[S]) -> Self {
        let cols = rows.iter().map(|r| r.as_ref().chars().count()).max().unwrap_or(0);
        let cells = rows
            .iter()
            .enumerate()
            .map(|(row, line)| {
                let mut decoded: Vec<CellCode> = line
                    .as_ref()
                    .chars()
                    .enumerate()
                    .map(|(col, code)| {
                        CellCode::from_char(code).unwrap_or_else(|| {
                            warn!("unknown layout code {code:?} at ({row}, {col}), using a random tile");
                            CellCode::Random
                        })
                    })
                    .collect();
                decoded.resize(cols, CellCode::Blocked);
                decoded
            })
            .collect();
        Self { cells, cols }
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Check if the layout has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() || self.cols == 0
    }

    /// Code at a position.
    #[must_use]
    pub fn code(&self, row: usize, col: usize) -> Option<CellCode> {
        self.cells.get(row)?.get(col).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_table() {
        assert_eq!(CellCode::from_char('.'), Some(CellCode::Random));
        assert_eq!(
            CellCode::from_char('g'),
            Some(CellCode::Obstacle(Obstacle::new(ObstacleKind::Grass, 2)))
        );
        assert_eq!(
            CellCode::from_char('3'),
            Some(CellCode::Obstacle(Obstacle::new(ObstacleKind::Box, 3)))
        );
        assert_eq!(
            CellCode::from_char('M'),
            Some(CellCode::Obstacle(Obstacle::new(ObstacleKind::Barrel, 2)))
        );
        assert_eq!(CellCode::from_char('P'), Some(CellCode::Powerup(PowerupKind::Propeller)));
        assert_eq!(CellCode::from_char('#'), Some(CellCode::Blocked));
        assert_eq!(CellCode::from_char('?'), None);
    }

    #[test]
    fn test_parse() {
        let layout = Layout::parse("\n  ...\n  .K.\n").unwrap();
        assert_eq!(layout.rows(), 2);
        assert_eq!(layout.cols(), 3);
        assert_eq!(
            layout.code(1, 1),
            Some(CellCode::Obstacle(Obstacle::single(ObstacleKind::IceBucket)))
        );
        assert_eq!(layout.code(5, 5), None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Layout::parse(""), Err(LayoutError::Empty));
        assert_eq!(
            Layout::parse("..\n.?"),
            Err(LayoutError::UnknownCode { row: 1, col: 1, code: '?' })
        );
        assert_eq!(
            Layout::parse("...\n.."),
            Err(LayoutError::Ragged { row: 1, expected: 3, found: 2 })
        );
    }

    #[test]
    fn test_parse_rejects_oversized() {
        let wide = vec![".".repeat(MAX_DIMENSION + 1); 3];
        assert_eq!(
            Layout::from_rows(&wide),
            Err(LayoutError::TooLarge { rows: 3, cols: MAX_DIMENSION + 1 })
        );

        let tall = vec!["..."; MAX_DIMENSION + 1];
        assert!(matches!(Layout::from_rows(&tall), Err(LayoutError::TooLarge { .. })));

        let largest = vec![".".repeat(MAX_DIMENSION); MAX_DIMENSION];
        assert!(Layout::from_rows(&largest).is_ok());
    }

    #[test]
    fn test_error_messages() {
        let err = LayoutError::UnknownCode { row: 2, col: 4, code: 'z' };
        assert_eq!(err.to_string(), "unknown cell code 'z' at (2, 4)");
    }

    #[test]
    fn test_lenient() {
        let layout = Layout::lenient(&["..?", "."]);
        assert_eq!(layout.cols(), 3);
        assert_eq!(layout.code(0, 2), Some(CellCode::Random));
        assert_eq!(layout.code(1, 1), Some(CellCode::Blocked));
    }
}
