//! Obstacle instances and layer damage.

use serde::{Deserialize, Serialize};

use super::{ObstacleBehavior, ObstacleKind};

/// An obstacle occupying a cell.
///
/// `layers >= 1` while the obstacle exists. A fully damaged obstacle is
/// represented by its absence, never by a zero-layer value stored in a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Obstacle {
    /// What kind of obstacle this is.
    pub kind: ObstacleKind,
    /// Remaining layers.
    pub layers: u8,
}

impl Obstacle {
    /// Create an obstacle, clamping `layers` to `1..=kind.max_layers()`.
    #[must_use]
    pub fn new(kind: ObstacleKind, layers: u8) -> Self {
        Self {
            kind,
            layers: layers.clamp(1, kind.max_layers()),
        }
    }

    /// Create a single-layer obstacle.
    #[must_use]
    pub fn single(kind: ObstacleKind) -> Self {
        Self::new(kind, 1)
    }

    /// Behavior flags for this obstacle's kind.
    #[must_use]
    pub const fn behavior(&self) -> ObstacleBehavior {
        self.kind.behavior()
    }

    /// Apply one step of damage.
    ///
    /// Returns `None` when the obstacle is fully cleared, otherwise the
    /// obstacle with one layer fewer. Indestructible obstacles come back
    /// unchanged.
    ///
    /// ```
    /// use match3_core::obstacles::{Obstacle, ObstacleKind};
    ///
    /// let grass = Obstacle::new(ObstacleKind::Grass, 2);
    /// let damaged = grass.damage().unwrap();
    /// assert_eq!(damaged.layers, 1);
    /// assert_eq!(damaged.damage(), None);
    ///
    /// let stone = Obstacle::single(ObstacleKind::Stone);
    /// assert_eq!(stone.damage(), Some(stone));
    /// ```
    #[must_use]
    pub fn damage(self) -> Option<Obstacle> {
        if self.behavior().is_indestructible {
            return Some(self);
        }
        if self.layers <= 1 {
            return None;
        }
        Some(Self {
            layers: self.layers - 1,
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_clamping() {
        assert_eq!(Obstacle::new(ObstacleKind::Box, 9).layers, 3);
        assert_eq!(Obstacle::new(ObstacleKind::Box, 0).layers, 1);
        assert_eq!(Obstacle::new(ObstacleKind::Chain, 3).layers, 1);
        assert_eq!(Obstacle::new(ObstacleKind::Barrel, 2).layers, 2);
    }

    #[test]
    fn test_damage_to_clear() {
        let ice = Obstacle::new(ObstacleKind::Ice, 2);
        let once = ice.damage();
        assert_eq!(once, Some(Obstacle { kind: ObstacleKind::Ice, layers: 1 }));
        assert_eq!(once.and_then(Obstacle::damage), None);
    }

    #[test]
    fn test_box_three_layers() {
        let mut current = Some(Obstacle::new(ObstacleKind::Box, 3));
        let mut hits = 0;
        while let Some(obstacle) = current {
            current = obstacle.damage();
            hits += 1;
        }
        assert_eq!(hits, 3);
    }

    #[test]
    fn test_stone_never_clears() {
        let stone = Obstacle::single(ObstacleKind::Stone);
        let mut current = stone;
        for _ in 0..10 {
            current = current.damage().unwrap();
        }
        assert_eq!(current, stone);
    }
}
