//! Obstacle kinds and their fixed behavior table.

use serde::{Deserialize, Serialize};

/// The closed set of obstacle kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Ground cover under a tile.
    Grass,
    /// Frozen cell, holds no tile.
    Ice,
    /// Locks the tile it wraps in place.
    Chain,
    /// Crate occupying a cell.
    Box,
    /// Permanent wall.
    Stone,
    /// Barrel occupying a cell.
    Barrel,
    /// Spills ice on its neighbors when destroyed.
    IceBucket,
}

/// Behavior flags for an obstacle kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleBehavior {
    /// A tile in this cell can be swapped.
    pub can_tile_move: bool,
    /// A tile in this cell can take part in matches.
    pub can_be_matched: bool,
    /// The cell cannot hold a tile while the obstacle is present.
    pub blocks_tile: bool,
    /// Matches next to the obstacle damage it.
    pub cleared_by_adjacent: bool,
    /// Damage never reduces its layers.
    pub is_indestructible: bool,
}

impl ObstacleKind {
    /// Every kind, in declaration order.
    pub const ALL: [ObstacleKind; 7] = [
        ObstacleKind::Grass,
        ObstacleKind::Ice,
        ObstacleKind::Chain,
        ObstacleKind::Box,
        ObstacleKind::Stone,
        ObstacleKind::Barrel,
        ObstacleKind::IceBucket,
    ];

    /// Behavior flags for this kind.
    #[must_use]
    pub const fn behavior(self) -> ObstacleBehavior {
        match self {
            ObstacleKind::Grass => ObstacleBehavior {
                can_tile_move: true,
                can_be_matched: true,
                blocks_tile: false,
                cleared_by_adjacent: false,
                is_indestructible: false,
            },
            ObstacleKind::Chain => ObstacleBehavior {
                can_tile_move: false,
                can_be_matched: true,
                blocks_tile: false,
                cleared_by_adjacent: false,
                is_indestructible: false,
            },
            ObstacleKind::Ice | ObstacleKind::Box | ObstacleKind::Barrel | ObstacleKind::IceBucket => {
                ObstacleBehavior {
                    can_tile_move: false,
                    can_be_matched: false,
                    blocks_tile: true,
                    cleared_by_adjacent: true,
                    is_indestructible: false,
                }
            }
            ObstacleKind::Stone => ObstacleBehavior {
                can_tile_move: false,
                can_be_matched: false,
                blocks_tile: true,
                cleared_by_adjacent: false,
                is_indestructible: true,
            },
        }
    }

    /// Maximum layer count a new obstacle of this kind may have.
    #[must_use]
    pub const fn max_layers(self) -> u8 {
        match self {
            ObstacleKind::Grass | ObstacleKind::Ice | ObstacleKind::Barrel => 2,
            ObstacleKind::Box => 3,
            ObstacleKind::Chain | ObstacleKind::Stone | ObstacleKind::IceBucket => 1,
        }
    }
}
