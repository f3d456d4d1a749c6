//! Obstacle model.
//!
//! Obstacles are non-tile occupants of a cell with layered durability:
//! - `ObstacleKind`: closed set of kinds
//! - `ObstacleBehavior`: per-kind flags, computed by an exhaustive `match`
//! - `Obstacle`: a kind plus its remaining layers
//!
//! Damage is the only way an obstacle changes. Adding a kind forces every
//! behavior decision to be revisited at compile time.

mod kind;
mod obstacle;

pub use kind::{ObstacleBehavior, ObstacleKind};
pub use obstacle::Obstacle;
