//! # match3-core
//!
//! A deterministic match-3 board and resolution engine.
//!
//! The engine owns the rules of a swap-to-match puzzle board: where tiles
//! and obstacles are, which lines and shapes count as matches, and what
//! every powerup (and pair of powerups) destroys. It has no notion of
//! frames, animation or input. Callers drive it step by step and animate
//! the results in between.
//!
//! ## Design Principles
//!
//! 1. **Report, then apply**: Detection and resolution take `&Grid` and
//!    return what is affected. Mutation is a separate, explicit step
//!    (`Grid::apply_clear`, `Grid::clear_match`).
//!
//! 2. **Deterministic**: All randomness flows from a seeded ChaCha stream.
//!    Same seed, same board, same propeller targets.
//!
//! 3. **No panics on bad input**: Out-of-bounds or illegal requests are
//!    no-ops reporting `false` / `None`, and config values are clamped.
//!
//! ## Architecture
//!
//! - **Once-only activation**: A resolution threads one `ActivationSet`
//!   through the whole chain, so cyclic triggering terminates.
//!
//! - **Turn context**: Propeller targets and drawn colors are cached per
//!   move in a `TurnContext`, so previews and the real activation agree.
//!
//! - **Persistent cells**: O(1) grid cloning via `im-rs`, used for trial
//!   swaps in the move finder.
//!
//! ## Modules
//!
//! - `core`: Positions, configuration and constants, RNG
//! - `tiles`: Tile ids, colors and powerup kinds
//! - `obstacles`: Obstacle kinds, behaviors and layered damage
//! - `grid`: The board, layouts, clearing and shuffling
//! - `matching`: Match detection with shape priority
//! - `powerups`: Single powerup activation and chain reactions
//! - `combos`: Fused powerup pairs
//! - `boosters`: Player boosters
//! - `moves`: Possible-move finder

pub mod core;
pub mod tiles;
pub mod obstacles;
pub mod grid;
pub mod matching;
pub mod powerups;
pub mod combos;
pub mod boosters;
pub mod moves;

// Re-export commonly used types
pub use crate::core::{BoardRng, BoardRngState, GridConfig, Position};

pub use crate::tiles::{PowerupKind, Tile, TileColor, TileId};

pub use crate::obstacles::{Obstacle, ObstacleBehavior, ObstacleKind};

pub use crate::grid::{Cell, CellCode, ClearReport, Grid, Layout, LayoutError, ObstacleDamage};

pub use crate::matching::{find_all_matches, find_matches_with_swap, has_match, Match, MatchShape, SpawnedPowerup};

pub use crate::powerups::{ActivationSet, PowerupResolver, Resolution, TurnContext};

pub use crate::combos::{combo_effect, CombinationResolver, ComboEffect};

pub use crate::boosters::{booster_positions, Booster};

pub use crate::moves::{find_possible_moves, has_possible_move, Move};
