//! Core engine types: positions, configuration, RNG.
//!
//! This module contains the building blocks shared by every other
//! component. Nothing here knows about tiles, obstacles or matches.

pub mod position;
pub mod rng;
pub mod config;

pub use position::Position;
pub use rng::{BoardRng, BoardRngState};
pub use config::{
    GridConfig, BOMB_COMBO_RADIUS, BOMB_RADIUS, BOMB_SHAPE_MATCH, BURST_RADIUS, COLOR_BOMB_MATCH,
    MAX_DIMENSION, MAX_VARIETY, MIN_VARIETY, ROCKET_MATCH,
};
