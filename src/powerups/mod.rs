//! Powerup resolution engine.
//!
//! Activating a powerup computes what it hits; any powerup caught in the
//! blast fires too, recursively. The engine never mutates the grid: it
//! returns tiles and positions, and the caller applies them (see
//! `Grid::apply_clear`).
//!
//! ## Once-only activation
//!
//! Every resolution threads one `ActivationSet` by `&mut` through the call
//! tree. A powerup is added before its blast is chained, so circular
//! triggering stops at the first repeat and recursion depth is bounded by
//! the number of tiles on the board.
//!
//! ## Per-kind areas
//!
//! | kind       | area                                              |
//! |------------|---------------------------------------------------|
//! | RocketH    | its row                                           |
//! | RocketV    | its column                                        |
//! | Bomb       | 5×5 square, clipped                               |
//! | ColorBomb  | every tile of the target color                    |
//! | Propeller  | its four neighbors plus one random target         |

mod context;
pub(crate) mod footprint;
mod resolver;

pub use context::{ActivationSet, PropellerTargets, TurnContext};
pub use resolver::{PowerupResolver, Resolution};

pub(crate) use resolver::{chain_react, resolve_area};
