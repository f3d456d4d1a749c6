//! Combination engine.
//!
//! Swapping two powerups into each other fuses them into one larger
//! effect, looked up in a fixed table keyed by the unordered pair of
//! kinds. Both rocket orientations count as the same kind.
//!
//! The fused blast is centered on the merge cell (the row-major later of
//! the two cells). Anything it catches chains through the regular
//! powerup resolver, sharing the same `ActivationSet` and `TurnContext`.

mod engine;
mod table;

pub use engine::CombinationResolver;
pub use table::{combo_effect, ComboClass, ComboEffect};
