//! Deterministic random number generation for boards and turns.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical boards and targets
//! - **Forkable**: Each player move gets its own independent stream
//! - **Serializable**: O(1) state capture and restore for replays
//!
//! ## Usage
//!
//! ```
//! use match3_core::core::BoardRng;
//!
//! let mut rng = BoardRng::new(42);
//!
//! // Fork a stream for one player move
//! let mut turn_rng = rng.fork();
//!
//! // Forks are deterministic - same fork counter = same sequence
//! let mut rng2 = BoardRng::new(42);
//! let mut turn_rng2 = rng2.fork();
//! assert_eq!(turn_rng.gen_range_usize(0..100), turn_rng2.gen_range_usize(0..100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG used for tile creation, shuffles and random targeting.
///
/// Uses ChaCha8 for speed while keeping sequences reproducible across
/// platforms.
#[derive(Clone, Debug)]
pub struct BoardRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl BoardRng {
    /// Seeded stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Derive the stream for the next player move.
    ///
    /// The n-th fork of a seed is always the same stream, so a replay
    /// that forks once per move sees identical targets.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Generate a random usize in the given range.
    ///
    /// Returns `range.start` for an empty range instead of panicking.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        if range.is_empty() {
            return range.start;
        }
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Capture a checkpoint.
    #[must_use]
    pub fn state(&self) -> BoardRngState {
        BoardRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Resume from a checkpoint.
    #[must_use]
    pub fn from_state(state: &BoardRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Checkpoint of a `BoardRng`, for replaying a level from mid-game.
///
/// Only the seed and stream offset are stored, so the size does not grow
/// with the number of draws.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRngState {
    pub seed: u64,
    /// Stream offset in 32-bit words.
    pub word_pos: u128,
    /// Turns forked so far.
    pub fork_counter: u64,
}
