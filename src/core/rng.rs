//! Deterministic random number generation and dice sources.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical dice sequences
//! - **Forkable**: Each game started from a room gets an independent branch
//! - **Serializable**: O(1) state capture and restore
//! - **Injectable**: The turn engine rolls through the [`Dice`] trait, so tests
//!   and replays can substitute [`LoadedDice`]
//!
//! ```
//! use ludo_engine::core::{Dice, GameRng, LoadedDice};
//!
//! let mut rng = GameRng::new(42);
//! let value = rng.roll();
//! assert!((1..=6).contains(&value));
//!
//! let mut loaded = LoadedDice::new([6, 2]);
//! assert_eq!(loaded.roll(), 6);
//! assert_eq!(loaded.roll(), 2);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

use super::error::EngineError;

/// Number of faces on the die.
pub const DIE_FACES: u8 = 6;

/// A source of die rolls.
///
/// Implementations must return values in `1..=DIE_FACES`.
pub trait Dice {
    fn roll(&mut self) -> u8;
}

/// Roll a die with no side effect on any game.
///
/// Values outside `1..=DIE_FACES` from a misbehaving source are an error.
pub fn roll_die(dice: &mut impl Dice) -> Result<u8, EngineError> {
    let value = dice.roll();
    if (1..=DIE_FACES).contains(&value) {
        Ok(value)
    } else {
        Err(EngineError::DieOutOfRange(value))
    }
}

/// Deterministic RNG with forking.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// Separates randomness domains (room codes vs. dice).
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
            fork_counter: 0,
        }
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

impl Dice for GameRng {
    fn roll(&mut self) -> u8 {
        self.inner.gen_range(1..=DIE_FACES)
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}

/// Dice that replay a fixed sequence of values.
///
/// Once the sequence is exhausted every roll returns 1.
#[derive(Clone, Debug, Default)]
pub struct LoadedDice {
    values: VecDeque<u8>,
}

impl LoadedDice {
    /// Create dice from a sequence of faces.
    ///
    /// Panics if any value is outside `1..=6`.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = u8>) -> Self {
        let values: VecDeque<u8> = values.into_iter().collect();
        assert!(
            values.iter().all(|v| (1..=DIE_FACES).contains(v)),
            "Loaded dice values must be in 1..=6"
        );
        Self { values }
    }

    /// Number of queued values left.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl Dice for LoadedDice {
    fn roll(&mut self) -> u8 {
        self.values.pop_front().unwrap_or(1)
    }
}
