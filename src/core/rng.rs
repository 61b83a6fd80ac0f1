//! Injected randomness for shuffling, intent rolls and reward offers.
//!
//! Nothing in the engine calls an ambient generator. Every random decision
//! goes through a [`RandomSource`], which is either:
//!
//! - [`GameRng`]: seeded ChaCha8, serializable via [`GameRngState`]
//! - [`ScriptedRng`]: a fixed sequence of unit-interval rolls for tests
//!
//! ## Usage
//!
//! ```
//! use cinder_engine::core::{GameRng, RandomSource};
//!
//! let mut rng = GameRng::new(42);
//! let mut again = GameRng::new(42);
//!
//! // Same seed, same sequence
//! assert_eq!(rng.gen_range(0..100), again.gen_range(0..100));
//! ```

use std::collections::VecDeque;
use std::ops::Range;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of every random decision the engine makes.
///
/// Implementations must be deterministic for a given construction so that
/// command sequences can be replayed.
pub trait RandomSource {
    /// Return `true` with the given probability (clamped to `0.0..=1.0`).
    fn gen_bool(&mut self, probability: f64) -> bool;

    /// Uniform integer in `range`. An empty range yields `range.start`.
    fn gen_range(&mut self, range: Range<i32>) -> i32;

    /// Uniform index in `0..bound`. A zero bound yields 0.
    fn gen_index(&mut self, bound: usize) -> usize;

    /// Fisher-Yates shuffle, walking from the back of the slice.
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.gen_index(i + 1);
            slice.swap(i, j);
        }
    }

    /// Choose a random element from a slice.
    fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if slice.is_empty() {
            return None;
        }
        let index = self.gen_index(slice.len());
        slice.get(index)
    }
}

/// Deterministic ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
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
        }
    }
}

impl RandomSource for GameRng {
    fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    fn gen_range(&mut self, range: Range<i32>) -> i32 {
        if range.is_empty() {
            return range.start;
        }
        self.inner.gen_range(range)
    }

    fn gen_index(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        self.inner.gen_range(0..bound)
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position, so capture and restore are O(1)
/// regardless of how many numbers have been drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

impl Serialize for GameRng {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.state().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        GameRngState::deserialize(deserializer).map(|state| Self::from_state(&state))
    }
}

/// Replays a fixed list of rolls in `[0, 1)`.
///
/// Each call consumes one roll and maps it the way a unit-interval
/// generator would: `gen_bool(p)` is `roll < p`, `gen_range(a..b)` is
/// `a + floor(roll * (b - a))`. Once the script runs out every roll is 0.0.
///
/// ```
/// use cinder_engine::core::{RandomSource, ScriptedRng};
///
/// let mut rng = ScriptedRng::new([0.1, 0.99]);
/// assert!(rng.gen_bool(0.6));
/// assert_eq!(rng.gen_range(0..5), 4);
/// assert_eq!(rng.gen_range(0..5), 0); // exhausted
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptedRng {
    rolls: VecDeque<f64>,
}

impl ScriptedRng {
    /// Script the given rolls; values are clamped into `[0, 1)`.
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: rolls
                .into_iter()
                .map(|r| r.clamp(0.0, 1.0 - f64::EPSILON))
                .collect(),
        }
    }

    /// Append more rolls to the end of the script.
    pub fn extend(&mut self, rolls: impl IntoIterator<Item = f64>) {
        let more = Self::new(rolls);
        self.rolls.extend(more.rolls);
    }

    /// Rolls not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }

    fn next_roll(&mut self) -> f64 {
        self.rolls.pop_front().unwrap_or(0.0)
    }
}

impl RandomSource for ScriptedRng {
    fn gen_bool(&mut self, probability: f64) -> bool {
        self.next_roll() < probability
    }

    fn gen_range(&mut self, range: Range<i32>) -> i32 {
        let roll = self.next_roll();
        if range.is_empty() {
            return range.start;
        }
        let span = f64::from(range.end - range.start);
        range.start + (roll * span).floor() as i32
    }

    fn gen_index(&mut self, bound: usize) -> usize {
        let roll = self.next_roll();
        if bound == 0 {
            return 0;
        }
        ((roll * bound as f64).floor() as usize).min(bound - 1)
    }
}
