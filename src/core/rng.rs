//! Random decisions for a session: seating shuffles, elimination trials,
//! and elimination style picks.
//!
//! ## Key Features
//!
//! - **Pluggable**: the roster and controller only see [`RandomSource`],
//!   so tests can script every trial
//! - **Deterministic**: [`SessionRng`] with the same seed produces the same
//!   seating and the same eliminations
//!
//! ```
//! use survivor::core::{RandomSource, SessionRng};
//!
//! let mut rng = SessionRng::new(42);
//!
//! // 1-in-1 always succeeds
//! assert!(rng.trial_succeeds(1));
//!
//! // Same seed, same seating
//! let names = ["Alice", "Bob", "Carol"];
//! let a = SessionRng::new(7).permutation(&names);
//! let b = SessionRng::new(7).permutation(&names);
//! assert_eq!(a, b);
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of every random decision the engine makes.
///
/// Implementations must give independent results per call; the roster calls
/// `trial_succeeds` once per survivor per round.
pub trait RandomSource {
    /// Uniform integer in `min..=max`. Reversed bounds are swapped.
    fn integer_in_range(&mut self, min: i64, max: i64) -> i64;

    /// Uniform choice from a slice. `None` only for an empty slice.
    fn pick_one<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>;

    /// Same multiset of elements in randomized order.
    fn permutation<T: Clone>(&mut self, items: &[T]) -> Vec<T>;

    /// True with probability `1/n`. `n <= 1` always succeeds.
    fn trial_succeeds(&mut self, n: u32) -> bool;
}

/// Seeded RNG used by real sessions.
///
/// Uses ChaCha8 for speed while keeping high quality randomness.
#[derive(Clone, Debug)]
pub struct SessionRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SessionRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SessionRng {
    fn integer_in_range(&mut self, min: i64, max: i64) -> i64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.inner.gen_range(lo..=hi)
    }

    fn pick_one<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        items.choose(&mut self.inner)
    }

    fn permutation<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        use rand::seq::SliceRandom;
        let mut shuffled = items.to_vec();
        shuffled.shuffle(&mut self.inner);
        shuffled
    }

    fn trial_succeeds(&mut self, n: u32) -> bool {
        if n <= 1 {
            return true;
        }
        self.inner.gen_range(0..n) == 0
    }
}

/// Scripted source for tests and replays.
///
/// Trials pop from a queue and fall back to `fallback` once it is empty.
/// Permutations keep input order and picks take the first element.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    trials: VecDeque<bool>,
    fallback: bool,
}

impl ScriptedRandom {
    /// Every trial returns `outcome`.
    #[must_use]
    pub fn always(outcome: bool) -> Self {
        Self {
            trials: VecDeque::new(),
            fallback: outcome,
        }
    }

    /// Trials follow `script`, then return `fallback`.
    #[must_use]
    pub fn with_trials(script: impl IntoIterator<Item = bool>, fallback: bool) -> Self {
        Self {
            trials: script.into_iter().collect(),
            fallback,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn integer_in_range(&mut self, min: i64, max: i64) -> i64 {
        min.min(max)
    }

    fn pick_one<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.first()
    }

    fn permutation<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        items.to_vec()
    }

    fn trial_succeeds(&mut self, _n: u32) -> bool {
        self.trials.pop_front().unwrap_or(self.fallback)
    }
}
