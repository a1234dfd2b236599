//! Where the randomness comes from.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniformly distributed integers for the demo generators.
///
/// Everything random about a generated schedule goes through here, so
/// swapping in a seeded (or scripted) source makes output reproducible.
pub trait RandomSource {
    /// Produces an integer uniformly distributed on the closed interval
    /// `[min, max]`.
    fn uniform_int(&mut self, min: u32, max: u32) -> u32;

    /// Picks an element of `pool` uniformly. The pool must not be empty.
    fn pick<'a, T>(&mut self, pool: &'a [T]) -> &'a T where Self: Sized {
        debug_assert!(!pool.is_empty(), "picking from an empty pool");
        let last = pool.len().saturating_sub(1) as u32;
        let idx = self.uniform_int(0, last) as usize;
        &pool[idx.min(pool.len() - 1)]
    }
}

impl<'r, R: RandomSource + ?Sized> RandomSource for &'r mut R {
    fn uniform_int(&mut self, min: u32, max: u32) -> u32 {
        (**self).uniform_int(min, max)
    }
}

/// `ChaCha8Rng`-backed random source.
pub struct SeededRandom(ChaCha8Rng);

impl SeededRandom {
    /// A source that produces the same sequence every time for `seed`.
    pub fn from_seed_u64(seed: u64) -> Self {
        SeededRandom(ChaCha8Rng::seed_from_u64(seed))
    }
    /// A source seeded from the operating system.
    pub fn from_entropy() -> Self {
        SeededRandom(ChaCha8Rng::from_entropy())
    }
}

impl RandomSource for SeededRandom {
    fn uniform_int(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.0.gen_range(min..=max)
    }
}
