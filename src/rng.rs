//! Seedable RNG used for the random seed move and the sampling configuration
//! generator.
//!
//! Wraps `rand`'s `SmallRng`, matching the teacher crate's choice of a fast
//! generator that also works when compiled to WASM.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub struct EngineRng {
    inner: SmallRng,
}

impl EngineRng {
    /// Seed from system entropy.
    pub fn new() -> Self {
        Self {
            inner: SmallRng::from_os_rng(),
        }
    }

    /// Seed deterministically, for reproducible decisions under a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// A random usize in [0, max).
    #[inline(always)]
    pub fn gen_range(&mut self, max: usize) -> usize {
        self.inner.random_range(0..max)
    }

    /// One independent 50% draw, used by the sampling configuration generator
    /// to decide whether each candidate cell holds a mine.
    #[inline(always)]
    pub fn coin_flip(&mut self) -> bool {
        self.inner.random_bool(0.5)
    }
}

impl Default for EngineRng {
    fn default() -> Self {
        Self::new()
    }
}
