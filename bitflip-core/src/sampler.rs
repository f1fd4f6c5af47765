//! Sources of uniformly sampled bit vectors

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{BitVector, MultiBinarySpace, ObservationSpace};

/// Source of fixed-length bit vectors for initial states and goals.
///
/// Each environment owns its sampler; reseeding one never affects another.
pub trait BitSampler: Send {
    /// Length of every vector this sampler produces
    fn n(&self) -> usize;

    /// Draw the next vector
    fn sample(&mut self) -> BitVector;

    /// Restart the sampling stream from `seed`
    fn seed(&mut self, seed: u64);
}

/// Default sampler: uniform bits from a seeded [`StdRng`]
#[derive(Debug, Clone)]
pub struct SeededSampler {
    space: MultiBinarySpace,
    rng: StdRng,
}

impl SeededSampler {
    /// Sampler of `n`-bit vectors seeded with `seed`
    #[must_use]
    pub fn new(n: usize, seed: u64) -> Self {
        Self {
            space: MultiBinarySpace::new(n),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl BitSampler for SeededSampler {
    fn n(&self) -> usize {
        self.space.n
    }

    fn sample(&mut self) -> BitVector {
        self.space.sample(&mut self.rng)
    }

    fn seed(&mut self, seed: u64) {
        tracing::trace!(seed, "reseeding bit sampler");
        self.rng = StdRng::seed_from_u64(seed);
    }
}
