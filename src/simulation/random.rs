//! Random number source shared by the simulation components
//!
//! Holds an optional seeded RNG so runs can be reproduced; without a seed
//! every draw falls back to the thread RNG.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use rand::SeedableRng;

#[derive(Debug, Clone, Default)]
pub struct SimRng {
    rng: Option<StdRng>,
}

impl SimRng {
    /// Unseeded source backed by the thread RNG
    pub fn new() -> Self {
        Self { rng: None }
    }

    /// Seeded source for reproducible simulations
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Some(StdRng::seed_from_u64(seed)),
        }
    }

    /// Derive an independent seeded stream, or another unseeded source
    pub fn fork(&mut self) -> Self {
        match &mut self.rng {
            Some(rng) => Self::with_seed(rng.random()),
            None => Self::new(),
        }
    }

    /// Random value in the half-open range, using seeded RNG if available.
    /// An empty range yields its start.
    pub fn random_range(&mut self, range: std::ops::Range<f64>) -> f64 {
        if range.is_empty() {
            return range.start;
        }
        match &mut self.rng {
            Some(rng) => rng.random_range(range),
            None => rand::rng().random_range(range),
        }
    }

    /// Random integer in the inclusive range
    pub fn random_count(&mut self, range: std::ops::RangeInclusive<usize>) -> usize {
        match &mut self.rng {
            Some(rng) => rng.random_range(range),
            None => rand::rng().random_range(range),
        }
    }

    /// Uniform value in [0, 1)
    pub fn unit(&mut self) -> f64 {
        self.random_range(0.0..1.0)
    }

    /// Choose a random element from a slice, using seeded RNG if available
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            return None;
        }
        match &mut self.rng {
            Some(rng) => slice.choose(rng),
            None => slice.choose(&mut rand::rng()),
        }
    }
}
