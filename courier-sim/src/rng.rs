//! Injectable random number generation for reproducible simulations.

use std::ops::Range;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic random number generator for reproducible simulations.
///
/// Uses the ChaCha8 algorithm seeded from a single `u64`, so the same seed
/// always yields the same delays, latencies and delivery outcomes.
#[derive(Debug, Clone)]
pub struct DeterministicRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl DeterministicRng {
    /// Creates deterministic RNG from seed value.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates RNG with a freshly drawn seed.
    ///
    /// The seed is still recorded so a surprising run can be replayed.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    /// Returns the seed used for this RNG.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates random number in range [0, 1).
    pub fn random_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Generates random number uniformly in `[start, end)`.
    ///
    /// Returns `start` for empty or inverted ranges.
    pub fn random_in(&mut self, range: &Range<f64>) -> f64 {
        if range.start >= range.end {
            return range.start;
        }
        self.rng.random_range(range.clone())
    }

    /// Draws a delay uniformly from a millisecond range.
    pub fn random_delay(&mut self, range_ms: &Range<f64>) -> Duration {
        Duration::from_secs_f64(self.random_in(range_ms).max(0.0) / 1000.0)
    }

    /// Generates random boolean that is true with given probability.
    ///
    /// Probabilities outside 0.0 to 1.0 are clamped.
    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }
}
