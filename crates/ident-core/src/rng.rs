//! Random number generation for passive identification
//!
//! Sensing and defend-notice gates draw from a [`RandomSource`]. The game
//! supplies a seeded [`GameRng`]; tests can script their own source.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of the chance rolls used by identification.
pub trait RandomSource {
    /// Returns 0..n-1, or 0 if n is 0
    fn rn2(&mut self, n: u32) -> u32;

    /// Returns true with probability 1/n
    ///
    /// `one_in(0)` and `one_in(1)` always succeed.
    fn one_in(&mut self, n: u32) -> bool {
        n <= 1 || self.rn2(n) == 0
    }
}

/// Seeded generator used by the game loop.
///
/// Only the seed is saved; a restored generator starts its stream again
/// from that seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl From<u64> for GameRng {
    fn from(seed: u64) -> Self {
        Self::new(seed)
    }
}

impl From<GameRng> for u64 {
    fn from(rng: GameRng) -> Self {
        rng.seed
    }
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the thread RNG
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
