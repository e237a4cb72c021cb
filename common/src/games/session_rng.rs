use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Every random decision of a match, the opening coin and all of the bot's
/// draws, comes from this one stream. Starting two sessions from the same
/// `seed` therefore reproduces the same match when the human plays the same
/// cells.
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Draws a fresh seed from the thread RNG; `seed()` reports it.
    pub fn from_random() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform in `0..bound`. `bound` must be non-zero.
    pub fn below(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }

    pub fn flip(&mut self) -> bool {
        self.rng.random()
    }
}
