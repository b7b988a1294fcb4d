//! Random source for `RANDOM`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Per-interpreter random number generator.
///
/// Seeded explicitly for reproducible runs (`--seed`), otherwise from the
/// operating system.
pub struct Random {
    rng: StdRng,
}

impl Random {
    pub fn with_seed(seed: u64) -> Self {
        Random {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Random {
            rng: StdRng::from_entropy(),
        }
    }

    /// Next value in `0..=i64::MAX`.
    pub fn next_number(&mut self) -> i64 {
        self.rng.gen_range(0..=i64::MAX)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl std::fmt::Debug for Random {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Random")
    }
}

#[cfg(test)]
mod tests;
