//! Randomness seam used by every probabilistic roll in the engine.
//!
//! Any `rand::RngCore` is a `RandomSource`, so production code passes
//! `rand::thread_rng()` (a CSPRNG) and tests pass a seeded ChaCha generator.

use rand::{Rng, RngCore};

pub trait RandomSource {
    /// Uniform integer in `0..max_exclusive`. Returns 0 when `max_exclusive` is 0.
    fn uniform_int(&mut self, max_exclusive: u32) -> u32;

    /// Uniform float in `[0, 1)`.
    fn uniform_unit(&mut self) -> f64;

    /// Uniform float in `[min, max]`.
    fn uniform_range(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        min + self.uniform_unit() * (max - min)
    }

    /// Bernoulli trial. `probability` is clamped to `[0, 1]` first.
    fn chance(&mut self, probability: f64) -> bool {
        let p = clamp_probability(probability);
        if p <= 0.0 {
            return false;
        }
        self.uniform_unit() < p
    }
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn uniform_int(&mut self, max_exclusive: u32) -> u32 {
        if max_exclusive == 0 {
            return 0;
        }
        self.gen_range(0..max_exclusive)
    }

    fn uniform_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Clamp a probability to `[0, 1]`. NaN is treated as 0.
pub fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
