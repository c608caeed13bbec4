//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! Everything random in the simulator — site scatter, synthetic traffic
//! draws, trace noise — flows through a [`SimRng`] seeded from the run's
//! single `u64` seed.  Independent concerns (e.g. topology placement vs.
//! traffic generation) take a [`SimRng::child`] stream each, so adding draws
//! to one concern never perturbs the other.
//!
//! The child-derivation mixing constant is the 64-bit fractional part of the
//! golden ratio, which spreads consecutive offsets uniformly across the seed
//! space.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded RNG for simulation-level randomness.
///
/// Single-threaded by design, matching the engine.  A driver running several
/// environment instances gives each its own `SimRng` (distinct seeds or
/// `child` streams).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset — used to give
    /// independent components (placement, traffic) their own streams.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range` (half-open for `a..b`).
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
