//! Orientation noise and seed derivation for synthetic trials.
//!
//! Noise is drawn from the caller's RNG so it stays part of the trial's
//! deterministic stream. Seed derivation uses a fixed SplitMix64 mix that does
//! not depend on the internal algorithm of `rand` RNGs, keeping per-trial seeds
//! stable across versions and platforms.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{try_unit, ChainError, Real, Vec3};

/// Uniform per-axis perturbation in `[-max_offset, +max_offset]`, followed by
/// re-normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationNoise {
    /// Maximum absolute per-axis offset, as a fraction of the unit direction.
    pub max_offset: Real,
}

impl Default for OrientationNoise {
    fn default() -> Self {
        Self { max_offset: 0.0 }
    }
}

impl OrientationNoise {
    pub const fn new(max_offset: Real) -> Self {
        Self { max_offset }
    }

    /// Perturb a unit direction.
    ///
    /// A zero offset returns `dir` unchanged without consuming randomness.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::DegenerateVector`] if the perturbed vector
    /// collapses to zero, which requires `max_offset >= 1`.
    pub fn apply<R: Rng + ?Sized>(&self, rng: &mut R, dir: &Vec3) -> Result<Vec3, ChainError> {
        let max_abs = self.max_offset.abs();
        if max_abs == 0.0 {
            return Ok(*dir);
        }
        let offset = Vec3::new(
            rng.random_range(-max_abs..=max_abs),
            rng.random_range(-max_abs..=max_abs),
            rng.random_range(-max_abs..=max_abs),
        );
        try_unit(&(dir + offset))
    }

    /// Perturb every direction of a pose.
    pub fn apply_all<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        dirs: &[Vec3],
    ) -> Result<Vec<Vec3>, ChainError> {
        dirs.iter().map(|d| self.apply(rng, d)).collect()
    }
}

/// Seed for trial `index` of a test set seeded with `base_seed`.
#[inline]
pub fn trial_seed(base_seed: u64, index: usize) -> u64 {
    splitmix64(base_seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
