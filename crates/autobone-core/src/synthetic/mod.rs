//! Deterministic synthetic data generation helpers.
//!
//! This module provides the building blocks used to construct synthetic
//! length-estimation trials:
//! - uniform sampling ranges for segment lengths and anchors,
//! - random segment orientations constrained to a "hanging" half-space,
//! - orientation noise that simulates imperfect tracker readings,
//! - stable per-trial seed derivation.
//!
//! Every helper takes an explicit RNG; nothing here touches a thread-local or
//! global generator, so a trial is fully determined by its seed.
//!
//! # Example
//!
//! ```
//! use autobone_core::synthetic::{poses::{random_orientations, OrientationSampling}, UniformRange};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let lengths = UniformRange::new(0.5, 2.0).sample_n(&mut rng, 4).unwrap();
//! let dirs = random_orientations(&mut rng, &OrientationSampling::default(), 4).unwrap();
//! assert_eq!(lengths.len(), dirs.len());
//! ```

pub mod noise;
pub mod poses;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{ChainError, Real, Vec3};

pub use noise::{trial_seed, OrientationNoise};
pub use poses::{random_orientation, random_orientations, OrientationSampling};

/// Closed interval `[min, max]` sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformRange {
    pub min: Real,
    pub max: Real,
}

impl UniformRange {
    pub const fn new(min: Real, max: Real) -> Self {
        Self { min, max }
    }

    /// Check that the bounds are finite and ordered.
    pub fn validate(&self) -> Result<(), ChainError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(ChainError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Draw one value in `[min, max]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Real, ChainError> {
        self.validate()?;
        Ok(rng.random_range(self.min..=self.max))
    }

    /// Draw `n` independent values.
    pub fn sample_n<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        n: usize,
    ) -> Result<Vec<Real>, ChainError> {
        self.validate()?;
        Ok((0..n).map(|_| rng.random_range(self.min..=self.max)).collect())
    }

    /// Draw a point with every component in `[min, max]`.
    pub fn sample_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec3, ChainError> {
        self.validate()?;
        Ok(Vec3::new(
            rng.random_range(self.min..=self.max),
            rng.random_range(self.min..=self.max),
            rng.random_range(self.min..=self.max),
        ))
    }
}
