//! Random segment orientations.
//!
//! Orientations are drawn component-wise from independent uniform ranges and
//! then normalized. The default ranges keep every segment pointing downwards
//! (negative Y), like the limbs of a standing body hanging from the hip.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::UniformRange;
use crate::{try_unit, ChainError, Vec3};

/// Per-axis sampling ranges applied before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationSampling {
    pub x: UniformRange,
    pub y: UniformRange,
    pub z: UniformRange,
}

impl Default for OrientationSampling {
    fn default() -> Self {
        Self {
            x: UniformRange::new(-1.0, 1.0),
            y: UniformRange::new(-1.0, -0.25),
            z: UniformRange::new(-1.0, 1.0),
        }
    }
}

impl OrientationSampling {
    pub fn validate(&self) -> Result<(), ChainError> {
        self.x.validate()?;
        self.y.validate()?;
        self.z.validate()
    }
}

/// Draw one unit direction.
///
/// # Errors
///
/// Returns [`ChainError::DegenerateVector`] if the raw sample is the zero
/// vector, which is only possible when every axis range contains zero.
pub fn random_orientation<R: Rng + ?Sized>(
    rng: &mut R,
    sampling: &OrientationSampling,
) -> Result<Vec3, ChainError> {
    let raw = Vec3::new(
        sampling.x.sample(rng)?,
        sampling.y.sample(rng)?,
        sampling.z.sample(rng)?,
    );
    try_unit(&raw)
}

/// Draw `n` unit directions, one per segment.
pub fn random_orientations<R: Rng + ?Sized>(
    rng: &mut R,
    sampling: &OrientationSampling,
    n: usize,
) -> Result<Vec<Vec3>, ChainError> {
    (0..n).map(|_| random_orientation(rng, sampling)).collect()
}
