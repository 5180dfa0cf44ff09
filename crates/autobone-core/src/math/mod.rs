//! Mathematical utilities and type definitions.
//!
//! Vector arithmetic (`+`, `-`, scalar `*`, [`nalgebra::Vector3::dot`]) comes
//! straight from nalgebra. The helpers here add the few operations whose
//! failure behavior must be explicit, most importantly normalization.

use nalgebra::Vector3;

use crate::ChainError;

/// Scalar type used throughout the library (currently `f64`).
pub type Real = f64;

/// 3D vector with [`Real`] components.
pub type Vec3 = Vector3<Real>;

/// Euclidean length of `v`.
#[inline]
pub fn magnitude(v: &Vec3) -> Real {
    v.norm()
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: &Vec3, b: &Vec3) -> Real {
    (b - a).norm()
}

/// Divide each component of `v` by its magnitude.
///
/// # Errors
///
/// Returns [`ChainError::DegenerateVector`] when the magnitude is exactly zero
/// or not finite, instead of producing NaN components.
///
/// # Example
///
/// ```
/// use autobone_core::{try_unit, Vec3};
///
/// let u = try_unit(&Vec3::new(3.0, 0.0, 4.0)).unwrap();
/// assert!((u.norm() - 1.0).abs() < 1e-12);
/// assert!(try_unit(&Vec3::zeros()).is_err());
/// ```
pub fn try_unit(v: &Vec3) -> Result<Vec3, ChainError> {
    let magnitude = v.norm();
    if magnitude == 0.0 || !magnitude.is_finite() {
        return Err(ChainError::DegenerateVector { magnitude });
    }
    Ok(v / magnitude)
}
