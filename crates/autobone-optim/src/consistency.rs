//! Two-pose consistency error model.
//!
//! Both poses of a round end at the same (unknown) end effector. With the true
//! lengths the two chains agree exactly; with candidate lengths their end
//! positions drift apart. The distance between those two estimates is the only
//! signal the optimizer gets.

use autobone_core::{try_unit, ChainError, Real, Vec3};
use serde::{Deserialize, Serialize};

use crate::OptimError;

/// Consistency error for one round: half the distance between the two
/// estimated end positions.
///
/// The distance between the two anchors is accepted so the signature carries
/// everything a normalized variant would need; it does not scale the result.
#[inline]
pub fn error_signal(_true_origin_distance: Real, estimated_end_distance: Real) -> Real {
    estimated_end_distance / 2.0
}

/// How the end-position discrepancy is turned into an error scalar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorModel {
    /// `d / 2`, see [`error_signal`].
    #[default]
    HalfDistance,
    /// `d²`, the quadratic signal of the first prototypes.
    SquaredDistance,
}

impl ErrorModel {
    pub fn signal(self, true_origin_distance: Real, estimated_end_distance: Real) -> Real {
        match self {
            ErrorModel::HalfDistance => error_signal(true_origin_distance, estimated_end_distance),
            ErrorModel::SquaredDistance => estimated_end_distance * estimated_end_distance,
        }
    }
}

/// Sign convention for [`rotation_contribution`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionSign {
    /// `n·b − n·a`: encodes the direction in which the length should move.
    #[default]
    Signed,
    /// `| |n·b| − |n·a| |`: magnitude only, never negative.
    Absolute,
}

/// Share of the discrepancy `offset` explained by one segment turning from
/// `orientation_a` to `orientation_b`, scaled by the segment `length`.
///
/// # Errors
///
/// Returns [`ChainError::DegenerateVector`] when `offset` is the zero vector.
pub fn rotation_contribution(
    offset: &Vec3,
    orientation_a: &Vec3,
    orientation_b: &Vec3,
    length: Real,
    sign: ContributionSign,
) -> Result<Real, ChainError> {
    let n = try_unit(offset)?;
    let dot_a = n.dot(orientation_a);
    let dot_b = n.dot(orientation_b);
    let diff = match sign {
        ContributionSign::Signed => dot_b - dot_a,
        ContributionSign::Absolute => (dot_b.abs() - dot_a.abs()).abs(),
    };
    Ok(diff * length)
}

/// Score an estimate against the true lengths: `max(0, 1 − Σ |t − e| / t)`.
///
/// # Errors
///
/// - [`OptimError::LengthMismatch`] if the slices differ in length.
/// - [`OptimError::ZeroTrueLength`] if any true length is zero.
pub fn accuracy(true_lengths: &[Real], estimated_lengths: &[Real]) -> Result<Real, OptimError> {
    if true_lengths.len() != estimated_lengths.len() {
        return Err(OptimError::LengthMismatch {
            expected: true_lengths.len(),
            got: estimated_lengths.len(),
        });
    }
    let mut relative_error = 0.0;
    for (index, (&t, &e)) in true_lengths.iter().zip(estimated_lengths).enumerate() {
        if t == 0.0 {
            return Err(OptimError::ZeroTrueLength { index });
        }
        relative_error += ((t - e) / t).abs();
    }
    Ok((1.0 - relative_error).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Real, b: Real, tol: Real) {
        assert!(
            (a - b).abs() <= tol,
            "values differ: {} vs {} (tol={})",
            a,
            b,
            tol
        );
    }

    #[test]
    fn error_signal_is_half_distance() {
        approx_eq(error_signal(3.0, 0.0), 0.0, 0.0);
        approx_eq(error_signal(0.0, 0.0), 0.0, 0.0);
        approx_eq(error_signal(10.0, 4.0), 2.0, 1e-15);
        // the true origin distance never rescales the signal
        approx_eq(error_signal(1e-3, 4.0), error_signal(1e3, 4.0), 0.0);
        for d in [0.0, 0.5, 7.0, 1e6] {
            assert!(error_signal(1.0, d) >= 0.0);
        }
    }

    #[test]
    fn squared_model_matches_first_prototype() {
        approx_eq(ErrorModel::SquaredDistance.signal(1.0, 3.0), 9.0, 1e-15);
        approx_eq(ErrorModel::HalfDistance.signal(1.0, 3.0), 1.5, 1e-15);
    }

    #[test]
    fn identical_orientations_contribute_nothing() {
        let offset = Vec3::new(0.3, -1.2, 0.4);
        let o = Vec3::new(0.0, -0.8, 0.6);
        let c = rotation_contribution(&offset, &o, &o, 2.5, ContributionSign::Signed).unwrap();
        approx_eq(c, 0.0, 1e-15);
    }

    #[test]
    fn signed_contribution_flips_with_orientation_order() {
        let offset = Vec3::new(1.0, 0.0, 0.0);
        let a = Vec3::new(0.0, -1.0, 0.0);
        let b = Vec3::new(0.6, -0.8, 0.0);
        let ab = rotation_contribution(&offset, &a, &b, 2.0, ContributionSign::Signed).unwrap();
        let ba = rotation_contribution(&offset, &b, &a, 2.0, ContributionSign::Signed).unwrap();
        approx_eq(ab, 1.2, 1e-12);
        approx_eq(ba, -1.2, 1e-12);
    }

    #[test]
    fn absolute_contribution_is_non_negative() {
        let offset = Vec3::new(0.0, 1.0, 0.0);
        let a = Vec3::new(0.0, -1.0, 0.0);
        let b = Vec3::new(0.6, -0.8, 0.0);
        let signed = rotation_contribution(&offset, &a, &b, 1.0, ContributionSign::Signed).unwrap();
        let absolute =
            rotation_contribution(&offset, &a, &b, 1.0, ContributionSign::Absolute).unwrap();
        approx_eq(signed, 0.2, 1e-12);
        approx_eq(absolute, 0.2, 1e-12);
        let absolute_rev =
            rotation_contribution(&offset, &b, &a, 1.0, ContributionSign::Absolute).unwrap();
        approx_eq(absolute_rev, 0.2, 1e-12);
    }

    #[test]
    fn zero_offset_is_degenerate() {
        let o = Vec3::new(0.0, -1.0, 0.0);
        assert!(matches!(
            rotation_contribution(&Vec3::zeros(), &o, &o, 1.0, ContributionSign::Signed),
            Err(ChainError::DegenerateVector { .. })
        ));
    }

    #[test]
    fn perfect_estimate_has_full_accuracy() {
        let lengths = [0.7, 1.3, 2.0, 0.5];
        approx_eq(accuracy(&lengths, &lengths).unwrap(), 1.0, 0.0);
    }

    #[test]
    fn accuracy_decreases_as_estimate_moves_away() {
        let truth = [1.0, 2.0, 4.0];
        let mut previous = 1.0;
        for step in 1..20 {
            let delta = step as Real * 0.01;
            for sign in [1.0, -1.0] {
                let estimate = [1.0, 2.0 + sign * delta, 4.0];
                let acc = accuracy(&truth, &estimate).unwrap();
                assert!(acc <= previous, "accuracy rose from {previous} to {acc}");
            }
            previous = accuracy(&truth, &[1.0, 2.0 + delta, 4.0]).unwrap();
        }
        approx_eq(accuracy(&truth, &[1.5, 2.0, 4.0]).unwrap(), 0.5, 1e-12);
        approx_eq(accuracy(&truth, &[50.0, 2.0, 4.0]).unwrap(), 0.0, 0.0);
    }

    #[test]
    fn accuracy_rejects_zero_truth_and_mismatch() {
        assert_eq!(
            accuracy(&[1.0, 0.0], &[1.0, 1.0]),
            Err(OptimError::ZeroTrueLength { index: 1 })
        );
        assert_eq!(
            accuracy(&[1.0, 2.0], &[1.0]),
            Err(OptimError::LengthMismatch {
                expected: 2,
                got: 1
            })
        );
    }
}
