//! Kinematic chain evaluation.
//!
//! A chain is an ordered list of rigid segments. Each segment has a length and,
//! for a given pose, a unit direction. Walking the segments from an anchor and
//! adding `direction * length` yields the end effector; walking backwards from
//! a known end recovers the anchor.

use serde::{Deserialize, Serialize};

use crate::{ChainError, Real, Vec3};

/// Check that `lengths` and `orientations` describe the same non-empty chain.
pub fn validate_chain(orientations: &[Vec3], lengths: &[Real]) -> Result<(), ChainError> {
    if orientations.len() != lengths.len() {
        return Err(ChainError::LengthMismatch {
            lengths: lengths.len(),
            orientations: orientations.len(),
        });
    }
    if lengths.is_empty() {
        return Err(ChainError::EmptyChain);
    }
    Ok(())
}

/// End effector position reached by walking the chain forward from `anchor`.
///
/// Segments are accumulated in index order so results are reproducible bit for
/// bit. The caller is responsible for passing index-aligned slices.
pub fn end_position(anchor: &Vec3, orientations: &[Vec3], lengths: &[Real]) -> Vec3 {
    debug_assert_eq!(orientations.len(), lengths.len());
    let mut end = *anchor;
    for (dir, &len) in orientations.iter().zip(lengths) {
        end += dir * len;
    }
    end
}

/// Anchor position recovered by walking the chain backward from `end`.
pub fn origin_position(end: &Vec3, orientations: &[Vec3], lengths: &[Real]) -> Vec3 {
    debug_assert_eq!(orientations.len(), lengths.len());
    let mut origin = *end;
    for (dir, &len) in orientations.iter().zip(lengths) {
        origin -= dir * len;
    }
    origin
}

/// One observation of the chain: an anchor plus one orientation per segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Root of the chain.
    pub anchor: Vec3,
    /// Unit direction of each segment, root first.
    pub orientations: Vec<Vec3>,
}

impl Pose {
    /// Construct a pose with at least one segment.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::EmptyChain`] if `orientations` is empty.
    pub fn new(anchor: Vec3, orientations: Vec<Vec3>) -> Result<Self, ChainError> {
        if orientations.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        Ok(Self {
            anchor,
            orientations,
        })
    }

    /// Build the pose whose chain, with `lengths`, ends exactly at `end`.
    pub fn ending_at(
        end: &Vec3,
        orientations: Vec<Vec3>,
        lengths: &[Real],
    ) -> Result<Self, ChainError> {
        validate_chain(&orientations, lengths)?;
        let anchor = origin_position(end, &orientations, lengths);
        Ok(Self {
            anchor,
            orientations,
        })
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.orientations.len()
    }

    /// Returns true if the pose has no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orientations.is_empty()
    }

    /// End effector of this pose for the given segment lengths.
    #[inline]
    pub fn end_position(&self, lengths: &[Real]) -> Vec3 {
        end_position(&self.anchor, &self.orientations, lengths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(a: &Vec3, b: &Vec3, tol: Real) {
        assert!(
            (a - b).norm() <= tol,
            "vectors differ: {:?} vs {:?} (tol={})",
            a,
            b,
            tol
        );
    }

    fn sample_chain() -> (Vec<Vec3>, Vec<Real>) {
        let orientations = vec![
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.6, -0.8, 0.0),
            Vec3::new(0.0, -0.6, 0.8),
        ];
        (orientations, vec![1.5, 0.75, 2.0])
    }

    #[test]
    fn end_position_sums_scaled_directions() {
        let (orientations, lengths) = sample_chain();
        let end = end_position(&Vec3::new(1.0, 2.0, 3.0), &orientations, &lengths);
        assert_vec_close(&end, &Vec3::new(1.45, -1.3, 4.6), 1e-12);
    }

    #[test]
    fn origin_then_end_round_trips() {
        let (orientations, lengths) = sample_chain();
        let end = Vec3::new(-0.25, 0.5, 0.9);
        let origin = origin_position(&end, &orientations, &lengths);
        let back = end_position(&origin, &orientations, &lengths);
        assert_vec_close(&back, &end, 1e-12);
    }

    #[test]
    fn validate_chain_reports_mismatch() {
        let (orientations, _) = sample_chain();
        assert_eq!(
            validate_chain(&orientations, &[1.0]),
            Err(ChainError::LengthMismatch {
                lengths: 1,
                orientations: 3
            })
        );
        assert_eq!(validate_chain(&[], &[]), Err(ChainError::EmptyChain));
    }

    #[test]
    fn pose_ending_at_reaches_end() {
        let (orientations, lengths) = sample_chain();
        let end = Vec3::new(0.1, 0.2, 0.3);
        let pose = Pose::ending_at(&end, orientations, &lengths).unwrap();
        assert_eq!(pose.len(), 3);
        assert_vec_close(&pose.end_position(&lengths), &end, 1e-12);
    }
}
