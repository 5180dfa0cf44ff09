//! Observations consumed by the length optimizer.

use autobone_core::{distance, ChainError, Pose, Real, Vec3};

use crate::OptimError;

/// Two poses of the same chain whose end effectors coincide under the true
/// lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct PosePair {
    pub first: Pose,
    pub second: Pose,
}

impl PosePair {
    /// Pair two poses with the same number of segments.
    ///
    /// # Errors
    ///
    /// Returns [`OptimError::LengthMismatch`] if the segment counts differ.
    pub fn new(first: Pose, second: Pose) -> Result<Self, OptimError> {
        if first.len() != second.len() {
            return Err(OptimError::LengthMismatch {
                expected: first.len(),
                got: second.len(),
            });
        }
        Ok(Self { first, second })
    }

    #[inline]
    pub fn num_segments(&self) -> usize {
        self.first.len()
    }

    /// Distance between the two anchors.
    #[inline]
    pub fn true_origin_distance(&self) -> Real {
        distance(&self.first.anchor, &self.second.anchor)
    }

    /// `end(first) − end(second)` for the given lengths.
    #[inline]
    pub fn end_offset(&self, lengths: &[Real]) -> Vec3 {
        self.first.end_position(lengths) - self.second.end_position(lengths)
    }
}

/// Supplier of pose pairs, one per optimizer iteration.
pub trait PoseSource {
    /// Number of segments of every pair this source yields.
    fn num_segments(&self) -> usize;

    /// Produce the pose pair for the next iteration.
    fn next_pair(&mut self) -> Result<PosePair, OptimError>;
}

/// Cycles through a fixed list of pairs.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    pairs: Vec<PosePair>,
    cursor: usize,
}

impl ReplaySource {
    /// # Errors
    ///
    /// Fails when `pairs` is empty or the pairs disagree on segment count.
    pub fn new(pairs: Vec<PosePair>) -> Result<Self, OptimError> {
        let Some(first) = pairs.first() else {
            return Err(ChainError::EmptyChain.into());
        };
        let expected = first.num_segments();
        if let Some(bad) = pairs.iter().find(|p| p.num_segments() != expected) {
            return Err(OptimError::LengthMismatch {
                expected,
                got: bad.num_segments(),
            });
        }
        Ok(Self { pairs, cursor: 0 })
    }
}

impl PoseSource for ReplaySource {
    fn num_segments(&self) -> usize {
        self.pairs[0].num_segments()
    }

    fn next_pair(&mut self) -> Result<PosePair, OptimError> {
        let pair = self.pairs[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.pairs.len();
        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose(anchor: Vec3, dirs: &[Vec3]) -> Pose {
        Pose::new(anchor, dirs.to_vec()).unwrap()
    }

    #[test]
    fn offset_vanishes_for_consistent_lengths() {
        let lengths = [1.0, 2.0];
        let end = Vec3::new(0.0, 0.0, 0.0);
        let a = Pose::ending_at(
            &end,
            vec![Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.6, -0.8, 0.0)],
            &lengths,
        )
        .unwrap();
        let b = Pose::ending_at(
            &end,
            vec![Vec3::new(0.0, -0.6, 0.8), Vec3::new(0.0, -1.0, 0.0)],
            &lengths,
        )
        .unwrap();
        let pair = PosePair::new(a, b).unwrap();
        assert!(pair.end_offset(&lengths).norm() < 1e-12);
        assert!(pair.end_offset(&[1.5, 2.0]).norm() > 0.1);
        assert!(pair.true_origin_distance() > 0.0);
    }

    #[test]
    fn pair_requires_equal_segment_counts() {
        let down = Vec3::new(0.0, -1.0, 0.0);
        let err = PosePair::new(pose(Vec3::zeros(), &[down]), pose(Vec3::zeros(), &[down, down]));
        assert!(err.is_err());
    }

    #[test]
    fn replay_source_cycles() {
        let down = Vec3::new(0.0, -1.0, 0.0);
        let p0 = PosePair::new(pose(Vec3::zeros(), &[down]), pose(Vec3::x(), &[down])).unwrap();
        let p1 = PosePair::new(pose(Vec3::y(), &[down]), pose(Vec3::z(), &[down])).unwrap();
        let mut source = ReplaySource::new(vec![p0.clone(), p1.clone()]).unwrap();
        assert_eq!(source.num_segments(), 1);
        assert_eq!(source.next_pair().unwrap(), p0);
        assert_eq!(source.next_pair().unwrap(), p1);
        assert_eq!(source.next_pair().unwrap(), p0);
        assert!(ReplaySource::new(Vec::new()).is_err());
    }
}
