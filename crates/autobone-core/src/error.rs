use thiserror::Error;

use crate::Real;

/// Errors produced by vector and chain primitives.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChainError {
    /// Normalizing a vector whose magnitude is zero (or not finite).
    #[error("cannot normalize a degenerate vector (magnitude {magnitude})")]
    DegenerateVector { magnitude: Real },
    /// Lengths and orientations of a chain are not index-aligned.
    #[error("chain has {lengths} lengths but {orientations} orientations")]
    LengthMismatch { lengths: usize, orientations: usize },
    /// A chain needs at least one segment.
    #[error("chain must contain at least one segment")]
    EmptyChain,
    /// A sampling range is empty or not finite.
    #[error("invalid sampling range [{min}, {max}]")]
    InvalidRange { min: Real, max: Real },
}
