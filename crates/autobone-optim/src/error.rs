use autobone_core::ChainError;
use thiserror::Error;

/// Errors returned by the length optimizer and its scoring helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimError {
    /// Accuracy divides by the true length, which must be non-zero.
    #[error("true length at index {index} is zero; accuracy is undefined")]
    ZeroTrueLength { index: usize },
    /// Two length vectors that must be index-aligned are not.
    #[error("expected {expected} segment lengths, got {got}")]
    LengthMismatch { expected: usize, got: usize },
    /// Option values outside their valid domain.
    #[error("invalid optimizer options: {0}")]
    InvalidOptions(String),
    #[error(transparent)]
    Chain(#[from] ChainError),
}
