//! Segment length estimation from two-pose consistency.
//!
//! The optimizer never sees positions of the chain's segments. It only sees,
//! per iteration, two poses (anchor + per-segment orientations) whose end
//! effectors coincide under the unknown true lengths, and adjusts a candidate
//! length vector until the two estimated end effectors agree.
//!
//! - [`consistency`]: error signal, per-segment contribution and accuracy.
//! - [`optimizer`]: the iterative hill-climbing state machine.
//! - [`trial`]: seeded synthetic trials built on top of the optimizer.

pub mod consistency;
pub mod error;
pub mod optimizer;
pub mod options;
pub mod problem;
pub mod trial;

pub use consistency::{accuracy, error_signal, rotation_contribution, ContributionSign, ErrorModel};
pub use error::OptimError;
pub use optimizer::{LengthOptimizer, LengthSolveReport, MoveStats, Termination, TestReport};
pub use options::LengthSolveOptions;
pub use problem::{PosePair, PoseSource, ReplaySource};
pub use trial::{run_trial, SyntheticPoseSource, TrialConfig, TrialOutcome};
