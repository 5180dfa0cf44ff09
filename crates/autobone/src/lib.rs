//! High-level entry crate for the AutoBone length estimation simulator.
//!
//! AutoBone estimates the segment lengths of a kinematic chain (for example
//! the bones of a tracked leg) from orientation data alone. Two poses of the
//! same chain share an end effector; a candidate length vector is nudged
//! until the end effectors it predicts for both poses agree.
//!
//! This crate offers **two entry points**:
//!
//! ## 1. Single trials
//!
//! ```no_run
//! use autobone::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TrialConfig {
//!     num_segments: 4,
//!     options: LengthSolveOptions {
//!         initial_rate: 2.0,
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! let outcome = run_trial(7, &config)?;
//! println!(
//!     "accuracy {:.4} -> {:.4} after {} iterations",
//!     outcome.report.initial_accuracy,
//!     outcome.report.final_accuracy,
//!     outcome.report.iterations,
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## 2. Monte Carlo sweeps
//!
//! ```no_run
//! use autobone::prelude::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = HarnessConfig::default().with_trials(20);
//! let summaries = run_harness(&config)?;
//! println!("{}", format_report(&summaries));
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate layout
//!
//! - [`core`]: vector helpers, chain evaluation, synthetic pose generation
//! - [`optim`]: consistency error model, the length optimizer, trials
//! - [`pipeline`]: test set configuration, parallel execution, reporting

/// Vector helpers, kinematic chain evaluation and synthetic data.
pub mod core {
    pub use autobone_core::*;
}

/// The length optimizer and single synthetic trials.
pub mod optim {
    pub use autobone_optim::*;
}

/// Monte Carlo harness over many seeded trials.
pub mod pipeline {
    pub use autobone_pipeline::*;
}

/// Convenient re-exports for common use cases.
///
/// Import with `use autobone::prelude::*;` to get started quickly.
pub mod prelude {
    // Common types
    pub use crate::core::{Pose, Real, Vec3};

    // Optimizer
    pub use crate::optim::{
        run_trial, LengthOptimizer, LengthSolveOptions, PosePair, PoseSource, Termination,
        TestReport, TrialConfig, TrialOutcome,
    };

    // Harness
    pub use crate::pipeline::{
        format_report, run_harness, run_test_set, HarnessConfig, TestSetConfig, TestSetSummary,
    };
}
