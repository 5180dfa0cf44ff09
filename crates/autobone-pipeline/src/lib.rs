//! Monte Carlo harness around the AutoBone length optimizer.
//!
//! A [`HarnessConfig`] lists named test sets. Each set runs many seeded
//! trials (in parallel by default), folds their outcomes into an
//! [`Aggregate`] and ends up as one [`TestSetSummary`].
//!
//! ```no_run
//! use autobone_pipeline::{run_harness, HarnessConfig};
//! # fn main() -> anyhow::Result<()> {
//! let summaries = run_harness(&HarnessConfig::default())?;
//! for summary in &summaries {
//!     println!("{summary}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod config;
pub mod report;
pub mod runner;

pub use aggregate::{Aggregate, TerminationCounts, TestSetSummary};
pub use config::{default_test_sets, HarnessConfig, TestSetConfig};
pub use report::format_report;
pub use runner::{run_harness, run_test_set, run_test_set_trial};
