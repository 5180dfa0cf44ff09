use autobone_core::Real;
use serde::{Deserialize, Serialize};

use crate::{ContributionSign, ErrorModel, OptimError};

/// Tunables of the length optimizer.
///
/// Every experiment arm of the simulator is a different value of this struct;
/// the defaults are the reference configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthSolveOptions {
    /// Learning rate of the first iteration.
    pub initial_rate: Real,
    /// Geometric decay applied to the rate after every iteration.
    pub rate_decay: Real,
    /// The run is abandoned once the rate drops below this value.
    pub rate_floor: Real,
    /// Stop successfully once accuracy against the true lengths reaches this.
    pub target_accuracy: Real,
    /// Stop as converged once the error signal is at or below this.
    pub target_error: Real,
    /// Iteration budget.
    pub max_iterations: usize,
    /// Weight steps by [`crate::rotation_contribution`] instead of by length.
    pub use_contribution: bool,
    /// Sign convention used when `use_contribution` is set.
    pub contribution_sign: ContributionSign,
    /// Error scalar derived from the end-position discrepancy.
    pub error_model: ErrorModel,
    /// Clamp each per-segment move to `± fraction * length`. `None` leaves
    /// moves unbounded.
    ///
    /// The default `Some(0.1)` departs from the plain `step * weight / sum`
    /// update: unbounded, a rate of 200 blows the lengths up (beyond 1e100
    /// for a 10 vs 50 start) instead of improving them.
    pub max_step_fraction: Option<Real>,
    /// Number of per-segment sweeps run against each sampled pose pair.
    pub refinements_per_sample: usize,
}

impl Default for LengthSolveOptions {
    fn default() -> Self {
        Self {
            initial_rate: 200.0,
            rate_decay: 0.9998,
            rate_floor: 1e-7,
            target_accuracy: 0.999_999,
            target_error: 0.0,
            max_iterations: 2000,
            use_contribution: true,
            contribution_sign: ContributionSign::Signed,
            error_model: ErrorModel::HalfDistance,
            max_step_fraction: Some(0.1),
            refinements_per_sample: 1,
        }
    }
}

impl LengthSolveOptions {
    /// Reject option values that would make the optimizer misbehave silently.
    pub fn validate(&self) -> Result<(), OptimError> {
        let invalid = |msg: String| Err(OptimError::InvalidOptions(msg));
        if !self.initial_rate.is_finite() || self.initial_rate < 0.0 {
            return invalid(format!(
                "initial_rate must be finite and non-negative, got {}",
                self.initial_rate
            ));
        }
        if !(self.rate_decay > 0.0 && self.rate_decay <= 1.0) {
            return invalid(format!(
                "rate_decay must be in (0, 1], got {}",
                self.rate_decay
            ));
        }
        if !self.rate_floor.is_finite() || self.rate_floor < 0.0 {
            return invalid(format!(
                "rate_floor must be finite and non-negative, got {}",
                self.rate_floor
            ));
        }
        if self.target_accuracy.is_nan() || self.target_error.is_nan() {
            return invalid("targets must not be NaN".to_string());
        }
        if let Some(fraction) = self.max_step_fraction {
            if !(fraction > 0.0 && fraction.is_finite()) {
                return invalid(format!(
                    "max_step_fraction must be positive and finite, got {fraction}"
                ));
            }
        }
        if self.refinements_per_sample == 0 {
            return invalid("refinements_per_sample must be at least 1".to_string());
        }
        Ok(())
    }
}
