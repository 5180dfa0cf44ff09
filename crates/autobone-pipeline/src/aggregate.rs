//! Order-independent accumulation of trial outcomes.
//!
//! Worker threads each fold their trials into a private [`Aggregate`]; the
//! partial aggregates are merged once the workers join. Only sums and counts
//! are kept, so merging is associative and the summary does not depend on how
//! trials were split across threads (up to floating point summation order).

use autobone_core::Real;
use autobone_optim::{MoveStats, Termination, TrialOutcome};
use serde::{Deserialize, Serialize};

/// How many trials ended for each [`Termination`] reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationCounts {
    pub target_accuracy: usize,
    pub converged: usize,
    pub max_iterations: usize,
    pub rate_floor: usize,
}

impl TerminationCounts {
    pub fn record(&mut self, termination: Termination) {
        *self.slot(termination) += 1;
    }

    pub fn get(&self, termination: Termination) -> usize {
        match termination {
            Termination::TargetAccuracy => self.target_accuracy,
            Termination::Converged => self.converged,
            Termination::MaxIterations => self.max_iterations,
            Termination::RateFloor => self.rate_floor,
        }
    }

    pub fn total(&self) -> usize {
        Termination::ALL.iter().map(|t| self.get(*t)).sum()
    }

    pub fn merge(mut self, other: Self) -> Self {
        for t in Termination::ALL {
            *self.slot(t) += other.get(t);
        }
        self
    }

    fn slot(&mut self, termination: Termination) -> &mut usize {
        match termination {
            Termination::TargetAccuracy => &mut self.target_accuracy,
            Termination::Converged => &mut self.converged,
            Termination::MaxIterations => &mut self.max_iterations,
            Termination::RateFloor => &mut self.rate_floor,
        }
    }
}

/// Running sums over a set of trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub trials: usize,
    pub total_iterations: usize,
    pub sum_initial_accuracy: Real,
    pub sum_final_accuracy: Real,
    /// Trials whose final accuracy beat their initial accuracy.
    pub improved: usize,
    pub terminations: TerminationCounts,
    pub moves: MoveStats,
}

impl Aggregate {
    /// Fold one trial into the sums.
    pub fn push(mut self, outcome: &TrialOutcome) -> Self {
        let report = &outcome.report;
        self.trials += 1;
        self.total_iterations += report.iterations;
        self.sum_initial_accuracy += report.initial_accuracy;
        self.sum_final_accuracy += report.final_accuracy;
        if report.final_accuracy > report.initial_accuracy {
            self.improved += 1;
        }
        self.terminations.record(report.termination);
        self.moves.accepted += outcome.moves.accepted;
        self.moves.reversed += outcome.moves.reversed;
        self.moves.rejected += outcome.moves.rejected;
        self
    }

    /// Combine two partial aggregates.
    pub fn merge(self, other: Self) -> Self {
        Self {
            trials: self.trials + other.trials,
            total_iterations: self.total_iterations + other.total_iterations,
            sum_initial_accuracy: self.sum_initial_accuracy + other.sum_initial_accuracy,
            sum_final_accuracy: self.sum_final_accuracy + other.sum_final_accuracy,
            improved: self.improved + other.improved,
            terminations: self.terminations.merge(other.terminations),
            moves: MoveStats {
                accepted: self.moves.accepted + other.moves.accepted,
                reversed: self.moves.reversed + other.moves.reversed,
                rejected: self.moves.rejected + other.moves.rejected,
            },
        }
    }

    fn mean(&self, sum: Real) -> Real {
        if self.trials == 0 {
            0.0
        } else {
            sum / self.trials as Real
        }
    }

    pub fn average_iterations(&self) -> Real {
        self.mean(self.total_iterations as Real)
    }

    pub fn average_initial_accuracy(&self) -> Real {
        self.mean(self.sum_initial_accuracy)
    }

    pub fn average_final_accuracy(&self) -> Real {
        self.mean(self.sum_final_accuracy)
    }

    pub fn average_improvement(&self) -> Real {
        self.average_final_accuracy() - self.average_initial_accuracy()
    }
}

/// Final per-test-set figures, as printed and exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSetSummary {
    pub name: String,
    pub trials: usize,
    pub average_iterations: Real,
    pub average_initial_accuracy: Real,
    pub average_final_accuracy: Real,
    pub average_improvement: Real,
    pub improved_trials: usize,
    pub terminations: TerminationCounts,
    pub moves: MoveStats,
}

impl TestSetSummary {
    pub fn from_aggregate(name: impl Into<String>, agg: &Aggregate) -> Self {
        Self {
            name: name.into(),
            trials: agg.trials,
            average_iterations: agg.average_iterations(),
            average_initial_accuracy: agg.average_initial_accuracy(),
            average_final_accuracy: agg.average_final_accuracy(),
            average_improvement: agg.average_improvement(),
            improved_trials: agg.improved,
            terminations: agg.terminations,
            moves: agg.moves,
        }
    }
}
