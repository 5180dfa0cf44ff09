//! Gradient-free segment length optimizer.
//!
//! Each iteration draws a pose pair, measures how far apart the two estimated
//! end effectors are, and turns that discrepancy into a step size. Every
//! segment length is then nudged by a share of the step; a nudge is kept only
//! if it does not increase the discrepancy on the current pair. In
//! proportional mode a failed nudge is retried in the opposite direction, in
//! contribution mode it is dropped (the contribution already picks the sign).
//!
//! This is a per-coordinate hill climb with no convergence guarantee: it can
//! stall or cycle, for example when the candidate length sum approaches zero.
//! Runs that stop on the iteration budget or the rate floor are reported as
//! such, not as errors.

use autobone_core::{Real, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{accuracy, rotation_contribution, LengthSolveOptions, OptimError, PosePair, PoseSource};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Accuracy against the true lengths reached the target.
    TargetAccuracy,
    /// The error signal dropped to the target error.
    Converged,
    /// The iteration budget ran out.
    MaxIterations,
    /// The decayed rate fell below the floor; the run was abandoned.
    RateFloor,
}

impl Termination {
    pub const ALL: [Termination; 4] = [
        Termination::TargetAccuracy,
        Termination::Converged,
        Termination::MaxIterations,
        Termination::RateFloor,
    ];

    /// True for the two outcomes that end a run on purpose.
    pub fn is_success(self) -> bool {
        matches!(self, Termination::TargetAccuracy | Termination::Converged)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Termination::TargetAccuracy => "target_accuracy",
            Termination::Converged => "converged",
            Termination::MaxIterations => "max_iterations",
            Termination::RateFloor => "rate_floor",
        }
    }
}

/// Scalar summary of one optimizer run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    pub iterations: usize,
    pub initial_accuracy: Real,
    pub final_accuracy: Real,
    pub termination: Termination,
}

impl TestReport {
    /// `final_accuracy − initial_accuracy`.
    #[inline]
    pub fn improvement(&self) -> Real {
        self.final_accuracy - self.initial_accuracy
    }
}

/// Counts of per-segment move outcomes over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStats {
    /// Moves kept in the proposed direction.
    pub accepted: usize,
    /// Moves kept after retrying in the opposite direction.
    pub reversed: usize,
    /// Proposals left unapplied.
    pub rejected: usize,
}

/// Result of [`LengthOptimizer::solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct LengthSolveReport {
    pub report: TestReport,
    pub estimated_lengths: Vec<Real>,
    pub moves: MoveStats,
}

/// Mutable state of one optimization run.
#[derive(Debug, Clone)]
pub struct LengthOptimizer {
    opts: LengthSolveOptions,
    candidate: Vec<Real>,
    rate: Real,
    iterations: usize,
    moves: MoveStats,
}

impl LengthOptimizer {
    /// Start from `initial_lengths` with the given options.
    ///
    /// # Errors
    ///
    /// Fails on invalid options or an empty length vector.
    pub fn new(initial_lengths: Vec<Real>, opts: LengthSolveOptions) -> Result<Self, OptimError> {
        opts.validate()?;
        if initial_lengths.is_empty() {
            return Err(autobone_core::ChainError::EmptyChain.into());
        }
        Ok(Self {
            rate: opts.initial_rate,
            opts,
            candidate: initial_lengths,
            iterations: 0,
            moves: MoveStats::default(),
        })
    }

    pub fn candidate(&self) -> &[Real] {
        &self.candidate
    }

    pub fn rate(&self) -> Real {
        self.rate
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn options(&self) -> &LengthSolveOptions {
        &self.opts
    }

    /// Iterate until a termination condition holds.
    ///
    /// `true_lengths` is only used to score the candidate; the update itself
    /// sees nothing but the pose pairs.
    pub fn solve<S: PoseSource + ?Sized>(
        &mut self,
        source: &mut S,
        true_lengths: &[Real],
    ) -> Result<LengthSolveReport, OptimError> {
        let n = self.candidate.len();
        if true_lengths.len() != n {
            return Err(OptimError::LengthMismatch {
                expected: n,
                got: true_lengths.len(),
            });
        }
        if source.num_segments() != n {
            return Err(OptimError::LengthMismatch {
                expected: n,
                got: source.num_segments(),
            });
        }

        let initial_accuracy = accuracy(true_lengths, &self.candidate)?;

        let termination = loop {
            if self.iterations >= self.opts.max_iterations {
                break Termination::MaxIterations;
            }

            let pair = source.next_pair()?;
            if pair.num_segments() != n {
                return Err(OptimError::LengthMismatch {
                    expected: n,
                    got: pair.num_segments(),
                });
            }

            let true_origin_distance = pair.true_origin_distance();
            let distance = pair.end_offset(&self.candidate).norm();
            let error = self.opts.error_model.signal(true_origin_distance, distance);
            let step = error * self.rate;
            let current_accuracy = accuracy(true_lengths, &self.candidate)?;

            trace!(
                iteration = self.iterations,
                rate = self.rate,
                distance,
                error,
                accuracy = current_accuracy,
                "length optimizer iteration"
            );

            if current_accuracy >= self.opts.target_accuracy {
                break Termination::TargetAccuracy;
            }
            if error <= self.opts.target_error {
                break Termination::Converged;
            }
            if step > 0.0 {
                if self.rate < self.opts.rate_floor {
                    break Termination::RateFloor;
                }
                for _ in 0..self.opts.refinements_per_sample {
                    self.sweep(&pair, true_origin_distance)?;
                }
            }

            self.iterations += 1;
            self.rate *= self.opts.rate_decay;
        };

        let final_accuracy = accuracy(true_lengths, &self.candidate)?;
        let report = TestReport {
            iterations: self.iterations,
            initial_accuracy,
            final_accuracy,
            termination,
        };
        debug!(
            termination = termination.as_str(),
            iterations = report.iterations,
            initial_accuracy,
            final_accuracy,
            accepted = self.moves.accepted,
            reversed = self.moves.reversed,
            rejected = self.moves.rejected,
            "length optimizer finished"
        );

        Ok(LengthSolveReport {
            report,
            estimated_lengths: self.candidate.clone(),
            moves: self.moves,
        })
    }

    /// One pass over all segments against a single pose pair.
    fn sweep(&mut self, pair: &PosePair, true_origin_distance: Real) -> Result<(), OptimError> {
        let mut offset = pair.end_offset(&self.candidate);
        let mut distance = offset.norm();
        let step = self.opts.error_model.signal(true_origin_distance, distance) * self.rate;
        if step <= 0.0 {
            return Ok(());
        }

        for j in 0..self.candidate.len() {
            if distance == 0.0 {
                break;
            }
            let length_sum: Real = self.candidate.iter().sum();
            let weight = if self.opts.use_contribution {
                rotation_contribution(
                    &offset,
                    &pair.first.orientations[j],
                    &pair.second.orientations[j],
                    self.candidate[j],
                    self.opts.contribution_sign,
                )?
            } else {
                self.candidate[j]
            };

            let mut adjust = step * weight / length_sum;
            if let Some(fraction) = self.opts.max_step_fraction {
                let limit = fraction * self.candidate[j].abs();
                adjust = adjust.clamp(-limit, limit);
            }
            if adjust == 0.0 || !adjust.is_finite() {
                self.moves.rejected += 1;
                continue;
            }

            let original = self.candidate[j];
            if let Some((o, d)) = self.try_length(pair, j, original + adjust, distance) {
                (offset, distance) = (o, d);
                self.moves.accepted += 1;
                continue;
            }
            if !self.opts.use_contribution {
                if let Some((o, d)) = self.try_length(pair, j, original - adjust, distance) {
                    (offset, distance) = (o, d);
                    self.moves.reversed += 1;
                    continue;
                }
            }
            self.moves.rejected += 1;
        }
        Ok(())
    }

    /// Set segment `j` to `value` if that does not increase the discrepancy.
    ///
    /// Returns the new offset and distance on success; otherwise the candidate
    /// is left untouched.
    fn try_length(
        &mut self,
        pair: &PosePair,
        j: usize,
        value: Real,
        current_distance: Real,
    ) -> Option<(Vec3, Real)> {
        if value < 0.0 {
            return None;
        }
        let original = self.candidate[j];
        self.candidate[j] = value;
        let offset = pair.end_offset(&self.candidate);
        let distance = offset.norm();
        if distance > current_distance {
            self.candidate[j] = original;
            return None;
        }
        Some((offset, distance))
    }
}
