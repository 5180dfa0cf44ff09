//! Self-contained synthetic trial: generate a chain, run the optimizer, score it.
//!
//! A trial owns one seeded RNG. It draws the true and the starting lengths, a
//! fixed end effector ("foot") position, and then one fresh pose pair per
//! optimizer iteration. Both poses of a pair are anchored so that the true
//! chain ends exactly at the foot; the optimizer only sees those anchors and
//! the (optionally perturbed) orientations.

use autobone_core::synthetic::{
    random_orientations, OrientationNoise, OrientationSampling, UniformRange,
};
use autobone_core::{validate_chain, Pose, Real, Vec3};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    LengthOptimizer, LengthSolveOptions, MoveStats, OptimError, PosePair, PoseSource, TestReport,
};

/// Everything that defines one trial besides its seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialConfig {
    /// Number of segments in the chain.
    pub num_segments: usize,
    /// Optimizer tunables.
    pub options: LengthSolveOptions,
    /// Perturb the observed orientations to simulate tracker noise.
    pub randomly_offset: bool,
    /// Per-axis noise bound used when `randomly_offset` is set.
    pub max_offset_fraction: Real,
    /// Range the true lengths are drawn from.
    pub true_length_range: UniformRange,
    /// Range the starting candidate lengths are drawn from.
    pub candidate_length_range: UniformRange,
    /// Fixed true lengths; overrides `true_length_range`.
    pub true_lengths: Option<Vec<Real>>,
    /// Fixed starting lengths; overrides `candidate_length_range`.
    pub initial_lengths: Option<Vec<Real>>,
    /// Half-extent of the cube the foot position is drawn from.
    pub anchor_extent: Real,
    /// Orientation sampling ranges.
    pub orientation: OrientationSampling,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            num_segments: 4,
            options: LengthSolveOptions::default(),
            randomly_offset: false,
            max_offset_fraction: 0.05,
            true_length_range: UniformRange::new(0.5, 2.0),
            candidate_length_range: UniformRange::new(0.5, 2.0),
            true_lengths: None,
            initial_lengths: None,
            anchor_extent: 1.0,
            orientation: OrientationSampling::default(),
        }
    }
}

impl TrialConfig {
    pub fn validate(&self) -> Result<(), OptimError> {
        self.options.validate()?;
        if self.num_segments == 0 {
            return Err(autobone_core::ChainError::EmptyChain.into());
        }
        for fixed in [&self.true_lengths, &self.initial_lengths].into_iter().flatten() {
            if fixed.len() != self.num_segments {
                return Err(OptimError::LengthMismatch {
                    expected: self.num_segments,
                    got: fixed.len(),
                });
            }
        }
        if let Some(truth) = &self.true_lengths {
            if let Some(index) = truth.iter().position(|l| *l == 0.0) {
                return Err(OptimError::ZeroTrueLength { index });
            }
        }
        for (name, fixed) in [
            ("true_lengths", &self.true_lengths),
            ("initial_lengths", &self.initial_lengths),
        ] {
            let Some(lengths) = fixed else { continue };
            if let Some(bad) = lengths.iter().find(|l| !(l.is_finite() && **l > 0.0)) {
                return Err(OptimError::InvalidOptions(format!(
                    "{name} must be finite and strictly positive, got {bad}"
                )));
            }
        }
        for (name, fixed, range) in [
            ("true_length_range", &self.true_lengths, &self.true_length_range),
            (
                "candidate_length_range",
                &self.initial_lengths,
                &self.candidate_length_range,
            ),
        ] {
            if fixed.is_none() && range.min <= 0.0 {
                return Err(OptimError::InvalidOptions(format!(
                    "{name} must be strictly positive, got min {}",
                    range.min
                )));
            }
        }
        if !(self.max_offset_fraction >= 0.0 && self.max_offset_fraction < 1.0) {
            return Err(OptimError::InvalidOptions(format!(
                "max_offset_fraction must be in [0, 1), got {}",
                self.max_offset_fraction
            )));
        }
        if !(self.anchor_extent >= 0.0 && self.anchor_extent.is_finite()) {
            return Err(OptimError::InvalidOptions(format!(
                "anchor_extent must be finite and non-negative, got {}",
                self.anchor_extent
            )));
        }
        self.true_length_range.validate()?;
        self.candidate_length_range.validate()?;
        self.orientation.validate()?;
        Ok(())
    }

    fn noise(&self) -> OrientationNoise {
        if self.randomly_offset {
            OrientationNoise::new(self.max_offset_fraction)
        } else {
            OrientationNoise::default()
        }
    }
}

/// Full record of one trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub seed: u64,
    pub report: TestReport,
    pub true_lengths: Vec<Real>,
    pub initial_lengths: Vec<Real>,
    pub estimated_lengths: Vec<Real>,
    pub moves: MoveStats,
}

/// Pose pairs generated on the fly from a hidden true chain.
#[derive(Debug, Clone)]
pub struct SyntheticPoseSource {
    rng: StdRng,
    foot: Vec3,
    true_lengths: Vec<Real>,
    sampling: OrientationSampling,
    noise: OrientationNoise,
}

impl SyntheticPoseSource {
    pub fn new(
        rng: StdRng,
        foot: Vec3,
        true_lengths: Vec<Real>,
        sampling: OrientationSampling,
        noise: OrientationNoise,
    ) -> Self {
        Self {
            rng,
            foot,
            true_lengths,
            sampling,
            noise,
        }
    }

    fn observed_pose(&mut self) -> Result<Pose, OptimError> {
        let n = self.true_lengths.len();
        let truth = random_orientations(&mut self.rng, &self.sampling, n)?;
        validate_chain(&truth, &self.true_lengths)?;
        let anchor = autobone_core::origin_position(&self.foot, &truth, &self.true_lengths);
        let observed = self.noise.apply_all(&mut self.rng, &truth)?;
        Ok(Pose::new(anchor, observed)?)
    }
}

impl PoseSource for SyntheticPoseSource {
    fn num_segments(&self) -> usize {
        self.true_lengths.len()
    }

    fn next_pair(&mut self) -> Result<PosePair, OptimError> {
        let first = self.observed_pose()?;
        let second = self.observed_pose()?;
        PosePair::new(first, second)
    }
}

/// Run one synthetic trial.
///
/// The outcome depends only on `seed` and `config`: repeated calls with the
/// same arguments return identical outcomes.
pub fn run_trial(seed: u64, config: &TrialConfig) -> Result<TrialOutcome, OptimError> {
    config.validate()?;
    let n = config.num_segments;
    let mut rng = StdRng::seed_from_u64(seed);

    let true_lengths = match &config.true_lengths {
        Some(fixed) => fixed.clone(),
        None => config.true_length_range.sample_n(&mut rng, n)?,
    };
    let initial_lengths = match &config.initial_lengths {
        Some(fixed) => fixed.clone(),
        None => config.candidate_length_range.sample_n(&mut rng, n)?,
    };
    let foot_range = UniformRange::new(-config.anchor_extent, config.anchor_extent);
    let foot = foot_range.sample_point(&mut rng)?;

    let mut source = SyntheticPoseSource::new(
        rng,
        foot,
        true_lengths.clone(),
        config.orientation,
        config.noise(),
    );
    let mut optimizer = LengthOptimizer::new(initial_lengths.clone(), config.options.clone())?;
    let solved = optimizer.solve(&mut source, &true_lengths)?;

    Ok(TrialOutcome {
        seed,
        report: solved.report,
        true_lengths,
        initial_lengths,
        estimated_lengths: solved.estimated_lengths,
        moves: solved.moves,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Termination;

    #[test]
    fn same_seed_same_outcome() {
        let config = TrialConfig {
            options: LengthSolveOptions {
                initial_rate: 2.0,
                max_iterations: 300,
                ..Default::default()
            },
            randomly_offset: true,
            ..Default::default()
        };
        let a = run_trial(11, &config).unwrap();
        let b = run_trial(11, &config).unwrap();
        assert_eq!(a, b);
        let c = run_trial(12, &config).unwrap();
        assert_ne!(a.true_lengths, c.true_lengths);
    }

    #[test]
    fn fixed_lengths_are_respected() {
        let config = TrialConfig {
            true_lengths: Some(vec![10.0; 4]),
            initial_lengths: Some(vec![50.0; 4]),
            options: LengthSolveOptions {
                max_iterations: 10,
                ..Default::default()
            },
            ..Default::default()
        };
        let out = run_trial(1, &config).unwrap();
        assert_eq!(out.true_lengths, vec![10.0; 4]);
        assert_eq!(out.initial_lengths, vec![50.0; 4]);
        assert_eq!(out.report.initial_accuracy, 0.0);
    }

    #[test]
    fn noise_free_trial_reaches_target() {
        let config = TrialConfig {
            options: LengthSolveOptions {
                initial_rate: 2.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let out = run_trial(3, &config).unwrap();
        assert_eq!(out.report.termination, Termination::TargetAccuracy);
        assert!(out.report.final_accuracy >= 0.999_999);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let zero_truth = TrialConfig {
            true_lengths: Some(vec![1.0, 0.0, 1.0, 1.0]),
            ..Default::default()
        };
        assert_eq!(
            run_trial(0, &zero_truth),
            Err(OptimError::ZeroTrueLength { index: 1 })
        );

        let wrong_count = TrialConfig {
            initial_lengths: Some(vec![1.0; 3]),
            ..Default::default()
        };
        assert!(matches!(
            run_trial(0, &wrong_count),
            Err(OptimError::LengthMismatch { expected: 4, got: 3 })
        ));

        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let fixed_truth = TrialConfig {
                true_lengths: Some(vec![1.0, bad, 1.0, 1.0]),
                ..Default::default()
            };
            assert!(matches!(
                run_trial(0, &fixed_truth),
                Err(OptimError::InvalidOptions(_))
            ));
            let fixed_start = TrialConfig {
                initial_lengths: Some(vec![1.0, 1.0, bad, 1.0]),
                ..Default::default()
            };
            assert!(matches!(
                run_trial(0, &fixed_start),
                Err(OptimError::InvalidOptions(_))
            ));
        }

        let negative_candidates = TrialConfig {
            candidate_length_range: UniformRange::new(-0.5, 2.0),
            ..Default::default()
        };
        assert!(matches!(
            run_trial(0, &negative_candidates),
            Err(OptimError::InvalidOptions(msg)) if msg.contains("candidate_length_range")
        ));
        let fixed_start_overrides_range = TrialConfig {
            candidate_length_range: UniformRange::new(-0.5, 2.0),
            initial_lengths: Some(vec![1.0; 4]),
            options: LengthSolveOptions {
                max_iterations: 5,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(run_trial(0, &fixed_start_overrides_range).is_ok());

        let no_segments = TrialConfig {
            num_segments: 0,
            ..Default::default()
        };
        assert!(run_trial(0, &no_segments).is_err());
    }
}
