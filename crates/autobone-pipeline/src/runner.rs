//! Parallel execution of test sets.

use anyhow::{Context, Result};
use autobone_core::synthetic::trial_seed;
use autobone_optim::{run_trial, Termination, TrialOutcome};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{Aggregate, HarnessConfig, TestSetConfig, TestSetSummary};

/// Run trial `index` of a test set.
pub fn run_test_set_trial(set: &TestSetConfig, index: usize) -> Result<TrialOutcome> {
    let seed = trial_seed(set.base_seed, index);
    let outcome = run_trial(seed, &set.trial)
        .with_context(|| format!("trial {index} (seed {seed}) of test set '{}'", set.name))?;

    let report = &outcome.report;
    debug!(
        test_set = %set.name,
        index,
        seed,
        iterations = report.iterations,
        initial_accuracy = report.initial_accuracy,
        final_accuracy = report.final_accuracy,
        termination = report.termination.as_str(),
        "trial finished"
    );
    if report.termination == Termination::RateFloor {
        warn!(
            test_set = %set.name,
            index,
            seed,
            iterations = report.iterations,
            "trial abandoned: learning rate fell below the floor"
        );
    }
    Ok(outcome)
}

/// Run every trial of one test set and summarize it.
///
/// With `parallel` the trials are spread over the rayon pool; every worker
/// folds into its own [`Aggregate`] and the partials are merged on join.
pub fn run_test_set(set: &TestSetConfig, parallel: bool) -> Result<TestSetSummary> {
    set.validate()?;

    let aggregate = if parallel {
        (0..set.trials)
            .into_par_iter()
            .try_fold(Aggregate::default, |agg, index| {
                run_test_set_trial(set, index).map(|outcome| agg.push(&outcome))
            })
            .try_reduce(Aggregate::default, |a, b| Ok(a.merge(b)))?
    } else {
        (0..set.trials).try_fold(Aggregate::default(), |agg, index| {
            run_test_set_trial(set, index).map(|outcome| agg.push(&outcome))
        })?
    };

    let summary = TestSetSummary::from_aggregate(set.name.clone(), &aggregate);
    info!(
        test_set = %summary.name,
        trials = summary.trials,
        average_iterations = summary.average_iterations,
        average_final_accuracy = summary.average_final_accuracy,
        average_improvement = summary.average_improvement,
        "test set finished"
    );
    Ok(summary)
}

/// Run all configured test sets. Summaries come back in configuration order.
pub fn run_harness(config: &HarnessConfig) -> Result<Vec<TestSetSummary>> {
    config.validate()?;
    info!(
        test_sets = config.test_sets.len(),
        parallel = config.parallel,
        "starting harness"
    );

    if config.parallel {
        config
            .test_sets
            .par_iter()
            .map(|set| run_test_set(set, true))
            .collect()
    } else {
        config
            .test_sets
            .iter()
            .map(|set| run_test_set(set, false))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autobone_optim::LengthSolveOptions;

    fn quick_set(name: &str) -> TestSetConfig {
        let mut set = TestSetConfig {
            name: name.to_string(),
            trials: 6,
            base_seed: 5,
            ..Default::default()
        };
        set.trial.options = LengthSolveOptions {
            initial_rate: 2.0,
            max_iterations: 200,
            ..Default::default()
        };
        set
    }

    #[test]
    fn trial_index_selects_seed() {
        let set = quick_set("seeded");
        let a = run_test_set_trial(&set, 3).unwrap();
        let b = run_test_set_trial(&set, 3).unwrap();
        let c = run_test_set_trial(&set, 4).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed, trial_seed(5, 3));
        assert_ne!(a.seed, c.seed);
    }

    #[test]
    fn summary_counts_every_trial() {
        let set = quick_set("count");
        let summary = run_test_set(&set, false).unwrap();
        assert_eq!(summary.trials, 6);
        assert_eq!(summary.terminations.total(), 6);
        assert!(summary.average_iterations <= 200.0);
    }

    #[test]
    fn invalid_set_is_reported_with_its_name() {
        let mut set = quick_set("broken");
        set.trial.num_segments = 0;
        let err = run_test_set(&set, true).unwrap_err();
        assert!(format!("{err:#}").contains("broken"));
    }
}
