//! Harness configuration: which test sets to run and how.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use autobone_optim::{LengthSolveOptions, TrialConfig};
use serde::{Deserialize, Serialize};

/// Base seed shared by the default test sets, so trial `i` of every arm draws
/// the same true lengths, starting lengths and foot position.
pub const DEFAULT_BASE_SEED: u64 = 42;

/// Trials per test set in the default table.
pub const DEFAULT_TRIALS: usize = 100;

/// One named group of trials sharing a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestSetConfig {
    pub name: String,
    pub trials: usize,
    /// Per-trial seeds are derived from this with `trial_seed`.
    pub base_seed: u64,
    pub trial: TrialConfig,
}

impl Default for TestSetConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            trials: DEFAULT_TRIALS,
            base_seed: DEFAULT_BASE_SEED,
            trial: TrialConfig::default(),
        }
    }
}

impl TestSetConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.name.trim().is_empty(), "test set name must not be empty");
        ensure!(
            self.trials > 0,
            "test set '{}' must run at least one trial",
            self.name
        );
        self.trial
            .validate()
            .with_context(|| format!("invalid trial configuration in test set '{}'", self.name))
    }
}

/// Top-level harness configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Run trials and test sets on the rayon thread pool.
    pub parallel: bool,
    pub test_sets: Vec<TestSetConfig>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            test_sets: default_test_sets(DEFAULT_TRIALS),
        }
    }
}

impl HarnessConfig {
    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse harness configuration")
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json_str(&data).with_context(|| format!("in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.test_sets.is_empty(), "no test sets configured");
        let mut names = HashSet::new();
        for set in &self.test_sets {
            set.validate()?;
            ensure!(
                names.insert(set.name.as_str()),
                "duplicate test set name '{}'",
                set.name
            );
        }
        Ok(())
    }

    /// Override the trial count of every test set.
    pub fn with_trials(mut self, trials: usize) -> Self {
        for set in &mut self.test_sets {
            set.trials = trials;
        }
        self
    }

    /// Override the base seed of every test set.
    pub fn with_base_seed(mut self, base_seed: u64) -> Self {
        for set in &mut self.test_sets {
            set.base_seed = base_seed;
        }
        self
    }
}

/// The four experiment arms: contribution weighting on/off crossed with
/// orientation noise on/off.
pub fn default_test_sets(trials: usize) -> Vec<TestSetConfig> {
    let arm = |name: &str, use_contribution: bool, randomly_offset: bool| TestSetConfig {
        name: name.to_string(),
        trials,
        base_seed: DEFAULT_BASE_SEED,
        trial: TrialConfig {
            randomly_offset,
            options: LengthSolveOptions {
                use_contribution,
                ..Default::default()
            },
            ..Default::default()
        },
    };
    vec![
        arm("contribution", true, false),
        arm("contribution+offset", true, true),
        arm("proportional", false, false),
        arm("proportional+offset", false, true),
    ]
}
