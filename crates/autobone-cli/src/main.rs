use std::path::PathBuf;

use anyhow::{Context, Result};
use autobone::pipeline::{format_report, run_harness, HarnessConfig};
use autobone::prelude::{run_trial, LengthSolveOptions, TrialConfig, TrialOutcome};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// AutoBone segment length estimation simulator.
#[derive(Debug, Parser)]
#[command(author, version, about = "Segment length estimation from orientation data")]
struct Cli {
    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run every test set of a harness configuration and print the summaries.
    Sweep(SweepArgs),
    /// Run a single trial and print the true, initial and estimated lengths.
    Trial(TrialArgs),
}

#[derive(Debug, Args)]
struct SweepArgs {
    /// Path to a JSON HarnessConfig. The four default test sets are used if omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of trials of every test set.
    #[arg(long)]
    trials: Option<usize>,

    /// Override the base seed of every test set.
    #[arg(long)]
    seed: Option<u64>,

    /// Run trials and test sets on the current thread only.
    #[arg(long)]
    sequential: bool,

    /// Print the summaries as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct TrialArgs {
    /// Trial seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of chain segments.
    #[arg(long, default_value_t = 4)]
    segments: usize,

    /// Initial learning rate (optimizer default if omitted).
    #[arg(long)]
    rate: Option<f64>,

    /// Iteration budget (optimizer default if omitted).
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Scale steps by segment length only, without rotation contribution.
    #[arg(long)]
    proportional: bool,

    /// Perturb the observed orientations with random noise.
    #[arg(long)]
    offset: bool,

    /// Print the full trial outcome as JSON.
    #[arg(long)]
    json: bool,
}

fn sweep_config(args: &SweepArgs) -> Result<HarnessConfig> {
    let mut config = match &args.config {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::default(),
    };
    if let Some(trials) = args.trials {
        config = config.with_trials(trials);
    }
    if let Some(seed) = args.seed {
        config = config.with_base_seed(seed);
    }
    if args.sequential {
        config.parallel = false;
    }
    Ok(config)
}

fn run_sweep(args: &SweepArgs) -> Result<String> {
    let config = sweep_config(args)?;
    let summaries = run_harness(&config)?;
    if args.json {
        Ok(serde_json::to_string_pretty(&summaries)?)
    } else {
        Ok(format_report(&summaries))
    }
}

fn trial_config(args: &TrialArgs) -> TrialConfig {
    let defaults = LengthSolveOptions::default();
    TrialConfig {
        num_segments: args.segments,
        randomly_offset: args.offset,
        options: LengthSolveOptions {
            initial_rate: args.rate.unwrap_or(defaults.initial_rate),
            max_iterations: args.max_iterations.unwrap_or(defaults.max_iterations),
            use_contribution: !args.proportional,
            ..defaults
        },
        ..Default::default()
    }
}

fn format_lengths(lengths: &[f64]) -> String {
    let parts: Vec<String> = lengths.iter().map(|l| format!("{l:.4}")).collect();
    format!("[{}]", parts.join(", "))
}

fn format_trial(outcome: &TrialOutcome) -> String {
    let report = &outcome.report;
    [
        format!("Seed: {}", outcome.seed),
        format!("True lengths: {}", format_lengths(&outcome.true_lengths)),
        format!("Initial lengths: {}", format_lengths(&outcome.initial_lengths)),
        format!(
            "Estimated lengths: {}",
            format_lengths(&outcome.estimated_lengths)
        ),
        format!(
            "Iterations: {} ({})",
            report.iterations,
            report.termination.as_str()
        ),
        format!("Start accuracy: {:.4}%", report.initial_accuracy * 100.0),
        format!("Final accuracy: {:.4}%", report.final_accuracy * 100.0),
    ]
    .join("\n")
}

fn run_single_trial(args: &TrialArgs) -> Result<String> {
    let config = trial_config(args);
    let outcome =
        run_trial(args.seed, &config).with_context(|| format!("trial with seed {}", args.seed))?;
    info!(
        seed = outcome.seed,
        termination = outcome.report.termination.as_str(),
        "trial finished"
    );
    if args.json {
        Ok(serde_json::to_string_pretty(&outcome)?)
    } else {
        Ok(format_trial(&outcome))
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = match &cli.command {
        Command::Sweep(args) => run_sweep(args)?,
        Command::Trial(args) => run_single_trial(args)?,
    };
    println!("{output}");
    Ok(())
}
