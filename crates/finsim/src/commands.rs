//! Command implementations
//!
//! Each command returns the text to print so callers decide where it goes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use color_eyre::eyre::{Result, bail};
use finsim_core::{BatchJob, SimulationEngine, SimulationSettings, run_batch};

use crate::cli::{Command, RunOptions};
use crate::loader;
use crate::report::{self, OutputFormat};
use crate::scenarios::ScenarioKind;

pub fn execute(command: &Command) -> Result<String> {
    match command {
        Command::Run {
            scenario,
            profile,
            options,
            format,
        } => run(*scenario, profile, options, *format),
        Command::Batch {
            scenario,
            profiles,
            options,
            format,
        } => batch(*scenario, profiles, options, *format),
        Command::Scenarios => Ok(list_scenarios()),
    }
}

/// Resolve the iteration count, rejecting runs too small to be meaningful
fn checked_iterations(settings: &SimulationSettings, requested: Option<usize>) -> Result<usize> {
    let iterations = requested.unwrap_or(settings.default_iterations);
    if iterations < settings.min_iterations {
        bail!(
            "iterations must be at least {} for statistically meaningful results, got {}",
            settings.min_iterations,
            iterations
        );
    }
    Ok(iterations)
}

fn run(
    kind: ScenarioKind,
    profile_path: &Path,
    options: &RunOptions,
    format: OutputFormat,
) -> Result<String> {
    let settings = Arc::new(loader::load_settings(options.settings.as_deref())?);
    let iterations = checked_iterations(&settings, options.iterations)?;
    let profile = loader::load_profile(profile_path)?;
    let seed = options.seed.unwrap_or(settings.default_seed);

    tracing::info!(
        scenario = kind.cli_name(),
        iterations,
        seed,
        "Running scenario"
    );

    let scenario = kind.scenario();
    let mut engine = SimulationEngine::with_seed(settings, seed);
    let result = engine.run(scenario.as_ref(), &profile, Some(iterations))?;

    report::render(&result, format)
}

fn batch(
    kind: ScenarioKind,
    profile_paths: &[PathBuf],
    options: &RunOptions,
    format: OutputFormat,
) -> Result<String> {
    let settings = Arc::new(loader::load_settings(options.settings.as_deref())?);
    let iterations = checked_iterations(&settings, options.iterations)?;
    let profiles = profile_paths
        .iter()
        .map(|path| loader::load_profile(path))
        .collect::<Result<Vec<_>>>()?;
    let seed = options.seed.unwrap_or(settings.default_seed);

    tracing::info!(
        scenario = kind.cli_name(),
        jobs = profiles.len(),
        iterations,
        seed,
        "Running batch"
    );

    let scenario = kind.scenario();
    let jobs: Vec<BatchJob<'_>> = profiles
        .iter()
        .map(|profile| BatchJob::new(scenario.as_ref(), profile).iterations(iterations))
        .collect();

    let results = run_batch(&settings, seed, &jobs)
        .into_iter()
        .zip(profile_paths)
        .map(|(result, path)| {
            result.map_err(|e| {
                color_eyre::eyre::Report::new(e)
                    .wrap_err(format!("Simulation failed for profile {}", path.display()))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    report::render_many(&results, format)
}

fn list_scenarios() -> String {
    ScenarioKind::ALL
        .iter()
        .map(|kind| {
            let scenario = kind.scenario();
            format!(
                "{:<16} {}\n{:<16} required: {}",
                kind.cli_name(),
                kind.description(),
                "",
                scenario.required_fields().join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
