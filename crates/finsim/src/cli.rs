//! Command-line interface
//!
//! Argument parsing lives here and the command implementations live in
//! [`crate::commands`], so both can be tested without spawning a process.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::report::OutputFormat;
use crate::scenarios::ScenarioKind;

#[derive(Parser, Debug)]
#[command(name = "finsim")]
#[command(about = "Monte Carlo simulation of personal-finance scenarios")]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one scenario for one profile
    Run {
        scenario: ScenarioKind,

        /// Profile file (YAML or JSON)
        #[arg(short, long)]
        profile: PathBuf,

        #[command(flatten)]
        options: RunOptions,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Run one scenario for several profiles in parallel
    Batch {
        scenario: ScenarioKind,

        /// Profile files, one run each
        #[arg(short, long = "profile", required = true, num_args = 1..)]
        profiles: Vec<PathBuf>,

        #[command(flatten)]
        options: RunOptions,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// List built-in scenarios and their required fields
    Scenarios,
}

/// Options shared by `run` and `batch`
#[derive(Args, Debug, Clone, Default)]
pub struct RunOptions {
    /// Number of iterations (default from settings)
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Random seed (default from settings)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Settings file (default: ~/.finsim/settings.yaml)
    #[arg(long)]
    pub settings: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "finsim",
            "run",
            "emergency-fund",
            "--profile",
            "me.yaml",
            "--iterations",
            "5000",
            "--seed",
            "7",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.log_level, "info");
        match cli.command {
            Command::Run {
                scenario,
                profile,
                options,
                format,
            } => {
                assert_eq!(scenario, ScenarioKind::EmergencyFund);
                assert_eq!(profile, PathBuf::from("me.yaml"));
                assert_eq!(options.iterations, Some(5_000));
                assert_eq!(options.seed, Some(7));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_batch_with_global_flags() {
        let cli = Cli::try_parse_from([
            "finsim",
            "batch",
            "loan-payoff",
            "-p",
            "a.yaml",
            "b.yaml",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.log_level, "debug");
        match cli.command {
            Command::Batch {
                scenario, profiles, ..
            } => {
                assert_eq!(scenario, ScenarioKind::LoanPayoff);
                assert_eq!(profiles.len(), 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_unknown_scenario_rejected() {
        assert!(Cli::try_parse_from(["finsim", "run", "lottery", "-p", "x.yaml"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
