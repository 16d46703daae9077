//! Simulation settings
//!
//! `SimulationSettings` is the process-wide, read-only snapshot of the
//! numeric assumptions every run draws from: iteration defaults, the seed,
//! market and inflation parameters, and the per-demographic tables used to
//! parameterise income volatility and job-search duration.
//!
//! Settings are loaded once (usually from YAML by the front end) and shared
//! behind an `Arc`. Two runs that read the same snapshot with the same seed
//! produce identical results.
//!
//! # Builder
//!
//! ```ignore
//! use finsim_core::config::SettingsBuilder;
//!
//! let settings = SettingsBuilder::new()
//!     .iterations(5_000)
//!     .seed(7)
//!     .market(0.06, 0.18)
//!     .demographic("freelancer", 0.25, 5.0)
//!     .build()?;
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

pub mod builder;

pub use builder::SettingsBuilder;

/// Income volatility used when a demographic has no table entry
pub const DEFAULT_INCOME_VOLATILITY: f64 = 0.10;
/// Job-search duration (months) used when a demographic has no table entry
pub const DEFAULT_JOB_SEARCH_MONTHS: f64 = 4.0;

fn default_iterations() -> usize {
    10_000
}

fn default_min_iterations() -> usize {
    1_000
}

fn default_seed() -> u64 {
    42
}

fn default_income_volatility() -> FxHashMap<String, f64> {
    FxHashMap::from_iter([
        ("genz".to_string(), 0.15),
        ("millennial".to_string(), 0.12),
        ("genx".to_string(), 0.10),
        ("boomer".to_string(), 0.08),
    ])
}

fn default_job_search_months() -> FxHashMap<String, f64> {
    FxHashMap::from_iter([
        ("genz".to_string(), 3.5),
        ("millennial".to_string(), 4.0),
        ("genx".to_string(), 4.5),
        ("boomer".to_string(), 6.0),
    ])
}

/// Read-only numeric assumptions shared by every simulation run.
///
/// Annual market and inflation figures are converted to monthly draws by
/// the factor generator (mean / 12, std / sqrt(12)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Iterations used when a run does not specify a count
    #[serde(default = "default_iterations")]
    pub default_iterations: usize,
    /// Statistical-validity floor callers enforce before running
    #[serde(default = "default_min_iterations")]
    pub min_iterations: usize,
    #[serde(default = "default_seed")]
    pub default_seed: u64,

    /// Annual expected market return
    #[serde(default = "SimulationSettings::default_market_mean")]
    pub market_return_mean: f64,
    /// Annual market return volatility
    #[serde(default = "SimulationSettings::default_market_std")]
    pub market_return_std: f64,
    /// Annual expected inflation
    #[serde(default = "SimulationSettings::default_inflation_mean")]
    pub inflation_mean: f64,
    #[serde(default = "SimulationSettings::default_inflation_std")]
    pub inflation_std: f64,

    /// Income volatility (std of the income multiplier) by demographic tag
    #[serde(default = "default_income_volatility")]
    pub income_volatility: FxHashMap<String, f64>,
    /// Mean job-search duration in months by demographic tag
    #[serde(default = "default_job_search_months")]
    pub job_search_months: FxHashMap<String, f64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            default_iterations: default_iterations(),
            min_iterations: default_min_iterations(),
            default_seed: default_seed(),
            market_return_mean: Self::default_market_mean(),
            market_return_std: Self::default_market_std(),
            inflation_mean: Self::default_inflation_mean(),
            inflation_std: Self::default_inflation_std(),
            income_volatility: default_income_volatility(),
            job_search_months: default_job_search_months(),
        }
    }
}

impl SimulationSettings {
    fn default_market_mean() -> f64 {
        0.07
    }

    fn default_market_std() -> f64 {
        0.15
    }

    fn default_inflation_mean() -> f64 {
        0.03
    }

    fn default_inflation_std() -> f64 {
        0.01
    }

    /// Income volatility for a demographic, falling back to 0.10
    #[must_use]
    pub fn income_volatility_for(&self, demographic: &str) -> f64 {
        self.income_volatility
            .get(demographic)
            .copied()
            .unwrap_or(DEFAULT_INCOME_VOLATILITY)
    }

    /// Mean job-search duration for a demographic, falling back to 4 months
    #[must_use]
    pub fn job_search_months_for(&self, demographic: &str) -> f64 {
        self.job_search_months
            .get(demographic)
            .copied()
            .unwrap_or(DEFAULT_JOB_SEARCH_MONTHS)
    }

    /// Check that every parameter can parameterise its distribution.
    pub fn validate(&self) -> Result<()> {
        if self.default_iterations == 0 {
            return Err(SimulationError::InvalidSettings(
                "default_iterations must be positive".to_string(),
            ));
        }

        let means = [
            ("market_return_mean", self.market_return_mean),
            ("inflation_mean", self.inflation_mean),
        ];
        for (name, value) in means {
            if !value.is_finite() {
                return Err(SimulationError::InvalidSettings(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }

        let spreads = [
            ("market_return_std", self.market_return_std),
            ("inflation_std", self.inflation_std),
        ];
        for (name, value) in spreads {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidSettings(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        let tables = [
            ("income_volatility", &self.income_volatility),
            ("job_search_months", &self.job_search_months),
        ];
        for (table, entries) in tables {
            for (tag, value) in entries {
                if !value.is_finite() || *value < 0.0 {
                    return Err(SimulationError::InvalidSettings(format!(
                        "{table}[{tag}] must be finite and non-negative, got {value}"
                    )));
                }
            }
        }

        Ok(())
    }
}
