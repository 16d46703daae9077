//! Settings Builder
//!
//! Fluent construction of [`SimulationSettings`], starting from the built-in
//! defaults and overriding only what a caller cares about.
//!
//! # Example
//!
//! ```ignore
//! use finsim_core::config::SettingsBuilder;
//!
//! let settings = SettingsBuilder::new()
//!     .iterations(20_000)
//!     .inflation(0.025, 0.012)
//!     .demographic("genz", 0.18, 3.0)
//!     .build()?;
//! ```

use super::SimulationSettings;
use crate::error::Result;

/// Builder for [`SimulationSettings`]
#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    settings: SimulationSettings,
}

impl SettingsBuilder {
    /// Start from the built-in defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot
    #[must_use]
    pub fn from_settings(settings: SimulationSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.settings.default_iterations = iterations;
        self
    }

    #[must_use]
    pub fn min_iterations(mut self, min_iterations: usize) -> Self {
        self.settings.min_iterations = min_iterations;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.settings.default_seed = seed;
        self
    }

    /// Annual market return mean and volatility
    #[must_use]
    pub fn market(mut self, mean: f64, std_dev: f64) -> Self {
        self.settings.market_return_mean = mean;
        self.settings.market_return_std = std_dev;
        self
    }

    /// Annual inflation mean and volatility
    #[must_use]
    pub fn inflation(mut self, mean: f64, std_dev: f64) -> Self {
        self.settings.inflation_mean = mean;
        self.settings.inflation_std = std_dev;
        self
    }

    /// Set (or replace) both table entries for a demographic tag
    #[must_use]
    pub fn demographic(
        mut self,
        tag: impl Into<String>,
        income_volatility: f64,
        job_search_months: f64,
    ) -> Self {
        let tag = tag.into();
        self.settings
            .income_volatility
            .insert(tag.clone(), income_volatility);
        self.settings
            .job_search_months
            .insert(tag, job_search_months);
        self
    }

    /// Drop every demographic entry so all lookups use the fallbacks
    #[must_use]
    pub fn clear_demographics(mut self) -> Self {
        self.settings.income_volatility.clear();
        self.settings.job_search_months.clear();
        self
    }

    /// Validate and return the settings
    pub fn build(self) -> Result<SimulationSettings> {
        self.settings.validate()?;
        Ok(self.settings)
    }
}
