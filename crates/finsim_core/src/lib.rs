//! Monte Carlo simulation engine for personal-finance scenarios
//!
//! A run takes a [`Scenario`] (a pluggable outcome model) and a [`Profile`]
//! (the person's named financial fields), draws a set of random economic
//! factors, lets the scenario turn them into one outcome per iteration, and
//! summarises the outcomes into a [`ScenarioResult`]:
//! - Percentiles (10/25/50/75/90), mean, standard deviation, range
//! - Success probability from the scenario's own predicate
//! - Student-t confidence interval for the mean
//! - Convergence, outlier and distribution-shape diagnostics
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use finsim_core::{SimulationEngine, SimulationSettings, Profile};
//!
//! let settings = Arc::new(SimulationSettings::default());
//! let mut engine = SimulationEngine::with_seed(settings, 42);
//! let profile = Profile::new("millennial")
//!     .with_field("emergency_fund", 12_000.0)
//!     .with_field("monthly_expenses", 3_000.0);
//! let result = engine.run(&my_scenario, &profile, Some(10_000))?;
//! println!("median: {:.2}", result.percentile_50);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod error;
pub mod random;
pub mod scenario;
pub mod simulation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use analysis::{AnalyzerConfig, ResultAnalyzer};
pub use config::{SettingsBuilder, SimulationSettings};
pub use error::{ScenarioError, SimulationError};
pub use model::{
    DistributionShape, Factor, FieldValue, Profile, RandomFactors, ResultMetadata, ScenarioResult,
};
pub use random::{RandomFactorGenerator, RandomSource, RngSource, derive_run_seed};
pub use scenario::Scenario;
pub use simulation::{BatchJob, SimulationEngine, run_batch};
