//! Simulation results
//!
//! `ScenarioResult` is the immutable record returned by a run. It
//! serializes to a flat shape suitable for an API layer; rounding for
//! display belongs to the presentation side, not here.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse classification of an outcome distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionShape {
    /// Fewer than 10 outcomes
    InsufficientData,
    /// Every outcome has the same value
    Degenerate,
    /// Variance below 1e-10
    NearConstant,
    /// Omnibus normality test does not reject at 5%
    Normal,
    /// |skewness| > 1
    Skewed,
    /// Density estimate has more than one peak
    Bimodal,
    Unknown,
}

impl DistributionShape {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DistributionShape::InsufficientData => "insufficient_data",
            DistributionShape::Degenerate => "degenerate",
            DistributionShape::NearConstant => "near_constant",
            DistributionShape::Normal => "normal",
            DistributionShape::Skewed => "skewed",
            DistributionShape::Bimodal => "bimodal",
            DistributionShape::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DistributionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostics attached to every result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub iterations: usize,
    pub convergence_achieved: bool,
    pub outliers_detected: usize,
    pub distribution_type: DistributionShape,
}

/// Summary of one scenario run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub iterations: usize,
    pub percentile_10: f64,
    pub percentile_25: f64,
    pub percentile_50: f64,
    pub percentile_75: f64,
    pub percentile_90: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub min_value: f64,
    pub max_value: f64,
    /// Fraction of iterations satisfying the scenario's success predicate
    pub probability_success: f64,
    /// 95% Student-t interval for the mean, `(lower, upper)`
    pub confidence_interval: (f64, f64),
    pub metadata: ResultMetadata,
    pub processing_time_ms: f64,
}

impl ScenarioResult {
    /// Percentiles in ascending order (p10, p25, p50, p75, p90)
    #[must_use]
    pub fn percentiles(&self) -> [(u8, f64); 5] {
        [
            (10, self.percentile_10),
            (25, self.percentile_25),
            (50, self.percentile_50),
            (75, self.percentile_75),
            (90, self.percentile_90),
        ]
    }

    /// Interquartile range (p75 - p25)
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.percentile_75 - self.percentile_25
    }

    /// Success probability as a percentage
    #[must_use]
    pub fn success_rate_pct(&self) -> f64 {
        self.probability_success * 100.0
    }
}
