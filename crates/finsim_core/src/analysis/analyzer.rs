//! Outcome-vector analysis
//!
//! Turns the raw outcomes of a run into a [`ScenarioResult`]: percentiles,
//! moments, a Student-t confidence interval for the mean, a convergence
//! check, IQR outlier counting and a shape tag.

use serde::{Deserialize, Serialize};

use super::descriptive::{self, Moments};
use super::distributions::t_critical;
use super::shape;
use crate::error::{Result, SimulationError};
use crate::model::{ResultMetadata, ScenarioResult};

/// Percentile fractions reported in every result
pub const REPORTED_PERCENTILES: [f64; 5] = [0.10, 0.25, 0.50, 0.75, 0.90];

/// Tuning knobs for [`ResultAnalyzer`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Confidence level of the interval around the mean
    pub confidence_level: f64,
    /// Runs shorter than this are never considered converged
    pub min_convergence_samples: usize,
    /// Maximum relative difference between the two half-sample means
    pub mean_tolerance: f64,
    /// Maximum ratio of quarter-mean variance to whole-run variance
    pub variance_tolerance: f64,
    /// IQR multiplier for the outlier fences
    pub outlier_iqr_factor: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            min_convergence_samples: 1_000,
            mean_tolerance: 0.01,
            variance_tolerance: 0.01,
            outlier_iqr_factor: 1.5,
        }
    }
}

/// Half means below this are treated as zero and the run as converged
const MEAN_EPSILON: f64 = 1e-10;
/// Sample std below which the confidence interval collapses to the mean
const DEGENERATE_STD: f64 = 1e-10;

/// Computes summary statistics over a run's outcomes
#[derive(Debug, Clone, Default)]
pub struct ResultAnalyzer {
    config: AnalyzerConfig,
}

impl ResultAnalyzer {
    #[must_use]
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Summarise `outcomes` into a [`ScenarioResult`].
    ///
    /// `outcomes` must be non-empty and finite; the engine checks both
    /// before calling this. The input is never modified.
    pub fn analyze(
        &self,
        outcomes: &[f64],
        scenario_name: &str,
        iterations: usize,
        probability_success: f64,
        processing_time_ms: f64,
    ) -> Result<ScenarioResult> {
        if outcomes.is_empty() {
            return Err(SimulationError::InvalidIterations(0));
        }

        let sorted = descriptive::sorted(outcomes);
        let [p10, p25, p50, p75, p90] =
            REPORTED_PERCENTILES.map(|p| descriptive::percentile_sorted(&sorted, p));

        let distinct = descriptive::distinct_count(&sorted);
        let moments = Moments::from_values(outcomes);
        // A constant sample reports its value exactly rather than a rounded sum
        let (mean, std_dev, confidence_interval) = if distinct == 1 {
            (sorted[0], 0.0, (sorted[0], sorted[0]))
        } else {
            (
                moments.mean,
                moments.m2.sqrt(),
                self.confidence_interval(outcomes, moments.mean),
            )
        };

        let result = ScenarioResult {
            scenario_name: scenario_name.to_string(),
            iterations,
            percentile_10: p10,
            percentile_25: p25,
            percentile_50: p50,
            percentile_75: p75,
            percentile_90: p90,
            mean,
            std_dev,
            min_value: sorted[0],
            max_value: sorted[sorted.len() - 1],
            probability_success,
            confidence_interval,
            metadata: ResultMetadata {
                iterations,
                convergence_achieved: self.convergence_achieved(outcomes),
                outliers_detected: self.count_outliers_sorted(&sorted, p25, p75),
                distribution_type: shape::classify(outcomes, &sorted),
            },
            processing_time_ms,
        };

        tracing::debug!(
            scenario = scenario_name,
            mean = result.mean,
            median = result.percentile_50,
            shape = %result.metadata.distribution_type,
            converged = result.metadata.convergence_achieved,
            "Analyzed outcomes"
        );

        Ok(result)
    }

    /// Student-t interval for the mean at the configured confidence level.
    ///
    /// Uses the unbiased sample standard deviation. A sample of one value,
    /// or one with negligible spread, collapses to `(mean, mean)`.
    #[must_use]
    pub fn confidence_interval(&self, outcomes: &[f64], mean: f64) -> (f64, f64) {
        let n = outcomes.len();
        if n < 2 {
            return (mean, mean);
        }
        let sample_std = descriptive::variance(outcomes, 1).sqrt();
        if sample_std < DEGENERATE_STD {
            return (mean, mean);
        }
        let std_err = sample_std / (n as f64).sqrt();
        let t = t_critical(self.config.confidence_level, (n - 1) as f64);
        let half_width = t * std_err;
        (mean - half_width, mean + half_width)
    }

    /// Whether the run has stabilised.
    ///
    /// Requires at least `min_convergence_samples` outcomes, a relative
    /// difference between the first-half and second-half means below
    /// `mean_tolerance`, and a variance of the four quarter means below
    /// `variance_tolerance` times the variance of the whole run.
    #[must_use]
    pub fn convergence_achieved(&self, outcomes: &[f64]) -> bool {
        let n = outcomes.len();
        if n < self.config.min_convergence_samples || n < 4 {
            return false;
        }

        let (first, second) = outcomes.split_at(n / 2);
        let (m1, m2) = (descriptive::mean(first), descriptive::mean(second));
        if m1.abs() < MEAN_EPSILON && m2.abs() < MEAN_EPSILON {
            return true;
        }
        let relative_diff = (m1 - m2).abs() / m1.abs().max(m2.abs()).max(MEAN_EPSILON);
        if relative_diff >= self.config.mean_tolerance {
            return false;
        }

        let whole_variance = descriptive::variance(outcomes, 0);
        if whole_variance == 0.0 {
            return true;
        }
        let quarter_means: Vec<f64> = outcomes
            .chunks_exact(n / 4)
            .take(4)
            .map(descriptive::mean)
            .collect();
        descriptive::variance(&quarter_means, 0) / whole_variance < self.config.variance_tolerance
    }

    /// Number of values strictly outside the Tukey fences
    /// `[Q1 - k·IQR, Q3 + k·IQR]`.
    #[must_use]
    pub fn count_outliers(&self, outcomes: &[f64]) -> usize {
        if outcomes.is_empty() {
            return 0;
        }
        let sorted = descriptive::sorted(outcomes);
        let q1 = descriptive::percentile_sorted(&sorted, 0.25);
        let q3 = descriptive::percentile_sorted(&sorted, 0.75);
        self.count_outliers_sorted(&sorted, q1, q3)
    }

    fn count_outliers_sorted(&self, sorted: &[f64], q1: f64, q3: f64) -> usize {
        let fence = self.config.outlier_iqr_factor * (q3 - q1);
        let (lower, upper) = (q1 - fence, q3 + fence);
        sorted.iter().filter(|&&v| v < lower || v > upper).count()
    }
}
