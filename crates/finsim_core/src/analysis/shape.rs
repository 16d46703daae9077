//! Distribution-shape classification
//!
//! Shape is advisory: the classifier walks an ordered chain of rules and
//! the first one that returns a tag wins. Rules backed by numerical tests
//! (normality, density peaks) return `None` when the test cannot be
//! computed, so a pathological sample falls through to the next rule
//! instead of failing the run.

use std::f64::consts::PI;

use super::descriptive::{self, Moments};
use super::distributions::chi_square_sf;
use crate::model::DistributionShape;

/// Samples below this size are not classified
pub const MIN_SHAPE_SAMPLES: usize = 10;
/// Variance below which a sample is treated as constant
pub const NEAR_CONSTANT_VARIANCE: f64 = 1e-10;
/// Normality is accepted when the omnibus p-value exceeds this
pub const NORMALITY_ALPHA: f64 = 0.05;
/// |skewness| above which a sample is called skewed
pub const SKEW_THRESHOLD: f64 = 1.0;
/// Minimum distinct values before a density estimate is attempted
pub const MIN_DISTINCT_FOR_DENSITY: usize = 10;
/// Points in the density-estimate grid
pub const DENSITY_GRID_POINTS: usize = 100;

/// Precomputed views of a sample shared by every rule
struct Sample<'a> {
    values: &'a [f64],
    sorted: &'a [f64],
    distinct: usize,
    moments: Moments,
}

type Rule = fn(&Sample<'_>) -> Option<DistributionShape>;

/// Rules in evaluation order
const RULES: [(&str, Rule); 6] = [
    ("insufficient_data", insufficient_data),
    ("degenerate", degenerate),
    ("near_constant", near_constant),
    ("normality_test", normal),
    ("skewness", skewed),
    ("density_peaks", bimodal),
];

/// Classify the shape of `values`; `sorted` must hold the same values
/// in ascending order.
#[must_use]
pub fn classify(values: &[f64], sorted: &[f64]) -> DistributionShape {
    let sample = Sample {
        values,
        sorted,
        distinct: descriptive::distinct_count(sorted),
        moments: Moments::from_values(values),
    };

    RULES
        .iter()
        .find_map(|(name, rule)| {
            let shape = rule(&sample);
            if let Some(shape) = shape {
                tracing::trace!(rule = name, %shape, "Shape rule matched");
            }
            shape
        })
        .unwrap_or(DistributionShape::Unknown)
}

fn insufficient_data(sample: &Sample<'_>) -> Option<DistributionShape> {
    (sample.values.len() < MIN_SHAPE_SAMPLES).then_some(DistributionShape::InsufficientData)
}

fn degenerate(sample: &Sample<'_>) -> Option<DistributionShape> {
    (sample.distinct == 1).then_some(DistributionShape::Degenerate)
}

fn near_constant(sample: &Sample<'_>) -> Option<DistributionShape> {
    (sample.moments.sample_variance() < NEAR_CONSTANT_VARIANCE)
        .then_some(DistributionShape::NearConstant)
}

fn normal(sample: &Sample<'_>) -> Option<DistributionShape> {
    let Some(p_value) = normality_p_value(&sample.moments) else {
        tracing::debug!(n = sample.values.len(), "Normality test could not be computed");
        return None;
    };
    (p_value > NORMALITY_ALPHA).then_some(DistributionShape::Normal)
}

fn skewed(sample: &Sample<'_>) -> Option<DistributionShape> {
    let skew = sample.moments.skewness()?;
    (skew.abs() > SKEW_THRESHOLD).then_some(DistributionShape::Skewed)
}

fn bimodal(sample: &Sample<'_>) -> Option<DistributionShape> {
    if sample.distinct <= MIN_DISTINCT_FOR_DENSITY {
        return None;
    }
    let Some(peaks) = count_density_peaks(sample.values, sample.sorted, DENSITY_GRID_POINTS)
    else {
        tracing::debug!("Density estimate could not be computed");
        return None;
    };
    (peaks > 1).then_some(DistributionShape::Bimodal)
}

/// D'Agostino-Pearson omnibus normality test.
///
/// Combines the skewness and kurtosis z-scores into K², which is
/// chi-square with 2 degrees of freedom under normality. Returns the
/// p-value, or `None` if the sample is too small (n < 8), has zero
/// variance, or a transform is undefined.
#[must_use]
pub fn normality_p_value(moments: &Moments) -> Option<f64> {
    let z_skew = skew_z_score(moments)?;
    let z_kurt = kurtosis_z_score(moments)?;
    let k2 = z_skew * z_skew + z_kurt * z_kurt;
    let p = chi_square_sf(k2, 2.0)?;
    p.is_finite().then_some(p)
}

/// D'Agostino's transform of sample skewness to a standard normal z
fn skew_z_score(moments: &Moments) -> Option<f64> {
    if moments.n < 8 {
        return None;
    }
    let n = moments.n as f64;
    let b1 = moments.skewness()?;

    let y = b1 * ((n + 1.0) * (n + 3.0) / (6.0 * (n - 2.0))).sqrt();
    let beta2 = 3.0 * (n * n + 27.0 * n - 70.0) * (n + 1.0) * (n + 3.0)
        / ((n - 2.0) * (n + 5.0) * (n + 7.0) * (n + 9.0));
    let w2 = -1.0 + (2.0 * (beta2 - 1.0)).sqrt();
    let delta = 1.0 / (0.5 * w2.ln()).sqrt();
    let alpha = (2.0 / (w2 - 1.0)).sqrt();

    let ratio = y / alpha;
    let z = delta * (ratio + (ratio * ratio + 1.0).sqrt()).ln();
    z.is_finite().then_some(z)
}

/// Anscombe-Glynn transform of sample kurtosis to a standard normal z
fn kurtosis_z_score(moments: &Moments) -> Option<f64> {
    if moments.n < 5 {
        return None;
    }
    let n = moments.n as f64;
    let b2 = moments.kurtosis()?;

    let expected = 3.0 * (n - 1.0) / (n + 1.0);
    let var_b2 = 24.0 * n * (n - 2.0) * (n - 3.0) / ((n + 1.0).powi(2) * (n + 3.0) * (n + 5.0));
    let x = (b2 - expected) / var_b2.sqrt();

    let sqrt_beta1 = 6.0 * (n * n - 5.0 * n + 2.0) / ((n + 7.0) * (n + 9.0))
        * (6.0 * (n + 3.0) * (n + 5.0) / (n * (n - 2.0) * (n - 3.0))).sqrt();
    let a = 6.0 + 8.0 / sqrt_beta1 * (2.0 / sqrt_beta1 + (1.0 + 4.0 / (sqrt_beta1 * sqrt_beta1)).sqrt());

    let term1 = 1.0 - 2.0 / (9.0 * a);
    let denom = 1.0 + x * (2.0 / (a - 4.0)).sqrt();
    if denom == 0.0 {
        return None;
    }
    let term2 = denom.signum() * ((1.0 - 2.0 / a) / denom.abs()).cbrt();

    let z = (term1 - term2) / (2.0 / (9.0 * a)).sqrt();
    z.is_finite().then_some(z)
}

/// Count local maxima of a Gaussian kernel density estimate.
///
/// The bandwidth follows Scott's rule (sample std × n^(-1/5)) and the
/// density is evaluated on `grid_points` evenly spaced points spanning
/// `[min, max]`. Returns `None` when the bandwidth or the range is zero or
/// not finite.
#[must_use]
pub fn count_density_peaks(values: &[f64], sorted: &[f64], grid_points: usize) -> Option<usize> {
    let n = values.len();
    if n < 2 || grid_points < 3 {
        return None;
    }
    let (min, max) = (*sorted.first()?, *sorted.last()?);
    let range = max - min;

    let bandwidth = descriptive::variance(values, 1).sqrt() * (n as f64).powf(-0.2);
    if !(bandwidth.is_finite() && bandwidth > 0.0 && range.is_finite() && range > 0.0) {
        return None;
    }

    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * PI).sqrt());
    let step = range / (grid_points - 1) as f64;
    let density: Vec<f64> = (0..grid_points)
        .map(|i| {
            let x = min + step * i as f64;
            let sum: f64 = values
                .iter()
                .map(|v| {
                    let u = (x - v) / bandwidth;
                    (-0.5 * u * u).exp()
                })
                .sum();
            sum * norm
        })
        .collect();

    if density.iter().any(|d| !d.is_finite()) {
        return None;
    }

    Some(
        density
            .windows(3)
            .filter(|w| w[1] > w[0] && w[1] > w[2])
            .count(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape_of(values: &[f64]) -> DistributionShape {
        classify(values, &descriptive::sorted(values))
    }

    #[test]
    fn test_small_samples_are_insufficient() {
        let values: Vec<f64> = (1..=9).map(f64::from).collect();
        assert_eq!(shape_of(&values), DistributionShape::InsufficientData);
        assert_eq!(shape_of(&[]), DistributionShape::InsufficientData);
    }

    #[test]
    fn test_one_to_ten_is_normal() {
        // n == 10 is past the insufficient-data boundary; K² = 0.978, p = 0.613
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let p = normality_p_value(&Moments::from_values(&values)).unwrap();
        assert!((p - 0.613_162_962_8).abs() < 1e-6, "p was {p}");
        assert_eq!(shape_of(&values), DistributionShape::Normal);
    }

    #[test]
    fn test_constant_is_degenerate() {
        assert_eq!(shape_of(&[3.5; 40]), DistributionShape::Degenerate);
    }

    #[test]
    fn test_tiny_spread_is_near_constant() {
        let mut values = vec![1.0; 20];
        values[0] = 1.0 + 1e-9;
        assert_eq!(shape_of(&values), DistributionShape::NearConstant);
    }

    #[test]
    fn test_cubes_are_skewed() {
        // Normality rejected (p ~ 0.013), skewness ~ 1.04
        let values: Vec<f64> = (1..=50).map(|i| f64::from(i).powi(3)).collect();
        let p = normality_p_value(&Moments::from_values(&values)).unwrap();
        assert!(p < NORMALITY_ALPHA);
        assert_eq!(shape_of(&values), DistributionShape::Skewed);
    }

    #[test]
    fn test_two_clusters_are_bimodal() {
        let values: Vec<f64> = (0..30)
            .map(|i| f64::from(i) * 0.1)
            .chain((0..30).map(|i| 100.0 + f64::from(i) * 0.1))
            .collect();
        let sorted = descriptive::sorted(&values);
        assert_eq!(
            count_density_peaks(&values, &sorted, DENSITY_GRID_POINTS),
            Some(2)
        );
        assert_eq!(shape_of(&values), DistributionShape::Bimodal);
    }

    #[test]
    fn test_uniform_grid_is_unknown() {
        // Platykurtic enough to reject normality, symmetric, single plateau
        let values: Vec<f64> = (1..=200).map(f64::from).collect();
        assert_eq!(shape_of(&values), DistributionShape::Unknown);
    }

    #[test]
    fn test_few_distinct_values_skip_density() {
        let values: Vec<f64> = (0..200).map(|i| f64::from(i % 5)).collect();
        assert_eq!(shape_of(&values), DistributionShape::Unknown);
    }

    #[test]
    fn test_normality_needs_eight_values() {
        let values = [1.0, 2.0, 4.0, 8.0, 16.0, 32.0, 64.0];
        assert_eq!(normality_p_value(&Moments::from_values(&values)), None);
    }

    #[test]
    fn test_density_peaks_reject_zero_range() {
        let values = [2.0; 12];
        assert_eq!(count_density_peaks(&values, &values, 100), None);
    }
}
