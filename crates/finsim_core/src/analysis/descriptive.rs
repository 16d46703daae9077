//! Descriptive statistics over outcome samples.

/// Arithmetic mean, 0.0 for an empty slice
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Variance with `ddof` delta degrees of freedom (0 = population, 1 = sample).
///
/// Returns 0.0 when there are not more than `ddof` values.
#[must_use]
pub fn variance(values: &[f64], ddof: usize) -> f64 {
    let n = values.len();
    if n <= ddof {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - ddof) as f64
}

/// Copy of `values` sorted ascending (total order, NaN last)
#[must_use]
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    sorted
}

/// Linear-interpolation percentile of already-sorted data.
///
/// `p` is a fraction in `[0, 1]`; the value sits at fractional rank
/// `(n - 1) * p` between adjacent order statistics. Returns NaN for empty
/// input.
#[must_use]
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted[0];
    }

    let rank = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let lower = rank.floor() as usize;
    let upper = (lower + 1).min(n - 1);
    let frac = rank - lower as f64;

    lerp(sorted[lower], sorted[upper], frac)
}

/// Interpolate from whichever end is closer so both endpoints are exact
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

/// Number of distinct values in sorted data
#[must_use]
pub fn distinct_count(sorted: &[f64]) -> usize {
    if sorted.is_empty() {
        return 0;
    }
    1 + sorted.windows(2).filter(|w| w[0] != w[1]).count()
}

/// Biased central moments of a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub n: usize,
    pub mean: f64,
    /// Second central moment (population variance)
    pub m2: f64,
    pub m3: f64,
    pub m4: f64,
}

impl Moments {
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        let n = values.len();
        let mean = mean(values);
        let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
        for v in values {
            let d = v - mean;
            let d2 = d * d;
            m2 += d2;
            m3 += d2 * d;
            m4 += d2 * d2;
        }
        let n_f = (n.max(1)) as f64;
        Self {
            n,
            mean,
            m2: m2 / n_f,
            m3: m3 / n_f,
            m4: m4 / n_f,
        }
    }

    /// Unbiased sample variance
    #[must_use]
    pub fn sample_variance(&self) -> f64 {
        if self.n < 2 {
            return 0.0;
        }
        self.m2 * self.n as f64 / (self.n - 1) as f64
    }

    /// Biased skewness `m3 / m2^1.5`; `None` for zero variance
    #[must_use]
    pub fn skewness(&self) -> Option<f64> {
        (self.m2 > 0.0).then(|| self.m3 / self.m2.powf(1.5))
    }

    /// Pearson (non-excess) kurtosis `m4 / m2^2`; `None` for zero variance
    #[must_use]
    pub fn kurtosis(&self) -> Option<f64> {
        (self.m2 > 0.0).then(|| self.m4 / (self.m2 * self.m2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_to_ten() -> Vec<f64> {
        (1..=10).map(f64::from).collect()
    }

    #[test]
    fn test_percentiles_match_linear_method() {
        let s = one_to_ten();
        assert!((percentile_sorted(&s, 0.10) - 1.9).abs() < 1e-12);
        assert!((percentile_sorted(&s, 0.25) - 3.25).abs() < 1e-12);
        assert!((percentile_sorted(&s, 0.50) - 5.5).abs() < 1e-12);
        assert!((percentile_sorted(&s, 0.75) - 7.75).abs() < 1e-12);
        assert!((percentile_sorted(&s, 0.90) - 9.1).abs() < 1e-12);
        assert_eq!(percentile_sorted(&s, 0.0), 1.0);
        assert_eq!(percentile_sorted(&s, 1.0), 10.0);
    }

    #[test]
    fn test_percentile_edge_cases() {
        assert!(percentile_sorted(&[], 0.5).is_nan());
        assert_eq!(percentile_sorted(&[4.2], 0.9), 4.2);
        assert_eq!(percentile_sorted(&[0.1, 0.1, 0.1], 0.37), 0.1);
    }

    #[test]
    fn test_variance_ddof() {
        let v = one_to_ten();
        assert!((variance(&v, 0) - 8.25).abs() < 1e-12);
        assert!((variance(&v, 1) - 82.5 / 9.0).abs() < 1e-12);
        assert_eq!(variance(&[3.0], 1), 0.0);
    }

    #[test]
    fn test_sorted_and_distinct() {
        let s = sorted(&[3.0, 1.0, 2.0, 1.0, 3.0]);
        assert_eq!(s, vec![1.0, 1.0, 2.0, 3.0, 3.0]);
        assert_eq!(distinct_count(&s), 3);
        assert_eq!(distinct_count(&[]), 0);
        assert_eq!(distinct_count(&[7.0; 5]), 1);
    }

    #[test]
    fn test_moments() {
        let m = Moments::from_values(&one_to_ten());
        assert_eq!(m.n, 10);
        assert!((m.mean - 5.5).abs() < 1e-12);
        assert!((m.m2 - 8.25).abs() < 1e-12);
        assert!(m.skewness().unwrap().abs() < 1e-12);
        // 120.8625 / 8.25^2
        assert!((m.kurtosis().unwrap() - 1.775_757_575_757_575_8).abs() < 1e-12);

        let flat = Moments::from_values(&[2.0; 4]);
        assert_eq!(flat.skewness(), None);
        assert_eq!(flat.sample_variance(), 0.0);
    }

    #[test]
    fn test_right_skew_is_positive() {
        let v: Vec<f64> = (1..=50).map(|i| f64::from(i).powi(3)).collect();
        let skew = Moments::from_values(&v).skewness().unwrap();
        assert!(skew > 1.0, "skew was {skew}");
    }
}
