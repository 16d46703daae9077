//! Distribution functions used by the analyzer.
//!
//! Thin wrappers over `statrs`: the two-sided Student-t critical value for
//! confidence intervals and the chi-square survival function for the
//! omnibus normality test.

use statrs::distribution::{ChiSquared, ContinuousCDF, StudentsT};

/// Two-sided critical value of Student's t for a confidence level.
///
/// `t_critical(0.95, df)` is the quantile at cumulative probability 0.975.
/// Returns NaN for `df <= 0` or a confidence outside `(0, 1)`.
#[must_use]
pub fn t_critical(confidence: f64, df: f64) -> f64 {
    if !(confidence > 0.0 && confidence < 1.0) {
        return f64::NAN;
    }
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => dist.inverse_cdf(0.5 + confidence / 2.0),
        Err(err) => {
            tracing::debug!(df, %err, "Student-t parameters rejected");
            f64::NAN
        }
    }
}

/// Survival function `P(X > x)` of the chi-square distribution.
///
/// Returns `None` when `df` is not a valid number of degrees of freedom.
#[must_use]
pub fn chi_square_sf(x: f64, df: f64) -> Option<f64> {
    let dist = ChiSquared::new(df).ok()?;
    if x <= 0.0 {
        return Some(1.0);
    }
    Some(dist.sf(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t_critical_table_values() {
        let cases = [
            (1.0, 12.706_204_736),
            (2.0, 4.302_652_730),
            (9.0, 2.262_157_163),
            (29.0, 2.045_229_642),
            (999.0, 1.962_341_461),
        ];
        for (df, expected) in cases {
            let t = t_critical(0.95, df);
            assert!(
                (t - expected).abs() < 1e-5,
                "df={df}: expected {expected}, got {t}"
            );
        }
    }

    #[test]
    fn test_t_critical_approaches_normal_quantile() {
        let t = t_critical(0.95, 100_000.0);
        assert!((t - 1.959_98).abs() < 1e-3, "got {t}");
    }

    #[test]
    fn test_t_critical_rejects_bad_input() {
        assert!(t_critical(0.95, 0.0).is_nan());
        assert!(t_critical(0.95, -3.0).is_nan());
        assert!(t_critical(1.0, 10.0).is_nan());
        assert!(t_critical(f64::NAN, 10.0).is_nan());
    }

    #[test]
    fn test_chi_square_sf() {
        assert_eq!(chi_square_sf(0.0, 2.0), Some(1.0));
        assert!((chi_square_sf(5.991_464_547, 2.0).unwrap() - 0.05).abs() < 1e-9);
        // Two degrees of freedom reduce to exp(-x / 2)
        assert!((chi_square_sf(0.978, 2.0).unwrap() - (-0.489f64).exp()).abs() < 1e-10);
        assert_eq!(chi_square_sf(1.0, -1.0), None);
    }
}
