//! Statistical analysis of simulation outcomes.
//!
//! [`ResultAnalyzer`] is the entry point; the submodules hold the pieces it
//! is built from and are public so callers can reuse them on their own
//! outcome vectors:
//!
//! - [`descriptive`]: means, variances, linear percentiles, moments
//! - [`distributions`]: Student-t and chi-square functions
//! - [`shape`]: distribution-shape classification
//!
//! ```ignore
//! use finsim_core::analysis::ResultAnalyzer;
//!
//! let outcomes: Vec<f64> = (1..=10).map(f64::from).collect();
//! let result = ResultAnalyzer::default().analyze(&outcomes, "demo", 10, 0.5, 0.0)?;
//! assert_eq!(result.percentile_50, 5.5);
//! ```

mod analyzer;
pub mod descriptive;
pub mod distributions;
pub mod shape;

pub use analyzer::*;
