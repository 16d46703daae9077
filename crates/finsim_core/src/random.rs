//! Random sources and factor generation
//!
//! Randomness is always injected: a run owns its [`RandomSource`], so two
//! runs never share generator state and a seeded source reproduces the same
//! factors bit for bit.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal, Poisson, Uniform};

use crate::config::SimulationSettings;
use crate::error::{Result, SimulationError};
use crate::model::{Profile, RandomFactors};

/// Scale of the emergency-expense severity distribution
pub const EMERGENCY_EXPENSE_SCALE: f64 = 0.1;
/// Spread of the job-search duration around its demographic mean
pub const JOB_SEARCH_STD_MONTHS: f64 = 1.5;
/// Monthly interest-rate drift volatility
pub const INTEREST_RATE_DRIFT_STD: f64 = 0.005;
/// Volatility of the expense multiplier around 1.0
pub const EXPENSE_MULTIPLIER_STD: f64 = 0.05;

const MONTHS_PER_YEAR: f64 = 12.0;

/// Vectorised draws from standard distributions.
///
/// Every method returns exactly `count` values or an
/// [`SimulationError::InvalidDistribution`] when the parameters are rejected.
pub trait RandomSource {
    fn normal(&mut self, mean: f64, std_dev: f64, count: usize) -> Result<Vec<f64>>;

    /// Exponential draws with the given scale (mean), i.e. rate `1 / scale`
    fn exponential(&mut self, scale: f64, count: usize) -> Result<Vec<f64>>;

    /// Uniform draws on `[low, high)`
    fn uniform(&mut self, low: f64, high: f64, count: usize) -> Result<Vec<f64>>;

    fn poisson(&mut self, lambda: f64, count: usize) -> Result<Vec<f64>>;
}

/// [`RandomSource`] backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    /// Deterministic source seeded from a `u64`
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }

    fn draw<D: Distribution<f64>>(&mut self, dist: D, count: usize) -> Vec<f64> {
        dist.sample_iter(&mut self.rng).take(count).collect()
    }
}

fn invalid(distribution: &'static str, params: String, reason: impl ToString) -> SimulationError {
    SimulationError::InvalidDistribution {
        distribution,
        params,
        reason: reason.to_string(),
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn normal(&mut self, mean: f64, std_dev: f64, count: usize) -> Result<Vec<f64>> {
        let params = || format!("mean={mean}, std_dev={std_dev}");
        // rand_distr only rejects a non-finite std_dev
        if std_dev.is_nan() || std_dev < 0.0 {
            return Err(invalid("normal", params(), "std_dev must be non-negative"));
        }
        let dist = Normal::new(mean, std_dev).map_err(|e| invalid("normal", params(), e))?;
        Ok(self.draw(dist, count))
    }

    fn exponential(&mut self, scale: f64, count: usize) -> Result<Vec<f64>> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(invalid(
                "exponential",
                format!("scale={scale}"),
                "scale must be positive and finite",
            ));
        }
        let dist =
            Exp::new(1.0 / scale).map_err(|e| invalid("exponential", format!("scale={scale}"), e))?;
        Ok(self.draw(dist, count))
    }

    fn uniform(&mut self, low: f64, high: f64, count: usize) -> Result<Vec<f64>> {
        let dist = Uniform::new(low, high)
            .map_err(|e| invalid("uniform", format!("low={low}, high={high}"), e))?;
        Ok(self.draw(dist, count))
    }

    fn poisson(&mut self, lambda: f64, count: usize) -> Result<Vec<f64>> {
        let dist =
            Poisson::new(lambda).map_err(|e| invalid("poisson", format!("lambda={lambda}"), e))?;
        Ok(self.draw(dist, count))
    }
}

/// Seed for run `run_id` derived from a base seed.
///
/// Concurrent runs each get their own generator; deriving the seed from the
/// run identifier keeps every run reproducible regardless of scheduling.
#[must_use]
pub fn derive_run_seed(base_seed: u64, run_id: u64) -> u64 {
    // splitmix64 finaliser
    let mut z = base_seed.wrapping_add(run_id.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Produces the seven factor sequences for a run
#[derive(Debug, Clone)]
pub struct RandomFactorGenerator {
    settings: Arc<SimulationSettings>,
}

impl RandomFactorGenerator {
    pub fn new(settings: Arc<SimulationSettings>) -> Self {
        Self { settings }
    }

    /// Draw every factor for `iterations` trials.
    ///
    /// Factors are drawn in [`crate::model::Factor::ALL`] order from the
    /// given source. An `iterations` of zero yields empty sequences.
    pub fn generate<S: RandomSource + ?Sized>(
        &self,
        profile: &Profile,
        iterations: usize,
        source: &mut S,
    ) -> Result<RandomFactors> {
        let settings = &self.settings;
        let demographic = profile.demographic.as_str();
        let monthly_std_scale = MONTHS_PER_YEAR.sqrt();

        let income_volatility = settings.income_volatility_for(demographic);
        let job_search_months = settings.job_search_months_for(demographic);

        tracing::debug!(
            iterations,
            demographic,
            income_volatility,
            job_search_months,
            "Generating random factors"
        );

        let values = [
            source.normal(
                settings.market_return_mean / MONTHS_PER_YEAR,
                settings.market_return_std / monthly_std_scale,
                iterations,
            )?,
            source.normal(
                settings.inflation_mean / MONTHS_PER_YEAR,
                settings.inflation_std / monthly_std_scale,
                iterations,
            )?,
            source.normal(1.0, income_volatility, iterations)?,
            source.exponential(EMERGENCY_EXPENSE_SCALE, iterations)?,
            source.normal(job_search_months, JOB_SEARCH_STD_MONTHS, iterations)?,
            source.normal(0.0, INTEREST_RATE_DRIFT_STD, iterations)?,
            source.normal(1.0, EXPENSE_MULTIPLIER_STD, iterations)?,
        ];

        RandomFactors::from_sequences(values)
            .filter(|factors| factors.iterations() == iterations)
            .ok_or_else(|| {
            invalid(
                "factor",
                format!("iterations={iterations}"),
                "random source returned sequences of the wrong length",
            )
        })
    }
}
