//! Simulation engine
//!
//! The engine sequences one run: validate the profile, draw the random
//! factors, hand them to the scenario, check what comes back, evaluate the
//! success predicate and pass the outcomes to the analyzer. It computes no
//! statistics itself.

use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::analysis::ResultAnalyzer;
use crate::config::SimulationSettings;
use crate::error::{Result, SimulationError};
use crate::model::{Profile, ScenarioResult};
use crate::random::{RandomFactorGenerator, RandomSource, RngSource, derive_run_seed};
use crate::scenario::{Scenario, success_fraction};

/// Runs scenarios against profiles.
///
/// Each engine owns its random source, so engines never share generator
/// state. Settings are read-only and may be shared between engines.
#[derive(Debug)]
pub struct SimulationEngine<S: RandomSource = RngSource> {
    settings: Arc<SimulationSettings>,
    generator: RandomFactorGenerator,
    analyzer: ResultAnalyzer,
    source: S,
}

impl SimulationEngine<RngSource> {
    /// Engine seeded from `settings.default_seed`
    pub fn new(settings: Arc<SimulationSettings>) -> Self {
        let seed = settings.default_seed;
        Self::with_seed(settings, seed)
    }

    pub fn with_seed(settings: Arc<SimulationSettings>, seed: u64) -> Self {
        Self::with_source(settings, RngSource::seeded(seed))
    }
}

impl<S: RandomSource> SimulationEngine<S> {
    /// Engine drawing from a caller-supplied source
    pub fn with_source(settings: Arc<SimulationSettings>, source: S) -> Self {
        Self {
            generator: RandomFactorGenerator::new(Arc::clone(&settings)),
            analyzer: ResultAnalyzer::default(),
            settings,
            source,
        }
    }

    /// Replace the analyzer (e.g. to change the confidence level)
    #[must_use]
    pub fn with_analyzer(mut self, analyzer: ResultAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Run `scenario` for `profile`.
    ///
    /// `iterations` defaults to `settings.default_iterations`. Settings are
    /// validated on every run, so hand-built settings with out-of-range
    /// parameters fail with `InvalidSettings`. The reported processing time
    /// covers validation through the success predicate; the analysis step is
    /// not timed.
    pub fn run(
        &mut self,
        scenario: &dyn Scenario,
        profile: &Profile,
        iterations: Option<usize>,
    ) -> Result<ScenarioResult> {
        let started = Instant::now();
        let name = scenario.name();
        let iterations = iterations.unwrap_or(self.settings.default_iterations);
        if iterations == 0 {
            return Err(SimulationError::InvalidIterations(iterations));
        }
        self.settings.validate()?;

        if !scenario.validate_profile(profile) {
            let required = scenario.required_fields();
            let missing = profile.missing_fields(required);
            tracing::warn!(scenario = name, ?missing, "Profile failed validation");
            return Err(SimulationError::Validation {
                scenario: name.to_string(),
                required_fields: required.iter().map(|f| (*f).to_string()).collect(),
                missing: missing.into_iter().map(str::to_string).collect(),
            });
        }

        let factors = self
            .generator
            .generate(profile, iterations, &mut self.source)?;

        let outcomes = scenario
            .calculate_outcome(profile, &factors)
            .map_err(|source| SimulationError::Computation {
                scenario: name.to_string(),
                source,
            })?;

        if outcomes.len() != iterations {
            return Err(SimulationError::OutcomeLength {
                scenario: name.to_string(),
                expected: iterations,
                actual: outcomes.len(),
            });
        }
        if let Some(index) = outcomes.iter().position(|v| !v.is_finite()) {
            return Err(SimulationError::NonFiniteOutcome {
                scenario: name.to_string(),
                index,
            });
        }

        let flags = scenario.success_predicate(&outcomes);
        if flags.len() != outcomes.len() {
            return Err(SimulationError::OutcomeLength {
                scenario: name.to_string(),
                expected: outcomes.len(),
                actual: flags.len(),
            });
        }
        let probability_success = success_fraction(&flags);

        let processing_time_ms = started.elapsed().as_secs_f64() * 1_000.0;

        let result = self.analyzer.analyze(
            &outcomes,
            name,
            iterations,
            probability_success,
            processing_time_ms,
        )?;

        tracing::info!(
            scenario = name,
            iterations,
            probability_success,
            median = result.percentile_50,
            processing_time_ms,
            "Simulation complete"
        );

        Ok(result)
    }
}

/// One entry of a [`run_batch`] call
#[derive(Clone, Copy)]
pub struct BatchJob<'a> {
    pub scenario: &'a dyn Scenario,
    pub profile: &'a Profile,
    pub iterations: Option<usize>,
}

impl<'a> BatchJob<'a> {
    pub fn new(scenario: &'a dyn Scenario, profile: &'a Profile) -> Self {
        Self {
            scenario,
            profile,
            iterations: None,
        }
    }

    #[must_use]
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }
}

/// Run several jobs, each on its own engine.
///
/// Job `i` is seeded with [`derive_run_seed`]`(base_seed, i)`, so every
/// result is reproducible whatever order the jobs are scheduled in.
/// Results come back in job order.
pub fn run_batch(
    settings: &Arc<SimulationSettings>,
    base_seed: u64,
    jobs: &[BatchJob<'_>],
) -> Vec<Result<ScenarioResult>> {
    tracing::debug!(jobs = jobs.len(), base_seed, "Running batch");

    let run_job = |(i, job): (usize, &BatchJob<'_>)| {
        let seed = derive_run_seed(base_seed, i as u64);
        SimulationEngine::with_seed(Arc::clone(settings), seed).run(
            job.scenario,
            job.profile,
            job.iterations,
        )
    };

    #[cfg(feature = "parallel")]
    let results = jobs.par_iter().enumerate().map(run_job).collect();

    #[cfg(not(feature = "parallel"))]
    let results = jobs.iter().enumerate().map(run_job).collect();

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScenarioError;
    use crate::model::{Factor, RandomFactors};

    struct MarketOnly;

    impl Scenario for MarketOnly {
        fn name(&self) -> &str {
            "market_only"
        }

        fn required_fields(&self) -> &[&str] {
            &[]
        }

        fn calculate_outcome(
            &self,
            _profile: &Profile,
            factors: &RandomFactors,
        ) -> std::result::Result<Vec<f64>, ScenarioError> {
            Ok(factors.get(Factor::MarketReturns).to_vec())
        }

        fn success_predicate(&self, outcomes: &[f64]) -> Vec<bool> {
            outcomes.iter().map(|r| *r > 0.0).collect()
        }
    }

    fn engine(seed: u64) -> SimulationEngine {
        SimulationEngine::with_seed(Arc::new(SimulationSettings::default()), seed)
    }

    #[test]
    fn test_run_uses_default_iterations() {
        let settings = crate::config::SettingsBuilder::new()
            .iterations(1_200)
            .build()
            .unwrap();
        let mut engine = SimulationEngine::new(Arc::new(settings));
        let result = engine
            .run(&MarketOnly, &Profile::new("genz"), None)
            .unwrap();
        assert_eq!(result.iterations, 1_200);
        assert_eq!(result.metadata.iterations, 1_200);
        assert_eq!(result.scenario_name, "market_only");
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let err = engine(1)
            .run(&MarketOnly, &Profile::new("genz"), Some(0))
            .unwrap_err();
        assert_eq!(err, SimulationError::InvalidIterations(0));
    }

    #[test]
    fn test_negative_market_std_rejected() {
        let settings = SimulationSettings {
            market_return_std: -0.15,
            ..SimulationSettings::default()
        };
        let err = SimulationEngine::with_seed(Arc::new(settings), 1)
            .run(&MarketOnly, &Profile::new("genz"), Some(100))
            .unwrap_err();
        assert!(
            matches!(err, SimulationError::InvalidSettings(_)),
            "got {err:?}"
        );
    }

    #[test]
    fn test_success_probability_in_range() {
        let result = engine(3)
            .run(&MarketOnly, &Profile::new("genz"), Some(2_000))
            .unwrap();
        // Monthly market mean is positive, so a little over half succeed
        assert!(result.probability_success > 0.45 && result.probability_success < 0.65);
        assert!(result.processing_time_ms >= 0.0);
    }

    #[test]
    fn test_engine_reuse_advances_the_source() {
        let mut engine = engine(8);
        let profile = Profile::new("genx");
        let first = engine.run(&MarketOnly, &profile, Some(100)).unwrap();
        let second = engine.run(&MarketOnly, &profile, Some(100)).unwrap();
        assert_ne!(first.mean, second.mean);
    }
}
