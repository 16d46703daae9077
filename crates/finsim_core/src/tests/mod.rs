//! Integration tests for the finsim simulation engine
//!
//! Tests are organized by topic:
//! - `engine` - End-to-end runs: validation, determinism, error translation
//! - `batch` - Batched runs with derived seeds
//! - `properties` - Property tests for the result analyzer


use crate::error::ScenarioError;
use crate::model::{Factor, Profile, RandomFactors};
use crate::scenario::Scenario;

/// Outcome is `base × income factor`; succeeds above `threshold`
pub(crate) struct IncomeShock {
    pub base: f64,
    pub threshold: f64,
}

impl Scenario for IncomeShock {
    fn name(&self) -> &str {
        "income_shock"
    }

    fn required_fields(&self) -> &[&str] {
        &[]
    }

    fn calculate_outcome(
        &self,
        _profile: &Profile,
        factors: &RandomFactors,
    ) -> Result<Vec<f64>, ScenarioError> {
        Ok(factors
            .get(Factor::IncomeVolatility)
            .iter()
            .map(|f| self.base * f)
            .collect())
    }

    fn success_predicate(&self, outcomes: &[f64]) -> Vec<bool> {
        outcomes.iter().map(|v| *v > self.threshold).collect()
    }
}
