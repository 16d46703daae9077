//! Shared random inputs for one simulation run.
//!
//! Every run draws seven independent sequences, one value per iteration,
//! before the scenario sees any of them. Scenarios index into the sequences
//! elementwise, so iteration `i` of the outcome uses element `i` of each.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The seven named random factors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    /// Monthly market return
    MarketReturns,
    /// Monthly inflation rate
    InflationRates,
    /// Multiplier applied to income (mean 1.0)
    IncomeVolatility,
    /// Severity of an emergency expense (exponential)
    EmergencyExpenses,
    /// Months needed to find a new job
    JobSearchMonths,
    /// Drift applied to interest rates
    InterestRateChanges,
    /// Multiplier applied to expenses (mean 1.0)
    ExpenseMultiplier,
}

impl Factor {
    /// All factors, in generation order
    pub const ALL: [Factor; 7] = [
        Factor::MarketReturns,
        Factor::InflationRates,
        Factor::IncomeVolatility,
        Factor::EmergencyExpenses,
        Factor::JobSearchMonths,
        Factor::InterestRateChanges,
        Factor::ExpenseMultiplier,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Factor::MarketReturns => "market_returns",
            Factor::InflationRates => "inflation_rates",
            Factor::IncomeVolatility => "income_volatility",
            Factor::EmergencyExpenses => "emergency_expenses",
            Factor::JobSearchMonths => "job_search_months",
            Factor::InterestRateChanges => "interest_rate_changes",
            Factor::ExpenseMultiplier => "expense_multiplier",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Factor> {
        Factor::ALL.into_iter().find(|f| f.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One sequence of length `iterations` per [`Factor`].
///
/// Built by the factor generator; every sequence has the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomFactors {
    iterations: usize,
    values: [Vec<f64>; 7],
}

impl RandomFactors {
    /// Assemble factors from sequences given in [`Factor::ALL`] order.
    ///
    /// Returns `None` if the sequences differ in length.
    #[must_use]
    pub fn from_sequences(values: [Vec<f64>; 7]) -> Option<Self> {
        let iterations = values[0].len();
        if values.iter().any(|v| v.len() != iterations) {
            return None;
        }
        Some(Self { iterations, values })
    }

    /// Number of values in each sequence
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    #[must_use]
    pub fn get(&self, factor: Factor) -> &[f64] {
        &self.values[factor.index()]
    }

    /// Look up a sequence by its snake_case name
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&[f64]> {
        Factor::from_name(name).map(|f| self.get(f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Factor, &[f64])> {
        Factor::ALL.into_iter().map(|f| (f, self.get(f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_names_round_trip() {
        for factor in Factor::ALL {
            assert_eq!(Factor::from_name(factor.name()), Some(factor));
        }
        assert_eq!(Factor::from_name("volatility"), None);
    }

    #[test]
    fn test_from_sequences_rejects_ragged() {
        let mut values: [Vec<f64>; 7] = Default::default();
        for v in &mut values {
            *v = vec![0.0; 3];
        }
        values[4].push(1.0);
        assert!(RandomFactors::from_sequences(values).is_none());
    }

    #[test]
    fn test_get_by_factor_and_name() {
        let values: [Vec<f64>; 7] = std::array::from_fn(|i| vec![i as f64; 2]);
        let factors = RandomFactors::from_sequences(values).unwrap();

        assert_eq!(factors.iterations(), 2);
        assert_eq!(factors.get(Factor::EmergencyExpenses), &[3.0, 3.0]);
        assert_eq!(factors.by_name("expense_multiplier"), Some(&[6.0, 6.0][..]));
        assert_eq!(factors.iter().count(), 7);
    }
}
