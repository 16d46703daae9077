use finsim_core::{Factor, Profile, RandomFactors, Scenario, ScenarioError};

use super::{non_negative, optional_non_negative};

/// Emergency-fund runway after a job loss.
///
/// Per iteration: an emergency expense first takes a fraction of the fund,
/// then the remainder covers monthly expenses (scaled by the expense
/// multiplier and a year of inflation) net of any unemployment benefit.
/// The outcome is the runway in months minus the job-search duration, so
/// a non-negative outcome means the fund lasted until the next job.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmergencyFund;

/// Cap on runway when benefits cover all expenses
const MAX_RUNWAY_MONTHS: f64 = 120.0;

impl Scenario for EmergencyFund {
    fn name(&self) -> &str {
        "emergency_fund"
    }

    fn required_fields(&self) -> &[&str] {
        &["emergency_fund", "monthly_expenses"]
    }

    fn calculate_outcome(
        &self,
        profile: &Profile,
        factors: &RandomFactors,
    ) -> Result<Vec<f64>, ScenarioError> {
        let fund = non_negative(profile, "emergency_fund")?;
        let expenses = non_negative(profile, "monthly_expenses")?;
        let benefit = optional_non_negative(profile, "unemployment_benefit", 0.0)?;

        let outcomes = factors
            .get(Factor::EmergencyExpenses)
            .iter()
            .zip(factors.get(Factor::ExpenseMultiplier))
            .zip(factors.get(Factor::InflationRates))
            .zip(factors.get(Factor::JobSearchMonths))
            .map(|(((shock, multiplier), inflation), search)| {
                let remaining = fund * (1.0 - shock.min(1.0));
                let annual_inflation = (1.0 + inflation).powi(12);
                let burn = (expenses * multiplier.max(0.0) * annual_inflation - benefit).max(0.0);
                let runway = if burn > 0.0 {
                    (remaining / burn).min(MAX_RUNWAY_MONTHS)
                } else {
                    MAX_RUNWAY_MONTHS
                };
                runway - search.max(0.0)
            })
            .collect();

        Ok(outcomes)
    }

    fn success_predicate(&self, outcomes: &[f64]) -> Vec<bool> {
        outcomes.iter().map(|surplus| *surplus >= 0.0).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors(shock: f64, multiplier: f64, search: f64, n: usize) -> RandomFactors {
        let mut values: [Vec<f64>; 7] = std::array::from_fn(|_| vec![0.0; n]);
        for (factor, slot) in Factor::ALL.iter().zip(values.iter_mut()) {
            let v = match factor {
                Factor::EmergencyExpenses => shock,
                Factor::ExpenseMultiplier => multiplier,
                Factor::JobSearchMonths => search,
                _ => 0.0,
            };
            *slot = vec![v; n];
        }
        RandomFactors::from_sequences(values).unwrap()
    }

    fn profile(fund: f64, expenses: f64) -> Profile {
        Profile::new("millennial")
            .with_field("emergency_fund", fund)
            .with_field("monthly_expenses", expenses)
    }

    #[test]
    fn test_runway_minus_search() {
        // 12k fund, 10% emergency, 2k/month: 5.4 months of runway, 4 months search
        let outcomes = EmergencyFund
            .calculate_outcome(&profile(12_000.0, 2_000.0), &factors(0.1, 1.0, 4.0, 3))
            .unwrap();
        assert_eq!(outcomes.len(), 3);
        assert!((outcomes[0] - 1.4).abs() < 1e-9);
        assert_eq!(EmergencyFund.success_predicate(&outcomes), vec![true; 3]);
    }

    #[test]
    fn test_emergency_can_wipe_out_fund() {
        let outcomes = EmergencyFund
            .calculate_outcome(&profile(12_000.0, 2_000.0), &factors(1.7, 1.0, 3.0, 1))
            .unwrap();
        assert!((outcomes[0] + 3.0).abs() < 1e-9);
        assert_eq!(EmergencyFund.success_predicate(&outcomes), vec![false]);
    }

    #[test]
    fn test_benefit_covering_expenses_caps_runway() {
        let profile = profile(1_000.0, 2_000.0).with_field("unemployment_benefit", 5_000.0);
        let outcomes = EmergencyFund
            .calculate_outcome(&profile, &factors(0.0, 1.0, 0.0, 1))
            .unwrap();
        assert_eq!(outcomes[0], MAX_RUNWAY_MONTHS);
    }

    #[test]
    fn test_non_numeric_field_is_reported() {
        let profile = Profile::new("genz")
            .with_field("emergency_fund", "plenty")
            .with_field("monthly_expenses", 2_000.0);
        let err = EmergencyFund
            .calculate_outcome(&profile, &factors(0.0, 1.0, 0.0, 1))
            .unwrap_err();
        assert_eq!(err.field.as_deref(), Some("emergency_fund"));
    }
}
