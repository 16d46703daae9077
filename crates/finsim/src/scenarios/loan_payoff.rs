use finsim_core::{Factor, Profile, RandomFactors, Scenario, ScenarioError};

use super::{non_negative, optional_non_negative};

/// Years to pay off a loan.
///
/// Per iteration the annual rate drifts by the interest-rate factor and the
/// monthly payment is scaled by the income factor (income above the
/// baseline goes to extra payments, a shortfall cuts the payment but never
/// below `min_payment_ratio` of it). Payoff time uses the closed-form
/// amortization; loans whose payment never covers the interest are capped
/// at [`MAX_PAYOFF_YEARS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoanPayoff;

/// Payoff horizon cap; also the outcome for loans that never amortize
pub const MAX_PAYOFF_YEARS: f64 = 50.0;
/// Success means the loan is gone within this many years
pub const TARGET_PAYOFF_YEARS: f64 = 10.0;
const DEFAULT_MIN_PAYMENT_RATIO: f64 = 0.5;

/// Months to amortize `balance` at monthly rate `rate` with fixed `payment`
fn payoff_months(balance: f64, rate: f64, payment: f64) -> f64 {
    if balance <= 0.0 {
        return 0.0;
    }
    if payment <= 0.0 {
        return f64::INFINITY;
    }
    if rate.abs() < 1e-12 {
        return balance / payment;
    }
    let interest = balance * rate;
    if payment <= interest {
        return f64::INFINITY;
    }
    -(1.0 - interest / payment).ln() / (1.0 + rate).ln()
}

impl Scenario for LoanPayoff {
    fn name(&self) -> &str {
        "loan_payoff"
    }

    fn required_fields(&self) -> &[&str] {
        &["loan_balance", "interest_rate", "monthly_payment"]
    }

    fn calculate_outcome(
        &self,
        profile: &Profile,
        factors: &RandomFactors,
    ) -> Result<Vec<f64>, ScenarioError> {
        let balance = non_negative(profile, "loan_balance")?;
        let annual_rate = non_negative(profile, "interest_rate")?;
        let payment = non_negative(profile, "monthly_payment")?;
        let min_ratio =
            optional_non_negative(profile, "min_payment_ratio", DEFAULT_MIN_PAYMENT_RATIO)?;

        let outcomes = factors
            .get(Factor::InterestRateChanges)
            .iter()
            .zip(factors.get(Factor::IncomeVolatility))
            .map(|(drift, income)| {
                let rate = (annual_rate + drift).max(0.0) / 12.0;
                let scaled = payment * income.max(min_ratio);
                let years = payoff_months(balance, rate, scaled) / 12.0;
                years.min(MAX_PAYOFF_YEARS)
            })
            .collect();

        Ok(outcomes)
    }

    fn success_predicate(&self, outcomes: &[f64]) -> Vec<bool> {
        outcomes
            .iter()
            .map(|years| *years <= TARGET_PAYOFF_YEARS)
            .collect()
    }
}
