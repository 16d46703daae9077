//! Built-in reference scenarios
//!
//! These are deliberately simple outcome models used to drive the engine
//! from the command line. Each reads its inputs from the profile through
//! [`Profile::number`] and reports malformed values as a
//! [`ScenarioError`] tied to the offending field.

mod emergency_fund;
mod loan_payoff;

pub use emergency_fund::EmergencyFund;
pub use loan_payoff::LoanPayoff;

use clap::ValueEnum;
use finsim_core::{Profile, Scenario, ScenarioError};

/// Scenarios selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioKind {
    /// Months of savings runway left after a job search
    EmergencyFund,
    /// Years needed to pay off a loan
    LoanPayoff,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 2] = [ScenarioKind::EmergencyFund, ScenarioKind::LoanPayoff];

    pub fn scenario(self) -> Box<dyn Scenario> {
        match self {
            ScenarioKind::EmergencyFund => Box::new(EmergencyFund),
            ScenarioKind::LoanPayoff => Box::new(LoanPayoff),
        }
    }

    /// Name as typed on the command line
    pub fn cli_name(self) -> &'static str {
        match self {
            ScenarioKind::EmergencyFund => "emergency-fund",
            ScenarioKind::LoanPayoff => "loan-payoff",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ScenarioKind::EmergencyFund => {
                "Savings runway after a job loss, net of the job search (months)"
            }
            ScenarioKind::LoanPayoff => "Time to repay a loan with variable payments (years)",
        }
    }
}

/// Read a required numeric field, rejecting non-numbers and negatives
pub(crate) fn non_negative(profile: &Profile, field: &str) -> Result<f64, ScenarioError> {
    let value = profile
        .number(field)
        .ok_or_else(|| ScenarioError::for_field(field, format!("'{field}' must be a number")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(ScenarioError::for_field(
            field,
            format!("'{field}' must be a non-negative number, got {value}"),
        ));
    }
    Ok(value)
}

/// Read an optional numeric field, defaulting when absent
pub(crate) fn optional_non_negative(
    profile: &Profile,
    field: &str,
    default: f64,
) -> Result<f64, ScenarioError> {
    if profile.has_value(field) {
        non_negative(profile, field)
    } else {
        Ok(default)
    }
}
