use thiserror::Error;

/// Failure raised by a scenario while computing its outcomes.
///
/// Scenarios are deterministic per call, so the engine never retries one of
/// these; it is wrapped in [`SimulationError::Computation`] and surfaced.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ScenarioError {
    pub message: String,
    /// Profile field the failure relates to, when there is one
    pub field: Option<String>,
}

impl ScenarioError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }

    /// Error tied to a specific profile field (e.g. a value of the wrong type)
    pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

/// Errors surfaced by the simulation engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The profile lacks one or more fields the scenario requires
    #[error(
        "profile is not valid for scenario '{scenario}': required fields {required_fields:?} (missing or empty: {missing:?})"
    )]
    Validation {
        scenario: String,
        required_fields: Vec<String>,
        missing: Vec<String>,
    },

    /// The scenario's outcome calculation failed
    #[error("scenario '{scenario}' failed to compute outcomes: {source}")]
    Computation {
        scenario: String,
        #[source]
        source: ScenarioError,
    },

    /// The scenario returned the wrong number of outcomes
    #[error("scenario '{scenario}' returned {actual} outcomes, expected {expected}")]
    OutcomeLength {
        scenario: String,
        expected: usize,
        actual: usize,
    },

    /// The scenario returned NaN or an infinite value
    #[error("scenario '{scenario}' returned a non-finite outcome at iteration {index}")]
    NonFiniteOutcome { scenario: String, index: usize },

    #[error("iteration count must be positive, got {0}")]
    InvalidIterations(usize),

    /// A random draw was requested with parameters the distribution rejects
    #[error("invalid {distribution} parameters ({params}): {reason}")]
    InvalidDistribution {
        distribution: &'static str,
        params: String,
        reason: String,
    },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
