//! The scenario contract
//!
//! A scenario turns a profile plus the shared random factors into one
//! outcome per iteration, and says which outcomes count as a success. The
//! engine knows nothing about how any particular scenario computes its
//! outcomes; it only sequences the calls and analyses what comes back.

use crate::error::ScenarioError;
use crate::model::{Profile, RandomFactors};

/// A pluggable outcome model.
///
/// Implementations must be `Send + Sync` so batches of runs can share one
/// scenario across worker threads.
pub trait Scenario: Send + Sync {
    /// Name reported in results and errors
    fn name(&self) -> &str;

    /// Profile fields that must be present and non-empty before a run
    fn required_fields(&self) -> &[&str];

    /// One outcome per iteration.
    ///
    /// Must return exactly `factors.iterations()` values; the engine rejects
    /// anything else.
    fn calculate_outcome(
        &self,
        profile: &Profile,
        factors: &RandomFactors,
    ) -> Result<Vec<f64>, ScenarioError>;

    /// Elementwise success flags; their mean is the success probability
    fn success_predicate(&self, outcomes: &[f64]) -> Vec<bool>;

    /// Whether `profile` satisfies this scenario's requirements.
    ///
    /// Defaults to [`has_required_fields`].
    fn validate_profile(&self, profile: &Profile) -> bool {
        has_required_fields(profile, self.required_fields())
    }
}

/// Default validation policy: every required field exists and is neither
/// null nor an empty collection.
///
/// Lookup is shallow; names are matched against top-level profile fields.
#[must_use]
pub fn has_required_fields(profile: &Profile, required: &[&str]) -> bool {
    required.iter().all(|name| profile.has_value(name))
}

/// Fraction of `true` flags, 0.0 for an empty slice
#[must_use]
pub fn success_fraction(flags: &[bool]) -> f64 {
    if flags.is_empty() {
        return 0.0;
    }
    flags.iter().filter(|&&ok| ok).count() as f64 / flags.len() as f64
}
