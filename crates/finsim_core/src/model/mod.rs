//! Data model types
//!
//! - `profile` - user profile and field values
//! - `factors` - per-run random factor sequences
//! - `results` - the scenario result record

mod factors;
mod profile;
mod results;

pub use factors::*;
pub use profile::*;
pub use results::*;
