//! Command-line front end for the finsim engine
//!
//! Loads settings and profiles from YAML, runs the built-in reference
//! scenarios through [`finsim_core`] and renders the results.

pub mod cli;
pub mod commands;
pub mod loader;
pub mod logging;
pub mod report;
pub mod scenarios;

pub use cli::Cli;
pub use logging::init_logging;
