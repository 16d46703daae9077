//! Loading settings and profiles from disk
//!
//! Both files are YAML (JSON documents parse too). Settings fall back to
//! `~/.finsim/settings.yaml` and then to the built-in defaults; profiles
//! must be given explicitly.

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use finsim_core::{Profile, SimulationSettings};

const SETTINGS_FILE: &str = "settings.yaml";

/// Default data directory (`~/.finsim/`)
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".finsim")
}

pub fn default_settings_path() -> PathBuf {
    default_data_dir().join(SETTINGS_FILE)
}

/// Load settings from `path`, or from the default location when `path` is
/// `None`. A missing default file yields the built-in settings; a missing
/// explicit file is an error.
pub fn load_settings(path: Option<&Path>) -> Result<SimulationSettings> {
    let settings = match path {
        Some(path) => read_settings(path)?,
        None => {
            let default_path = default_settings_path();
            if default_path.exists() {
                read_settings(&default_path)?
            } else {
                tracing::debug!("No settings file found, using built-in defaults");
                SimulationSettings::default()
            }
        }
    };

    settings.validate()?;
    Ok(settings)
}

fn read_settings(path: &Path) -> Result<SimulationSettings> {
    tracing::debug!(path = %path.display(), "Loading settings");
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read settings file {}", path.display()))?;
    parse_settings(&content)
        .wrap_err_with(|| format!("Failed to parse settings file {}", path.display()))
}

pub fn parse_settings(yaml: &str) -> Result<SimulationSettings> {
    Ok(serde_saphyr::from_str(yaml)?)
}

/// Load a profile document
pub fn load_profile(path: &Path) -> Result<Profile> {
    tracing::debug!(path = %path.display(), "Loading profile");
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read profile {}", path.display()))?;
    parse_profile(&content).wrap_err_with(|| format!("Failed to parse profile {}", path.display()))
}

pub fn parse_profile(yaml: &str) -> Result<Profile> {
    Ok(serde_saphyr::from_str(yaml)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use finsim_core::FieldValue;
    use tempfile::NamedTempFile;

    use super::*;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_profile_yaml() {
        let file = write_temp(
            "demographic: millennial\nemergency_fund: 12000\nmonthly_expenses: 3500.5\nnotes: \"\"\n",
        );
        let profile = load_profile(file.path()).unwrap();

        assert_eq!(profile.demographic, "millennial");
        assert_eq!(profile.number("emergency_fund"), Some(12_000.0));
        assert_eq!(profile.number("monthly_expenses"), Some(3_500.5));
        assert_eq!(
            profile.field("notes"),
            Some(&FieldValue::Text(String::new()))
        );
        assert!(!profile.has_value("notes"));
    }

    #[test]
    fn test_load_profile_json() {
        let file = write_temp(r#"{"demographic": "genz", "loan_balance": 5000}"#);
        let profile = load_profile(file.path()).unwrap();
        assert_eq!(profile.demographic, "genz");
        assert_eq!(profile.number("loan_balance"), Some(5_000.0));
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let file = write_temp("default_iterations: 2500\nmarket_return_mean: 0.05\n");
        let settings = load_settings(Some(file.path())).unwrap();
        let defaults = SimulationSettings::default();

        assert_eq!(settings.default_iterations, 2_500);
        assert_eq!(settings.market_return_mean, 0.05);
        assert_eq!(settings.min_iterations, defaults.min_iterations);
        assert_eq!(settings.income_volatility_for("genz"), 0.15);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let file = write_temp("market_return_std: -0.2\n");
        assert!(load_settings(Some(file.path())).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let err = load_settings(Some(&missing)).unwrap_err();
        assert!(format!("{err:#}").contains("nope.yaml"));
        assert!(load_profile(&missing).is_err());
    }

    #[test]
    fn test_default_settings_path() {
        assert!(default_settings_path().ends_with(".finsim/settings.yaml"));
    }
}
