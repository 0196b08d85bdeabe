//! Application settings loading.
//!
//! Settings come from an optional `jobtrack.toml` file, with the
//! `DATABASE_URL` environment variable (including values from a `.env` file)
//! taking precedence over the file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Default on-disk database location when nothing else is configured.
const DEFAULT_DATABASE_URL: &str = "sqlite://data/jobtrack.sqlite?mode=rwc";

/// Configuration structure representing the `jobtrack.toml` file
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Database connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    debug!("Attempting to load settings from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read settings file {path_ref:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {path_ref:?}: {e}"),
    })
}

/// Loads settings from the default location (`./jobtrack.toml`), falling back
/// to defaults when the file is absent, then applies environment overrides.
///
/// `DATABASE_URL` (from the process environment or a `.env` file) always wins
/// over the file value.
pub fn load_default_settings() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let mut settings = if Path::new("jobtrack.toml").exists() {
        load_settings("jobtrack.toml")?
    } else {
        Settings::default()
    };

    if let Ok(url) = std::env::var("DATABASE_URL") {
        settings.database_url = url;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_settings() {
        let toml_str = r#"
            database_url = "sqlite://tmp/test.sqlite?mode=rwc"
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.database_url, "sqlite://tmp/test.sqlite?mode=rwc");
    }

    #[test]
    fn test_missing_database_url_uses_default() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_load_settings_missing_file_is_config_error() {
        let result = load_settings("does/not/exist.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
