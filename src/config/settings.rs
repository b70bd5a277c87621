//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Environment variable prefix for all settings (`EXAM_RESULTS__STORE__URL`, ...)
pub const ENV_PREFIX: &str = "EXAM_RESULTS";

/// Environment variable naming an alternative configuration file
pub const CONFIG_PATH_ENV: &str = "EXAM_RESULTS_CONFIG";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub store: StoreConfig,
    pub logging: LoggingConfig,
    pub roster: RosterDefaults,
}

/// Hosted data store configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Project URL of the hosted store
    #[serde(default)]
    pub url: String,
    /// Anonymous access key sent with every request
    #[serde(default)]
    pub anon_key: String,
    pub timeout_seconds: u64,
    pub schema: String,
}

// Keeps the access key out of logs.
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .field("schema", &self.schema)
            .finish()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub json: bool,
}

/// Defaults pre-filled in the add-student form
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RosterDefaults {
    pub department: String,
    pub semester: u8,
}

impl Settings {
    /// Load settings from `.env`, the configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();

        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config".to_string());
        Self::load(config::File::with_name(&path).required(false))
    }

    /// Load settings from an explicit configuration file plus environment variables
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::load(config::File::from(path.as_ref()).required(true))
    }

    fn load<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = Settings::default();

        let settings = config::Config::builder()
            .set_default("store.timeout_seconds", defaults.store.timeout_seconds as i64)?
            .set_default("store.schema", defaults.store.schema)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.json", defaults.logging.json)?
            .set_default("roster.department", defaults.roster.department)?
            .set_default("roster.semester", defaults.roster.semester as i64)?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ExamResultsError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                url: String::new(),
                anon_key: String::new(),
                timeout_seconds: 10,
                schema: "public".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                json: false,
            },
            roster: RosterDefaults {
                department: "CSE".to_string(),
                semester: 3,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.roster.department, "CSE");
        assert_eq!(settings.roster.semester, 3);
        assert_eq!(settings.store.schema, "public");
        assert!(settings.store.url.is_empty());
    }

    #[test]
    fn test_debug_redacts_anon_key() {
        let mut settings = Settings::default();
        settings.store.anon_key = "super-secret".to_string();
        let rendered = format!("{:?}", settings.store);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
