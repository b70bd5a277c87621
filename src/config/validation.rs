//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use url::Url;

use crate::utils::errors::{ExamResultsError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_store_config(&settings.store)?;
    validate_logging_config(&settings.logging)?;
    validate_roster_defaults(&settings.roster)?;

    Ok(())
}

/// Validate data store configuration
fn validate_store_config(config: &super::StoreConfig) -> Result<()> {
    if config.url.trim().is_empty() {
        return Err(ExamResultsError::Config(
            "Data store URL is required (set EXAM_RESULTS__STORE__URL)".to_string()
        ));
    }

    if config.anon_key.trim().is_empty() {
        return Err(ExamResultsError::Config(
            "Data store anonymous key is required (set EXAM_RESULTS__STORE__ANON_KEY)".to_string()
        ));
    }

    let url = Url::parse(&config.url)?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ExamResultsError::Config(
            format!("Data store URL must use http or https, got: {}", url.scheme())
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(ExamResultsError::Config(
            "Data store timeout must be greater than 0".to_string()
        ));
    }

    if config.schema.is_empty() {
        return Err(ExamResultsError::Config(
            "Data store schema is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ExamResultsError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ExamResultsError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

/// Validate add-student form defaults
fn validate_roster_defaults(config: &super::RosterDefaults) -> Result<()> {
    if !(1..=8).contains(&config.semester) {
        return Err(ExamResultsError::Config(
            format!("Default semester must be between 1 and 8, got: {}", config.semester)
        ));
    }

    Ok(())
}
