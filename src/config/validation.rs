//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{SchoolDeskError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate HTTP server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(SchoolDeskError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(SchoolDeskError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    if !config.api_prefix.starts_with('/') || config.api_prefix.ends_with('/') {
        return Err(SchoolDeskError::Config(
            format!("API prefix must start with '/' and not end with one: {}", config.api_prefix)
        ));
    }

    config.socket_addr()?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(SchoolDeskError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(SchoolDeskError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(SchoolDeskError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    if config.acquire_timeout_seconds == 0 {
        return Err(SchoolDeskError::Config(
            "Acquire timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(SchoolDeskError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(SchoolDeskError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if config.file_prefix.is_empty() {
        return Err(SchoolDeskError::Config(
            "Log file prefix is required".to_string()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert_matches!(validate_settings(&settings), Err(SchoolDeskError::Config(msg)) if msg.contains("verbose"));
    }

    #[test]
    fn test_rejects_inverted_pool_bounds() {
        let mut settings = Settings::default();
        settings.database.min_connections = 20;
        assert_matches!(validate_settings(&settings), Err(SchoolDeskError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_api_prefix() {
        let mut settings = Settings::default();
        settings.server.api_prefix = "api/".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_rejects_unparseable_host() {
        let mut settings = Settings::default();
        settings.server.host = "not a host".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
