//! Configuration validation.
//!
//! Collects every problem in one pass so a bad deployment reports all of
//! them at once.

use crate::AppConfig;
use std::fmt;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Port number is invalid (must be 1-65535).
    InvalidPort { name: String, value: u16 },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// Access log category is empty.
    EmptyCategory,
    /// Excluded path prefix does not start with `/`.
    InvalidExcludePath { value: String },
    /// Timestamp format is empty.
    EmptyTimestampFormat,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort { name, value } => {
                write!(f, "Invalid port for {}: {} (must be 1-65535)", name, value)
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
            Self::EmptyCategory => write!(f, "Access log category cannot be empty"),
            Self::InvalidExcludePath { value } => {
                write!(f, "Excluded path '{}' must start with '/'", value)
            }
            Self::EmptyTimestampFormat => write!(f, "Logging timestamp format cannot be empty"),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if config.server.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: config.server.port,
            });
        }

        let level = config.logging.level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.logging.level.clone(),
            });
        }
        if config.logging.timestamp_format.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyTimestampFormat);
        }

        if config.access_log.category.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyCategory);
        }
        for path in &config.access_log.exclude_paths {
            if !path.starts_with('/') {
                errors.push(ConfigValidationError::InvalidExcludePath { value: path.clone() });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
