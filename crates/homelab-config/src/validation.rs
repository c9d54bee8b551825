//! Configuration validation module.
//!
//! Rejects invalid values at startup instead of failing on first use.

use crate::{AppConfig, CacheBackendKind};
use homelab_core::HomelabError;
use std::fmt;
use url::Url;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["pretty", "json"];

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Port number is invalid (must be 1-65535).
    InvalidPort { name: String, value: u16 },
    /// A value that must be positive was zero.
    NonPositiveValue { name: String },
    /// A required text value was empty.
    EmptyValue { name: String },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// Log format is invalid.
    InvalidLogFormat { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort { name, value } => {
                write!(f, "Invalid port for {}: {} (must be 1-65535)", name, value)
            }
            Self::NonPositiveValue { name } => {
                write!(f, "{} must be greater than zero", name)
            }
            Self::EmptyValue { name } => write!(f, "{} must not be empty", name),
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level '{}' (expected one of: {})",
                    value,
                    LOG_LEVELS.join(", ")
                )
            }
            Self::InvalidLogFormat { value } => {
                write!(
                    f,
                    "Invalid log format '{}' (expected one of: {})",
                    value,
                    LOG_FORMATS.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Result of configuration validation.
pub type ValidationResult = Result<(), Vec<ConfigValidationError>>;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire application configuration.
    ///
    /// Returns all validation errors found, not just the first one.
    pub fn validate(config: &AppConfig) -> ValidationResult {
        let mut errors = Vec::new();

        Self::validate_server(config, &mut errors);
        Self::validate_database(config, &mut errors);
        Self::validate_cache(config, &mut errors);
        Self::validate_observability(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.server.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: config.server.port,
            });
        }

        if config.server.cors_origin.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyValue {
                name: "server.cors_origin".to_string(),
            });
        }
    }

    fn validate_database(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let db = &config.database;

        if db.data_dir.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyValue {
                name: "database.data_dir".to_string(),
            });
        }

        if db.file_name.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyValue {
                name: "database.file_name".to_string(),
            });
        }

        if db.max_connections == 0 {
            errors.push(ConfigValidationError::NonPositiveValue {
                name: "database.max_connections".to_string(),
            });
        }
    }

    fn validate_cache(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let cache = &config.cache;

        if cache.ttl_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveValue {
                name: "cache.ttl_secs".to_string(),
            });
        }

        // The Redis settings only matter when Redis is actually used.
        if !cache.enabled || cache.backend != CacheBackendKind::Redis {
            return;
        }

        match Url::parse(&cache.redis_url) {
            Ok(url) if matches!(url.scheme(), "redis" | "rediss") => {}
            Ok(url) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "Redis".to_string(),
                message: format!(
                    "Invalid scheme '{}' (expected 'redis' or 'rediss')",
                    url.scheme()
                ),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "Redis".to_string(),
                message: e.to_string(),
            }),
        }

        if cache.pool_size == 0 {
            errors.push(ConfigValidationError::NonPositiveValue {
                name: "cache.pool_size".to_string(),
            });
        }
    }

    fn validate_observability(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let obs = &config.observability;

        if !LOG_LEVELS.contains(&obs.log_level.to_lowercase().as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: obs.log_level.clone(),
            });
        }

        if !LOG_FORMATS.contains(&obs.log_format.to_lowercase().as_str()) {
            errors.push(ConfigValidationError::InvalidLogFormat {
                value: obs.log_format.clone(),
            });
        }
    }
}

/// Formats validation errors into a single message.
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    format!("Configuration validation failed: {}", messages.join("; "))
}

/// Validates a loaded configuration, folding every failure into one
/// configuration error.
pub fn validate_config(config: &AppConfig) -> Result<(), HomelabError> {
    ConfigValidator::validate(config)
        .map_err(|errors| HomelabError::Configuration(format_validation_errors(&errors)))
}
