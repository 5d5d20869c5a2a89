//! Configuration validation module.
//!
//! Checks every section up front and reports all problems at once, so a
//! misconfigured deployment fails at startup rather than on the first
//! store call.

use crate::AppConfig;
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Pool size configuration is invalid (min must be <= max).
    InvalidPoolSize { name: String, min: u32, max: u32 },
    /// Pool size exceeds maximum allowed.
    PoolSizeTooLarge { name: String, value: u32, maximum: u32 },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// A required name is empty.
    EmptyName { name: String },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPoolSize { name, min, max } => write!(
                f,
                "Invalid {name} pool size: min ({min}) cannot be greater than max ({max})"
            ),
            Self::PoolSizeTooLarge { name, value, maximum } => write!(
                f,
                "{name} pool size {value} exceeds maximum allowed ({maximum})"
            ),
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {url_type} URL: {message}")
            }
            Self::EmptyName { name } => write!(f, "'{name}' cannot be empty"),
            Self::NonPositiveTimeout { name } => write!(f, "Timeout '{name}' must be positive"),
            Self::InvalidLogLevel { value } => write!(
                f,
                "Invalid log level: '{value}' (valid: trace, debug, info, warn, error)"
            ),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Maximum connection pool size.
    const MAX_POOL_SIZE: u32 = 1000;
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_database(&config.database, &mut errors);
        Self::validate_document_store(&config.document_store, &mut errors);
        Self::validate_storage(&config.storage, &mut errors);
        Self::validate_observability(&config.observability, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_url(url: &str, url_type: &str, schemes: &[&str], errors: &mut Vec<ConfigValidationError>) {
        if url.is_empty() {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: url_type.to_string(),
                message: "URL cannot be empty".to_string(),
            });
            return;
        }

        match Url::parse(url) {
            Ok(parsed) if schemes.contains(&parsed.scheme()) => {}
            Ok(parsed) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: url_type.to_string(),
                message: format!(
                    "unsupported scheme '{}' (expected {})",
                    parsed.scheme(),
                    schemes.join(", ")
                ),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: url_type.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn validate_pool(name: &str, min: u32, max: u32, errors: &mut Vec<ConfigValidationError>) {
        if min > max {
            errors.push(ConfigValidationError::InvalidPoolSize {
                name: name.to_string(),
                min,
                max,
            });
        }
        if max > Self::MAX_POOL_SIZE {
            errors.push(ConfigValidationError::PoolSizeTooLarge {
                name: name.to_string(),
                value: max,
                maximum: Self::MAX_POOL_SIZE,
            });
        }
    }

    /// Validates relational database configuration.
    fn validate_database(config: &crate::DatabaseConfig, errors: &mut Vec<ConfigValidationError>) {
        Self::validate_url(&config.url, "database", &["postgres", "postgresql"], errors);
        Self::validate_pool("database", config.min_connections, config.max_connections, errors);

        if config.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs".to_string(),
            });
        }
        if config.idle_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.idle_timeout_secs".to_string(),
            });
        }
    }

    /// Validates document store configuration.
    fn validate_document_store(
        config: &crate::DocumentStoreConfig,
        errors: &mut Vec<ConfigValidationError>,
    ) {
        Self::validate_url(&config.url, "document_store", &["mongodb", "mongodb+srv"], errors);
        Self::validate_pool("document_store", config.min_pool_size, config.max_pool_size, errors);

        if config.database.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyName {
                name: "document_store.database".to_string(),
            });
        }
        if config.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "document_store.connect_timeout_secs".to_string(),
            });
        }
    }

    fn validate_storage(config: &crate::StorageConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.operation_timeout_ms == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "storage.operation_timeout_ms".to_string(),
            });
        }
    }

    /// Validates observability configuration.
    fn validate_observability(
        config: &crate::ObservabilityConfig,
        errors: &mut Vec<ConfigValidationError>,
    ) {
        let level = config.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}
