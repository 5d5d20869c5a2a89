//! Unified error type for the umanager storage layer.

use std::time::Duration;
use thiserror::Error;

/// A specialized `Result` type for umanager operations.
pub type UmanagerResult<T> = Result<T, UmanagerError>;

/// Errors surfaced by the stores and their supporting infrastructure.
///
/// Driver errors are carried through untouched so callers can inspect
/// them. Absence of a row or document is never an error; finders return
/// `Ok(None)` instead.
#[derive(Error, Debug)]
pub enum UmanagerError {
    // ============ Driver Errors ============
    /// Relational store (PostgreSQL) driver error.
    #[cfg(feature = "sqlx")]
    #[error(transparent)]
    Sql(#[from] sqlx::Error),

    /// Document store (MongoDB) driver error.
    #[cfg(feature = "mongodb")]
    #[error(transparent)]
    Document(#[from] mongodb::error::Error),

    // ============ Infrastructure Errors ============
    /// The per-operation deadline elapsed before the store answered.
    #[error("Operation timed out: {operation} after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl UmanagerError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlx")]
            Self::Sql(_) => "SQL_STORE_ERROR",
            #[cfg(feature = "mongodb")]
            Self::Document(_) => "DOCUMENT_STORE_ERROR",
            Self::Timeout { .. } => "TIMEOUT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a timeout error for the named operation.
    #[must_use]
    pub const fn timeout(operation: &'static str, after: Duration) -> Self {
        Self::Timeout { operation, after }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if the per-operation deadline elapsed.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Checks if the underlying driver reported a unique constraint
    /// violation (duplicate key).
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        match self {
            #[cfg(feature = "sqlx")]
            Self::Sql(err) => err
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation()),
            #[cfg(feature = "mongodb")]
            Self::Document(err) => is_duplicate_key(err),
            _ => false,
        }
    }
}

#[cfg(feature = "mongodb")]
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    const DUPLICATE_KEY: i32 = 11000;

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY,
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let timeout = UmanagerError::timeout("users.find_by_id", Duration::from_millis(10));
        assert_eq!(timeout.error_code(), "TIMEOUT");
        assert_eq!(UmanagerError::configuration("bad").error_code(), "CONFIGURATION_ERROR");
        assert_eq!(UmanagerError::internal("oops").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_timeout_display_names_operation() {
        let err = UmanagerError::timeout("links.create", Duration::from_secs(2));
        assert!(err.is_timeout());
        assert!(err.to_string().contains("links.create"));
        assert!(err.to_string().contains("2s"));
    }

    #[test]
    fn test_non_driver_errors_are_not_unique_violations() {
        assert!(!UmanagerError::internal("x").is_unique_violation());
        assert!(!UmanagerError::timeout("op", Duration::ZERO).is_unique_violation());
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlx_error_is_propagated_transparently() {
        let err = UmanagerError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.error_code(), "SQL_STORE_ERROR");
        assert_eq!(err.to_string(), sqlx::Error::PoolTimedOut.to_string());
        assert!(!err.is_timeout());
        assert!(!err.is_unique_violation());
    }
}
