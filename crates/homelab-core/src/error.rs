//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for the services catalog.
///
/// Every layer (repository, use cases, HTTP) reports failures through this
/// enum so the REST layer can map them to status codes in one place.
#[derive(Error, Debug)]
pub enum HomelabError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("{resource_type} with id {id} not found")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HomelabError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Cache(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for HomelabError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for HomelabError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error body returned by the REST layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `HomelabError`.
    #[must_use]
    pub fn from_error(error: &HomelabError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }

    /// Creates an error response from a raw code and message.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&HomelabError> for ErrorResponse {
    fn from(error: &HomelabError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(HomelabError::not_found("Service", 1).status_code(), 404);
        assert_eq!(HomelabError::validation("title is required").status_code(), 400);
        assert_eq!(HomelabError::Database("db error".to_string()).status_code(), 500);
        assert_eq!(HomelabError::Cache("down".to_string()).status_code(), 500);
        assert_eq!(HomelabError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(HomelabError::not_found("Service", 1).error_code(), "NOT_FOUND");
        assert_eq!(HomelabError::validation("bad input").error_code(), "VALIDATION_ERROR");
        assert_eq!(HomelabError::Database("db".to_string()).error_code(), "DATABASE_ERROR");
        assert_eq!(
            HomelabError::Configuration("cfg".to_string()).error_code(),
            "CONFIGURATION_ERROR"
        );
        assert_eq!(HomelabError::internal("err").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(HomelabError::not_found("Service", 7).status_code(), 404);
        assert_eq!(HomelabError::validation("bad").status_code(), 400);
        assert_eq!(HomelabError::Database("gone".to_string()).status_code(), 500);
    }

    #[test]
    fn test_not_found_message_names_resource_and_id() {
        let err = HomelabError::not_found("Service", 42);
        assert_eq!(err.to_string(), "Service with id 42 not found");
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = HomelabError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_error_response_from_error() {
        let err = HomelabError::not_found("Service", 1);
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(response.message.contains("Service"));
    }

    #[test]
    fn test_error_response_serializes_code_and_message() {
        let response = ErrorResponse::new("INVALID_JSON", "Invalid JSON");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], "INVALID_JSON");
        assert_eq!(json["message"], "Invalid JSON");
    }
}
