//! Error types for NewsForge services
//!
//! `AppError` is the single error currency across the workspace. Every
//! variant maps to a machine-readable `ErrorCode` and an HTTP status, so
//! handlers can bubble errors with `?` and let `IntoResponse` shape the
//! body. Transient upstream failures (feed, LLM) map to 502 and are meant
//! to be persisted by the pipeline rather than surfaced as crashes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    MissingField,
    InvalidFormat,

    // Resource errors (4xxx)
    NotFound,
    CategoryNotFound,
    ProducerNotFound,
    QueueItemNotFound,
    ArticleNotFound,

    // Conflict errors (5xxx)
    Conflict,
    InvalidState,

    // Database errors (7xxx)
    DatabaseError,
    ConnectionError,

    // External service errors (8xxx)
    UpstreamError,
    FeedError,
    LlmError,
    LlmResponseError,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
    SerializationError,

    // Service unavailable
    ServiceUnavailable,
}

impl ErrorCode {
    /// Numeric form, stable for API clients
    pub fn as_code(&self) -> u16 {
        match self {
            // Validation (1xxx)
            ErrorCode::ValidationError => 1001,
            ErrorCode::MissingField => 1002,
            ErrorCode::InvalidFormat => 1003,

            // Resources (4xxx)
            ErrorCode::NotFound => 4001,
            ErrorCode::CategoryNotFound => 4002,
            ErrorCode::ProducerNotFound => 4003,
            ErrorCode::QueueItemNotFound => 4004,
            ErrorCode::ArticleNotFound => 4005,

            // Conflicts (5xxx)
            ErrorCode::Conflict => 5001,
            ErrorCode::InvalidState => 5002,

            // Database (7xxx)
            ErrorCode::DatabaseError => 7001,
            ErrorCode::ConnectionError => 7002,

            // External (8xxx)
            ErrorCode::UpstreamError => 8001,
            ErrorCode::FeedError => 8002,
            ErrorCode::LlmError => 8003,
            ErrorCode::LlmResponseError => 8004,

            // Internal (9xxx)
            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,

            ErrorCode::ServiceUnavailable => 9999,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    // Resource errors
    #[error("{resource_type} not found: {id}")]
    NotFound { resource_type: String, id: String },

    #[error("Category not found: {id}")]
    CategoryNotFound { id: String },

    #[error("Producer not found: {id}")]
    ProducerNotFound { id: String },

    #[error("Queue item not found: {id}")]
    QueueItemNotFound { id: String },

    #[error("Article not found: {id}")]
    ArticleNotFound { id: String },

    // Conflict errors
    #[error("Duplicate: {message}")]
    Duplicate { message: String },

    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Database connection failed: {message}")]
    DatabaseConnection { message: String },

    // External service errors
    #[error("Feed error: {message}")]
    FeedError { message: String },

    #[error("LLM service error: {message}")]
    LlmError { message: String },

    #[error("LLM response error: {message}")]
    LlmResponseError { message: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    // Internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::MissingField { .. } => ErrorCode::MissingField,
            AppError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::CategoryNotFound { .. } => ErrorCode::CategoryNotFound,
            AppError::ProducerNotFound { .. } => ErrorCode::ProducerNotFound,
            AppError::QueueItemNotFound { .. } => ErrorCode::QueueItemNotFound,
            AppError::ArticleNotFound { .. } => ErrorCode::ArticleNotFound,
            AppError::Duplicate { .. } => ErrorCode::Conflict,
            AppError::InvalidState { .. } => ErrorCode::InvalidState,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::DatabaseConnection { .. } => ErrorCode::ConnectionError,
            AppError::FeedError { .. } => ErrorCode::FeedError,
            AppError::LlmError { .. } => ErrorCode::LlmError,
            AppError::LlmResponseError { .. } => ErrorCode::LlmResponseError,
            AppError::HttpClient(_) => ErrorCode::UpstreamError,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
            AppError::ServiceUnavailable { .. } => ErrorCode::ServiceUnavailable,
            AppError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. }
            | AppError::MissingField { .. }
            | AppError::InvalidFormat { .. } => StatusCode::BAD_REQUEST,

            AppError::NotFound { .. }
            | AppError::CategoryNotFound { .. }
            | AppError::ProducerNotFound { .. }
            | AppError::QueueItemNotFound { .. }
            | AppError::ArticleNotFound { .. } => StatusCode::NOT_FOUND,

            AppError::Duplicate { .. } | AppError::InvalidState { .. } => StatusCode::CONFLICT,

            AppError::Database(_)
            | AppError::DatabaseConnection { .. }
            | AppError::Internal { .. }
            | AppError::Configuration { .. }
            | AppError::Serialization(_)
            | AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // Upstream failures: the feed server or the LLM API
            AppError::FeedError { .. }
            | AppError::LlmError { .. }
            | AppError::LlmResponseError { .. }
            | AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,

            AppError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Structured error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        if self.is_server_error() {
            tracing::error!(error = %message, code = ?code, status = status.as_u16(), "Request failed");
        } else if self.is_client_error() {
            tracing::warn!(error = %message, code = ?code, status = status.as_u16(), "Request rejected");
        }

        let body = ErrorResponse {
            error: ErrorDetails {
                code,
                message,
                details: None,
                request_id: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        let err = AppError::ProducerNotFound { id: "test".into() };
        assert_eq!(err.code(), ErrorCode::ProducerNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_state_is_conflict() {
        let err = AppError::InvalidState {
            message: "Item is already being processed".into(),
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert!(err.is_client_error());
    }

    #[test]
    fn test_feed_error_is_bad_gateway() {
        let err = AppError::FeedError {
            message: "HTTP 503 from upstream".into(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert!(err.is_server_error());
    }
}
