//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `SpeakerError`は`error_type()`と`status_code()`メソッドを提供し、
//! HTTPレイヤーでそのままレスポンスに変換できます。

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<config::ConfigError> for CommonError {
    fn from(err: config::ConfigError) -> Self {
        CommonError::Config(err.to_string())
    }
}

/// speaker service error type
#[derive(Debug, Error)]
pub enum SpeakerError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Conflict error (e.g., duplicate identifier)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Circuit breaker is open and the call was not attempted
    #[error("Circuit breaker is open")]
    CircuitOpen,

    /// Bulkhead has no free slot for the call
    #[error("Bulkhead rejected call: {0} concurrent executions already in flight")]
    BulkheadFull(usize),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SpeakerError {
    /// Returns a safe error message for external clients.
    ///
    /// Use the `Display` implementation (`to_string()`) for full details in
    /// server logs only.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Common(CommonError::Validation(_)) => "Invalid request",
            Self::Common(_) => "Request error",
            Self::NotFound(_) => "Not found",
            Self::Database(_) => "Database error",
            Self::Conflict(_) => "Resource conflict",
            Self::CircuitOpen => "Service temporarily unavailable",
            Self::BulkheadFull(_) => "Too many concurrent requests",
            Self::Internal(_) => "Internal server error",
        }
    }

    /// Returns the error type string.
    ///
    /// - `invalid_request_error`: Bad request parameters
    /// - `not_found_error`: Resource not found
    /// - `server_error`: Internal server errors
    /// - `service_unavailable`: Fault tolerance rejected the call
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Common(_) => "invalid_request_error",
            Self::NotFound(_) => "not_found_error",
            Self::Database(_) => "server_error",
            Self::Conflict(_) => "invalid_request_error",
            Self::CircuitOpen => "service_unavailable",
            Self::BulkheadFull(_) => "service_unavailable",
            Self::Internal(_) => "server_error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Common(CommonError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Common(CommonError::Serialization(_)) => StatusCode::BAD_REQUEST,
            Self::Common(CommonError::Config(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::CircuitOpen => StatusCode::SERVICE_UNAVAILABLE,
            Self::BulkheadFull(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts this error to the JSON error body.
    pub fn to_error_body(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.external_message().to_string(),
            error_type: self.error_type().to_string(),
        }
    }
}

impl From<sqlx::Error> for SpeakerError {
    fn from(err: sqlx::Error) -> Self {
        SpeakerError::Database(err.to_string())
    }
}

/// エラーレスポンス本体
///
/// ```json
/// { "error": "Internal server error", "type": "server_error" }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Error type (e.g., "invalid_request_error", "server_error")
    #[serde(rename = "type")]
    pub error_type: String,
}

/// Result type alias (Common)
pub type CommonResult<T> = Result<T, CommonError>;

/// Result type alias (speaker service)
pub type SpeakerResult<T> = Result<T, SpeakerError>;
