//! Gateway error types and their HTTP status mapping.
//!
//! | Error | Status | Retried |
//! |-------|--------|---------|
//! | `MalformedRequest` | 400 | never |
//! | `UnknownMethod` | 400 | never |
//! | `Storage` | 500 | never |
//! | `Internal` | 500 | never |
//!
//! Every error becomes a short plain-text body naming the problem.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use dm_01_record_store::StorageError;

use crate::domain::methods::ServiceKind;

/// Per-request error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Body missing, not well-formed XML, or no method element.
    #[error("Invalid SOAP request: {0}")]
    MalformedRequest(String),

    /// Method name not in the invoked service's registry.
    #[error("Unknown method: {method}")]
    UnknownMethod { service: ServiceKind, method: String },

    /// Table read or append failed.
    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),

    /// Handler could not run to completion (e.g. worker task panicked).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn malformed(details: impl Into<String>) -> Self {
        ApiError::MalformedRequest(details.into())
    }

    pub fn unknown_method(service: ServiceKind, method: impl Into<String>) -> Self {
        ApiError::UnknownMethod {
            service,
            method: method.into(),
        }
    }

    pub fn internal(details: impl Into<String>) -> Self {
        ApiError::Internal(details.into())
    }

    /// HTTP status this error is surfaced with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) | ApiError::UnknownMethod { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller's fault (4xx) rather than the server's.
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

/// Result type for per-request operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway-level errors (service lifecycle, not per request)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Serving stopped with an I/O error
    #[error("server error: {0}")]
    Serve(String),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}
