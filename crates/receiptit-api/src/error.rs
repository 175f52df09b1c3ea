//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps workflow errors from receiptit-client and validation errors from
//! receiptit-core to HTTP status codes with JSON error bodies. Internal
//! and upstream error details are never exposed to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use receiptit_client::{BackendError, ServiceError};
use receiptit_core::ValidationError;
use receiptit_crypto::CryptoError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "VALIDATION_ERROR", "CONFLICT").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Receipt or hash failed validation (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// A record for this hash already exists (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),

    /// The record store returned an error or an unusable response (502).
    #[error("upstream record store error: {0}")]
    Upstream(String),

    /// The record store is unreachable or the backend is misconfigured (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ApiError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal/upstream error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::Upstream(_) => "The record store returned an error".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Upstream(_) => tracing::error!(error = %self, "upstream record store error"),
            Self::ServiceUnavailable(_) => tracing::warn!(error = %self, "service unavailable"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => Self::Validation(e.to_string()),
            ServiceError::Crypto(e) => match e {
                CryptoError::InvalidReceipt(v) => Self::Validation(v.to_string()),
                // Key problems are deployment configuration faults. There
                // is no fallback encoding; the operation fails outright.
                other => Self::Internal(other.to_string()),
            },
            ServiceError::Backend(e) => match e {
                BackendError::DuplicateRecord { hash } => {
                    Self::Conflict(format!("a record for hash {hash} already exists"))
                }
                BackendError::Unavailable { reason } => Self::ServiceUnavailable(reason),
                BackendError::Config(e) => Self::ServiceUnavailable(e.to_string()),
                other => Self::Upstream(other.to_string()),
            },
            ServiceError::Link(e) => Self::Internal(e.to_string()),
            ServiceError::Config(e) => Self::ServiceUnavailable(e.to_string()),
        }
    }
}
