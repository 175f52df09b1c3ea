//! Record-store backend error types.

/// Errors from record-store calls.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// Endpoint that was being called.
        endpoint: String,
        /// Underlying transport failure.
        source: reqwest::Error,
    },

    /// The record store returned a non-2xx status.
    #[error("record store {endpoint} returned {status}: {body}")]
    Api {
        /// Endpoint that was being called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body excerpt for diagnostics.
        body: String,
    },

    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        /// Endpoint that was being called.
        endpoint: String,
        /// Underlying deserialization failure.
        source: reqwest::Error,
    },

    /// A verification record with this hash already exists. Registration
    /// is once-per-receipt; this is reported, never retried.
    #[error("verification record already exists for hash {hash}")]
    DuplicateRecord {
        /// The conflicting hash (lowercase hex).
        hash: String,
    },

    /// The backend is not reachable or has been taken offline.
    #[error("record store unavailable: {reason}")]
    Unavailable {
        /// Human-readable reason.
        reason: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
