//! # Cryptographic Error Types
//!
//! Structured errors for fingerprint computation. Uses `thiserror` for
//! ergonomic error definitions with diagnostic context.
//!
//! There is deliberately no "fallback" variant: when the keyed hash
//! cannot be computed, the operation fails — it never degrades to an
//! unkeyed encoding.

use receiptit_core::ValidationError;
use thiserror::Error;

/// Errors from fingerprint operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// The shared secret was empty.
    #[error("secret key must not be empty")]
    EmptyKey,

    /// The HMAC primitive rejected the key material.
    #[error("HMAC key rejected: {0}")]
    KeyRejected(String),

    /// The receipt failed boundary validation before hashing.
    #[error("receipt validation failed: {0}")]
    InvalidReceipt(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_display() {
        assert_eq!(
            CryptoError::EmptyKey.to_string(),
            "secret key must not be empty"
        );
    }

    #[test]
    fn validation_error_converts() {
        let err: CryptoError = ValidationError::EmptyIdentifier { field: "store id" }.into();
        assert!(err.to_string().contains("store id"));
    }
}
