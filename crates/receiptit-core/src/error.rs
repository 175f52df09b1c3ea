//! # Validation Errors
//!
//! Structured errors raised when receipt data fails boundary validation,
//! before any field reaches the canonical hash input. Uses `thiserror`
//! for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Errors from validating receipt data and identifier formats.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// An identifier field was empty or whitespace-only.
    #[error("{field} must not be empty")]
    EmptyIdentifier {
        /// The field that was empty (e.g. "store id", "receipt number").
        field: &'static str,
    },

    /// An identifier contained the canonical-string separator.
    #[error("{field} must not contain '|': {value}")]
    SeparatorInIdentifier {
        /// The field that contained the separator.
        field: &'static str,
        /// The offending value.
        value: String,
    },

    /// A hash string was not 64 lowercase hex characters.
    #[error("invalid verification hash: {reason}")]
    InvalidHash {
        /// Description of the format violation.
        reason: String,
    },

    /// The receipt contained no line items.
    #[error("receipt {receipt_number} has no line items")]
    NoLineItems {
        /// The receipt that was rejected.
        receipt_number: String,
    },

    /// A money amount was negative.
    #[error("{field} must not be negative: {value}")]
    NegativeAmount {
        /// The amount field that was negative.
        field: &'static str,
        /// The offending value.
        value: String,
    },

    /// A money amount exceeded the accepted maximum.
    #[error("{field} exceeds the accepted maximum: {value}")]
    AmountTooLarge {
        /// The amount field that was too large.
        field: &'static str,
        /// The offending value.
        value: String,
    },

    /// Derived-amount arithmetic overflowed during validation.
    #[error("{field} arithmetic overflowed")]
    AmountOverflow {
        /// The derived amount that overflowed.
        field: &'static str,
    },

    /// A line item had a quantity of zero.
    #[error("line item '{item}' has zero quantity")]
    ZeroQuantity {
        /// Name of the offending line item.
        item: String,
    },

    /// The issuing store profile does not match the receipt's store id.
    #[error("store profile {profile} does not match receipt store id {receipt}")]
    StoreMismatch {
        /// Store id from the profile.
        profile: String,
        /// Store id on the receipt.
        receipt: String,
    },
}
