//! # receiptit-core — Foundational Types for the ReceiptIt Verification Stack
//!
//! Defines the type-system primitives every other crate in the workspace
//! builds on. This crate depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** [`StoreId`],
//!    [`ReceiptNumber`], [`VerificationHash`] — all newtypes with validated
//!    constructors. No bare strings for identifiers, and no identifier may
//!    contain the canonical-string separator.
//!
//! 2. **Decimal money, never floats.** All amounts are
//!    [`rust_decimal::Decimal`]. The receipt total that feeds the
//!    fingerprint is derived arithmetic, so float drift would silently
//!    change hashes between runs.
//!
//! 3. **Validation at the boundary.** [`Receipt::validate()`] rejects
//!    malformed receipts before any of their fields reach the hash input.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `receiptit-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod receipt;
pub mod record;

// Re-export primary types for ergonomic imports.
pub use error::ValidationError;
pub use identity::{ReceiptNumber, StoreId, VerificationHash};
pub use receipt::{LineItem, Receipt, StoreProfile};
pub use record::{NewVerificationRecord, PublicVerification, VerificationRecord};
