//! # receiptit-crypto — Receipt Fingerprinting
//!
//! The single sanctioned path for producing receipt fingerprints:
//! validated receipt → [`CanonicalString`] → HMAC-SHA256 →
//! [`VerificationHash`](receiptit_core::VerificationHash).
//!
//! ## Security Invariants
//!
//! - [`fingerprint()`] accepts only a [`CanonicalString`] — not raw text.
//!   A `CanonicalString` can only be built from a validated
//!   [`Receipt`](receiptit_core::Receipt), so every digest in the system
//!   is computed over the same five canonical fields. No caller builds
//!   its own hash input.
//! - Failure is loud. A rejected key is a [`CryptoError`]; there is no
//!   weaker fallback encoding of any kind.
//! - The fingerprint is a pure function of the canonical fields. No
//!   timestamp, nonce, or other ambient input enters the digest.

pub mod canonical;
pub mod error;
pub mod fingerprint;
pub mod key;

pub use canonical::CanonicalString;
pub use error::CryptoError;
pub use fingerprint::{fingerprint, receipt_fingerprint};
pub use key::SecretKey;
