//! # HMAC-SHA256 Fingerprint
//!
//! Computes [`VerificationHash`] values from [`CanonicalString`] input.
//! This is the only digest computation path in the workspace — both
//! transports and every caller share it, so a receipt hashes identically
//! no matter which backend persists it.

use hmac::{Hmac, Mac};
use receiptit_core::{Receipt, VerificationHash};
use sha2::Sha256;

use crate::canonical::CanonicalString;
use crate::error::CryptoError;
use crate::key::SecretKey;

type HmacSha256 = Hmac<Sha256>;

/// Compute the HMAC-SHA256 fingerprint of a canonical string.
///
/// The function signature requires [`CanonicalString`] — not raw text —
/// so every digest was computed from properly canonicalized receipt
/// fields.
///
/// Pure: identical inputs always yield identical output. A rejected key
/// is an error; there is no fallback encoding.
pub fn fingerprint(
    canonical: &CanonicalString,
    key: &SecretKey,
) -> Result<VerificationHash, CryptoError> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::KeyRejected(e.to_string()))?;
    mac.update(canonical.as_bytes());
    let digest = mac.finalize().into_bytes();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    Ok(VerificationHash::from_bytes(bytes))
}

/// Validate, canonicalize, and fingerprint a receipt in one step.
pub fn receipt_fingerprint(
    receipt: &Receipt,
    key: &SecretKey,
) -> Result<VerificationHash, CryptoError> {
    let canonical = CanonicalString::new(receipt)?;
    fingerprint(&canonical, key)
}
