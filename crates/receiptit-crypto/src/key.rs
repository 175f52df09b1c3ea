//! # Shared Secret Key
//!
//! The HMAC secret shared between the issuing side and the record store.
//! Key material is zeroized on drop and never appears in `Debug` output
//! or logs.

use zeroize::ZeroizeOnDrop;

use crate::error::CryptoError;

/// HMAC-SHA256 secret key material.
///
/// Construction rejects empty keys: an empty secret would silently turn
/// the fingerprint into an unkeyed hash, which is exactly the downgrade
/// this type exists to prevent.
#[derive(Clone, ZeroizeOnDrop)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Create a key from raw bytes. Fails on empty input.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, CryptoError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(CryptoError::EmptyKey);
        }
        Ok(Self(bytes))
    }

    /// Access the raw key bytes for MAC initialization.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(..)")
    }
}
