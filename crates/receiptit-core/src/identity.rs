//! # Identifier Newtypes
//!
//! Domain-primitive newtypes for the verification stack. Each identifier
//! is a distinct type — you cannot pass a [`StoreId`] where a
//! [`ReceiptNumber`] is expected.
//!
//! ## Validation
//!
//! All constructors validate at construction time. String identifiers
//! reject empty values and the `|` canonical-string separator, so a
//! malicious receipt number cannot smuggle extra fields into the hash
//! input. [`VerificationHash`] accepts only 64 hex characters and
//! normalizes to lowercase.

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::error::ValidationError;

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents. Deserializes as a plain `String`, then routes
/// through the type's `new()` constructor so that invalid values are
/// rejected at deserialization time — not silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

fn validate_identifier(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyIdentifier { field });
    }
    if value.contains('|') {
        return Err(ValidationError::SeparatorInIdentifier {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Identifier of an issuing store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StoreId(String);

impl StoreId {
    /// Create a store id, rejecting empty values and the `|` separator.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        validate_identifier("store id", &id)?;
        Ok(Self(id))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl_validating_deserialize!(StoreId);

/// Human-facing receipt number (e.g. `RCT-1001`), unique per store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ReceiptNumber(String);

impl ReceiptNumber {
    /// Create a receipt number, rejecting empty values and the `|` separator.
    pub fn new(number: impl Into<String>) -> Result<Self, ValidationError> {
        let number = number.into();
        validate_identifier("receipt number", &number)?;
        Ok(Self(number))
    }

    /// Access the receipt number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReceiptNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl_validating_deserialize!(ReceiptNumber);

/// A receipt fingerprint: 32 bytes of HMAC-SHA256 output.
///
/// Renders as 64 lowercase hex characters everywhere — in URLs, in the
/// record store, and on the wire. Equality is constant-time so that
/// comparing a presented hash against a stored one does not leak matching
/// prefixes through timing.
#[derive(Debug, Clone)]
pub struct VerificationHash([u8; 32]);

impl VerificationHash {
    /// Wrap raw HMAC output bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a 64-character hex string. Uppercase input is accepted and
    /// normalized; anything else is rejected.
    pub fn from_hex(hex: &str) -> Result<Self, ValidationError> {
        if hex.len() != 64 {
            return Err(ValidationError::InvalidHash {
                reason: format!("expected 64 hex characters, got {}", hex.len()),
            });
        }
        // Every byte must be a hex digit; from_str_radix alone would
        // also tolerate sign characters like "+a".
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidHash {
                reason: "hash contains non-hex characters".to_string(),
            });
        }
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = hex.get(i * 2..i * 2 + 2).ok_or_else(|| {
                ValidationError::InvalidHash {
                    reason: "hash is not valid ASCII hex".to_string(),
                }
            })?;
            *byte = u8::from_str_radix(pair, 16).map_err(|_| ValidationError::InvalidHash {
                reason: format!("invalid hex at position {}: {pair:?}", i * 2),
            })?;
        }
        Ok(Self(bytes))
    }

    /// Render the hash as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Access the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl PartialEq for VerificationHash {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for VerificationHash {}

impl std::hash::Hash for VerificationHash {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl std::fmt::Display for VerificationHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for VerificationHash {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for VerificationHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for VerificationHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}
