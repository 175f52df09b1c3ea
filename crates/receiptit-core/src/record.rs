//! # Verification Records
//!
//! Row types for the verification record store. A record is created once
//! at receipt issuance, is immutable thereafter, and is only ever looked
//! up (never mutated) when someone checks a receipt.
//!
//! [`PublicVerification`] is the restricted view exposed to
//! unauthenticated checks: store name, total, and issuance time — nothing
//! that would let an outsider enumerate a store's receipts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::{StoreId, VerificationHash};

/// Payload inserted into the record store at registration time.
///
/// The store assigns the row id; the hash is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVerificationRecord {
    /// Canonical fingerprint of the receipt; unique across the store.
    pub hash: VerificationHash,
    /// Identifier of the issuing store.
    pub store_id: StoreId,
    /// Store display name, denormalized for the public view.
    pub store_name: String,
    /// Derived receipt total at issuance.
    pub total_amount: Decimal,
    /// Issuance timestamp (UTC).
    pub issued_at: DateTime<Utc>,
}

/// A stored verification record, as returned by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Row id assigned by the record store.
    pub id: Uuid,
    /// Canonical fingerprint of the receipt; unique across the store.
    pub hash: VerificationHash,
    /// Identifier of the issuing store.
    pub store_id: StoreId,
    /// Store display name.
    pub store_name: String,
    /// Derived receipt total at issuance.
    pub total_amount: Decimal,
    /// Issuance timestamp (UTC).
    pub issued_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Project the record onto its public, unauthenticated view.
    pub fn to_public(&self) -> PublicVerification {
        PublicVerification {
            store_name: self.store_name.clone(),
            total_amount: self.total_amount,
            issued_at: self.issued_at,
        }
    }
}

/// The restricted view returned to unauthenticated verification checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicVerification {
    /// Store display name.
    pub store_name: String,
    /// Receipt total as registered.
    pub total_amount: Decimal,
    /// Issuance timestamp (UTC).
    pub issued_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> VerificationRecord {
        VerificationRecord {
            id: Uuid::new_v4(),
            hash: VerificationHash::from_bytes([5; 32]),
            store_id: StoreId::new("S1").unwrap(),
            store_name: "Corner Shop".to_string(),
            total_amount: "2000.00".parse().unwrap(),
            issued_at: "2024-01-01T10:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn public_projection_drops_store_id_and_hash() {
        let record = sample_record();
        let public = record.to_public();
        assert_eq!(public.store_name, "Corner Shop");
        assert_eq!(public.total_amount, record.total_amount);
        assert_eq!(public.issued_at, record.issued_at);
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("hash"));
        assert!(!json.contains("store_id"));
    }

    #[test]
    fn record_serde_round_trip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: VerificationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn new_record_serializes_hash_as_hex() {
        let new = NewVerificationRecord {
            hash: VerificationHash::from_bytes([0xab; 32]),
            store_id: StoreId::new("S1").unwrap(),
            store_name: "Corner Shop".to_string(),
            total_amount: "2000.00".parse().unwrap(),
            issued_at: "2024-01-01T10:00:00Z".parse().unwrap(),
        };
        let value = serde_json::to_value(&new).unwrap();
        assert_eq!(value["hash"], serde_json::json!("ab".repeat(32)));
    }
}
