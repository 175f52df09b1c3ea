//! # Registration Cache
//!
//! Explicit local cache of registration outcomes keyed by receipt
//! number, passed into the verification workflow rather than accessed as
//! ambient global storage. Lets the issuing side re-render a receipt's
//! QR code without a round trip to the record store.

use std::sync::Arc;

use dashmap::DashMap;
use receiptit_core::ReceiptNumber;

use crate::service::Registration;

/// Key-value store of registration outcomes.
///
/// Implementations must be `Send + Sync`; the workflow reads and writes
/// from async contexts.
pub trait RegistrationCache: Send + Sync {
    /// Fetch the cached registration for a receipt number.
    fn get(&self, receipt_number: &ReceiptNumber) -> Option<Registration>;

    /// Store a registration outcome.
    fn put(&self, receipt_number: ReceiptNumber, registration: Registration);
}

/// In-memory registration cache.
///
/// Cheaply cloneable — all clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCache {
    entries: Arc<DashMap<ReceiptNumber, Registration>>,
}

impl InMemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RegistrationCache for InMemoryCache {
    fn get(&self, receipt_number: &ReceiptNumber) -> Option<Registration> {
        self.entries.get(receipt_number).map(|e| e.value().clone())
    }

    fn put(&self, receipt_number: ReceiptNumber, registration: Registration) {
        self.entries.insert(receipt_number, registration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use receiptit_core::{StoreId, VerificationHash, VerificationRecord};
    use uuid::Uuid;

    fn sample_registration() -> Registration {
        let hash = VerificationHash::from_bytes([1; 32]);
        Registration {
            hash: hash.clone(),
            verification_url: format!("https://receiptit.example/verify?hash={hash}"),
            qr_url: "https://api.qrserver.com/v1/create-qr-code/?size=200x200".to_string(),
            record: VerificationRecord {
                id: Uuid::new_v4(),
                hash,
                store_id: StoreId::new("S1").unwrap(),
                store_name: "Corner Shop".to_string(),
                total_amount: "2000.00".parse().unwrap(),
                issued_at: Utc::now(),
            },
        }
    }

    #[test]
    fn put_then_get_round_trip() {
        let cache = InMemoryCache::new();
        let number = ReceiptNumber::new("RCT-1001").unwrap();
        assert!(cache.get(&number).is_none());

        cache.put(number.clone(), sample_registration());
        let cached = cache.get(&number).expect("entry should exist");
        assert_eq!(cached.hash, VerificationHash::from_bytes([1; 32]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clones_share_entries() {
        let cache = InMemoryCache::new();
        let clone = cache.clone();
        cache.put(
            ReceiptNumber::new("RCT-1002").unwrap(),
            sample_registration(),
        );
        assert_eq!(clone.len(), 1);
    }
}
