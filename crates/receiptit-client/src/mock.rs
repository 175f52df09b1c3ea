//! # In-Memory Mock Backend
//!
//! `DashMap`-backed [`VerificationBackend`] for tests and development.
//! Enforces the same contract as the real store: the hash is a unique
//! key, the lookup returns the restricted public view, and an offline
//! toggle lets tests exercise unavailability paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use receiptit_core::{
    NewVerificationRecord, PublicVerification, VerificationHash, VerificationRecord,
};
use uuid::Uuid;

use crate::backend::{BackendHealth, VerificationBackend};
use crate::error::BackendError;

/// In-memory verification backend.
///
/// Cheaply cloneable — all clones share the same records and offline
/// flag.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    records: Arc<DashMap<String, VerificationRecord>>,
    offline: Arc<AtomicBool>,
}

impl MockBackend {
    /// Create an empty, online mock backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle availability. While offline, every operation fails with
    /// [`BackendError::Unavailable`] and health reports `Offline`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn check_online(&self) -> Result<(), BackendError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable {
                reason: "mock backend is offline".to_string(),
            });
        }
        Ok(())
    }
}

impl VerificationBackend for MockBackend {
    async fn insert_record(
        &self,
        record: &NewVerificationRecord,
    ) -> Result<VerificationRecord, BackendError> {
        self.check_online()?;
        let key = record.hash.to_hex();
        if self.records.contains_key(&key) {
            return Err(BackendError::DuplicateRecord { hash: key });
        }
        let stored = VerificationRecord {
            id: Uuid::new_v4(),
            hash: record.hash.clone(),
            store_id: record.store_id.clone(),
            store_name: record.store_name.clone(),
            total_amount: record.total_amount,
            issued_at: record.issued_at,
        };
        self.records.insert(key, stored.clone());
        Ok(stored)
    }

    async fn lookup_by_hash(
        &self,
        hash: &VerificationHash,
    ) -> Result<Option<PublicVerification>, BackendError> {
        self.check_online()?;
        Ok(self
            .records
            .get(&hash.to_hex())
            .map(|entry| entry.value().to_public()))
    }

    async fn health(&self) -> BackendHealth {
        if self.offline.load(Ordering::SeqCst) {
            BackendHealth::Offline {
                reason: "mock backend is offline".to_string(),
            }
        } else {
            BackendHealth::Online
        }
    }

    fn backend_name(&self) -> &'static str {
        "MockBackend"
    }
}
