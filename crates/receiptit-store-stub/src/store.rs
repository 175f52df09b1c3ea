// SPDX-License-Identifier: BUSL-1.1
//! In-memory storage backend using DashMap.
//!
//! One map of verification records, keyed by the hex fingerprint — the
//! same unique key the real store enforces.

use dashmap::DashMap;
use receiptit_core::VerificationRecord;
use std::sync::Arc;

/// Inner storage.
struct Inner {
    records: DashMap<String, VerificationRecord>,
}

/// Shared application state holding the in-memory record store.
///
/// Cheaply cloneable via `Arc` — all clones share the same data.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                records: DashMap::new(),
            }),
        }
    }

    pub fn records(&self) -> &DashMap<String, VerificationRecord> {
        &self.inner.records
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
