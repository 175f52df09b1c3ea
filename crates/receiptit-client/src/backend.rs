//! # Verification Backend — Generic Trait Interface
//!
//! Defines the [`VerificationBackend`] trait that abstracts over how
//! verification records are persisted and looked up. The workflow layer
//! composes registration and verification without knowing which
//! transport is in play.
//!
//! ## Implementations
//!
//! - [`RestBackend`](crate::rest::RestBackend) — direct record-store
//!   REST access (PostgREST-style).
//! - [`ScriptBackend`](crate::script::ScriptBackend) — legacy script
//!   endpoint for deployments without direct store access.
//! - [`MockBackend`](crate::mock::MockBackend) — in-memory, for tests.
//!
//! [`AnyBackend`] is the configuration-selected sum of the three. The
//! selection happens once, at startup — call sites never fall back
//! between transports mid-operation.

use receiptit_core::{NewVerificationRecord, PublicVerification, VerificationHash, VerificationRecord};

use crate::error::BackendError;

/// Health status of a record-store backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendHealth {
    /// The record store is reachable and answering.
    Online,
    /// The record store is not reachable. Carries a human-readable
    /// reason; probing never returns an error.
    Offline {
        /// Why the store is considered offline.
        reason: String,
    },
}

impl BackendHealth {
    /// Whether the store is reachable.
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }
}

impl std::fmt::Display for BackendHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => f.write_str("online"),
            Self::Offline { reason } => write!(f, "offline: {reason}"),
        }
    }
}

/// A transport for persisting and looking up verification records.
///
/// Implementations must be `Send + Sync` so the service can be shared
/// across async tasks behind an `Arc`. One registration or lookup is one
/// awaited outbound call; implementations do not retry internally.
#[allow(async_fn_in_trait)]
pub trait VerificationBackend: Send + Sync {
    /// Insert a new verification record. The hash is the unique key;
    /// inserting a hash that already exists fails with
    /// [`BackendError::DuplicateRecord`].
    async fn insert_record(
        &self,
        record: &NewVerificationRecord,
    ) -> Result<VerificationRecord, BackendError>;

    /// Look up the public view of a record by hash. `Ok(None)` means no
    /// record exists — the negative case of the genuineness check, not
    /// an error.
    async fn lookup_by_hash(
        &self,
        hash: &VerificationHash,
    ) -> Result<Option<PublicVerification>, BackendError>;

    /// Probe record-store availability. Never returns an error — an
    /// unreachable store is `Offline`.
    async fn health(&self) -> BackendHealth;

    /// Human-readable name of this backend implementation.
    fn backend_name(&self) -> &'static str;
}

/// The configuration-selected backend.
///
/// An enum rather than a trait object so the async trait methods stay
/// plain `async fn` and the concrete future types remain `Send`.
#[derive(Debug, Clone)]
pub enum AnyBackend {
    /// Direct record-store REST access.
    Rest(crate::rest::RestBackend),
    /// Legacy script-endpoint transport.
    Script(crate::script::ScriptBackend),
    /// In-memory backend for tests and development.
    Mock(crate::mock::MockBackend),
}

impl VerificationBackend for AnyBackend {
    async fn insert_record(
        &self,
        record: &NewVerificationRecord,
    ) -> Result<VerificationRecord, BackendError> {
        match self {
            Self::Rest(b) => b.insert_record(record).await,
            Self::Script(b) => b.insert_record(record).await,
            Self::Mock(b) => b.insert_record(record).await,
        }
    }

    async fn lookup_by_hash(
        &self,
        hash: &VerificationHash,
    ) -> Result<Option<PublicVerification>, BackendError> {
        match self {
            Self::Rest(b) => b.lookup_by_hash(hash).await,
            Self::Script(b) => b.lookup_by_hash(hash).await,
            Self::Mock(b) => b.lookup_by_hash(hash).await,
        }
    }

    async fn health(&self) -> BackendHealth {
        match self {
            Self::Rest(b) => b.health().await,
            Self::Script(b) => b.health().await,
            Self::Mock(b) => b.health().await,
        }
    }

    fn backend_name(&self) -> &'static str {
        match self {
            Self::Rest(b) => b.backend_name(),
            Self::Script(b) => b.backend_name(),
            Self::Mock(b) => b.backend_name(),
        }
    }
}
