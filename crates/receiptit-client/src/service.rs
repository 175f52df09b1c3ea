//! # Verification Service — Registration and Genuineness Workflow
//!
//! Composes the fingerprint, the configured backend, the registration
//! cache, and the link builders into the three operations the product
//! needs:
//!
//! - [`register`](VerificationService::register) — once per receipt, at
//!   issuance: fingerprint, persist, build links, cache.
//! - [`verify`](VerificationService::verify) /
//!   [`verify_hash`](VerificationService::verify_hash) — recompute (or
//!   accept) a hash and look it up. The hash itself is the lookup key;
//!   an unknown hash is the negative case, not an error.
//! - [`health`](VerificationService::health) — record-store
//!   availability for the UI.
//!
//! Correctness requires that registration for a receipt completes before
//! that receipt is ever verified; that ordering is the caller's
//! responsibility, not enforced here.

use chrono::Utc;
use receiptit_core::{
    NewVerificationRecord, PublicVerification, Receipt, ReceiptNumber, StoreProfile,
    ValidationError, VerificationHash, VerificationRecord,
};
use receiptit_crypto::{receipt_fingerprint, CryptoError, SecretKey};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::backend::{AnyBackend, VerificationBackend};
use crate::cache::{InMemoryCache, RegistrationCache};
use crate::config::{ConfigError, ServiceConfig};
use crate::error::BackendError;
use crate::links::build_links;

/// Errors from the verification workflow.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The receipt failed boundary validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Fingerprint computation failed. Fatal to the operation — there is
    /// no fallback encoding.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// The record store call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A link could not be constructed.
    #[error("failed to build verification link: {0}")]
    Link(#[from] url::ParseError),

    /// Service configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Outcome of a registration: the stored record plus the public links
/// that print on the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// The canonical fingerprint.
    pub hash: VerificationHash,
    /// Public verification URL (`{origin}/verify?hash={hex}`).
    pub verification_url: String,
    /// QR image URL encoding the verification URL.
    pub qr_url: String,
    /// The record as stored.
    pub record: VerificationRecord,
}

/// Outcome of a genuineness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A record exists for this hash; display fields attached.
    Genuine(PublicVerification),
    /// No record for this hash — modified or unknown receipt. Lookup is
    /// by hash alone, so a tampered receipt and a never-registered one
    /// are indistinguishable by design.
    NotFound,
}

impl Outcome {
    /// Whether the receipt checked out as genuine.
    pub fn is_genuine(&self) -> bool {
        matches!(self, Self::Genuine(_))
    }
}

/// Record-store availability report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    /// Whether the store answered the probe.
    pub online: bool,
    /// Name of the backend that was probed.
    pub backend: &'static str,
}

/// The verification workflow over a configured backend and cache.
#[derive(Debug, Clone)]
pub struct VerificationService<B, C = InMemoryCache> {
    backend: B,
    cache: C,
    key: SecretKey,
    origin: Url,
    store: StoreProfile,
}

impl VerificationService<AnyBackend, InMemoryCache> {
    /// Build a service from environment-style configuration.
    pub fn from_config(config: ServiceConfig) -> Result<Self, ServiceError> {
        let backend = config.backend.build()?;
        let key = SecretKey::from_bytes(config.hmac_secret.into_bytes())?;
        let origin = Url::parse(&config.public_origin)?;
        let store = StoreProfile {
            store_id: receiptit_core::StoreId::new(config.store_id)?,
            name: config.store_name,
        };
        Ok(Self::new(backend, InMemoryCache::new(), key, origin, store))
    }
}

impl<B, C> VerificationService<B, C>
where
    B: VerificationBackend,
    C: RegistrationCache,
{
    /// Assemble a service from its parts.
    pub fn new(backend: B, cache: C, key: SecretKey, origin: Url, store: StoreProfile) -> Self {
        Self {
            backend,
            cache,
            key,
            origin,
            store,
        }
    }

    /// The issuing store this service registers receipts for.
    pub fn store(&self) -> &StoreProfile {
        &self.store
    }

    /// Register a receipt: validate, fingerprint, persist, build links,
    /// cache. One insert, no retries — a duplicate or store failure is
    /// reported to the caller as-is.
    pub async fn register(&self, receipt: &Receipt) -> Result<Registration, ServiceError> {
        self.store.matches(receipt)?;
        let hash = receipt_fingerprint(receipt, &self.key)?;

        let new_record = NewVerificationRecord {
            hash: hash.clone(),
            store_id: receipt.store_id.clone(),
            store_name: self.store.name.clone(),
            total_amount: receipt.total(),
            issued_at: Utc::now(),
        };
        let record = self.backend.insert_record(&new_record).await?;
        let links = build_links(&self.origin, &hash)?;

        let registration = Registration {
            hash,
            verification_url: links.verification_url.to_string(),
            qr_url: links.qr_url.to_string(),
            record,
        };
        self.cache
            .put(receipt.receipt_number.clone(), registration.clone());
        tracing::info!(
            receipt_number = %receipt.receipt_number,
            hash = %registration.hash,
            "verification record registered"
        );
        Ok(registration)
    }

    /// Check a receipt as presented: recompute the fingerprint from the
    /// data in hand and look it up.
    pub async fn verify(&self, receipt: &Receipt) -> Result<Outcome, ServiceError> {
        let hash = receipt_fingerprint(receipt, &self.key)?;
        self.verify_hash(&hash).await
    }

    /// Check a presented hash directly — the public QR path.
    pub async fn verify_hash(&self, hash: &VerificationHash) -> Result<Outcome, ServiceError> {
        match self.backend.lookup_by_hash(hash).await? {
            Some(public) => Ok(Outcome::Genuine(public)),
            None => {
                tracing::debug!(%hash, "no verification record for hash");
                Ok(Outcome::NotFound)
            }
        }
    }

    /// Probe record-store availability. Never fails.
    pub async fn health(&self) -> HealthReport {
        let health = self.backend.health().await;
        if !health.is_online() {
            tracing::warn!(backend = self.backend.backend_name(), %health, "record store probe failed");
        }
        HealthReport {
            online: health.is_online(),
            backend: self.backend.backend_name(),
        }
    }

    /// Fetch the locally cached registration for a receipt number, if
    /// this instance registered it.
    pub fn cached(&self, receipt_number: &ReceiptNumber) -> Option<Registration> {
        self.cache.get(receipt_number)
    }
}
