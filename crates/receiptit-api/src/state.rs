//! # Shared Application State
//!
//! The router state is the verification service behind an `Arc`, so
//! every handler clones a pointer, not the service.

use std::sync::Arc;

use receiptit_client::{AnyBackend, InMemoryCache, ServiceConfig, ServiceError, VerificationService};

/// Shared state for all API routes.
#[derive(Clone)]
pub struct AppState {
    /// The verification workflow over the configured backend.
    pub service: Arc<VerificationService<AnyBackend, InMemoryCache>>,
}

impl AppState {
    /// Wrap an assembled service.
    pub fn new(service: VerificationService<AnyBackend, InMemoryCache>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Build the state from environment configuration.
    pub fn from_env() -> Result<Self, ServiceError> {
        let config = ServiceConfig::from_env()?;
        Ok(Self::new(VerificationService::from_config(config)?))
    }
}
