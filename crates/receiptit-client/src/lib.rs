//! # receiptit-client — Verification Workflow and Record-Store Transports
//!
//! High-level registration/verification workflow over a polymorphic
//! record-store backend.
//!
//! ## Architecture
//!
//! The [`VerificationBackend`] trait abstracts over how verification
//! records reach the store:
//!
//! - [`RestBackend`] — direct PostgREST-style record store access
//!   (the normal deployment),
//! - [`ScriptBackend`] — legacy script-endpoint transport for
//!   deployments without direct store access,
//! - [`MockBackend`] — in-memory implementation for tests and
//!   development.
//!
//! [`AnyBackend`] selects between them from [`BackendConfig`], so call
//! sites never carry ad hoc fallback chains. Both HTTP transports share
//! the single fingerprint implementation in `receiptit-crypto` — there
//! is no per-transport hash variant.
//!
//! [`VerificationService`] composes fingerprinting, the backend, the
//! explicit [`RegistrationCache`], and the verification/QR link builders
//! into the three operations the product needs: register, verify,
//! health.

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod links;
pub mod mock;
pub mod rest;
pub mod script;
pub mod service;

pub use backend::{AnyBackend, BackendHealth, VerificationBackend};
pub use cache::{InMemoryCache, RegistrationCache};
pub use config::{BackendConfig, BackendKind, ConfigError, ServiceConfig};
pub use error::BackendError;
pub use links::{build_links, VerificationLinks};
pub use mock::MockBackend;
pub use rest::{RestBackend, RestConfig};
pub use script::{ScriptBackend, ScriptConfig};
pub use service::{HealthReport, Outcome, Registration, ServiceError, VerificationService};
