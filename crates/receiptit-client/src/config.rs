//! # Backend and Service Configuration
//!
//! Environment-driven configuration: one backend kind selected at
//! startup, plus the service-level settings (HMAC secret, public origin
//! for verification links, issuing store profile).
//!
//! All readers go through `from_lookup` so tests can inject values
//! without touching the process environment.

use thiserror::Error;

use crate::backend::AnyBackend;
use crate::error::BackendError;
use crate::mock::MockBackend;
use crate::rest::{RestBackend, RestConfig};
use crate::script::{ScriptBackend, ScriptConfig};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("missing configuration variable: {name}")]
    MissingVar {
        /// The variable name.
        name: &'static str,
    },

    /// A variable was set to an unusable value.
    #[error("invalid value for {name}: {value}")]
    InvalidValue {
        /// The variable name.
        name: &'static str,
        /// The offending value.
        value: String,
    },
}

/// Which transport persists verification records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Direct record-store REST access.
    Rest,
    /// Legacy script endpoint.
    Script,
    /// In-memory mock (development only).
    Mock,
}

impl std::str::FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rest" => Ok(Self::Rest),
            "script" => Ok(Self::Script),
            "mock" => Ok(Self::Mock),
            other => Err(ConfigError::InvalidValue {
                name: "RECEIPTIT_BACKEND",
                value: other.to_string(),
            }),
        }
    }
}

/// Backend selection plus transport-specific settings.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    /// Direct record-store REST access.
    Rest(RestConfig),
    /// Legacy script endpoint.
    Script(ScriptConfig),
    /// In-memory mock.
    Mock,
}

impl BackendConfig {
    /// Read the backend configuration from the process environment.
    ///
    /// Variables: `RECEIPTIT_BACKEND` (`rest`/`script`/`mock`, default
    /// `rest`), `RECEIPTIT_STORE_URL`, `RECEIPTIT_STORE_API_KEY`,
    /// `RECEIPTIT_SCRIPT_URL`, `RECEIPTIT_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|name| std::env::var(name).ok())
    }

    /// Read the backend configuration through an injectable lookup.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let kind: BackendKind = lookup("RECEIPTIT_BACKEND")
            .unwrap_or_else(|| "rest".to_string())
            .parse()?;
        let timeout_secs = match lookup("RECEIPTIT_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "RECEIPTIT_HTTP_TIMEOUT_SECS",
                value: raw,
            })?,
            None => 30,
        };

        match kind {
            BackendKind::Rest => {
                let base_url = lookup("RECEIPTIT_STORE_URL").ok_or(ConfigError::MissingVar {
                    name: "RECEIPTIT_STORE_URL",
                })?;
                let api_key =
                    lookup("RECEIPTIT_STORE_API_KEY").ok_or(ConfigError::MissingVar {
                        name: "RECEIPTIT_STORE_API_KEY",
                    })?;
                Ok(Self::Rest(RestConfig {
                    base_url,
                    api_key,
                    timeout_secs,
                }))
            }
            BackendKind::Script => {
                let endpoint_url =
                    lookup("RECEIPTIT_SCRIPT_URL").ok_or(ConfigError::MissingVar {
                        name: "RECEIPTIT_SCRIPT_URL",
                    })?;
                Ok(Self::Script(ScriptConfig {
                    endpoint_url,
                    timeout_secs,
                }))
            }
            BackendKind::Mock => Ok(Self::Mock),
        }
    }

    /// Instantiate the configured backend.
    pub fn build(self) -> Result<AnyBackend, BackendError> {
        match self {
            Self::Rest(config) => Ok(AnyBackend::Rest(RestBackend::new(config)?)),
            Self::Script(config) => Ok(AnyBackend::Script(ScriptBackend::new(config)?)),
            Self::Mock => Ok(AnyBackend::Mock(MockBackend::new())),
        }
    }
}

/// Service-level configuration: backend plus fingerprint secret, public
/// origin, and the issuing store profile.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Backend selection.
    pub backend: BackendConfig,
    /// Shared HMAC secret (`RECEIPTIT_HMAC_SECRET`).
    pub hmac_secret: String,
    /// Origin for verification links (`RECEIPTIT_PUBLIC_ORIGIN`).
    pub public_origin: String,
    /// Issuing store id (`RECEIPTIT_STORE_ID`).
    pub store_id: String,
    /// Issuing store display name (`RECEIPTIT_STORE_NAME`).
    pub store_name: String,
}

impl ServiceConfig {
    /// Read the full service configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|name| std::env::var(name).ok())
    }

    /// Read the full service configuration through an injectable lookup.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require = |name: &'static str| {
            lookup(name).ok_or(ConfigError::MissingVar { name })
        };
        Ok(Self {
            backend: BackendConfig::from_lookup(lookup)?,
            hmac_secret: require("RECEIPTIT_HMAC_SECRET")?,
            public_origin: require("RECEIPTIT_PUBLIC_ORIGIN")?,
            store_id: require("RECEIPTIT_STORE_ID")?,
            store_name: require("RECEIPTIT_STORE_NAME")?,
        })
    }
}
