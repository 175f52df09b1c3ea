//! # Legacy Script-Endpoint Backend
//!
//! Transport for deployments where the record store is not directly
//! reachable and writes go through a hosted script endpoint instead.
//! Operations are plain GET requests with an `action` query parameter
//! and JSON responses.
//!
//! Functionally equivalent to [`RestBackend`](crate::rest::RestBackend):
//! the same canonical fingerprint is registered and looked up, computed
//! by `receiptit-crypto`. This transport has no hash logic of its own
//! and mixes no timestamp or other ambient input into what it submits.

use std::time::Duration;

use chrono::{DateTime, Utc};
use receiptit_core::{
    NewVerificationRecord, PublicVerification, VerificationHash, VerificationRecord,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::{BackendHealth, VerificationBackend};
use crate::error::BackendError;

/// Configuration for the script-endpoint backend.
#[derive(Debug, Clone)]
pub struct ScriptConfig {
    /// Full URL of the hosted script endpoint.
    pub endpoint_url: String,
    /// Request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl ScriptConfig {
    /// Create a configuration with the default timeout.
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            timeout_secs: 30,
        }
    }
}

/// Response envelope for `action=register`.
#[derive(Debug, Deserialize)]
struct RegisterResponse {
    success: bool,
    record_id: Option<Uuid>,
    error: Option<String>,
}

/// Response envelope for `action=verify`.
#[derive(Debug, Deserialize)]
struct VerifyResponse {
    found: bool,
    store_name: Option<String>,
    total_amount: Option<Decimal>,
    issued_at: Option<DateTime<Utc>>,
}

/// HTTP client for the legacy script endpoint.
#[derive(Debug, Clone)]
pub struct ScriptBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl ScriptBackend {
    /// Build the backend from configuration.
    pub fn new(config: ScriptConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::Unavailable {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint_url,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        query: &[(&str, String)],
    ) -> Result<T, BackendError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(query)
            .send()
            .await
            .map_err(|e| BackendError::Http {
                endpoint: self.endpoint.clone(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
                body,
            });
        }

        resp.json().await.map_err(|e| BackendError::Deserialization {
            endpoint: self.endpoint.clone(),
            source: e,
        })
    }
}

impl VerificationBackend for ScriptBackend {
    async fn insert_record(
        &self,
        record: &NewVerificationRecord,
    ) -> Result<VerificationRecord, BackendError> {
        let query = [
            ("action", "register".to_string()),
            ("hash", record.hash.to_hex()),
            ("store_id", record.store_id.as_str().to_string()),
            ("store_name", record.store_name.clone()),
            ("total", format!("{:.2}", record.total_amount)),
            ("issued_at", record.issued_at.to_rfc3339()),
        ];
        let response: RegisterResponse = self.get_json(&query).await?;

        if !response.success {
            let reason = response.error.unwrap_or_else(|| "unspecified".to_string());
            if reason.to_ascii_lowercase().contains("duplicate") {
                return Err(BackendError::DuplicateRecord {
                    hash: record.hash.to_hex(),
                });
            }
            return Err(BackendError::Api {
                endpoint: self.endpoint.clone(),
                status: 200,
                body: reason,
            });
        }

        let id = response.record_id.ok_or(BackendError::Api {
            endpoint: self.endpoint.clone(),
            status: 200,
            body: "register response missing record_id".to_string(),
        })?;

        Ok(VerificationRecord {
            id,
            hash: record.hash.clone(),
            store_id: record.store_id.clone(),
            store_name: record.store_name.clone(),
            total_amount: record.total_amount,
            issued_at: record.issued_at,
        })
    }

    async fn lookup_by_hash(
        &self,
        hash: &VerificationHash,
    ) -> Result<Option<PublicVerification>, BackendError> {
        let query = [
            ("action", "verify".to_string()),
            ("hash", hash.to_hex()),
        ];
        let response: VerifyResponse = self.get_json(&query).await?;

        if !response.found {
            return Ok(None);
        }
        match (response.store_name, response.total_amount, response.issued_at) {
            (Some(store_name), Some(total_amount), Some(issued_at)) => {
                Ok(Some(PublicVerification {
                    store_name,
                    total_amount,
                    issued_at,
                }))
            }
            _ => Err(BackendError::Api {
                endpoint: self.endpoint.clone(),
                status: 200,
                body: "verify response is missing display fields".to_string(),
            }),
        }
    }

    async fn health(&self) -> BackendHealth {
        let query = [("action", "ping")];
        match self.client.get(&self.endpoint).query(&query).send().await {
            Ok(resp) if resp.status().is_success() => BackendHealth::Online,
            Ok(resp) => BackendHealth::Offline {
                reason: format!("HTTP {}", resp.status()),
            },
            Err(e) => BackendHealth::Offline {
                reason: e.to_string(),
            },
        }
    }

    fn backend_name(&self) -> &'static str {
        "ScriptBackend"
    }
}
