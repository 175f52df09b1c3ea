//! # REST Record-Store Backend
//!
//! Direct HTTP client for the verification record store (PostgREST-style
//! REST surface). This is the normal production transport: inserts go to
//! the `verification_records` table, public lookups go through the
//! restricted `public_verifications` view.
//!
//! ## Error Handling
//!
//! HTTP errors map to [`BackendError`] with the endpoint URL, status,
//! and a response body excerpt. A duplicate-key conflict (409) becomes
//! [`BackendError::DuplicateRecord`] so the workflow can report
//! "already registered" distinctly from an outage.
//!
//! ## Timeout & Retry
//!
//! One per-request timeout (configurable, default 30s). No retries —
//! registration is once-per-receipt and the caller decides what to
//! surface on failure.

use std::time::Duration;

use receiptit_core::{
    NewVerificationRecord, PublicVerification, VerificationHash, VerificationRecord,
};

use crate::backend::{BackendHealth, VerificationBackend};
use crate::error::BackendError;

/// Configuration for the REST record-store backend.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL of the record store (e.g. `https://abc.supabase.co`).
    pub base_url: String,
    /// API key sent as both `apikey` and bearer token.
    pub api_key: String,
    /// Request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl RestConfig {
    /// Create a configuration with the default timeout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: 30,
        }
    }
}

/// HTTP client for the verification record store.
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: reqwest::Client,
    base_url: String,
}

impl RestBackend {
    /// Build the backend from configuration. Fails if the API key
    /// contains characters that cannot form a header value.
    pub fn new(config: RestConfig) -> Result<Self, BackendError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let key_value = reqwest::header::HeaderValue::from_str(&config.api_key).map_err(|_| {
            BackendError::Unavailable {
                reason: "API key contains invalid header characters".to_string(),
            }
        })?;
        headers.insert("apikey", key_value);
        let bearer =
            reqwest::header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|_| BackendError::Unavailable {
                    reason: "API key contains invalid header characters".to_string(),
                })?;
        headers.insert(reqwest::header::AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| BackendError::Unavailable {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn records_endpoint(&self) -> String {
        format!("{}/rest/v1/verification_records", self.base_url)
    }

    fn public_view_endpoint(&self) -> String {
        format!("{}/rest/v1/public_verifications", self.base_url)
    }
}

impl VerificationBackend for RestBackend {
    async fn insert_record(
        &self,
        record: &NewVerificationRecord,
    ) -> Result<VerificationRecord, BackendError> {
        let endpoint = self.records_endpoint();
        let resp = self
            .client
            .post(&endpoint)
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await
            .map_err(|e| BackendError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::CONFLICT {
            return Err(BackendError::DuplicateRecord {
                hash: record.hash.to_hex(),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%endpoint, status = status.as_u16(), "record insert rejected");
            return Err(BackendError::Api {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        // PostgREST returns the inserted representation as a one-element array.
        let mut rows: Vec<VerificationRecord> =
            resp.json().await.map_err(|e| BackendError::Deserialization {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        rows.pop().ok_or(BackendError::Api {
            endpoint,
            status: status.as_u16(),
            body: "empty insert representation".to_string(),
        })
    }

    async fn lookup_by_hash(
        &self,
        hash: &VerificationHash,
    ) -> Result<Option<PublicVerification>, BackendError> {
        let endpoint = self.public_view_endpoint();
        let filter = format!("eq.{hash}");
        let resp = self
            .client
            .get(&endpoint)
            .query(&[("hash", filter.as_str()), ("limit", "1")])
            .send()
            .await
            .map_err(|e| BackendError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<PublicVerification> =
            resp.json().await.map_err(|e| BackendError::Deserialization {
                endpoint,
                source: e,
            })?;
        Ok(rows.into_iter().next())
    }

    async fn health(&self) -> BackendHealth {
        let endpoint = format!("{}/rest/v1/", self.base_url);
        match self.client.get(&endpoint).send().await {
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
        "RestBackend"
    }
}
