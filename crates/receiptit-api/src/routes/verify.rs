//! Public hash-only verification route — what a scanned QR code opens.
//!
//! Lookup is by fingerprint alone. An unknown hash produces a negative
//! report, never an error: a tampered receipt and a never-registered one
//! are indistinguishable on this path.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use receiptit_client::Outcome;
use receiptit_core::{PublicVerification, VerificationHash};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Router for `/verify`.
pub fn router() -> Router<AppState> {
    Router::new().route("/verify", get(verify_hash))
}

/// Query parameters for the public verification route.
#[derive(Debug, Deserialize)]
struct VerifyParams {
    /// The fingerprint from the QR code, 64 hex characters.
    hash: String,
}

/// Genuineness report returned by both verification routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyReport {
    /// Whether a record exists for the checked fingerprint.
    pub is_genuine: bool,
    /// Display fields from the matching record, when genuine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<PublicVerification>,
}

impl From<Outcome> for VerifyReport {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Genuine(public) => Self {
                is_genuine: true,
                verification: Some(public),
            },
            Outcome::NotFound => Self {
                is_genuine: false,
                verification: None,
            },
        }
    }
}

/// `GET /verify?hash={hex}` — look up a presented fingerprint.
/// 422 if the hash is not 64 hex characters.
async fn verify_hash(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Result<Json<VerifyReport>, ApiError> {
    let hash = VerificationHash::from_hex(&params.hash)?;
    let outcome = state.service.verify_hash(&hash).await?;
    Ok(Json(VerifyReport::from(outcome)))
}
