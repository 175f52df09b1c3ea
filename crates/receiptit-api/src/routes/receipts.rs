//! Issuing-side routes: receipt registration and full-receipt checks.
//!
//! Registration is the authenticated write path, performed once when a
//! receipt is issued. The verify route here recomputes the fingerprint
//! from a full receipt body; the hash-only public path lives in
//! [`super::verify`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use receiptit_client::Registration;
use receiptit_core::Receipt;

use crate::error::ApiError;
use crate::routes::verify::VerifyReport;
use crate::state::AppState;

/// Router for `/api/v1/receipts/*`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/receipts", post(register_receipt))
        .route("/api/v1/receipts/verify", post(verify_receipt))
}

/// `POST /api/v1/receipts` — register a receipt and return its hash and
/// public links. 409 if a record for this fingerprint already exists.
async fn register_receipt(
    State(state): State<AppState>,
    Json(receipt): Json<Receipt>,
) -> Result<(StatusCode, Json<Registration>), ApiError> {
    let registration = state.service.register(&receipt).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

/// `POST /api/v1/receipts/verify` — recompute the fingerprint of the
/// submitted receipt and report whether a record exists for it.
async fn verify_receipt(
    State(state): State<AppState>,
    Json(receipt): Json<Receipt>,
) -> Result<Json<VerifyReport>, ApiError> {
    let outcome = state.service.verify(&receipt).await?;
    Ok(Json(VerifyReport::from(outcome)))
}
