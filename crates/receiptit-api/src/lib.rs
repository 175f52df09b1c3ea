//! # receiptit-api — HTTP Facade for Receipt Verification
//!
//! Axum service in front of the verification workflow.
//!
//! ## API Surface
//!
//! | Route                          | Module                | Purpose                     |
//! |--------------------------------|-----------------------|-----------------------------|
//! | `POST /api/v1/receipts`        | [`routes::receipts`]  | Register a receipt          |
//! | `POST /api/v1/receipts/verify` | [`routes::receipts`]  | Check a full receipt        |
//! | `GET /verify?hash=`            | [`routes::verify`]    | Public hash-only check      |
//! | `GET /health`                  | [`routes::health`]    | Record-store availability   |
//!
//! The public `/verify` route is unauthenticated by design: it accepts
//! only a fingerprint and returns only the restricted public view.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::receipts::router())
        .merge(routes::verify::router())
        .merge(routes::health::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
