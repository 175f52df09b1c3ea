// SPDX-License-Identifier: BUSL-1.1
//! Record store stub server — standalone development server.
//!
//! In-memory implementation of the two record-store surfaces the
//! verification client speaks: the PostgREST-style REST surface
//! (`/rest/v1/*`) and the legacy script surface (`/exec?action=*`).
//! Lets the API and client run end to end without a hosted store.
//!
//! Storage is in-memory (DashMap) with no persistence — data is lost on
//! restart.

mod routes;
mod store;

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("STORE_STUB_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8090);

    let state = store::AppState::new();
    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("receiptit-store-stub listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
