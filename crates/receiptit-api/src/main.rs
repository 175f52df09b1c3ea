//! Receipt verification API server.
//!
//! Reads its backend and store configuration from the environment (see
//! `receiptit_client::ServiceConfig`), binds `RECEIPTIT_API_PORT`
//! (default 8080), and serves the router from [`receiptit_api::app`].

use std::net::SocketAddr;

use receiptit_api::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("RECEIPTIT_API_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let state = match AppState::from_env() {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "invalid service configuration");
            std::process::exit(1);
        }
    };
    let app = receiptit_api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("receiptit-api listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
