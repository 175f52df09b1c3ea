// SPDX-License-Identifier: BUSL-1.1
//! Route definitions for the record store stub.
//!
//! Implements the endpoints the verification client actually calls, with
//! responses that deserialize cleanly into the client's types: the REST
//! surface returns representation arrays and 409 on duplicate keys, the
//! script surface returns `{success, record_id}` / `{found, ...}`
//! envelopes.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use receiptit_core::{
    NewVerificationRecord, PublicVerification, StoreId, VerificationHash, VerificationRecord,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::store::AppState;

/// Build the complete router with both record-store surfaces.
pub fn router(state: AppState) -> Router {
    Router::new()
        // REST surface
        .route("/rest/v1/", get(rest_health))
        .route("/rest/v1/verification_records", post(rest_insert))
        .route("/rest/v1/public_verifications", get(rest_public_lookup))
        // Legacy script surface
        .route("/exec", get(script_dispatch))
        // Fallback: 501 Not Implemented
        .fallback(not_implemented)
        .with_state(state)
}

async fn not_implemented() -> StatusCode {
    StatusCode::NOT_IMPLEMENTED
}

// ── REST surface ────────────────────────────────────────────────────

async fn rest_health() -> StatusCode {
    StatusCode::OK
}

async fn rest_insert(
    State(state): State<AppState>,
    Json(new): Json<NewVerificationRecord>,
) -> Response {
    let key = new.hash.to_hex();
    if state.records().contains_key(&key) {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "code": "23505",
                "message": "duplicate key value violates unique constraint \"verification_records_hash_key\""
            })),
        )
            .into_response();
    }

    let record = VerificationRecord {
        id: Uuid::new_v4(),
        hash: new.hash,
        store_id: new.store_id,
        store_name: new.store_name,
        total_amount: new.total_amount,
        issued_at: new.issued_at,
    };
    state.records().insert(key, record.clone());
    // Representation array, as the real store returns it.
    (StatusCode::CREATED, Json(vec![record])).into_response()
}

/// Query parameters for the public view: `hash=eq.{hex}` plus an
/// optional `limit`.
#[derive(Debug, Deserialize)]
struct PublicQuery {
    hash: String,
    limit: Option<usize>,
}

async fn rest_public_lookup(
    State(state): State<AppState>,
    Query(query): Query<PublicQuery>,
) -> Response {
    let Some(hex) = query.hash.strip_prefix("eq.") else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "unsupported hash filter, expected eq.<hex>"})),
        )
            .into_response();
    };

    let mut rows: Vec<PublicVerification> = state
        .records()
        .get(hex)
        .map(|entry| vec![entry.value().to_public()])
        .unwrap_or_default();
    rows.truncate(query.limit.unwrap_or(usize::MAX));
    Json(rows).into_response()
}

// ── Script surface ──────────────────────────────────────────────────

/// Query parameters for the script surface. Everything but `action` is
/// optional at the HTTP level; each action checks what it needs.
#[derive(Debug, Deserialize)]
struct ScriptParams {
    action: String,
    hash: Option<String>,
    store_id: Option<String>,
    store_name: Option<String>,
    total: Option<Decimal>,
    issued_at: Option<DateTime<Utc>>,
}

async fn script_dispatch(State(state): State<AppState>, Query(params): Query<ScriptParams>) -> Response {
    match params.action.as_str() {
        "ping" => StatusCode::OK.into_response(),
        "register" => script_register(&state, params),
        "verify" => script_verify(&state, params),
        other => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": format!("unknown action: {other}")})),
        )
            .into_response(),
    }
}

fn script_register(state: &AppState, params: ScriptParams) -> Response {
    let parsed = script_record(params);
    let new = match parsed {
        Ok(new) => new,
        Err(reason) => {
            return Json(json!({"success": false, "error": reason})).into_response();
        }
    };

    let key = new.hash.to_hex();
    if state.records().contains_key(&key) {
        return Json(json!({"success": false, "error": "duplicate hash"})).into_response();
    }

    let record = VerificationRecord {
        id: Uuid::new_v4(),
        hash: new.hash,
        store_id: new.store_id,
        store_name: new.store_name,
        total_amount: new.total_amount,
        issued_at: new.issued_at,
    };
    let id = record.id;
    state.records().insert(key, record);
    Json(json!({"success": true, "record_id": id})).into_response()
}

/// Assemble a record payload from the flat script query parameters.
fn script_record(params: ScriptParams) -> Result<NewVerificationRecord, String> {
    let require = |name: &str, value: Option<String>| {
        value.ok_or_else(|| format!("missing parameter: {name}"))
    };
    let hash = VerificationHash::from_hex(&require("hash", params.hash)?)
        .map_err(|e| e.to_string())?;
    let store_id =
        StoreId::new(require("store_id", params.store_id)?).map_err(|e| e.to_string())?;
    let store_name = require("store_name", params.store_name)?;
    let total_amount = params.total.ok_or("missing parameter: total")?;
    let issued_at = params.issued_at.ok_or("missing parameter: issued_at")?;
    Ok(NewVerificationRecord {
        hash,
        store_id,
        store_name,
        total_amount,
        issued_at,
    })
}

fn script_verify(state: &AppState, params: ScriptParams) -> Response {
    let Some(hex) = params.hash else {
        return Json(json!({"found": false})).into_response();
    };
    match state.records().get(&hex) {
        Some(entry) => {
            let public = entry.value().to_public();
            Json(json!({
                "found": true,
                "store_name": public.store_name,
                "total_amount": public.total_amount,
                "issued_at": public.issued_at
            }))
            .into_response()
        }
        None => Json(json!({"found": false})).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn new_record_json(hash_byte: &str) -> Value {
        json!({
            "hash": hash_byte.repeat(32),
            "store_id": "S1",
            "store_name": "Corner Shop",
            "total_amount": "2000.00",
            "issued_at": "2024-01-01T10:00:00Z"
        })
    }

    fn post_record(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/rest/v1/verification_records")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn rest_insert_returns_representation_array() {
        let app = router(AppState::new());
        let response = app.oneshot(post_record(new_record_json("ab"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["hash"], json!("ab".repeat(32)));
        assert_eq!(rows[0]["store_name"], json!("Corner Shop"));
        assert!(rows[0]["id"].as_str().is_some());
    }

    #[tokio::test]
    async fn rest_duplicate_insert_is_conflict() {
        let app = router(AppState::new());
        app.clone()
            .oneshot(post_record(new_record_json("ab")))
            .await
            .unwrap();

        let response = app.oneshot(post_record(new_record_json("ab"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert_eq!(body["code"], json!("23505"));
    }

    #[tokio::test]
    async fn rest_public_lookup_round_trip() {
        let app = router(AppState::new());
        app.clone()
            .oneshot(post_record(new_record_json("cd")))
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!(
                        "/rest/v1/public_verifications?hash=eq.{}&limit=1",
                        "cd".repeat(32)
                    ))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let rows = body_json(response).await;
        assert_eq!(rows[0]["store_name"], json!("Corner Shop"));
        // Restricted view: no hash, id, or store id.
        assert!(rows[0].get("hash").is_none());
        assert!(rows[0].get("store_id").is_none());
    }

    #[tokio::test]
    async fn rest_public_lookup_unknown_hash_is_empty_array() {
        let app = router(AppState::new());
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!(
                        "/rest/v1/public_verifications?hash=eq.{}",
                        "00".repeat(32)
                    ))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn rest_health_is_ok() {
        let app = router(AppState::new());
        let response = app
            .oneshot(Request::builder().uri("/rest/v1/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    fn script_uri(pairs: &[(&str, String)]) -> String {
        let query: Vec<String> = pairs.iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("/exec?{}", query.join("&"))
    }

    #[tokio::test]
    async fn script_register_then_verify_round_trip() {
        let app = router(AppState::new());
        let hash = "ef".repeat(32);
        let register = script_uri(&[
            ("action", "register".to_string()),
            ("hash", hash.clone()),
            ("store_id", "S1".to_string()),
            ("store_name", "Corner%20Shop".to_string()),
            ("total", "2000.00".to_string()),
            ("issued_at", "2024-01-01T10:00:00Z".to_string()),
        ]);
        let response = app
            .clone()
            .oneshot(Request::builder().uri(register).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(true));
        assert!(body["record_id"].as_str().is_some());

        let verify = script_uri(&[("action", "verify".to_string()), ("hash", hash)]);
        let response = app
            .oneshot(Request::builder().uri(verify).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["found"], json!(true));
        assert_eq!(body["store_name"], json!("Corner Shop"));
    }

    #[tokio::test]
    async fn script_duplicate_register_reports_duplicate_error() {
        let app = router(AppState::new());
        let register = script_uri(&[
            ("action", "register".to_string()),
            ("hash", "aa".repeat(32)),
            ("store_id", "S1".to_string()),
            ("store_name", "Shop".to_string()),
            ("total", "10.00".to_string()),
            ("issued_at", "2024-01-01T10:00:00Z".to_string()),
        ]);
        app.clone()
            .oneshot(
                Request::builder()
                    .uri(register.clone())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let response = app
            .oneshot(Request::builder().uri(register).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert!(body["error"].as_str().unwrap().contains("duplicate"));
    }

    #[tokio::test]
    async fn script_register_missing_fields_fails_cleanly() {
        let app = router(AppState::new());
        let register = script_uri(&[
            ("action", "register".to_string()),
            ("hash", "bb".repeat(32)),
        ]);
        let response = app
            .oneshot(Request::builder().uri(register).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert!(body["error"].as_str().unwrap().contains("missing"));
    }

    #[tokio::test]
    async fn script_verify_unknown_hash_is_not_found() {
        let app = router(AppState::new());
        let verify = script_uri(&[
            ("action", "verify".to_string()),
            ("hash", "99".repeat(32)),
        ]);
        let response = app
            .oneshot(Request::builder().uri(verify).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body, json!({"found": false}));
    }

    #[tokio::test]
    async fn script_ping_is_ok() {
        let app = router(AppState::new());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/exec?action=ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_not_implemented() {
        let app = router(AppState::new());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/rest/v1/other_table")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }
}
