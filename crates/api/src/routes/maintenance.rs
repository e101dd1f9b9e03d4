//! Uptime-monitor endpoints.
//!
//! Both routes answer `GET` and `HEAD`. A `HEAD` request never touches the
//! database.

use axum::extract::State;
use axum::http::Method;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use smartband_core::types::Timestamp;

use crate::state::AppState;

#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub timestamp: Timestamp,
}

#[derive(Serialize)]
pub struct KeepaliveResponse {
    pub status: &'static str,
    pub timestamp: Timestamp,
    /// `"connected"`, `"error"`, or absent for `HEAD` requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// GET|HEAD /ping -- API responsiveness without database access.
async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "pong",
        timestamp: chrono::Utc::now(),
    })
}

/// GET|HEAD /keepalive -- runs a trivial query so idle hosted databases are
/// not paused. Always answers 200; failures are reported in the body.
async fn keepalive(State(state): State<AppState>, method: Method) -> Json<KeepaliveResponse> {
    let timestamp = chrono::Utc::now();

    if method == Method::HEAD {
        return Json(KeepaliveResponse {
            status: "alive",
            timestamp,
            database: None,
            message: None,
        });
    }

    match smartband_db::health_check(&state.pool).await {
        Ok(()) => Json(KeepaliveResponse {
            status: "alive",
            timestamp,
            database: Some("connected"),
            message: Some("Keep-alive ping successful".into()),
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Keep-alive database query failed");
            Json(KeepaliveResponse {
                status: "error",
                timestamp,
                database: Some("error"),
                message: Some(e.to_string()),
            })
        }
    }
}

/// Mount maintenance routes (root level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/keepalive", get(keepalive))
}
