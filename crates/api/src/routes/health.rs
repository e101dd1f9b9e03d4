use axum::{routing::get, Json, Router};
use serde::Serialize;
use smartband_core::types::Timestamp;

use crate::state::AppState;

/// Service name reported by liveness endpoints.
pub const SERVICE_NAME: &str = "smart-band-edge-service";

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub timestamp: Timestamp,
}

/// GET /health -- process liveness. Does not touch the database; use
/// `/keepalive` for that.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now(),
    })
}

/// Mount health check routes (root level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
