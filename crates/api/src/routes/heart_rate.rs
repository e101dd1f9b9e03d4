//! Route definitions for heart rate ingestion and queries.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::heart_rate;
use crate::state::AppState;

/// Heart rate routes mounted at `/health-monitoring/data-records`.
///
/// ```text
/// POST /                            -> record_heart_rate
/// GET  /{smart_band_id}/history     -> get_history
/// GET  /{smart_band_id}/statistics  -> get_statistics
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(heart_rate::record_heart_rate))
        .route("/{smart_band_id}/history", get(heart_rate::get_history))
        .route(
            "/{smart_band_id}/statistics",
            get(heart_rate::get_statistics),
        )
}
