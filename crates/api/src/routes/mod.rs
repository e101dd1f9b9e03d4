pub mod health;
pub mod heart_rate;
pub mod maintenance;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /health-monitoring/data-records                           record reading (POST)
/// /health-monitoring/data-records/{smart_band_id}/history    reading history (GET)
/// /health-monitoring/data-records/{smart_band_id}/statistics reading statistics (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/health-monitoring/data-records", heart_rate::router())
}
