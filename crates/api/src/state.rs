use std::sync::Arc;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and the bus sits behind
/// `Arc`. Server configuration is consumed when the router is built.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: smartband_db::DbPool,
    /// Bus that carries domain events derived from ingested readings.
    pub event_bus: Arc<smartband_events::EventBus>,
}
