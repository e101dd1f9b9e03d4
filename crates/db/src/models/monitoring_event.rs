//! Persisted domain event model.

use serde::Serialize;
use smartband_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `monitoring_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MonitoringEventRow {
    pub id: DbId,
    pub event_type: String,
    pub source_entity_type: Option<String>,
    pub source_entity_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub occurred_at: Timestamp,
    pub created_at: Timestamp,
}
