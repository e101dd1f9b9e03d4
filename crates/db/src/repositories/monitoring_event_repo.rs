//! Repository for the `monitoring_events` table.

use smartband_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::monitoring_event::MonitoringEventRow;

/// Column list for `monitoring_events` queries.
const COLUMNS: &str =
    "id, event_type, source_entity_type, source_entity_id, payload, occurred_at, created_at";

/// Provides read/write operations for persisted domain events.
pub struct MonitoringEventRepo;

impl MonitoringEventRepo {
    /// Insert a new event row, returning the generated ID.
    pub async fn insert(
        pool: &PgPool,
        event_type: &str,
        source_entity_type: Option<&str>,
        source_entity_id: Option<DbId>,
        payload: &serde_json::Value,
        occurred_at: Timestamp,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO monitoring_events \
                (event_type, source_entity_type, source_entity_id, payload, occurred_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(event_type)
        .bind(source_entity_type)
        .bind(source_entity_id)
        .bind(payload)
        .bind(occurred_at)
        .fetch_one(pool)
        .await
    }

    /// All events recorded against one source entity, oldest first.
    pub async fn list_for_source(
        pool: &PgPool,
        source_entity_type: &str,
        source_entity_id: DbId,
    ) -> Result<Vec<MonitoringEventRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM monitoring_events \
             WHERE source_entity_type = $1 AND source_entity_id = $2 \
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, MonitoringEventRow>(&query)
            .bind(source_entity_type)
            .bind(source_entity_id)
            .fetch_all(pool)
            .await
    }
}
