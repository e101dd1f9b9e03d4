//! Repository for the `heart_rate_records` table (append-only).

use smartband_core::types::{DbId, SmartBandId};
use sqlx::PgPool;

use crate::models::heart_rate_record::{CreateHeartRateRecord, HeartRateRecord, PulseAggregatesRow};

/// Column list for `heart_rate_records` SELECT queries.
const COLUMNS: &str = "id, smart_band_id, pulse, status, recorded_at";

/// Provides insert and read operations for heart rate records.
pub struct HeartRateRecordRepo;

impl HeartRateRecordRepo {
    /// Insert a classified reading, returning the stored row.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateHeartRateRecord,
    ) -> Result<HeartRateRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO heart_rate_records (smart_band_id, pulse, status, recorded_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HeartRateRecord>(&query)
            .bind(input.smart_band_id)
            .bind(input.pulse)
            .bind(input.status.as_str())
            .bind(input.recorded_at)
            .fetch_one(pool)
            .await
    }

    /// Find a record by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<HeartRateRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM heart_rate_records WHERE id = $1");
        sqlx::query_as::<_, HeartRateRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Most recent readings for a smart band, newest first.
    ///
    /// `limit` is expected to be validated by the caller. Readings sharing a
    /// timestamp are ordered by descending id so the result is stable.
    pub async fn history(
        pool: &PgPool,
        smart_band_id: SmartBandId,
        limit: i64,
    ) -> Result<Vec<HeartRateRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM heart_rate_records \
             WHERE smart_band_id = $1 \
             ORDER BY recorded_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, HeartRateRecord>(&query)
            .bind(smart_band_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Aggregate pulse statistics over every reading of a smart band.
    ///
    /// Always returns exactly one row; aggregates are NULL when the band has
    /// no readings.
    pub async fn statistics(
        pool: &PgPool,
        smart_band_id: SmartBandId,
    ) -> Result<PulseAggregatesRow, sqlx::Error> {
        sqlx::query_as::<_, PulseAggregatesRow>(
            "SELECT \
                COUNT(*) AS total, \
                AVG(pulse)::float8 AS average, \
                MIN(pulse) AS min, \
                MAX(pulse) AS max, \
                COUNT(*) FILTER (WHERE status = 'NORMAL') AS normal_count, \
                COUNT(*) FILTER (WHERE status = 'LOW') AS low_count, \
                COUNT(*) FILTER (WHERE status = 'HIGH') AS high_count, \
                COUNT(*) FILTER (WHERE status = 'CRITICAL') AS critical_count \
             FROM heart_rate_records \
             WHERE smart_band_id = $1",
        )
        .bind(smart_band_id)
        .fetch_one(pool)
        .await
    }
}
