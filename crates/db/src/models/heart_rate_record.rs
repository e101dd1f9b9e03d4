//! Heart rate record entity model and DTOs.

use serde::Serialize;
use smartband_core::classification::HeartRateStatus;
use smartband_core::statistics::{PulseAggregates, StatusDistribution};
use smartband_core::types::{DbId, SmartBandId, Timestamp};
use sqlx::FromRow;

/// A stored pulse reading. Immutable once inserted.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateRecord {
    pub id: DbId,
    pub smart_band_id: SmartBandId,
    pub pulse: i32,
    #[sqlx(try_from = "String")]
    pub status: HeartRateStatus,
    #[serde(rename = "timestamp")]
    pub recorded_at: Timestamp,
}

/// DTO for inserting a classified reading.
#[derive(Debug, Clone)]
pub struct CreateHeartRateRecord {
    pub smart_band_id: SmartBandId,
    pub pulse: i32,
    pub status: HeartRateStatus,
    pub recorded_at: Timestamp,
}

/// Raw result of the per-band statistics query.
#[derive(Debug, Clone, FromRow)]
pub struct PulseAggregatesRow {
    pub total: i64,
    pub average: Option<f64>,
    pub min: Option<i32>,
    pub max: Option<i32>,
    pub normal_count: i64,
    pub low_count: i64,
    pub high_count: i64,
    pub critical_count: i64,
}

impl From<PulseAggregatesRow> for PulseAggregates {
    fn from(row: PulseAggregatesRow) -> Self {
        PulseAggregates {
            total: row.total,
            average: row.average,
            min: row.min,
            max: row.max,
            distribution: StatusDistribution {
                normal: row.normal_count,
                low: row.low_count,
                high: row.high_count,
                critical: row.critical_count,
            },
        }
    }
}
