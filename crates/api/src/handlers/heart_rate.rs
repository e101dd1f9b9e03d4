//! Handlers for heart rate ingestion, history and statistics.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use smartband_core::classification::{classify, HeartRateStatus};
use smartband_core::history::resolve_history_limit;
use smartband_core::statistics::{HeartRateStatistics, PulseAggregates};
use smartband_core::types::{self, DbId, SmartBandId, Timestamp};
use smartband_db::models::heart_rate_record::{CreateHeartRateRecord, HeartRateRecord};
use smartband_db::repositories::HeartRateRecordRepo;
use smartband_events::MonitoringEvent;

use crate::error::AppResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body sent by a smart band. `pulse` arrives as a string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordHeartRateRequest {
    pub smart_band_id: SmartBandId,
    pub pulse: String,
}

/// The stored record plus a human-readable confirmation.
#[derive(Debug, Serialize)]
pub struct RecordHeartRateResponse {
    #[serde(flatten)]
    pub record: HeartRateRecord,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
}

/// One entry of a history listing.
#[derive(Debug, Serialize)]
pub struct HeartRateHistoryItem {
    pub id: DbId,
    pub pulse: i32,
    pub status: HeartRateStatus,
    pub timestamp: Timestamp,
}

impl From<HeartRateRecord> for HeartRateHistoryItem {
    fn from(record: HeartRateRecord) -> Self {
        Self {
            id: record.id,
            pulse: record.pulse,
            status: record.status,
            timestamp: record.recorded_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateHistoryResponse {
    pub smart_band_id: SmartBandId,
    pub readings: Vec<HeartRateHistoryItem>,
    pub total: usize,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /health-monitoring/data-records
///
/// Classify, store and announce a reading. A pulse that is not an integer
/// is rejected before anything is written.
pub async fn record_heart_rate(
    State(state): State<AppState>,
    Json(input): Json<RecordHeartRateRequest>,
) -> AppResult<impl IntoResponse> {
    let recorded_at = types::now();
    let classification = classify(input.smart_band_id, &input.pulse, recorded_at)?;

    let record = HeartRateRecordRepo::insert(
        &state.pool,
        &CreateHeartRateRecord {
            smart_band_id: input.smart_band_id,
            pulse: classification.pulse,
            status: classification.status,
            recorded_at,
        },
    )
    .await?;

    for event in &classification.events {
        match MonitoringEvent::from_domain(event, record.id) {
            Ok(envelope) => state.event_bus.publish(envelope),
            Err(e) => tracing::error!(
                error = %e,
                record_id = record.id,
                event_type = event.event_type(),
                "Failed to serialize domain event"
            ),
        }
    }

    if classification.is_abnormal() {
        tracing::warn!(
            record_id = record.id,
            smart_band_id = record.smart_band_id,
            pulse = record.pulse,
            status = %record.status,
            "Abnormal heart rate detected"
        );
    } else {
        tracing::debug!(
            record_id = record.id,
            smart_band_id = record.smart_band_id,
            pulse = record.pulse,
            "Heart rate recorded"
        );
    }

    let message = format!(
        "Heart rate recorded successfully. Status: {}",
        record.status
    );
    Ok((
        StatusCode::CREATED,
        Json(RecordHeartRateResponse { record, message }),
    ))
}

/// GET /health-monitoring/data-records/{smart_band_id}/history
///
/// Newest readings first, at most `limit` of them. Unknown bands yield an
/// empty list; a `limit` outside `0..=100` is a 400.
pub async fn get_history(
    State(state): State<AppState>,
    Path(smart_band_id): Path<SmartBandId>,
    Query(params): Query<HistoryParams>,
) -> AppResult<impl IntoResponse> {
    let limit = resolve_history_limit(params.limit)?;
    let records = HeartRateRecordRepo::history(&state.pool, smart_band_id, limit).await?;

    let readings: Vec<HeartRateHistoryItem> = records.into_iter().map(Into::into).collect();
    Ok(Json(HeartRateHistoryResponse {
        smart_band_id,
        total: readings.len(),
        readings,
    }))
}

/// GET /health-monitoring/data-records/{smart_band_id}/statistics
///
/// Aggregates over every reading of the band. Unknown bands yield zeroed
/// statistics.
pub async fn get_statistics(
    State(state): State<AppState>,
    Path(smart_band_id): Path<SmartBandId>,
) -> AppResult<impl IntoResponse> {
    let row = HeartRateRecordRepo::statistics(&state.pool, smart_band_id).await?;
    let stats = HeartRateStatistics::from_aggregates(smart_band_id, PulseAggregates::from(row));
    Ok(Json(stats))
}
