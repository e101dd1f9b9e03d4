//! Integration tests for heart rate ingestion, history and statistics.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use chrono::{DateTime, Utc};
use serde_json::json;
use smartband_api::router::build_app_router;
use smartband_core::classification::HeartRateStatus;
use smartband_db::models::heart_rate_record::CreateHeartRateRecord;
use smartband_db::repositories::HeartRateRecordRepo;
use sqlx::PgPool;

const RECORDS: &str = "/api/v1/health-monitoring/data-records";

async fn record(pool: &PgPool, smart_band_id: i64, pulse: &str) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        RECORDS,
        json!({"smartBandId": smart_band_id, "pulse": pulse}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED, "pulse {pulse}");
    body_json(response).await
}

async fn record_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM heart_rate_records")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// POST /data-records
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn record_returns_created_record(pool: PgPool) {
    let json = record(&pool, 1, "75").await;

    assert!(json["id"].as_i64().unwrap() > 0);
    assert_eq!(json["smartBandId"], 1);
    assert_eq!(json["pulse"], 75);
    assert_eq!(json["status"], "NORMAL");
    assert!(json["timestamp"].is_string());
    assert_eq!(
        json["message"],
        "Heart rate recorded successfully. Status: NORMAL"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn record_classifies_each_band(pool: PgPool) {
    for (pulse, status) in [
        ("35", "CRITICAL"),
        ("50", "LOW"),
        ("75", "NORMAL"),
        ("150", "HIGH"),
    ] {
        let json = record(&pool, 2, pulse).await;
        assert_eq!(json["status"], status, "pulse {pulse}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_numeric_pulse_is_rejected_without_storing(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, RECORDS, json!({"smartBandId": 1, "pulse": "abc"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_INPUT");

    assert_eq!(record_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn fractional_pulse_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, RECORDS, json!({"smartBandId": 1, "pulse": "75.5"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(record_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn record_publishes_domain_events(pool: PgPool) {
    let state = common::test_state(pool.clone());
    let mut rx = state.event_bus.subscribe();
    let app = build_app_router(state, &common::test_config());

    let response = post_json(app, RECORDS, json!({"smartBandId": 4, "pulse": "35"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();

    let first = rx.try_recv().expect("recorded event");
    let second = rx.try_recv().expect("abnormal event");
    assert_eq!(first.event_type, "heart_rate.recorded");
    assert_eq!(second.event_type, "heart_rate.abnormal_detected");
    assert_eq!(second.source_entity_id, Some(id));
    assert!(rx.try_recv().is_err(), "no further events expected");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn event_time_matches_stored_record_time(pool: PgPool) {
    let state = common::test_state(pool.clone());
    let mut rx = state.event_bus.subscribe();
    let app = build_app_router(state, &common::test_config());

    let response = post_json(app, RECORDS, json!({"smartBandId": 4, "pulse": "150"})).await;
    let json = body_json(response).await;
    let stored: DateTime<Utc> = json["timestamp"].as_str().unwrap().parse().unwrap();

    for _ in 0..2 {
        let event = rx.try_recv().unwrap();
        assert_eq!(event.timestamp, stored, "{}", event.event_type);
        let payload_time: DateTime<Utc> =
            event.payload["occurredAt"].as_str().unwrap().parse().unwrap();
        assert_eq!(payload_time, stored);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn normal_reading_publishes_only_recorded_event(pool: PgPool) {
    let state = common::test_state(pool.clone());
    let mut rx = state.event_bus.subscribe();
    let app = build_app_router(state, &common::test_config());

    post_json(app, RECORDS, json!({"smartBandId": 4, "pulse": "75"})).await;

    assert_eq!(rx.try_recv().unwrap().event_type, "heart_rate.recorded");
    assert!(rx.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// GET /data-records/{id}/history
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn history_for_unknown_band_is_empty(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, &format!("{RECORDS}/77/history")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["smartBandId"], 77);
    assert_eq!(json["total"], 0);
    assert_eq!(json["readings"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn history_is_newest_first_and_respects_limit(pool: PgPool) {
    for pulse in ["61", "62", "63", "64"] {
        record(&pool, 9, pulse).await;
    }

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("{RECORDS}/9/history?limit=2")).await).await;

    assert_eq!(json["total"], 2);
    let pulses: Vec<i64> = json["readings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["pulse"].as_i64().unwrap())
        .collect();
    assert_eq!(pulses, vec![64, 63]);
    assert_eq!(json["readings"][0]["status"], "NORMAL");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn history_defaults_to_ten_readings(pool: PgPool) {
    for _ in 0..12 {
        record(&pool, 3, "80").await;
    }

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("{RECORDS}/3/history")).await).await;
    assert_eq!(json["total"], 10);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn history_limit_zero_returns_no_readings(pool: PgPool) {
    for pulse in ["70", "71", "72"] {
        record(&pool, 5, pulse).await;
    }

    let app = common::build_test_app(pool);
    let response = get(app, &format!("{RECORDS}/5/history?limit=0")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 0);
    assert_eq!(json["readings"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn history_returns_up_to_the_maximum_limit(pool: PgPool) {
    for i in 0..105 {
        HeartRateRecordRepo::insert(
            &pool,
            &CreateHeartRateRecord {
                smart_band_id: 8,
                pulse: 60 + i % 40,
                status: HeartRateStatus::Normal,
                recorded_at: Utc::now(),
            },
        )
        .await
        .unwrap();
    }

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("{RECORDS}/8/history?limit=100")).await).await;
    assert_eq!(json["total"], 100);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn history_rejects_limit_out_of_range(pool: PgPool) {
    for limit in ["101", "-1"] {
        let app = common::build_test_app(pool.clone());
        let response = get(app, &format!("{RECORDS}/5/history?limit={limit}")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "limit {limit}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "INVALID_INPUT");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn history_rejects_non_numeric_band_id(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, &format!("{RECORDS}/abc/history")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// GET /data-records/{id}/statistics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn statistics_for_unknown_band_are_zero(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, &format!("{RECORDS}/55/statistics")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 0);
    assert_eq!(json["average"], 0.0);
    assert!(json["min"].is_null());
    assert!(json["max"].is_null());
    assert_eq!(json["abnormalCount"], 0);
    assert_eq!(
        json["distribution"],
        json!({"NORMAL": 0, "LOW": 0, "HIGH": 0, "CRITICAL": 0})
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn statistics_summarise_band_readings(pool: PgPool) {
    for pulse in ["35", "50", "75", "80", "150"] {
        record(&pool, 6, pulse).await;
    }
    // Different band, must not be counted.
    record(&pool, 7, "200").await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("{RECORDS}/6/statistics")).await).await;

    assert_eq!(json["smartBandId"], 6);
    assert_eq!(json["total"], 5);
    assert_eq!(json["average"], 78.0);
    assert_eq!(json["min"], 35);
    assert_eq!(json["max"], 150);
    assert_eq!(json["abnormalCount"], 3);
    assert_eq!(
        json["distribution"],
        json!({"NORMAL": 2, "LOW": 1, "HIGH": 1, "CRITICAL": 1})
    );
}
