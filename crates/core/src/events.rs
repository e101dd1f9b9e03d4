//! Domain events derived from heart rate readings.
//!
//! Events are produced by [`crate::classification::classify`] and are
//! advisory: the caller decides whether to persist, log or forward them.

use serde::{Deserialize, Serialize};

use crate::classification::HeartRateStatus;
use crate::types::{SmartBandId, Timestamp};

/// Event type name for [`HeartRateRecordedEvent`].
pub const HEART_RATE_RECORDED: &str = "heart_rate.recorded";

/// Event type name for [`AbnormalHeartRateDetectedEvent`].
pub const ABNORMAL_HEART_RATE_DETECTED: &str = "heart_rate.abnormal_detected";

/// A reading was accepted for storage. Emitted for every reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateRecordedEvent {
    pub smart_band_id: SmartBandId,
    pub pulse: i32,
    pub status: HeartRateStatus,
    pub occurred_at: Timestamp,
}

/// A reading fell outside the `NORMAL` band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbnormalHeartRateDetectedEvent {
    pub smart_band_id: SmartBandId,
    pub pulse: i32,
    pub status: HeartRateStatus,
    pub occurred_at: Timestamp,
}

/// Any domain event produced by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HeartRateEvent {
    Recorded(HeartRateRecordedEvent),
    AbnormalDetected(AbnormalHeartRateDetectedEvent),
}

impl HeartRateEvent {
    /// Dot-separated event name, e.g. `"heart_rate.recorded"`.
    pub fn event_type(&self) -> &'static str {
        match self {
            HeartRateEvent::Recorded(_) => HEART_RATE_RECORDED,
            HeartRateEvent::AbnormalDetected(_) => ABNORMAL_HEART_RATE_DETECTED,
        }
    }

    pub fn smart_band_id(&self) -> SmartBandId {
        match self {
            HeartRateEvent::Recorded(e) => e.smart_band_id,
            HeartRateEvent::AbnormalDetected(e) => e.smart_band_id,
        }
    }

    pub fn occurred_at(&self) -> Timestamp {
        match self {
            HeartRateEvent::Recorded(e) => e.occurred_at,
            HeartRateEvent::AbnormalDetected(e) => e.occurred_at,
        }
    }

    /// JSON payload of the inner event, without any enum wrapper.
    pub fn payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
