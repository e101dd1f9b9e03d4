//! Heart rate reading classifier.
//!
//! Pure logic: maps a pulse value (beats per minute) to a severity band and
//! derives the domain events a caller should act on. The caller is
//! responsible for persisting the reading and publishing the events.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::events::{AbnormalHeartRateDetectedEvent, HeartRateEvent, HeartRateRecordedEvent};
use crate::types::{SmartBandId, Timestamp};

/// Lowest pulse (inclusive) classified as [`HeartRateStatus::Low`].
/// Anything below is [`HeartRateStatus::Critical`].
pub const LOW_PULSE_FLOOR: i32 = 40;

/// Lowest pulse (inclusive) classified as [`HeartRateStatus::Normal`].
pub const NORMAL_PULSE_FLOOR: i32 = 60;

/// Highest pulse (inclusive) classified as [`HeartRateStatus::Normal`].
/// Anything above is [`HeartRateStatus::High`].
pub const NORMAL_PULSE_CEILING: i32 = 140;

// ---------------------------------------------------------------------------
// HeartRateStatus
// ---------------------------------------------------------------------------

/// Severity band of a single pulse reading.
///
/// Serialized and stored as the upper-case label (`"CRITICAL"`, `"LOW"`,
/// `"NORMAL"`, `"HIGH"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HeartRateStatus {
    Critical,
    Low,
    Normal,
    High,
}

impl HeartRateStatus {
    /// Every status, in ascending pulse order.
    pub const ALL: [HeartRateStatus; 4] = [
        HeartRateStatus::Critical,
        HeartRateStatus::Low,
        HeartRateStatus::Normal,
        HeartRateStatus::High,
    ];

    /// Classify a pulse value.
    ///
    /// | Pulse        | Status     |
    /// |--------------|------------|
    /// | `< 40`       | `CRITICAL` |
    /// | `40..=59`    | `LOW`      |
    /// | `60..=140`   | `NORMAL`   |
    /// | `> 140`      | `HIGH`     |
    pub fn from_pulse(pulse: i32) -> Self {
        if pulse < LOW_PULSE_FLOOR {
            HeartRateStatus::Critical
        } else if pulse < NORMAL_PULSE_FLOOR {
            HeartRateStatus::Low
        } else if pulse <= NORMAL_PULSE_CEILING {
            HeartRateStatus::Normal
        } else {
            HeartRateStatus::High
        }
    }

    /// The stored / serialized label.
    pub fn as_str(self) -> &'static str {
        match self {
            HeartRateStatus::Critical => "CRITICAL",
            HeartRateStatus::Low => "LOW",
            HeartRateStatus::Normal => "NORMAL",
            HeartRateStatus::High => "HIGH",
        }
    }

    /// Whether a reading in this band should raise an abnormal event.
    pub fn is_abnormal(self) -> bool {
        self != HeartRateStatus::Normal
    }
}

impl fmt::Display for HeartRateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored status label did not match any [`HeartRateStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown heart rate status: {0}")]
pub struct UnknownStatusError(pub String);

impl FromStr for HeartRateStatus {
    type Err = UnknownStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeartRateStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatusError(s.to_string()))
    }
}

/// Lets `sqlx` decode the `status` TEXT column straight into the enum.
impl TryFrom<String> for HeartRateStatus {
    type Error = UnknownStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Parsing and classification
// ---------------------------------------------------------------------------

/// Parse the raw pulse string sent by a smart band.
///
/// Surrounding whitespace is ignored; the remainder must be a base-10
/// integer. Fractional values such as `"75.5"` are rejected.
pub fn parse_pulse(raw: &str) -> Result<i32, CoreError> {
    let trimmed = raw.trim();
    trimmed.parse::<i32>().map_err(|_| {
        CoreError::InvalidInput(format!("pulse must be an integer, got '{trimmed}'"))
    })
}

/// Outcome of classifying one reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub pulse: i32,
    pub status: HeartRateStatus,
    /// The recorded event always comes first; the abnormal event follows
    /// only when `status` is not `NORMAL`.
    pub events: Vec<HeartRateEvent>,
}

impl Classification {
    /// Whether the classification produced an abnormal-reading event.
    pub fn is_abnormal(&self) -> bool {
        self.status.is_abnormal()
    }
}

/// Parse and classify a reading, deriving its domain events.
///
/// `occurred_at` is stamped onto every derived event; the caller also uses
/// it as the record timestamp so both agree.
pub fn classify(
    smart_band_id: SmartBandId,
    raw_pulse: &str,
    occurred_at: Timestamp,
) -> Result<Classification, CoreError> {
    let pulse = parse_pulse(raw_pulse)?;
    let status = HeartRateStatus::from_pulse(pulse);

    let mut events = vec![HeartRateEvent::Recorded(HeartRateRecordedEvent {
        smart_band_id,
        pulse,
        status,
        occurred_at,
    })];

    if status.is_abnormal() {
        events.push(HeartRateEvent::AbnormalDetected(
            AbnormalHeartRateDetectedEvent {
                smart_band_id,
                pulse,
                status,
                occurred_at,
            },
        ));
    }

    Ok(Classification {
        pulse,
        status,
        events,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
