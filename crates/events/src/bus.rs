//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartband_core::events::HeartRateEvent;
use smartband_core::types::DbId;
use tokio::sync::broadcast;

/// Source entity kind for events derived from a stored reading.
pub const HEART_RATE_RECORD_ENTITY: &str = "heart_rate_record";

// ---------------------------------------------------------------------------
// MonitoringEvent
// ---------------------------------------------------------------------------

/// Envelope for a domain event published on the bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringEvent {
    /// Dot-separated event name, e.g. `"heart_rate.recorded"`.
    pub event_type: String,

    /// Optional source entity kind (e.g. `"heart_rate_record"`).
    pub source_entity_type: Option<String>,

    /// Optional source entity database id.
    pub source_entity_id: Option<DbId>,

    /// Event-specific JSON payload.
    pub payload: serde_json::Value,

    /// When the underlying fact occurred (UTC).
    pub timestamp: DateTime<Utc>,
}

impl MonitoringEvent {
    /// Wrap a classifier event, attributing it to the stored record.
    ///
    /// Fails only if the event cannot be rendered as JSON.
    pub fn from_domain(
        event: &HeartRateEvent,
        record_id: DbId,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event_type: event.event_type().to_string(),
            source_entity_type: Some(HEART_RATE_RECORD_ENTITY.to_string()),
            source_entity_id: Some(record_id),
            payload: event.payload()?,
            timestamp: event.occurred_at(),
        })
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// ```rust
/// use smartband_core::classification::classify;
/// use smartband_events::bus::{EventBus, MonitoringEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// let classification = classify(1, "72", chrono::Utc::now()).unwrap();
/// for event in &classification.events {
///     bus.publish(MonitoringEvent::from_domain(event, 1).unwrap());
/// }
/// ```
pub struct EventBus {
    sender: broadcast::Sender<MonitoringEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unread events are dropped and slow
    /// receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Events published with no subscribers are dropped.
    pub fn publish(&self, event: MonitoringEvent) {
        // SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<MonitoringEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
