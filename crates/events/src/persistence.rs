//! Durable event persistence service.
//!
//! [`EventPersistence`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and writes every received [`MonitoringEvent`] to `monitoring_events`. It
//! runs as a long-lived background task and exits when the bus is dropped.

use smartband_core::types::DbId;
use smartband_db::repositories::MonitoringEventRepo;
use smartband_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::MonitoringEvent;

/// Background service that persists monitoring events to the database.
pub struct EventPersistence;

impl EventPersistence {
    /// Run the persistence loop until the channel closes.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<MonitoringEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::persist(&pool, &event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to persist event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Event persistence lagged, some events were not persisted"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, persistence shutting down");
                    break;
                }
            }
        }
    }

    /// Write a single event row.
    pub async fn persist(pool: &DbPool, event: &MonitoringEvent) -> Result<DbId, sqlx::Error> {
        MonitoringEventRepo::insert(
            pool,
            &event.event_type,
            event.source_entity_type.as_deref(),
            event.source_entity_id,
            &event.payload,
            event.timestamp,
        )
        .await
    }
}
