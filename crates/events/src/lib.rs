//! Smart band domain event bus.
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`MonitoringEvent`] — the envelope carried on the bus.
//! - [`EventPersistence`] — background service that durably writes every
//!   event to the `monitoring_events` table.

pub mod bus;
pub mod persistence;

pub use bus::{EventBus, MonitoringEvent};
pub use persistence::EventPersistence;
