//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod heart_rate_record_repo;
pub mod monitoring_event_repo;

pub use heart_rate_record_repo::HeartRateRecordRepo;
pub use monitoring_event_repo::MonitoringEventRepo;
