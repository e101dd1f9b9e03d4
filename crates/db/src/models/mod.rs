//! Row models and insert DTOs.

pub mod heart_rate_record;
pub mod monitoring_event;
