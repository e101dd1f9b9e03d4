//! Domain logic for the smart band edge service.
//!
//! Everything in this crate is pure: no database access, no HTTP. The
//! persistence and API crates call into it to classify readings, build
//! domain events and assemble statistics.

pub mod classification;
pub mod error;
pub mod events;
pub mod history;
pub mod statistics;
pub mod types;
