use chrono::SubsecRound;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Smart band identifiers are device-assigned integers, never checked
/// against a registry.
pub type SmartBandId = i64;

/// Current time at microsecond precision, the resolution of a PostgreSQL
/// `TIMESTAMPTZ`. A value stamped on both a stored row and an in-memory
/// event compares equal after the row is read back.
pub fn now() -> Timestamp {
    chrono::Utc::now().trunc_subsecs(6)
}
