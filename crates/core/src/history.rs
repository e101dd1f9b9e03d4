//! Paging rules for reading history.

use crate::error::CoreError;

/// Number of readings returned when the caller gives no `limit`.
pub const DEFAULT_HISTORY_LIMIT: i64 = 10;

/// Upper bound on readings returned by a single history request.
pub const MAX_HISTORY_LIMIT: i64 = 100;

/// Resolve a user-provided history limit.
///
/// Absent means [`DEFAULT_HISTORY_LIMIT`]. `0` is valid and yields no rows.
/// Values outside `0..=MAX_HISTORY_LIMIT` are rejected rather than silently
/// adjusted, so the caller never gets a different count than requested.
pub fn resolve_history_limit(limit: Option<i64>) -> Result<i64, CoreError> {
    match limit {
        None => Ok(DEFAULT_HISTORY_LIMIT),
        Some(n) if (0..=MAX_HISTORY_LIMIT).contains(&n) => Ok(n),
        Some(n) => Err(CoreError::InvalidInput(format!(
            "limit must be between 0 and {MAX_HISTORY_LIMIT}, got {n}"
        ))),
    }
}
