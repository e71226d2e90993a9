//! Range-projection queries, one module per collection.
//!
//! Each query is a filtered column projection ordered by ascending
//! timestamp; no GROUP BY, no aggregates. The reducers upstream own every
//! reduction, so the store contract stays narrow enough to swap backends.

pub mod conversion_events;
pub mod page_views;
pub mod sessions;

use chrono::{DateTime, Utc};

/// Timestamp literal DuckDB can compare against a TIMESTAMP column.
pub(crate) fn ts_param(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

/// Microsecond epoch (what `epoch_us(created_at)` returns) → UTC timestamp.
pub(crate) fn ts_from_micros(us: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_micros(us).unwrap_or_default()
}
