//! Time window resolution for the aggregation endpoints.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

/// Window applied when the caller omits `days` or supplies garbage.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Resolve the optional `days` query parameter.
///
/// Non-numeric or non-positive input falls back to [`DEFAULT_WINDOW_DAYS`]
/// rather than erroring; the dashboard always gets a chart.
pub fn resolve_days(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|d| *d > 0)
        .unwrap_or(DEFAULT_WINDOW_DAYS)
}

/// A half-open absolute window `[since, until)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl TimeRange {
    /// `[now - days, now)`.
    pub fn last_days(days: i64) -> Self {
        Self::last_days_from(Utc::now(), days)
    }

    pub fn last_days_from(now: DateTime<Utc>, days: i64) -> Self {
        Self {
            since: now - Duration::days(days),
            until: now,
        }
    }

    /// `[now - minutes, now)` - used by the real-time monitor.
    pub fn last_minutes_from(now: DateTime<Utc>, minutes: i64) -> Self {
        Self {
            since: now - Duration::minutes(minutes),
            until: now,
        }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.since <= ts && ts < self.until
    }
}

/// Enumerate the `days` calendar days ending on `until`'s date in `tz`, each
/// pre-seeded at zero, so days with no traffic still appear in the chart.
///
/// The returned map always has exactly `days` entries in ascending date
/// order regardless of data sparsity.
pub fn seed_daily_series(until: DateTime<Utc>, days: i64, tz: Tz) -> BTreeMap<NaiveDate, i64> {
    let today = until.with_timezone(&tz).date_naive();
    (0..days)
        .map(|i| (today - Duration::days(days - 1 - i), 0))
        .collect()
}

/// Calendar date of `ts` in the reporting timezone.
pub fn local_date(ts: DateTime<Utc>, tz: Tz) -> NaiveDate {
    ts.with_timezone(&tz).date_naive()
}

/// Hour-of-day (0–23) of `ts` in the reporting timezone.
pub fn local_hour(ts: DateTime<Utc>, tz: Tz) -> usize {
    ts.with_timezone(&tz).hour() as usize
}
