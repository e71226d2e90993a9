//! Event store abstraction.

use crate::event::{ConversionEvent, PageViewEvent, VisitorSession};
use crate::timeframe::TimeRange;

/// Read-only client contract over the three event collections.
///
/// Each query is a plain range-filtered column projection: no aggregation
/// is pushed down to the store, every reduction happens in this engine. Rows
/// come back in ascending timestamp order so reductions that depend on
/// encounter order ("first non-empty title seen") are deterministic.
///
/// Page views and conversion events filter on `created_at`; sessions filter
/// on `started_at`. All filters are half-open `[since, until)`.
#[async_trait::async_trait]
pub trait EventStore: Send + Sync + 'static {
    async fn query_page_views(&self, range: &TimeRange) -> anyhow::Result<Vec<PageViewEvent>>;

    async fn query_sessions(&self, range: &TimeRange) -> anyhow::Result<Vec<VisitorSession>>;

    async fn query_conversion_events(
        &self,
        range: &TimeRange,
    ) -> anyhow::Result<Vec<ConversionEvent>>;

    /// Read a single value from the store's `settings` table.
    ///
    /// The engine uses this for the reporting timezone; the value is cached
    /// server-side behind a TTL (see the server's `AppState`).
    async fn get_setting(&self, key: &str) -> anyhow::Result<Option<String>>;
}
