//! [`EventStore`] implementation for [`DuckDbStore`].

use lexlytics_core::event::{ConversionEvent, PageViewEvent, VisitorSession};
use lexlytics_core::store::EventStore;
use lexlytics_core::timeframe::TimeRange;

use crate::DuckDbStore;

#[async_trait::async_trait]
impl EventStore for DuckDbStore {
    async fn query_page_views(&self, range: &TimeRange) -> anyhow::Result<Vec<PageViewEvent>> {
        DuckDbStore::query_page_views(self, range).await
    }

    async fn query_sessions(&self, range: &TimeRange) -> anyhow::Result<Vec<VisitorSession>> {
        DuckDbStore::query_sessions(self, range).await
    }

    async fn query_conversion_events(
        &self,
        range: &TimeRange,
    ) -> anyhow::Result<Vec<ConversionEvent>> {
        DuckDbStore::query_conversion_events(self, range).await
    }

    async fn get_setting(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.setting(key).await
    }
}
