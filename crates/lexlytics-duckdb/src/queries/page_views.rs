use anyhow::Result;

use lexlytics_core::event::PageViewEvent;
use lexlytics_core::timeframe::TimeRange;

use super::{ts_from_micros, ts_param};
use crate::DuckDbStore;

impl DuckDbStore {
    /// All page views with `created_at` in `[since, until)`, ascending.
    pub async fn query_page_views(&self, range: &TimeRange) -> Result<Vec<PageViewEvent>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT visitor_id, session_id, page_path, page_title, \
                    referrer_type, search_keyword, \
                    device_type, device_brand, browser, os, screen_resolution, \
                    time_on_page, scroll_depth, is_bounce, epoch_us(created_at) \
             FROM page_views \
             WHERE created_at >= ?1 AND created_at < ?2 \
             ORDER BY created_at",
        )?;

        let rows = stmt.query_map(
            duckdb::params![ts_param(range.since), ts_param(range.until)],
            |row| {
                Ok(PageViewEvent {
                    visitor_id: row.get(0)?,
                    session_id: row.get(1)?,
                    page_path: row.get(2)?,
                    page_title: row.get(3)?,
                    referrer_type: row.get(4)?,
                    search_keyword: row.get(5)?,
                    device_type: row.get(6)?,
                    device_brand: row.get(7)?,
                    browser: row.get(8)?,
                    os: row.get(9)?,
                    screen_resolution: row.get(10)?,
                    time_on_page: row.get(11)?,
                    scroll_depth: row.get(12)?,
                    is_bounce: row.get(13)?,
                    created_at: ts_from_micros(row.get(14)?),
                })
            },
        )?;

        let mut views = Vec::new();
        for row in rows {
            views.push(row?);
        }
        Ok(views)
    }
}
