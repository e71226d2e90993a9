use anyhow::Result;

use lexlytics_core::event::VisitorSession;
use lexlytics_core::timeframe::TimeRange;

use super::{ts_from_micros, ts_param};
use crate::DuckDbStore;

impl DuckDbStore {
    /// All sessions with `started_at` in `[since, until)`, ascending.
    pub async fn query_sessions(&self, range: &TimeRange) -> Result<Vec<VisitorSession>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT visitor_id, is_bounce, is_new_visitor, \
                    total_duration, page_count, landing_page, exit_page, \
                    utm_source, utm_medium, utm_campaign, epoch_us(started_at) \
             FROM sessions \
             WHERE started_at >= ?1 AND started_at < ?2 \
             ORDER BY started_at",
        )?;

        let rows = stmt.query_map(
            duckdb::params![ts_param(range.since), ts_param(range.until)],
            |row| {
                Ok(VisitorSession {
                    visitor_id: row.get(0)?,
                    is_bounce: row.get(1)?,
                    is_new_visitor: row.get(2)?,
                    total_duration: row.get(3)?,
                    page_count: row.get(4)?,
                    landing_page: row.get(5)?,
                    exit_page: row.get(6)?,
                    utm_source: row.get(7)?,
                    utm_medium: row.get(8)?,
                    utm_campaign: row.get(9)?,
                    started_at: ts_from_micros(row.get(10)?),
                })
            },
        )?;

        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row?);
        }
        Ok(sessions)
    }
}
