use anyhow::Result;

use lexlytics_core::event::ConversionEvent;
use lexlytics_core::timeframe::TimeRange;

use super::{ts_from_micros, ts_param};
use crate::DuckDbStore;

impl DuckDbStore {
    /// All conversion events with `created_at` in `[since, until)`, ascending.
    pub async fn query_conversion_events(
        &self,
        range: &TimeRange,
    ) -> Result<Vec<ConversionEvent>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT session_id, event_type, event_label, \
                    page_path, referrer_type, device_type, epoch_us(created_at) \
             FROM conversion_events \
             WHERE created_at >= ?1 AND created_at < ?2 \
             ORDER BY created_at",
        )?;

        let rows = stmt.query_map(
            duckdb::params![ts_param(range.since), ts_param(range.until)],
            |row| {
                Ok(ConversionEvent {
                    session_id: row.get(0)?,
                    event_type: row.get(1)?,
                    event_label: row.get(2)?,
                    page_path: row.get(3)?,
                    referrer_type: row.get(4)?,
                    device_type: row.get(5)?,
                    created_at: ts_from_micros(row.get(6)?),
                })
            },
        )?;

        let mut events = Vec::new();
        for row in rows {
            events.push(row?);
        }
        Ok(events)
    }
}
