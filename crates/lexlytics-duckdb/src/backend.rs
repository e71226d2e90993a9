use std::sync::Arc;

use anyhow::Result;
use duckdb::Connection;
use tokio::sync::Mutex;
use tracing::info;

use lexlytics_core::event::{ConversionEvent, PageViewEvent, VisitorSession};

use crate::schema::init_sql;

/// A DuckDB-backed event store.
///
/// DuckDB is single-writer: concurrent reads are fine, but concurrent
/// writes cause contention. The connection sits behind
/// `Arc<tokio::sync::Mutex<_>>` so the struct is cheap to clone and safe to
/// share across Axum handlers. The analytics surface only reads; the write
/// path below exists for test fixtures and operational backfill.
#[derive(Clone)]
pub struct DuckDbStore {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl DuckDbStore {
    /// Open (or create) a DuckDB database file at `path`.
    ///
    /// `memory_limit` is a DuckDB size string such as `"1GB"` or `"512MB"`,
    /// read from `Config.duckdb_memory_limit` at the call site.
    pub fn open(path: &str, memory_limit: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(&init_sql(memory_limit))?;
        Self::seed_settings_sync(&conn)?;
        info!(
            "DuckDB opened at {} with memory_limit={}, threads=2",
            path, memory_limit
        );
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an **in-memory** DuckDB database.
    ///
    /// Intended for tests; data is discarded when the struct is dropped.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(&init_sql("1GB"))?;
        Self::seed_settings_sync(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Seed the `settings` table with initial values if absent.
    ///
    /// `INSERT OR IGNORE` keeps re-runs on every startup safe; an
    /// operator-edited `report_timezone` survives restarts.
    fn seed_settings_sync(conn: &Connection) -> Result<()> {
        conn.execute(
            "INSERT OR IGNORE INTO settings (key, value) VALUES ('report_timezone', ?1)",
            duckdb::params!["Asia/Seoul"],
        )?;
        conn.execute(
            "INSERT OR IGNORE INTO settings (key, value) VALUES ('version', ?1)",
            duckdb::params!["1"],
        )?;
        Ok(())
    }

    /// Read a single value from the `settings` table.
    pub async fn setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")?;
        let mut rows = stmt.query(duckdb::params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Upsert a `settings` value. Pair with the server-side cache's
    /// `invalidate` when changing values at runtime.
    pub async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            duckdb::params![key, value],
        )?;
        Ok(())
    }

    /// Write page-view rows the way the ingestion layer does.
    ///
    /// One transaction per batch for atomicity and throughput (one fsync
    /// instead of N). Fixture/backfill path only; the aggregation engine
    /// itself never writes event rows.
    pub async fn insert_page_views(&self, views: &[PageViewEvent]) -> Result<()> {
        if views.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        for view in views {
            tx.execute(
                r#"INSERT INTO page_views (
                    visitor_id, session_id, page_path, page_title,
                    referrer_type, search_keyword,
                    device_type, device_brand, browser, os, screen_resolution,
                    time_on_page, scroll_depth, is_bounce, created_at
                ) VALUES (
                    ?1, ?2, ?3, ?4,
                    ?5, ?6,
                    ?7, ?8, ?9, ?10, ?11,
                    ?12, ?13, ?14, ?15
                )"#,
                duckdb::params![
                    view.visitor_id,
                    view.session_id,
                    view.page_path,
                    view.page_title,
                    view.referrer_type,
                    view.search_keyword,
                    view.device_type,
                    view.device_brand,
                    view.browser,
                    view.os,
                    view.screen_resolution,
                    view.time_on_page,
                    view.scroll_depth,
                    view.is_bounce,
                    view.created_at.to_rfc3339(),
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    pub async fn insert_sessions(&self, sessions: &[VisitorSession]) -> Result<()> {
        if sessions.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        for session in sessions {
            tx.execute(
                r#"INSERT INTO sessions (
                    visitor_id, is_bounce, is_new_visitor,
                    total_duration, page_count, landing_page, exit_page,
                    utm_source, utm_medium, utm_campaign, started_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"#,
                duckdb::params![
                    session.visitor_id,
                    session.is_bounce,
                    session.is_new_visitor,
                    session.total_duration,
                    session.page_count,
                    session.landing_page,
                    session.exit_page,
                    session.utm_source,
                    session.utm_medium,
                    session.utm_campaign,
                    session.started_at.to_rfc3339(),
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    pub async fn insert_conversion_events(&self, events: &[ConversionEvent]) -> Result<()> {
        if events.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        for event in events {
            tx.execute(
                r#"INSERT INTO conversion_events (
                    session_id, event_type, event_label,
                    page_path, referrer_type, device_type, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"#,
                duckdb::params![
                    event.session_id,
                    event.event_type,
                    event.event_label,
                    event.page_path,
                    event.referrer_type,
                    event.device_type,
                    event.created_at.to_rfc3339(),
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}
