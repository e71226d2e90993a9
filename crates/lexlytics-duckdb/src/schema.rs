/// DuckDB initialization SQL.
///
/// Executed once at database open time via `Connection::execute_batch`.
/// All statements use `IF NOT EXISTS` so they are safe to re-run on every
/// startup (idempotent). The ingestion layer owns the same DDL; running it
/// here keeps a fresh analytics replica usable out of the box.
///
/// `memory_limit` is passed at runtime from `Config.duckdb_memory_limit`
/// (env `LEXLYTICS_DUCKDB_MEMORY`, default `"1GB"`). Always set an explicit
/// limit; the DuckDB default (80% of system RAM) is not acceptable for a
/// server process. `SET threads = 2` bounds the background thread pool for
/// embedded use.
pub fn init_sql(memory_limit: &str) -> String {
    format!(
        r#"SET memory_limit = '{memory_limit}';
SET threads = 2;

-- ===========================================
-- SETTINGS
-- ===========================================
-- Keys stored in this table:
--   'report_timezone' – IANA zone used for daily/hourly chart bucketing
--   'version'         – Database schema version (for migrations)
CREATE TABLE IF NOT EXISTS settings (
    key             VARCHAR PRIMARY KEY,
    value           VARCHAR NOT NULL
);

-- ===========================================
-- PAGE VIEWS (one row per page render)
-- ===========================================
CREATE TABLE IF NOT EXISTS page_views (
    visitor_id          VARCHAR NOT NULL,
    session_id          VARCHAR NOT NULL,
    page_path           VARCHAR NOT NULL,
    page_title          VARCHAR,
    referrer_type       VARCHAR,               -- 'direct' | 'search' | 'social' | 'referral' | …
    search_keyword      VARCHAR,
    device_type         VARCHAR,               -- 'desktop' | 'mobile' | 'tablet'
    device_brand        VARCHAR,
    browser             VARCHAR,
    os                  VARCHAR,
    screen_resolution   VARCHAR,               -- e.g. '1920x1080'
    time_on_page        BIGINT NOT NULL DEFAULT 0,
    scroll_depth        BIGINT NOT NULL DEFAULT 0,   -- 0–100
    is_bounce           BOOLEAN NOT NULL DEFAULT FALSE,
    created_at          TIMESTAMP NOT NULL
);
-- Every analytics query is a created_at range scan.
CREATE INDEX IF NOT EXISTS idx_page_views_created ON page_views(created_at);

-- ===========================================
-- SESSIONS (finalized by the ingestion layer)
-- ===========================================
CREATE TABLE IF NOT EXISTS sessions (
    visitor_id      VARCHAR NOT NULL,
    is_bounce       BOOLEAN NOT NULL DEFAULT FALSE,
    is_new_visitor  BOOLEAN NOT NULL DEFAULT FALSE,
    total_duration  BIGINT NOT NULL DEFAULT 0,   -- seconds
    page_count      BIGINT NOT NULL DEFAULT 1,
    landing_page    VARCHAR NOT NULL,
    exit_page       VARCHAR,
    utm_source      VARCHAR,
    utm_medium      VARCHAR,
    utm_campaign    VARCHAR,
    started_at      TIMESTAMP NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_sessions_started ON sessions(started_at);

-- ===========================================
-- CONVERSION EVENTS
-- ===========================================
CREATE TABLE IF NOT EXISTS conversion_events (
    session_id      VARCHAR NOT NULL,
    event_type      VARCHAR NOT NULL,            -- 'form_open' | 'form_submit' | 'kakao_click' | 'phone_click' | 'blog_read' | …
    event_label     VARCHAR,
    page_path       VARCHAR NOT NULL,
    referrer_type   VARCHAR,
    device_type     VARCHAR,
    created_at      TIMESTAMP NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_conversion_events_created ON conversion_events(created_at);
"#
    )
}
