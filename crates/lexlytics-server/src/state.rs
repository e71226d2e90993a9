use std::sync::Arc;

use chrono_tz::Tz;
use tracing::{error, warn};

use lexlytics_core::{cache::TtlCache, config::Config, store::EventStore};

/// Settings key holding the IANA zone used for chart bucketing.
pub const REPORT_TIMEZONE_KEY: &str = "report_timezone";

/// Shared application state injected into every Axum handler via
/// [`axum::extract::State`].
///
/// The engine holds no durable state of its own; everything here is a
/// connection handle, parsed configuration, or a short-lived cache.
pub struct AppState {
    /// The event store. Behind a trait object so integration tests and
    /// future backends can substitute the storage layer.
    pub store: Arc<dyn EventStore>,

    /// Parsed configuration, loaded once at startup from environment
    /// variables.
    pub config: Arc<Config>,

    /// TTL cache in front of store-backed settings lookups, so every chart
    /// request does not re-read the `settings` table.
    settings_cache: TtlCache,
}

impl AppState {
    pub fn new(store: impl EventStore, config: Config) -> Self {
        let settings_cache = TtlCache::new(config.settings_ttl());
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
            settings_cache,
        }
    }

    /// The reporting timezone, resolved through the settings cache.
    ///
    /// Lookup order: fresh cache entry → store `settings` table → configured
    /// default. An unreadable store or an unparseable zone name degrades to
    /// the default rather than failing the request; a chart in the wrong
    /// timezone beats a 500.
    pub async fn report_timezone(&self) -> Tz {
        if let Some(cached) = self.settings_cache.get(REPORT_TIMEZONE_KEY).await {
            if let Ok(tz) = cached.parse() {
                return tz;
            }
        }

        match self.store.get_setting(REPORT_TIMEZONE_KEY).await {
            Ok(Some(raw)) => {
                self.settings_cache
                    .put(REPORT_TIMEZONE_KEY, raw.clone())
                    .await;
                raw.parse().unwrap_or_else(|_| {
                    warn!(zone = %raw, "unparseable report_timezone setting; using default");
                    self.config.fallback_timezone()
                })
            }
            Ok(None) => self.config.fallback_timezone(),
            Err(e) => {
                error!(error = %e, "settings lookup failed; using default timezone");
                self.config.fallback_timezone()
            }
        }
    }

    /// Drop the cached reporting timezone, forcing the next request to
    /// re-read the store. For operational tooling that edits settings.
    pub async fn invalidate_report_timezone(&self) {
        self.settings_cache.invalidate(REPORT_TIMEZONE_KEY).await;
    }
}
