use std::time::Duration;

use chrono_tz::Tz;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: String,
    pub duckdb_memory_limit: String,
    /// IANA zone name used for daily/hourly bucketing when the store carries
    /// no `report_timezone` setting (or carries an unparseable one).
    pub default_timezone: String,
    pub cors_origins: Vec<String>,
    pub settings_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            port: std::env::var("LEXLYTICS_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|e| format!("invalid port: {e}"))?,
            data_dir: std::env::var("LEXLYTICS_DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            duckdb_memory_limit: std::env::var("LEXLYTICS_DUCKDB_MEMORY")
                .unwrap_or_else(|_| "1GB".to_string()),
            default_timezone: std::env::var("LEXLYTICS_TIMEZONE")
                .unwrap_or_else(|_| "Asia/Seoul".to_string()),
            cors_origins: std::env::var("LEXLYTICS_CORS_ORIGINS")
                .map(|v| v.split(',').map(str::to_string).collect())
                .unwrap_or_default(),
            settings_ttl_secs: std::env::var("LEXLYTICS_SETTINGS_TTL_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .unwrap_or(300),
        })
    }

    pub fn settings_ttl(&self) -> Duration {
        Duration::from_secs(self.settings_ttl_secs)
    }

    /// Parsed `default_timezone`, with UTC as the last-resort fallback.
    pub fn fallback_timezone(&self) -> Tz {
        self.default_timezone.parse().unwrap_or(chrono_tz::UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_zone(zone: &str) -> Config {
        Config {
            port: 0,
            data_dir: String::new(),
            duckdb_memory_limit: "1GB".to_string(),
            default_timezone: zone.to_string(),
            cors_origins: vec![],
            settings_ttl_secs: 300,
        }
    }

    #[test]
    fn fallback_timezone_parses_iana_names() {
        assert_eq!(
            config_with_zone("Asia/Seoul").fallback_timezone(),
            chrono_tz::Asia::Seoul
        );
    }

    #[test]
    fn fallback_timezone_defaults_to_utc_on_garbage() {
        assert_eq!(config_with_zone("Mars/Olympus").fallback_timezone(), chrono_tz::UTC);
    }
}
