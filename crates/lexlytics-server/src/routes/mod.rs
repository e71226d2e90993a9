pub mod channels;
pub mod conversions;
pub mod devices;
pub mod health;
pub mod overview;
pub mod pages;
pub mod realtime;

use serde::Deserialize;

/// Optional `?days=N` query string.
///
/// Deserialized as a raw string so non-numeric input reaches
/// [`lexlytics_core::timeframe::resolve_days`] and is silently corrected to
/// the default window instead of tripping axum's 400 rejection.
#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    pub days: Option<String>,
}
