use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use lexlytics_core::aggregate::realtime::{reduce_realtime, RECENT_WINDOW_MINUTES};
use lexlytics_core::timeframe::TimeRange;

use crate::{error::AppError, state::AppState};

/// `GET /realtime` - active visitors and the live activity feed.
///
/// No caller-supplied window: both rolling windows are fixed relative to
/// request time, and the response must never be cached by an intermediary;
/// every call recomputes against the current clock.
pub async fn get_realtime(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();
    let recent = TimeRange::last_minutes_from(now, RECENT_WINDOW_MINUTES);

    // One 30-minute projection per collection; the 5-minute active subset
    // is derived in memory.
    let (views, events) = tokio::try_join!(
        state.store.query_page_views(&recent),
        state.store.query_conversion_events(&recent),
    )?;

    Ok((
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        Json(reduce_realtime(&views, &events, now)),
    ))
}
