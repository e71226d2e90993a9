use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use lexlytics_core::aggregate::overview::reduce_overview;
use lexlytics_core::timeframe::{resolve_days, TimeRange};

use crate::{error::AppError, state::AppState};

use super::WindowQuery;

/// `GET /overview?days=N` - traffic totals, daily series, hourly heatmap.
pub async fn get_overview(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WindowQuery>,
) -> Result<impl IntoResponse, AppError> {
    let days = resolve_days(query.days.as_deref());
    let range = TimeRange::last_days(days);
    let tz = state.report_timezone().await;

    // Independent range scans; fan out, join, then reduce. A failure on
    // any leg aborts the request (no partial overview).
    let (views, sessions, events) = tokio::try_join!(
        state.store.query_page_views(&range),
        state.store.query_sessions(&range),
        state.store.query_conversion_events(&range),
    )?;

    Ok(Json(reduce_overview(
        &views, &sessions, &events, &range, days, tz,
    )))
}
