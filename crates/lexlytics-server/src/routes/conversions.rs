use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use lexlytics_core::aggregate::conversions::reduce_conversions;
use lexlytics_core::timeframe::{resolve_days, TimeRange};

use crate::{error::AppError, state::AppState};

use super::WindowQuery;

/// `GET /conversions?days=N` - funnel stages, event mix, channel rates.
pub async fn get_conversions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WindowQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = TimeRange::last_days(resolve_days(query.days.as_deref()));

    let (events, sessions) = tokio::try_join!(
        state.store.query_conversion_events(&range),
        state.store.query_sessions(&range),
    )?;

    Ok(Json(reduce_conversions(&events, &sessions)))
}
