use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use lexlytics_core::aggregate::channels::reduce_channels;
use lexlytics_core::timeframe::{resolve_days, TimeRange};

use crate::{error::AppError, state::AppState};

use super::WindowQuery;

/// `GET /channels?days=N` - referrer mix, search keywords, UTM campaigns.
pub async fn get_channels(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WindowQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = TimeRange::last_days(resolve_days(query.days.as_deref()));

    let (views, sessions) = tokio::try_join!(
        state.store.query_page_views(&range),
        state.store.query_sessions(&range),
    )?;

    Ok(Json(reduce_channels(&views, &sessions)))
}
