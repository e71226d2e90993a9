use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use lexlytics_core::aggregate::pages::reduce_pages;
use lexlytics_core::timeframe::{resolve_days, TimeRange};

use crate::{error::AppError, state::AppState};

use super::WindowQuery;

/// `GET /pages?days=N` - per-page engagement plus landing/exit rankings.
pub async fn get_pages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WindowQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = TimeRange::last_days(resolve_days(query.days.as_deref()));

    let (views, sessions) = tokio::try_join!(
        state.store.query_page_views(&range),
        state.store.query_sessions(&range),
    )?;

    Ok(Json(reduce_pages(&views, &sessions)))
}
