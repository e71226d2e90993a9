use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use lexlytics_core::aggregate::devices::reduce_devices;
use lexlytics_core::timeframe::{resolve_days, TimeRange};

use crate::{error::AppError, state::AppState};

use super::WindowQuery;

/// `GET /devices?days=N` - device/brand/browser/OS/resolution breakdowns.
pub async fn get_devices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WindowQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = TimeRange::last_days(resolve_days(query.days.as_deref()));
    let views = state.store.query_page_views(&range).await?;
    Ok(Json(reduce_devices(&views)))
}
