use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the analytics routes.
///
/// The failure surface is deliberately small: malformed optional input is
/// silently corrected upstream and empty windows reduce to zero-valued
/// aggregates, so the only way a request fails is a store-query error. The
/// handlers fan out all-or-nothing, so any such error aborts the whole
/// request; one `500`, no partial results. The dashboard gets a generic
/// localized message; the real error goes to the log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Internal(e) = &self;
        tracing::error!(error = %e, "analytics query failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "통계 데이터를 불러오지 못했습니다." })),
        )
            .into_response()
    }
}
