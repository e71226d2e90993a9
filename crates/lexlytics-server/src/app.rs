use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{routes, state::AppState};

/// Construct the Axum [`Router`] with all routes and middleware attached.
///
/// Middleware is applied in outer-to-inner order (outermost runs first on
/// request, last on response):
///
/// 1. `TraceLayer` - structured request/response logging via `tracing`.
/// 2. `CorsLayer` - the dashboard is served from a different origin than
///    this engine. `LEXLYTICS_CORS_ORIGINS` narrows the allow-list; empty
///    means any origin (the surface is read-only).
/// 3. `CompressionLayer` - chart payloads gzip well.
pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins).allow_methods(Any).allow_headers(Any)
    };

    Router::new()
        .route("/health", get(routes::health::health))
        .route("/overview", get(routes::overview::get_overview))
        .route("/channels", get(routes::channels::get_channels))
        .route("/conversions", get(routes::conversions::get_conversions))
        .route("/devices", get(routes::devices::get_devices))
        .route("/pages", get(routes::pages::get_pages))
        .route("/realtime", get(routes::realtime::get_realtime))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(CompressionLayer::new())
        .with_state(state)
}
