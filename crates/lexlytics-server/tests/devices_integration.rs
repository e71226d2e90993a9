use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Duration, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use lexlytics_core::config::Config;
use lexlytics_core::event::PageViewEvent;
use lexlytics_duckdb::DuckDbStore;
use lexlytics_server::app::build_app;
use lexlytics_server::state::AppState;

fn test_config() -> Config {
    Config {
        port: 0,
        data_dir: "/tmp/lexlytics-test".to_string(),
        duckdb_memory_limit: "1GB".to_string(),
        default_timezone: "Asia/Seoul".to_string(),
        cors_origins: vec![],
        settings_ttl_secs: 300,
    }
}

async fn setup() -> (DuckDbStore, axum::Router) {
    let store = DuckDbStore::open_in_memory().expect("in-memory DuckDB");
    let state = Arc::new(AppState::new(store.clone(), test_config()));
    let app = build_app(state);
    (store, app)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

async fn json_body(response: axum::http::Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse JSON")
}

fn view(
    device_type: Option<&str>,
    brand: Option<&str>,
    browser: Option<&str>,
    os: Option<&str>,
    resolution: Option<&str>,
    at: DateTime<Utc>,
) -> PageViewEvent {
    PageViewEvent {
        visitor_id: "v".to_string(),
        session_id: "s".to_string(),
        page_path: "/".to_string(),
        page_title: None,
        referrer_type: None,
        search_keyword: None,
        device_type: device_type.map(Into::into),
        device_brand: brand.map(Into::into),
        browser: browser.map(Into::into),
        os: os.map(Into::into),
        screen_resolution: resolution.map(Into::into),
        time_on_page: 0,
        scroll_depth: 0,
        is_bounce: false,
        created_at: at,
    }
}

// ============================================================
// Each field counts independently; empty/missing values skipped
// ============================================================
#[tokio::test]
async fn test_device_breakdowns() {
    let (store, app) = setup().await;
    let now = Utc::now();
    store
        .insert_page_views(&[
            view(
                Some("mobile"),
                Some("Samsung"),
                Some("Chrome"),
                Some("Android"),
                Some("412x915"),
                now - Duration::hours(1),
            ),
            view(
                Some("mobile"),
                Some("Apple"),
                Some("Safari"),
                Some("iOS"),
                Some("390x844"),
                now - Duration::hours(2),
            ),
            view(
                Some("desktop"),
                None,
                Some("Chrome"),
                Some("Windows"),
                Some("1920x1080"),
                now - Duration::hours(3),
            ),
            view(Some(""), None, None, None, None, now - Duration::hours(4)),
        ])
        .await
        .expect("insert views");

    let response = app.oneshot(get("/devices")).await.expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;

    let device_types = json["deviceTypes"].as_array().expect("deviceTypes");
    assert_eq!(device_types[0]["name"], "mobile");
    assert_eq!(device_types[0]["count"], 2);
    assert_eq!(device_types[1]["name"], "desktop");
    // The empty-string row is skipped, not bucketed.
    let typed: i64 = device_types
        .iter()
        .map(|c| c["count"].as_i64().unwrap_or(0))
        .sum();
    assert_eq!(typed, 3);

    let browsers = json["browsers"].as_array().expect("browsers");
    assert_eq!(browsers[0]["name"], "Chrome");
    assert_eq!(browsers[0]["count"], 2);

    assert_eq!(json["brands"].as_array().expect("brands").len(), 2);
    assert_eq!(
        json["operatingSystems"].as_array().expect("operatingSystems").len(),
        3
    );
    assert_eq!(json["resolutions"].as_array().expect("resolutions").len(), 3);
}

#[tokio::test]
async fn test_devices_empty_window() {
    let (_store, app) = setup().await;

    let response = app.oneshot(get("/devices?days=xyz")).await.expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;

    for key in ["deviceTypes", "brands", "browsers", "operatingSystems", "resolutions"] {
        assert_eq!(json[key], Value::Array(vec![]), "{key} should be empty");
    }
}
