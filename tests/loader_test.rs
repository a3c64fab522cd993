//! Loader and HTTP route tests against file-backed temperature sources.
//!
//! Run with: cargo test --test loader_test

use std::path::PathBuf;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use tower::ServiceExt;

use mytemp::common::AppState;
use mytemp::config::{Config, Deployment, DisplayZone};
use mytemp::error::{LoadError, LOAD_FAILURE_MESSAGE};
use mytemp::routes::build_router;
use mytemp::services::loader::load_dashboard;
use mytemp::source::client::{parse_document, SourceLocation};
use mytemp::source::TemperatureSource;

// 2024-01-01T00:00:00Z and 2024-01-01T02:15:00Z
const SAMPLE_DOC: &str = r#"{
    "temperatures": [
        { "time": 1704075300000, "temp": 22, "bat": "80%" },
        { "time": 1704067200000, "temp": 20 }
    ]
}"#;

fn write_fixture(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("mytemp-{}-{name}.json", std::process::id()));
    std::fs::write(&path, body).unwrap();
    path
}

fn utc() -> DisplayZone {
    DisplayZone::from_offset_minutes(0).unwrap()
}

fn file_source(path: PathBuf) -> TemperatureSource {
    TemperatureSource::with_location(SourceLocation::File(path), Duration::from_secs(5)).unwrap()
}

fn test_state(path: PathBuf) -> AppState {
    let config = Config {
        temperatures_source: path.display().to_string(),
        fetch_timeout_seconds: 5,
        display_zone: utc(),
        api_host: "127.0.0.1".to_string(),
        api_port: 0,
        deployment: Deployment::Local,
    };
    let source = TemperatureSource::new(&config).unwrap();
    AppState::new(config, source)
}

async fn get(state: AppState, uri: &str) -> (StatusCode, String) {
    let response = build_router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[test]
fn source_location_detects_urls() {
    assert_eq!(
        SourceLocation::parse("https://example.com/temperatures.json"),
        SourceLocation::Url("https://example.com/temperatures.json".to_string())
    );
    assert_eq!(
        SourceLocation::parse("data/temperatures.json"),
        SourceLocation::File(PathBuf::from("data/temperatures.json"))
    );
}

#[test]
fn parse_rejects_missing_fields() {
    assert!(matches!(parse_document("{}"), Err(LoadError::Parse(_))));
    assert!(matches!(
        parse_document(r#"{"temperatures":[{"time":1}]}"#),
        Err(LoadError::Parse(_))
    ));
    assert!(matches!(parse_document("not json"), Err(LoadError::Parse(_))));

    let doc = parse_document(r#"{"temperatures":[{"time":1,"temp":2.5,"bat":null}]}"#).unwrap();
    assert_eq!(doc.temperatures[0].bat, None);
}

#[tokio::test]
async fn loads_dashboard_from_file() {
    let source = file_source(write_fixture("ok", SAMPLE_DOC));
    let dashboard = load_dashboard(&source, utc()).await.unwrap();

    assert_eq!(dashboard.hourly.date_count, 1);
    assert_eq!(dashboard.hourly.total_points, 2);
    assert_eq!(dashboard.hourly.series[0].values[2], Some(22.0));
    assert_eq!(dashboard.battery, "最新のバッテリー残量: 80%");
    assert_eq!(dashboard.rows[0].time_label, "01/01 02:15");
}

#[tokio::test]
async fn classifies_failures() {
    let missing = file_source(std::env::temp_dir().join("mytemp-does-not-exist.json"));
    let err = load_dashboard(&missing, utc()).await.unwrap_err();
    assert_eq!(err.reason(), "network");

    let broken = file_source(write_fixture("broken", "{\"temperatures\": ["));
    let err = load_dashboard(&broken, utc()).await.unwrap_err();
    assert_eq!(err.reason(), "parse");

    let empty = file_source(write_fixture("empty", r#"{"temperatures": []}"#));
    let err = load_dashboard(&empty, utc()).await.unwrap_err();
    assert_eq!(err.reason(), "empty_input");
}

#[tokio::test]
async fn dashboard_route_returns_everything() {
    let (status, body) = get(test_state(write_fixture("route", SAMPLE_DOC)), "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["summary"], "対象日数: 1日 | 総データ点数: 2個");
    assert_eq!(json["chart"]["type"], "line");
    assert_eq!(json["rows"].as_array().unwrap().len(), 2);
    assert_eq!(json["hourly"]["latest_battery"], "80%");
}

#[tokio::test]
async fn failed_load_shows_generic_message() {
    let (status, body) = get(test_state(write_fixture("route-empty", r#"{"temperatures": []}"#)), "/api/chart").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], LOAD_FAILURE_MESSAGE);
    assert_eq!(json["reason"], "empty_input");
}

#[tokio::test]
async fn chart_route_exports_csv() {
    let (status, body) = get(test_state(write_fixture("csv", SAMPLE_DOC)), "/api/chart?format=csv").await;
    assert_eq!(status, StatusCode::OK);

    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 25);
    assert_eq!(lines[0], "hour,2024/1/1の温度 (°C)");
    assert_eq!(lines[1], "0時,");
    assert_eq!(lines[3], "2時,22");
}

#[tokio::test]
async fn chart_route_streams_ndjson() {
    let (status, body) = get(test_state(write_fixture("ndjson", SAMPLE_DOC)), "/api/chart?format=ndjson").await;
    assert_eq!(status, StatusCode::OK);

    let lines: Vec<serde_json::Value> = body
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 24);
    assert_eq!(lines[2]["hour"], "2時");
    assert_eq!(lines[2]["2024/1/1の温度 (°C)"], 22.0);
    assert!(lines[0]["2024/1/1の温度 (°C)"].is_null());
}

#[tokio::test]
async fn readings_route_and_format_validation() {
    let state = test_state(write_fixture("readings", SAMPLE_DOC));

    let (status, body) = get(state.clone(), "/api/readings").await;
    assert_eq!(status, StatusCode::OK);
    let rows: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(rows[0]["temp_label"], "22 °C");
    assert_eq!(rows[1]["hour_mark"], true);

    let (status, body) = get(state.clone(), "/api/readings?format=csv").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("time,time_label,temp_label,hour_mark"));

    let (status, _) = get(state.clone(), "/api/readings?format=xml").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(state, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("mytemp-chart"));
}

#[tokio::test]
async fn dashboard_page_falls_back_to_failure_text() {
    let state = test_state(std::env::temp_dir().join("mytemp-missing-for-page.json"));
    let (status, body) = get(state, "/").await;
    assert_eq!(status, StatusCode::OK);

    assert!(body.contains(&format!("data-failure=\"{LOAD_FAILURE_MESSAGE}\"")));
    assert!(!body.contains("{{LOAD_FAILURE_MESSAGE}}"));
    assert!(body.contains("} catch (error) {"));
    assert!(body.contains("info.textContent = info.dataset.failure;"));
}

#[tokio::test]
async fn healthz_ignores_source() {
    let state = test_state(std::env::temp_dir().join("mytemp-missing-for-health.json"));
    let (status, _) = get(state, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
}
