pub mod chart;
pub mod dashboard;
pub mod health;
pub mod readings;

use axum::{
    http::header::{self, HeaderMap, HeaderValue},
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::{IntoParams, OpenApi};
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;
use crate::error::{AppError, AppResult};

/// Response encodings supported by the data routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Ndjson,
}

fn default_format() -> String {
    "json".to_string()
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FormatQuery {
    /// Response format: json (default), csv, ndjson
    #[serde(default = "default_format")]
    pub format: String,
}

/// Resolve the response format from the query parameter, then the Accept header.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an unknown format name.
pub fn determine_format(query_format: &str, headers: &HeaderMap) -> AppResult<OutputFormat> {
    // Query parameter takes precedence
    match query_format.to_lowercase().as_str() {
        "json" => {}
        "csv" => return Ok(OutputFormat::Csv),
        "ndjson" => return Ok(OutputFormat::Ndjson),
        other => {
            return Err(AppError::BadRequest(format!(
                "Invalid format: {other}. Must be one of: json, csv, ndjson"
            )));
        }
    }

    // Check Accept header
    if let Some(accept) = headers.get(header::ACCEPT)
        && let Ok(accept_str) = accept.to_str()
    {
        if accept_str.contains("application/x-ndjson") {
            return Ok(OutputFormat::Ndjson);
        }
        if accept_str.contains("text/csv") {
            return Ok(OutputFormat::Csv);
        }
    }

    Ok(OutputFormat::Json)
}

/// Wrap a fully written CSV document in a response
pub fn csv_response(data: Vec<u8>) -> AppResult<Response> {
    Response::builder()
        .header(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/csv; charset=utf-8"),
        )
        .body(axum::body::Body::from(data))
        .map_err(|e| AppError::Internal(e.to_string()))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        chart::get_dashboard,
        chart::get_chart,
        readings::get_readings,
    ),
    components(
        schemas(
            crate::services::loader::Dashboard,
            crate::services::hourly::HourlyChart,
            crate::services::hourly::HourlySeries,
            crate::services::table::TableRow,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "chart", description = "Hourly temperature chart"),
        (name = "readings", description = "Raw temperature readings"),
    ),
    info(
        title = "mytemp API",
        description = "Hourly temperature dashboard for a battery-powered sensor",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/dashboard", get(chart::get_dashboard))
        .route("/chart", get(chart::get_chart))
        .route("/readings", get(readings::get_readings))
        .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    let page_routes = Router::new()
        .route("/", get(dashboard::dashboard))
        .route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .nest("/api", api_routes)
        .merge(page_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
