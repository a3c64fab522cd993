use axum::{
    extract::{Query, State},
    http::header::{self, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::routes::{csv_response, determine_format, FormatQuery, OutputFormat};
use crate::services::loader::load_dashboard;
use crate::services::table::TableRow;

fn build_csv(rows: &[TableRow]) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::Internal(e.to_string()))
}

fn build_ndjson(rows: &[TableRow]) -> AppResult<Response> {
    let mut body = String::new();
    for row in rows {
        let line = serde_json::to_string(row).map_err(|e| AppError::Internal(e.to_string()))?;
        body.push_str(&line);
        body.push('\n');
    }

    Response::builder()
        .header(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-ndjson"),
        )
        .body(axum::body::Body::from(body))
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Get the raw readings table
///
/// Returns every reading, newest first, with on-the-hour rows flagged.
/// Supports JSON, CSV, and NDJSON formats.
#[utoipa::path(
    get,
    path = "/api/readings",
    params(FormatQuery),
    responses(
        (status = 200, description = "Readings retrieved successfully", body = Vec<TableRow>),
        (status = 400, description = "Invalid format"),
        (status = 502, description = "Temperature data could not be loaded"),
    ),
    tag = "readings"
)]
pub async fn get_readings(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let format = determine_format(&query.format, &headers)?;
    let rows = load_dashboard(&state.source, state.config.display_zone)
        .await?
        .rows;

    match format {
        OutputFormat::Csv => csv_response(build_csv(&rows)?),
        OutputFormat::Ndjson => build_ndjson(&rows),
        OutputFormat::Json => Ok(Json(rows).into_response()),
    }
}
