use axum::{
    extract::{Query, State},
    http::header::{self, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use tokio_stream::wrappers::ReceiverStream;

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::routes::{csv_response, determine_format, FormatQuery, OutputFormat};
use crate::services::hourly::HourlyChart;
use crate::services::loader::{load_dashboard, Dashboard};

fn build_csv(chart: &HourlyChart) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    // Header row: hour, one column per day
    let mut header = vec!["hour".to_string()];
    header.extend(chart.series.iter().map(|s| s.label.clone()));
    writer
        .write_record(&header)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    for (i, hour) in chart.hour_labels.iter().enumerate() {
        let mut row = vec![hour.clone()];
        for series in &chart.series {
            // Empty cell for a slot without a reading
            row.push(
                series
                    .values
                    .get(i)
                    .and_then(|v| *v)
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            );
        }
        writer
            .write_record(&row)
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(e.to_string()))
}

fn build_ndjson_response(chart: HourlyChart) -> AppResult<Response> {
    let (tx, rx) = tokio::sync::mpsc::channel::<Result<String, std::io::Error>>(24);

    tokio::spawn(async move {
        // Each line is one hour slot with a value per day
        for (i, hour) in chart.hour_labels.iter().enumerate() {
            let mut obj = serde_json::Map::new();
            obj.insert("hour".to_string(), serde_json::json!(hour));

            for series in &chart.series {
                let value = series.values.get(i).and_then(|v| *v);
                obj.insert(
                    series.label.clone(),
                    value.map_or(serde_json::Value::Null, |v| serde_json::json!(v)),
                );
            }

            let line = format!("{}\n", serde_json::Value::Object(obj));
            if tx.send(Ok(line)).await.is_err() {
                break;
            }
        }
    });

    let stream = ReceiverStream::new(rx);
    let body = axum::body::Body::from_stream(stream);

    Response::builder()
        .header(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-ndjson"),
        )
        .body(body)
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Load everything the dashboard page needs
///
/// Fetches the readings afresh and returns the chart configuration, the
/// summary and battery lines, and the table rows.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard built successfully", body = Dashboard),
        (status = 502, description = "Temperature data could not be loaded"),
    ),
    tag = "chart"
)]
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<Dashboard>> {
    let dashboard = load_dashboard(&state.source, state.config.display_zone).await?;
    Ok(Json(dashboard))
}

/// Get the hourly chart
///
/// Returns one 24-slot series per local calendar day.
/// Supports JSON, CSV, and NDJSON formats.
#[utoipa::path(
    get,
    path = "/api/chart",
    params(FormatQuery),
    responses(
        (status = 200, description = "Hourly chart built successfully", body = HourlyChart),
        (status = 400, description = "Invalid format"),
        (status = 502, description = "Temperature data could not be loaded"),
    ),
    tag = "chart"
)]
pub async fn get_chart(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let format = determine_format(&query.format, &headers)?;
    let dashboard = load_dashboard(&state.source, state.config.display_zone).await?;
    let chart = dashboard.hourly;

    match format {
        OutputFormat::Csv => csv_response(build_csv(&chart)?),
        OutputFormat::Ndjson => build_ndjson_response(chart),
        OutputFormat::Json => Ok(Json(chart).into_response()),
    }
}
