use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::config::DisplayZone;
use crate::error::LoadError;
use crate::services::chart::chart_config;
use crate::services::hourly::{build_chart, localize, HourlyChart};
use crate::services::table::{battery_text, summary_text, table_rows, TableRow};
use crate::source::models::Sample;
use crate::source::TemperatureSource;

/// Everything the dashboard page needs, derived from one load.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Dashboard {
    /// Chart.js line-chart configuration
    #[schema(value_type = Object)]
    pub chart: Value,
    pub hourly: HourlyChart,
    /// e.g. `対象日数: 2日 | 総データ点数: 48個`
    pub summary: String,
    /// e.g. `最新のバッテリー残量: 80%`
    pub battery: String,
    /// Raw readings, newest first
    pub rows: Vec<TableRow>,
}

/// Derive the dashboard from raw samples.
///
/// # Errors
///
/// Returns `LoadError::EmptyInput` for an empty list and `LoadError::Parse`
/// for unrepresentable timestamps.
pub fn build_dashboard(samples: Vec<Sample>, zone: DisplayZone) -> Result<Dashboard, LoadError> {
    let sorted = localize(samples, zone)?;
    let hourly = build_chart(&sorted)?;

    Ok(Dashboard {
        chart: chart_config(&hourly),
        summary: summary_text(hourly.date_count, hourly.total_points),
        battery: battery_text(hourly.latest_battery.as_ref()),
        rows: table_rows(&sorted),
        hourly,
    })
}

/// Fetch the readings and derive the dashboard in one pass.
///
/// Nothing is kept between calls; a failure anywhere fails the whole load.
///
/// # Errors
///
/// Returns the first `LoadError` raised while fetching, parsing or bucketing.
pub async fn load_dashboard(
    source: &TemperatureSource,
    zone: DisplayZone,
) -> Result<Dashboard, LoadError> {
    let result = source
        .fetch_samples()
        .await
        .and_then(|samples| build_dashboard(samples, zone));

    match &result {
        Ok(dashboard) => tracing::info!(
            dates = dashboard.hourly.date_count,
            points = dashboard.hourly.total_points,
            "Dashboard loaded"
        ),
        Err(e) => tracing::error!(error = %e, reason = e.reason(), "Failed to load temperature data"),
    }

    result
}
