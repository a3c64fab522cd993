//! Chart.js configuration for the hourly line chart.

use serde_json::{json, Value};

use crate::services::hourly::{HourlyChart, HourlySeries};

/// Tooltip text for a point without a reading.
pub const NO_DATA_TEXT: &str = "データなし";

const AXIS_TITLE_COLOR: &str = "#666";
const GRID_COLOR: &str = "rgba(0,0,0,0.1)";

/// Tooltip line for one dataset at the hovered hour.
#[must_use]
pub fn tooltip_label(label: &str, value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{label}: {v}°C"),
        None => format!("{label}: {NO_DATA_TEXT}"),
    }
}

/// One dataset; later days get a lower `order` so they are drawn in front.
fn dataset(series: &HourlySeries, index: usize, count: usize) -> Value {
    json!({
        "label": series.label,
        "data": series.values,
        "backgroundColor": format!("{}80", series.color),
        "borderColor": series.color,
        "borderWidth": 2,
        "spanGaps": true,
        "tension": 0.1,
        "pointRadius": 3,
        "pointHoverRadius": 5,
        "fill": false,
        "order": count - index - 1,
    })
}

fn axis(title: &str) -> Value {
    json!({
        "title": { "display": true, "text": title, "color": AXIS_TITLE_COLOR },
        "grid": { "color": GRID_COLOR },
    })
}

/// Build the full line-chart configuration handed to the browser.
#[must_use]
pub fn chart_config(chart: &HourlyChart) -> Value {
    let count = chart.series.len();
    let datasets: Vec<Value> = chart
        .series
        .iter()
        .enumerate()
        .map(|(index, series)| dataset(series, index, count))
        .collect();

    json!({
        "type": "line",
        "data": {
            "labels": chart.hour_labels,
            "datasets": datasets,
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "scales": {
                "x": axis("時間"),
                "y": axis("温度 (°C)"),
            },
            "plugins": {
                "legend": { "display": true, "position": "top" },
                "tooltip": {
                    "mode": "index",
                    "intersect": false,
                    "noDataText": NO_DATA_TEXT,
                },
            },
            "interaction": { "mode": "nearest", "axis": "x", "intersect": false },
            "elements": { "line": { "spanGaps": true } },
        },
    })
}
