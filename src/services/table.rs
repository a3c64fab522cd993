use chrono::Timelike;
use serde::Serialize;
use utoipa::ToSchema;

use crate::services::hourly::LocalSample;
use crate::source::models::Battery;

/// Shown when the latest sample carries no battery indicator.
pub const BATTERY_UNKNOWN: &str = "--";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TableRow {
    /// Epoch milliseconds of the reading
    pub time: i64,
    /// Local `MM/DD HH:mm`
    pub time_label: String,
    /// e.g. `22.5 °C`
    pub temp_label: String,
    /// Row is highlighted as an on-the-hour reading
    pub hour_mark: bool,
}

/// Whether a row counts as "on the hour".
///
/// A zero minute always qualifies. Every row except the first also qualifies
/// within five minutes after the hour.
#[must_use]
pub fn is_hour_mark(minute: u32, index: usize) -> bool {
    minute == 0 || (index > 0 && minute.abs_diff(0) < 5)
}

/// Rows for the raw-data table, newest first.
#[must_use]
pub fn table_rows(sorted: &[LocalSample]) -> Vec<TableRow> {
    sorted
        .iter()
        .rev()
        .enumerate()
        .map(|(index, item)| TableRow {
            time: item.sample.time,
            time_label: item.local.format("%m/%d %H:%M").to_string(),
            temp_label: format!("{} °C", item.sample.temp),
            hour_mark: is_hour_mark(item.local.minute(), index),
        })
        .collect()
}

#[must_use]
pub fn summary_text(date_count: usize, total_points: usize) -> String {
    format!("対象日数: {date_count}日 | 総データ点数: {total_points}個")
}

#[must_use]
pub fn battery_text(battery: Option<&Battery>) -> String {
    match battery {
        Some(b) => format!("最新のバッテリー残量: {b}"),
        None => format!("最新のバッテリー残量: {BATTERY_UNKNOWN}"),
    }
}
