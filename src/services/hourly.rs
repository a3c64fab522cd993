//! Hourly bucketing of irregular sensor samples.
//!
//! Samples are grouped by local calendar day. Each day is then reduced to 24
//! hour slots. Slot `h` covers the minutes-of-day interval `(h*60, (h+1)*60]`
//! and takes the reading closest to, but not after, its end boundary.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::DisplayZone;
use crate::error::LoadError;
use crate::source::models::{Battery, Sample};

pub const HOURS_PER_DAY: usize = 24;

/// Series colors, assigned by day discovery order and wrapping around.
pub const PALETTE: [&str; 5] = ["#4ecdc4", "#ff6b6b", "#45b7d1", "#96ceb4", "#feca57"];

/// A sample placed on the local wall clock.
#[derive(Debug, Clone)]
pub struct LocalSample {
    pub sample: Sample,
    pub local: NaiveDateTime,
}

impl LocalSample {
    #[must_use]
    pub fn minutes_of_day(&self) -> u32 {
        self.local.hour() * 60 + self.local.minute()
    }
}

/// All samples sharing one local calendar date, in time order.
#[derive(Debug, Clone)]
pub struct DayBucket {
    pub date_key: String,
    pub samples: Vec<LocalSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HourlySeries {
    /// e.g. `2024/1/1の温度 (°C)`
    pub label: String,
    /// Always 24 entries, null where no reading qualified
    pub values: Vec<Option<f64>>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HourlyChart {
    /// `0時` through `23時`
    pub hour_labels: Vec<String>,
    pub series: Vec<HourlySeries>,
    /// Number of distinct local dates
    pub date_count: usize,
    /// Raw input sample count
    pub total_points: usize,
    /// Battery indicator of the most recent sample
    #[schema(value_type = Option<String>)]
    pub latest_battery: Option<Battery>,
}

#[must_use]
pub fn hour_labels() -> Vec<String> {
    (0..HOURS_PER_DAY).map(|h| format!("{h}時")).collect()
}

/// Calendar date formatted the way a `ja-JP` locale prints it: `2024/1/1`.
#[must_use]
pub fn date_key(local: &NaiveDateTime) -> String {
    format!("{}/{}/{}", local.year(), local.month(), local.day())
}

#[must_use]
pub fn series_label(date_key: &str) -> String {
    format!("{date_key}の温度 (°C)")
}

#[must_use]
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Sort samples by time (stable) and attach their local wall-clock time.
///
/// # Errors
///
/// Returns `LoadError::Parse` if a timestamp cannot be represented.
pub fn localize(mut samples: Vec<Sample>, zone: DisplayZone) -> Result<Vec<LocalSample>, LoadError> {
    samples.sort_by_key(|s| s.time);

    samples
        .into_iter()
        .map(|sample| {
            let local = zone.local_time(sample.time).ok_or_else(|| {
                LoadError::Parse(format!("timestamp out of range: {}", sample.time))
            })?;
            Ok(LocalSample { sample, local })
        })
        .collect()
}

/// Group time-sorted samples by local date, in order of first appearance.
#[must_use]
pub fn group_by_day(sorted: &[LocalSample]) -> Vec<DayBucket> {
    let mut buckets: Vec<DayBucket> = Vec::new();

    for item in sorted {
        let key = date_key(&item.local);
        match buckets.iter_mut().find(|b| b.date_key == key) {
            Some(bucket) => bucket.samples.push(item.clone()),
            None => buckets.push(DayBucket {
                date_key: key,
                samples: vec![item.clone()],
            }),
        }
    }

    buckets
}

/// Pick the reading for one hour slot of a day.
///
/// Candidates lie in `(hour*60, (hour+1)*60]`. The one with the smallest
/// distance to the end boundary wins, and equal distances keep the first seen.
#[must_use]
pub fn select_for_slot(samples: &[LocalSample], hour: u32) -> Option<&LocalSample> {
    let start_minutes = hour * 60;
    let end_minutes = (hour + 1) * 60;

    let mut closest: Option<&LocalSample> = None;
    let mut min_distance = u32::MAX;

    for item in samples {
        let minutes = item.minutes_of_day();
        if minutes <= start_minutes || minutes > end_minutes {
            continue;
        }
        let distance = end_minutes - minutes;
        if distance < min_distance {
            min_distance = distance;
            closest = Some(item);
        }
    }

    closest
}

/// Reduce one day's samples to 24 hourly temperatures.
#[must_use]
pub fn hourly_values(bucket: &DayBucket) -> Vec<Option<f64>> {
    (0..HOURS_PER_DAY as u32)
        .map(|hour| select_for_slot(&bucket.samples, hour).map(|s| s.sample.temp))
        .collect()
}

/// Build the hourly chart from already localized, time-sorted samples.
///
/// # Errors
///
/// Returns `LoadError::EmptyInput` if there are no samples.
pub fn build_chart(sorted: &[LocalSample]) -> Result<HourlyChart, LoadError> {
    let latest = sorted.last().ok_or(LoadError::EmptyInput)?;

    let buckets = group_by_day(sorted);
    let series = buckets
        .iter()
        .enumerate()
        .map(|(index, bucket)| HourlySeries {
            label: series_label(&bucket.date_key),
            values: hourly_values(bucket),
            color: palette_color(index).to_string(),
        })
        .collect();

    Ok(HourlyChart {
        hour_labels: hour_labels(),
        series,
        date_count: buckets.len(),
        total_points: sorted.len(),
        latest_battery: latest.sample.bat.clone(),
    })
}

/// Sort, bucket and reduce raw samples into an hourly chart.
///
/// # Errors
///
/// Returns `LoadError::EmptyInput` for an empty list and `LoadError::Parse`
/// for unrepresentable timestamps.
pub fn bucketize(samples: Vec<Sample>, zone: DisplayZone) -> Result<HourlyChart, LoadError> {
    let sorted = localize(samples, zone)?;
    build_chart(&sorted)
}
