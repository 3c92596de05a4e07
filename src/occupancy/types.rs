//! Data types used by the occupancy aggregation pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Day of the week in the fixed Monday-first order used for every view.
///
/// Names come from a fixed table, never from locale-aware date formatting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays, Monday through Sunday.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Row index in the heatmap (Monday = 0 ... Sunday = 6).
    pub fn index(self) -> usize {
        self as usize
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single occupancy sample as supplied by ingestion.
///
/// `timestamp` is facility-local wall-clock time and is only parsed during
/// aggregation; rows that fail to parse are dropped there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    pub timestamp: String,
    pub percent_filled: f64,
}

impl RawReading {
    pub fn new(timestamp: impl Into<String>, percent_filled: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            percent_filled,
        }
    }
}

/// Mean occupancy for one weekday and 15-minute slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateBucket {
    pub weekday: Weekday,
    /// Slot label, `HH:MM` in 24-hour form.
    pub time_str: String,
    /// Slot start in minutes since midnight.
    pub minutes: u32,
    /// Unscaled mean of the raw `percent_filled` values.
    pub avg_fill: f64,
}

/// Dense weekday x slot matrix, scaled by 100 for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapView {
    pub weekdays: [Weekday; 7],
    pub times: Vec<String>,
    /// `values[weekday][slot]`; slots with no readings are `0.0`.
    pub values: Vec<Vec<f64>>,
}

/// Complete aggregation result: the heatmap plus the sorted timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyReport {
    pub heatmap: HeatmapView,
    pub timeline: Vec<AggregateBucket>,
}

impl OccupancyReport {
    /// True when no reading survived filtering.
    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    /// The bucket with the highest average fill, if any.
    pub fn busiest(&self) -> Option<&AggregateBucket> {
        self.timeline
            .iter()
            .max_by(|a, b| a.avg_fill.total_cmp(&b.avg_fill))
    }

    /// Timeline entries for a single weekday, in slot order.
    pub fn timeline_for(&self, weekday: Weekday) -> impl Iterator<Item = &AggregateBucket> {
        self.timeline.iter().filter(move |b| b.weekday == weekday)
    }
}
