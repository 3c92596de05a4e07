use crate::occupancy::hours::is_open;
use crate::occupancy::timestamp::{minute_of_day, parse_local_timestamp};
use crate::occupancy::types::{AggregateBucket, HeatmapView, OccupancyReport, RawReading, Weekday};
use crate::occupancy::utility::{floor_to_slot, format_slot, mean};
use chrono::Datelike;
use std::collections::{BTreeMap, BTreeSet};

/// Switches applied while aggregating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Drop readings taken while the facility is closed.
    pub filter_open_hours: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            filter_open_hours: true,
        }
    }
}

/// Aggregates readings into a weekday x 15-minute heatmap and a timeline,
/// keeping only readings taken during opening hours.
///
/// Readings with an unparseable timestamp or a non-finite `percent_filled`
/// are dropped silently. Empty input yields an empty but well-formed report.
pub fn aggregate(readings: &[RawReading]) -> OccupancyReport {
    aggregate_with(readings, &AggregateOptions::default())
}

/// Same as [`aggregate`], with explicit [`AggregateOptions`].
pub fn aggregate_with(readings: &[RawReading], options: &AggregateOptions) -> OccupancyReport {
    // Keyed by (weekday, slot minute); BTreeMap order is the timeline order.
    let mut series: BTreeMap<(Weekday, u32), Vec<f64>> = BTreeMap::new();

    for reading in readings {
        let Some(ts) = parse_local_timestamp(&reading.timestamp) else {
            continue;
        };

        let weekday = Weekday::from(ts.weekday());
        let minute = minute_of_day(&ts);

        if options.filter_open_hours && !is_open(weekday, minute) {
            continue;
        }

        if !reading.percent_filled.is_finite() {
            continue;
        }

        series
            .entry((weekday, floor_to_slot(minute)))
            .or_default()
            .push(reading.percent_filled);
    }

    let timeline: Vec<AggregateBucket> = series
        .iter()
        .map(|(&(weekday, slot), values)| AggregateBucket {
            weekday,
            time_str: format_slot(slot),
            minutes: slot,
            avg_fill: mean(values),
        })
        .collect();

    let heatmap = build_heatmap(&timeline);

    OccupancyReport { heatmap, timeline }
}

fn build_heatmap(timeline: &[AggregateBucket]) -> HeatmapView {
    let slots: Vec<u32> = timeline
        .iter()
        .map(|b| b.minutes)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut values = vec![vec![0.0; slots.len()]; Weekday::ALL.len()];

    for bucket in timeline {
        if let Ok(col) = slots.binary_search(&bucket.minutes) {
            values[bucket.weekday.index()][col] = bucket.avg_fill * 100.0;
        }
    }

    HeatmapView {
        weekdays: Weekday::ALL,
        times: slots.iter().map(|&m| format_slot(m)).collect(),
        values,
    }
}
