//! Occupancy aggregation.
//!
//! This module takes timestamped occupancy readings, drops those taken
//! outside opening hours, buckets the rest into 15-minute slots per weekday
//! and averages them into a heatmap and a timeline.

pub mod aggregate;
pub mod hours;
pub mod timestamp;
pub mod types;
pub mod utility;

pub use aggregate::{AggregateOptions, aggregate, aggregate_with};
pub use types::{AggregateBucket, HeatmapView, OccupancyReport, RawReading, Weekday};
