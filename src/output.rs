//! Output formatting and persistence for occupancy reports.
//!
//! Supports log summaries, JSON serialization, gzip and file export.

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::occupancy::OccupancyReport;

/// Success envelope shared by the HTTP endpoint and the JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyResponse {
    pub success: bool,
    pub data: OccupancyReport,
}

impl OccupancyResponse {
    pub fn ok(data: OccupancyReport) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Logs a one-line summary of the report plus its busiest slot.
pub fn log_summary(report: &OccupancyReport) {
    if report.is_empty() {
        warn!("No data after filtering open hours");
        return;
    }

    info!(
        buckets = report.timeline.len(),
        slots = report.heatmap.times.len(),
        "Occupancy aggregated"
    );

    if let Some(peak) = report.busiest() {
        info!(
            weekday = %peak.weekday,
            time = %peak.time_str,
            percent = peak.avg_fill * 100.0,
            "Busiest slot"
        );
    }
    debug!("{:#?}", report.heatmap.times);
}

/// Serializes the report wrapped in an [`OccupancyResponse`].
pub fn to_json(report: &OccupancyReport, pretty: bool) -> Result<Vec<u8>> {
    let envelope = OccupancyResponse::ok(report.clone());
    let body = if pretty {
        serde_json::to_vec_pretty(&envelope)?
    } else {
        serde_json::to_vec(&envelope)?
    };
    Ok(body)
}

/// Gzip-compresses a byte buffer.
pub fn gzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

/// Writes the report as JSON to `path`, creating parent directories.
///
/// A path ending in `.gz` is written gzip-compressed.
pub fn write_report(path: &str, report: &OccupancyReport, pretty: bool) -> Result<()> {
    let mut body = to_json(report, pretty)?;
    if path.ends_with(".gz") {
        body = gzip(&body)?;
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    std::fs::write(path, &body).with_context(|| format!("failed to write {path}"))?;
    debug!(path, bytes = body.len(), "Report written");

    Ok(())
}
