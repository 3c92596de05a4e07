//! HTTP handlers for the REST API.

use anyhow::Context;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::AppError;
use super::state::AppState;
use crate::ingest::parse_csv;
use crate::occupancy::aggregate_with;
use crate::output::OccupancyResponse;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /api/rsf-occupancy
///
/// Reads the CSV, aggregates it and returns the heatmap and timeline.
pub async fn get_occupancy(State(state): State<AppState>) -> HandlerResult<OccupancyResponse> {
    let path = state.csv_path.as_path();

    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(AppError::NotFound("CSV file not found".to_string()));
    }

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    debug!(bytes = bytes.len(), "CSV loaded");

    let readings = parse_csv(&bytes)?;
    let report = aggregate_with(&readings, &state.options);

    info!(
        readings = readings.len(),
        buckets = report.timeline.len(),
        "Occupancy request served"
    );

    Ok(Json(OccupancyResponse::ok(report)))
}
