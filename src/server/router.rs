//! Router configuration for the HTTP API.

use std::net::SocketAddr;

use anyhow::Result;
use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::handlers;
use super::state::AppState;

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/rsf-occupancy", get(handlers::get_occupancy))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Binds `addr` and serves until the process is stopped.
#[tracing::instrument(skip(state), fields(csv = %state.csv_path.display()))]
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::env;
    use std::fs;
    use tower::ServiceExt;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    async fn get(state: AppState, uri: &str) -> (StatusCode, Value) {
        let response = create_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(AppState::new("unused.csv"), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_occupancy_success() {
        let path = temp_path("rsf_occupancy_router_ok.csv");
        fs::write(
            &path,
            "Timestamp, percent_filled\n\
             2025-09-08 09:01:00, 0.40\n\
             2025-09-08 09:07:00, 0.60\n\
             2025-09-08 09:14:00, 0.80\n\
             2025-09-08 23:30:00, 0.99\n",
        )
        .unwrap();

        let (status, body) = get(AppState::new(&path), "/api/rsf-occupancy").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["heatmap"]["times"], serde_json::json!(["09:00"]));
        let cell = body["data"]["heatmap"]["values"][0][0].as_f64().unwrap();
        assert!((cell - 60.0).abs() < 1e-9);
        assert_eq!(body["data"]["timeline"].as_array().unwrap().len(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_occupancy_missing_csv() {
        let state = AppState::new(temp_path("rsf_occupancy_router_missing.csv"));
        let (status, body) = get(state, "/api/rsf-occupancy").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "CSV file not found");
    }

    #[tokio::test]
    async fn test_occupancy_no_valid_rows() {
        let path = temp_path("rsf_occupancy_router_empty.csv");
        fs::write(&path, "Timestamp,percent_filled\n2025-09-08 09:00:00,n/a\n").unwrap();

        let (status, body) = get(AppState::new(&path), "/api/rsf-occupancy").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No valid data found in CSV");

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_occupancy_skips_invalid_utf8_row() {
        let path = temp_path("rsf_occupancy_router_utf8.csv");
        fs::write(
            &path,
            b"Timestamp,percent_filled\n\
              2025-09-08 09:00:00,0.5\n\
              2025-09-08 09:15:00,0.6\xff\n\
              2025-09-08 09:30:00,0.7\n",
        )
        .unwrap();

        let (status, body) = get(AppState::new(&path), "/api/rsf-occupancy").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["heatmap"]["times"],
            serde_json::json!(["09:00", "09:30"])
        );

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_occupancy_all_filtered_is_ok_and_empty() {
        let path = temp_path("rsf_occupancy_router_closed.csv");
        fs::write(&path, "Timestamp,percent_filled\n2025-09-08 03:00:00,0.1\n").unwrap();

        let (status, body) = get(AppState::new(&path), "/api/rsf-occupancy").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["heatmap"]["times"], serde_json::json!([]));
        assert_eq!(body["data"]["heatmap"]["values"].as_array().unwrap().len(), 7);
        assert_eq!(body["data"]["timeline"], serde_json::json!([]));

        fs::remove_file(&path).unwrap();
    }
}
