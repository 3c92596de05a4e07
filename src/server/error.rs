//! HTTP error handling and response types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::ingest::IngestError;

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// The CSV source does not exist.
    NotFound(String),
    /// The CSV exists but holds nothing usable.
    BadRequest {
        message: String,
        details: Option<String>,
    },
    /// Anything else; the message goes into `details`.
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: message,
                    details: None,
                },
            ),
            AppError::BadRequest { message, details } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: message,
                    details,
                },
            ),
            AppError::Internal(details) => {
                error!(error = %details, "Error processing occupancy data");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Failed to process occupancy data".to_string(),
                        details: Some(details),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::NoValidData => AppError::BadRequest {
                message: err.to_string(),
                details: None,
            },
            IngestError::MissingColumn(_) => AppError::BadRequest {
                message: IngestError::NoValidData.to_string(),
                details: Some(err.to_string()),
            },
            IngestError::Csv(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(format!("{err:#}"))
    }
}
