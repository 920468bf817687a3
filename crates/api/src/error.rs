//! API error responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inference_engine::InferenceError;
use metrics_exporter_prometheus::BuildError;
use serde::Serialize;
use thiserror::Error;

/// Errors that stop the gateway from starting or serving
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Failed to load artifacts: {0}")]
    Artifacts(#[from] InferenceError),

    #[error("Failed to install metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error body, `{"detail": ...}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Errors surfaced by the HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body could not be decoded into a prediction request
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },

    /// Request decoded but failed validation
    #[error("{0}")]
    Validation(String),

    /// Model failure or internal fault
    #[error("{0}")]
    Inference(String),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Rejected { status, .. } => *status,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Label used for error metrics
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Rejected { .. } => "rejected",
            ApiError::Validation(_) => "validation",
            ApiError::Inference(_) => "inference",
        }
    }
}

impl From<InferenceError> for ApiError {
    fn from(err: InferenceError) -> Self {
        if err.is_client_error() {
            ApiError::Validation(err.to_string())
        } else {
            ApiError::Inference(err.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
