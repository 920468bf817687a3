//! RUL Inference Engine
//!
//! Validates sensor windows, runs the pre-trained Remaining Useful Life
//! model through tract-onnx, and classifies the estimate into a health status.

mod artifacts;
mod engine;
mod model;
mod status;

pub use artifacts::{load_artifacts, ArtifactPaths, LoadedArtifacts};
pub use engine::{InferenceEngine, PredictionRequest, PredictionResult};
pub use model::{ConstantModel, ModelInput, RulModel, TractRulModel};
pub use status::{round_rul, HealthStatus, CRITICAL_BELOW, WARNING_BELOW};

pub use sensor_window::{FeatureScaler, SensorWindow, ValidationError, NUM_SENSORS, WINDOW_LEN};

use sensor_window::ScalerError;
use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Scaler load failed: {0}")]
    ScalerLoadError(#[from] ScalerError),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid model output: {0}")]
    InvalidOutput(String),
}

impl InferenceError {
    /// Whether the caller sent bad input, as opposed to a server-side fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, InferenceError::Validation(_))
    }
}
