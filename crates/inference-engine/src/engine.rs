//! Inference Engine Implementation

use crate::artifacts::LoadedArtifacts;
use crate::model::{ConstantModel, ModelInput, RulModel};
use crate::status::{round_rul, HealthStatus};
use crate::InferenceError;
use sensor_window::{FeatureScaler, SensorWindow, ValidationError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Prediction request as it crosses the system boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Engine identifier, must be positive
    pub engine_id: u32,
    /// Readings for the last 50 cycles, 17 sensors each
    pub sensor_readings: Vec<Vec<f32>>,
}

impl PredictionRequest {
    /// Build a request from an already validated window
    pub fn new(engine_id: u32, window: &SensorWindow) -> Self {
        Self {
            engine_id,
            sensor_readings: window.to_rows(),
        }
    }
}

/// Classified prediction returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub engine_id: u32,
    /// Estimated cycles remaining, rounded to two decimals
    pub predicted_rul: f64,
    pub status: HealthStatus,
    pub recommendation: String,
}

/// RUL inference gateway around a read-only model
pub struct InferenceEngine {
    model: Arc<dyn RulModel>,
    /// Applied to each window before inference when present
    scaler: Option<FeatureScaler>,
}

impl InferenceEngine {
    /// Create an engine that feeds readings to the model unscaled
    pub fn new(model: Arc<dyn RulModel>) -> Self {
        info!("Creating inference engine with model: {}", model.name());
        Self { model, scaler: None }
    }

    /// Create a mock inference engine for testing
    pub fn mock(estimate: f32) -> Self {
        Self::new(Arc::new(ConstantModel(estimate)))
    }

    /// Scale every window with `scaler` before inference
    pub fn with_scaler(mut self, scaler: FeatureScaler) -> Self {
        info!("Applying {} scaler before inference", scaler.kind());
        self.scaler = Some(scaler);
        self
    }

    /// Build an engine from loaded artifacts
    pub fn from_artifacts(artifacts: LoadedArtifacts, apply_scaler: bool) -> Self {
        let engine = Self::new(artifacts.model);
        if apply_scaler {
            engine.with_scaler(artifacts.scaler)
        } else {
            warn!(
                "Scaler ({}) is loaded but not applied; readings reach the model unnormalized",
                artifacts.scaler.kind()
            );
            engine
        }
    }

    /// Validate a request and run one inference
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, InferenceError> {
        let window = SensorWindow::from_rows(&request.sensor_readings)?;
        self.predict_window(request.engine_id, &window)
    }

    /// Run one inference on a validated window
    pub fn predict_window(
        &self,
        engine_id: u32,
        window: &SensorWindow,
    ) -> Result<PredictionResult, InferenceError> {
        if engine_id == 0 {
            return Err(ValidationError::InvalidEngineId(engine_id).into());
        }

        let start = Instant::now();
        let input = match &self.scaler {
            Some(scaler) => ModelInput::from_window(&scaler.transform(window)),
            None => ModelInput::from_window(window),
        };
        debug!("Model input shape: {:?}", input.shape());

        let estimate = self.model.estimate(&input)?;
        if !estimate.is_finite() {
            return Err(InferenceError::InvalidOutput(format!(
                "non-finite estimate {}",
                estimate
            )));
        }

        let raw = f64::from(estimate);
        let status = HealthStatus::classify(raw);
        debug!(
            "Prediction for engine {}: rul={:.3} status={} ({}us)",
            engine_id,
            raw,
            status,
            start.elapsed().as_micros()
        );

        Ok(PredictionResult {
            engine_id,
            predicted_rul: round_rul(raw),
            status,
            recommendation: status.recommendation().to_string(),
        })
    }

    /// Whether the scaler is applied before inference
    pub fn scaler_applied(&self) -> bool {
        self.scaler.is_some()
    }

    /// Get model identifier
    pub fn model_name(&self) -> &str {
        self.model.name()
    }
}
