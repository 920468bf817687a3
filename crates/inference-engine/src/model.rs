//! Model Provider
//!
//! The trained RUL regressor is an external artifact. Anything that maps a
//! `(1, 50, 17)` tensor to a single estimate can stand in for it.

use crate::InferenceError;
use sensor_window::{SensorWindow, NUM_SENSORS, WINDOW_LEN};
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::{debug, info};

type TractPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Single-batch model input, owned by one request
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInput {
    data: Vec<f32>,
}

impl ModelInput {
    /// Tensor shape fed to the model
    pub const SHAPE: [usize; 3] = [1, WINDOW_LEN, NUM_SENSORS];

    /// Reshape a validated window into a batch of one
    pub fn from_window(window: &SensorWindow) -> Self {
        Self {
            data: window.as_slice().to_vec(),
        }
    }

    /// Tensor shape
    pub fn shape(&self) -> [usize; 3] {
        Self::SHAPE
    }

    /// Row-major tensor data
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// A loaded, read-only regression model
pub trait RulModel: Send + Sync {
    /// Run one inference and return the raw RUL estimate
    fn estimate(&self, input: &ModelInput) -> Result<f32, InferenceError>;

    /// Human readable identifier for logs
    fn name(&self) -> &str;
}

/// Model that always returns the same estimate.
///
/// Used for demos and tests in place of a real artifact.
#[derive(Debug, Clone, Copy)]
pub struct ConstantModel(pub f32);

impl RulModel for ConstantModel {
    fn estimate(&self, _input: &ModelInput) -> Result<f32, InferenceError> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "constant"
    }
}

/// ONNX model executed by tract
pub struct TractRulModel {
    plan: TractPlan,
    source: String,
}

impl TractRulModel {
    /// Load, type and optimize an ONNX model for the fixed input shape
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        info!("Loading ONNX model from {}", path.display());

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact(ModelInput::SHAPE).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))?;

        info!("Model loaded successfully");
        Ok(Self {
            plan,
            source: path.display().to_string(),
        })
    }
}

impl RulModel for TractRulModel {
    fn estimate(&self, input: &ModelInput) -> Result<f32, InferenceError> {
        let tensor: Tensor = tract_ndarray::Array3::from_shape_vec(
            (1, WINDOW_LEN, NUM_SENSORS),
            input.as_slice().to_vec(),
        )
        .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?
        .into();

        let outputs = self
            .plan
            .run(tvec!(tensor.into()))
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| InferenceError::InvalidOutput("model produced no outputs".to_string()))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::InvalidOutput(e.to_string()))?;

        debug!("Model output shape: {:?}", view.shape());
        view.iter()
            .next()
            .copied()
            .ok_or_else(|| InferenceError::InvalidOutput("model output is empty".to_string()))
    }

    fn name(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_input_shape() {
        let input = ModelInput::from_window(&SensorWindow::zeros());
        assert_eq!(input.shape(), [1, 50, 17]);
        assert_eq!(input.as_slice().len(), 850);
    }

    #[test]
    fn test_constant_model() {
        let input = ModelInput::from_window(&SensorWindow::zeros());
        assert_eq!(ConstantModel(120.0).estimate(&input).unwrap(), 120.0);
    }

    #[test]
    fn test_missing_onnx_file_fails_to_load() {
        let err = TractRulModel::from_path("/nonexistent/lstm_model.onnx")
            .err()
            .unwrap();
        assert!(matches!(err, InferenceError::ModelLoadError(_)));
        assert!(err.to_string().contains("lstm_model.onnx"));
    }

    #[test]
    fn test_garbage_onnx_file_fails_to_load() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"not an onnx graph").unwrap();
        assert!(matches!(
            TractRulModel::from_path(file.path()),
            Err(InferenceError::ModelLoadError(_))
        ));
    }
}
