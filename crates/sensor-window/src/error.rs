//! Validation Error Types

use thiserror::Error;

/// Errors raised while validating a prediction request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Sensor readings do not form a 50x17 matrix
    #[error("Invalid sensor window shape: expected {expected}, got {actual}")]
    InvalidShape { expected: String, actual: String },

    /// A reading is NaN or infinite
    #[error("Non-finite reading {value} at cycle {cycle}, sensor {sensor}")]
    NonFinite { cycle: usize, sensor: usize, value: f32 },

    /// Engine identifier is not a positive integer
    #[error("engine_id must be a positive integer, got {0}")]
    InvalidEngineId(u32),
}

/// Errors while loading the feature scaler artifact
#[derive(Debug, Error)]
pub enum ScalerError {
    #[error("Failed to read scaler artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scaler artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid scaler parameters: {0}")]
    InvalidParameters(String),
}
