//! Feature Scaler Artifact

use crate::error::ScalerError;
use crate::window::{SensorWindow, NUM_SENSORS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Per-sensor scaling fitted offline and shipped next to the model.
///
/// The artifact is a JSON document tagged by `kind`. Every parameter vector
/// holds one entry per sensor channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureScaler {
    /// Rescale each channel from `[data_min, data_max]` into `feature_range`
    MinMax {
        data_min: Vec<f32>,
        data_max: Vec<f32>,
        #[serde(default = "default_feature_range")]
        feature_range: (f32, f32),
    },
    /// Z-score each channel with a fitted mean and scale
    Standard { mean: Vec<f32>, scale: Vec<f32> },
}

fn default_feature_range() -> (f32, f32) {
    (0.0, 1.0)
}

impl FeatureScaler {
    /// Load and validate a scaler artifact from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScalerError> {
        let path = path.as_ref();
        debug!("Loading scaler from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        let scaler = Self::from_json(&raw)?;
        info!("Scaler loaded: {} ({} channels)", scaler.kind(), NUM_SENSORS);
        Ok(scaler)
    }

    /// Parse and validate a scaler from its JSON form
    pub fn from_json(raw: &str) -> Result<Self, ScalerError> {
        let scaler: Self = serde_json::from_str(raw)?;
        scaler.validate()?;
        Ok(scaler)
    }

    /// Artifact kind name
    pub fn kind(&self) -> &'static str {
        match self {
            FeatureScaler::MinMax { .. } => "min_max",
            FeatureScaler::Standard { .. } => "standard",
        }
    }

    /// Check parameter lengths and finiteness
    pub fn validate(&self) -> Result<(), ScalerError> {
        let params: [(&str, &[f32]); 2] = match self {
            FeatureScaler::MinMax { data_min, data_max, .. } => {
                [("data_min", data_min.as_slice()), ("data_max", data_max.as_slice())]
            }
            FeatureScaler::Standard { mean, scale } => {
                [("mean", mean.as_slice()), ("scale", scale.as_slice())]
            }
        };

        for (name, values) in params {
            if values.len() != NUM_SENSORS {
                return Err(ScalerError::InvalidParameters(format!(
                    "{} has {} entries, expected {}",
                    name,
                    values.len(),
                    NUM_SENSORS
                )));
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(ScalerError::InvalidParameters(format!(
                    "{} contains non-finite values",
                    name
                )));
            }
        }

        if let FeatureScaler::MinMax { feature_range: (lo, hi), .. } = self {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(ScalerError::InvalidParameters(format!(
                    "feature_range ({}, {}) must be finite and increasing",
                    lo, hi
                )));
            }
        }

        Ok(())
    }

    /// Scale every reading of a window, column by column
    pub fn transform(&self, window: &SensorWindow) -> SensorWindow {
        match self {
            FeatureScaler::MinMax {
                data_min,
                data_max,
                feature_range: (lo, hi),
            } => window.map_columns(|sensor, value| {
                let range = data_max[sensor] - data_min[sensor];
                if range == 0.0 {
                    *lo
                } else {
                    lo + (value - data_min[sensor]) * (hi - lo) / range
                }
            }),
            FeatureScaler::Standard { mean, scale } => window.map_columns(|sensor, value| {
                // A constant channel was fitted with zero variance
                let scale = if scale[sensor] == 0.0 { 1.0 } else { scale[sensor] };
                (value - mean[sensor]) / scale
            }),
        }
    }
}
