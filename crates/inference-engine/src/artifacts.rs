//! Model and Scaler Artifact Loading

use crate::model::{RulModel, TractRulModel};
use crate::InferenceError;
use sensor_window::FeatureScaler;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Locations of the artifacts produced by the training pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
}

impl ArtifactPaths {
    /// Resolve both artifacts inside `dir`
    pub fn new(dir: impl AsRef<Path>, model_file: &str, scaler_file: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(model_file),
            scaler: dir.join(scaler_file),
        }
    }
}

/// Artifacts held for the lifetime of the process
pub struct LoadedArtifacts {
    pub model: Arc<dyn RulModel>,
    pub scaler: FeatureScaler,
}

/// Load the model and scaler. Either failure is fatal to the caller.
///
/// The scaler is validated before the model graph is loaded.
pub fn load_artifacts(paths: &ArtifactPaths) -> Result<LoadedArtifacts, InferenceError> {
    let scaler = FeatureScaler::from_path(&paths.scaler).map_err(|e| {
        error!("Scaler loading failed: {}", e);
        InferenceError::from(e)
    })?;
    let model = TractRulModel::from_path(&paths.model).map_err(|e| {
        error!("Model loading failed: {}", e);
        e
    })?;

    info!(
        model = %paths.model.display(),
        scaler = %paths.scaler.display(),
        "Artifacts loaded"
    );

    Ok(LoadedArtifacts {
        model: Arc::new(model),
        scaler,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensor_window::ScalerError;

    #[test]
    fn test_paths_resolve_inside_directory() {
        let paths = ArtifactPaths::new("models", "lstm_model.onnx", "scaler.json");
        assert_eq!(paths.model, PathBuf::from("models/lstm_model.onnx"));
        assert_eq!(paths.scaler, PathBuf::from("models/scaler.json"));
    }

    fn write_scaler(dir: &Path, mean_len: usize) {
        let scaler = serde_json::json!({
            "kind": "standard",
            "mean": vec![0.0f32; mean_len],
            "scale": vec![1.0f32; 17],
        });
        std::fs::write(dir.join("scaler.json"), scaler.to_string()).unwrap();
    }

    #[test]
    fn test_missing_model_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_scaler(dir.path(), 17);
        let paths = ArtifactPaths::new(dir.path(), "lstm_model.onnx", "scaler.json");
        assert!(matches!(
            load_artifacts(&paths),
            Err(InferenceError::ModelLoadError(_))
        ));
    }

    #[test]
    fn test_missing_scaler_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::new(dir.path(), "lstm_model.onnx", "scaler.json");
        assert!(matches!(
            load_artifacts(&paths),
            Err(InferenceError::ScalerLoadError(ScalerError::Io(_)))
        ));
    }

    #[test]
    fn test_short_scaler_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_scaler(dir.path(), 16);
        let paths = ArtifactPaths::new(dir.path(), "lstm_model.onnx", "scaler.json");

        let err = load_artifacts(&paths).err().unwrap();
        assert!(matches!(
            err,
            InferenceError::ScalerLoadError(ScalerError::InvalidParameters(_))
        ));
        assert!(err.to_string().contains("mean has 16 entries"), "{}", err);
    }

    #[test]
    fn test_malformed_scaler_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("scaler.json"), "{\"kind\": \"robust\"}").unwrap();
        let paths = ArtifactPaths::new(dir.path(), "lstm_model.onnx", "scaler.json");
        assert!(matches!(
            load_artifacts(&paths),
            Err(InferenceError::ScalerLoadError(ScalerError::Parse(_)))
        ));
    }
}
