//! Gateway configuration

use inference_engine::ArtifactPaths;
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "RUL_GATEWAY";

/// Gateway configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GatewayConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Directory holding the model and scaler artifacts
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,

    /// ONNX model file name inside `model_dir`
    #[serde(default = "default_model_file")]
    pub model_file: String,

    /// Scaler file name inside `model_dir`
    #[serde(default = "default_scaler_file")]
    pub scaler_file: String,

    /// Scale readings before inference
    #[serde(default)]
    pub apply_scaler: bool,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,

    /// Serve Prometheus metrics at /metrics
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_model_file() -> String {
    "lstm_model.onnx".to_string()
}

fn default_scaler_file() -> String {
    "scaler.json".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            model_dir: default_model_dir(),
            model_file: default_model_file(),
            scaler_file: default_scaler_file(),
            apply_scaler: false,
            log_json: false,
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from `rul-gateway.toml` (or `$RUL_GATEWAY_CONFIG`)
    /// and `RUL_GATEWAY_*` environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        let file = std::env::var("RUL_GATEWAY_CONFIG").unwrap_or_else(|_| "rul-gateway".to_string());
        Self::from_sources(&file, ENV_PREFIX)
    }

    /// Layer an optional config file under environment variables with `prefix`
    pub fn from_sources(file: &str, prefix: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(config::Environment::with_prefix(prefix).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Artifact locations derived from the model directory
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(&self.model_dir, &self.model_file, &self.scaler_file)
    }
}
