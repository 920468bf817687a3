//! Prediction backends
//!
//! The console reaches the gateway either in-process or over HTTP. Both
//! submit the same `PredictionRequest` and yield the same `PredictionResult`.

use crate::client::GatewayClient;
use crate::ConsoleError;
use inference_engine::{InferenceEngine, PredictionRequest, PredictionResult};
use std::sync::Arc;

/// Where predictions are computed
#[derive(Clone)]
pub enum Backend {
    /// Call the inference engine in this process
    Local(Arc<InferenceEngine>),
    /// Call the gateway's `/predict` endpoint
    Remote(GatewayClient),
}

impl Backend {
    /// Submit one request
    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, ConsoleError> {
        match self {
            Backend::Local(engine) => Ok(engine.predict(request)?),
            Backend::Remote(client) => client.predict(request).await,
        }
    }

    /// Short description for the prompt banner
    pub fn describe(&self) -> String {
        match self {
            Backend::Local(engine) => format!("local ({})", engine.model_name()),
            Backend::Remote(client) => format!("remote ({})", client.base_url()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inference_engine::{HealthStatus, SensorWindow};

    #[tokio::test]
    async fn test_local_backend() {
        let backend = Backend::Local(Arc::new(InferenceEngine::mock(42.0)));
        let request = PredictionRequest::new(2, &SensorWindow::zeros());

        let result = backend.predict(&request).await.unwrap();
        assert_eq!(result.status, HealthStatus::Critical);
        assert!(backend.describe().starts_with("local"));
    }

    #[tokio::test]
    async fn test_local_backend_reports_validation() {
        let backend = Backend::Local(Arc::new(InferenceEngine::mock(42.0)));
        let request = PredictionRequest {
            engine_id: 2,
            sensor_readings: vec![vec![0.0; 18]; 50],
        };

        assert!(matches!(
            backend.predict(&request).await,
            Err(ConsoleError::Inference(_))
        ));
    }
}
