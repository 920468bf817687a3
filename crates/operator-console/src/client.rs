//! HTTP client for the RUL gateway

use crate::ConsoleError;
use inference_engine::{PredictionRequest, PredictionResult};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Liveness body returned by `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Liveness {
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Client for the gateway's HTTP surface
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: Url,
}

impl GatewayClient {
    /// Create a new client for the gateway at `base_url`
    pub fn new(base_url: &str) -> Result<Self, ConsoleError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        // Keep any path prefix when joining endpoint names
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    /// Gateway base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Probe `GET /`
    pub async fn liveness(&self) -> Result<Liveness, ConsoleError> {
        let response = self.client.get(self.base_url.clone()).send().await?;
        Self::parse(response).await
    }

    /// Submit a prediction request to `POST /predict`
    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, ConsoleError> {
        let url = self.base_url.join("predict")?;
        debug!("POST {} (engine {})", url, request.engine_id);

        let response = self.client.post(url).json(request).send().await?;
        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ConsoleError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.detail)
            .unwrap_or(body);
        Err(ConsoleError::Gateway {
            status: status.as_u16(),
            detail,
        })
    }
}
