//! RUL Inference Gateway
//!
//! HTTP surface over the RUL inference engine: liveness, prediction and
//! metrics endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use inference_engine::{load_artifacts, InferenceEngine};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod error;
mod routes;

pub use config::GatewayConfig;
pub use error::{ApiError, ErrorBody, GatewayError};

/// Application state shared across handlers
pub struct AppState {
    /// Read-only inference engine, loaded once at startup
    pub engine: Arc<InferenceEngine>,
    /// Prometheus handle when the exporter is installed
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(engine: InferenceEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Attach a Prometheus handle to serve at `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::health::liveness))
        .route("/health", get(routes::health::health))
        .route("/predict", post(routes::predict::predict))
        .route("/metrics", get(routes::metrics::render))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize logging, honouring `RUST_LOG` (default `info`)
pub fn init_logging(json: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}

/// Load artifacts and build the shared state. Fails if either artifact is unusable.
pub fn build_state(config: &GatewayConfig) -> Result<AppState, GatewayError> {
    let artifacts = load_artifacts(&config.artifact_paths())?;
    let engine = InferenceEngine::from_artifacts(artifacts, config.apply_scaler);
    let mut state = AppState::new(engine);

    if config.metrics_enabled {
        let handle = PrometheusBuilder::new().install_recorder()?;
        state = state.with_metrics(handle);
    }

    Ok(state)
}

/// Run the server until Ctrl-C
pub async fn run_server(config: GatewayConfig) -> Result<(), GatewayError> {
    let state = Arc::new(build_state(&config)?);
    let app = create_router(state);

    info!("Starting API server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
