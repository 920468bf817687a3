//! Prediction Route

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use inference_engine::{PredictionRequest, PredictionResult};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, field, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// `POST /predict`
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let span = info_span!(
        "predict",
        request_id = %Uuid::new_v4(),
        engine_id = field::Empty
    );

    async move {
        let result = run_prediction(&state, payload).await;
        record_outcome(&result);
        result.map(Json)
    }
    .instrument(span)
    .await
}

fn record_outcome(result: &Result<PredictionResult, ApiError>) {
    match result {
        Ok(prediction) => {
            metrics::counter!("rul_predictions_total", "status" => prediction.status.as_str())
                .increment(1);
        }
        Err(err) => {
            metrics::counter!("rul_prediction_errors_total", "kind" => err.kind()).increment(1);
            if err.status().is_server_error() {
                error!("Prediction failed: {}", err);
            } else {
                warn!("Prediction rejected: {}", err);
            }
        }
    }
}

async fn run_prediction(
    state: &Arc<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<PredictionResult, ApiError> {
    let Json(request) = payload?;

    let span = Span::current();
    span.record("engine_id", request.engine_id);
    let engine = Arc::clone(&state.engine);
    let start = Instant::now();

    // One blocking inference per request, off the async workers
    let outcome = tokio::task::spawn_blocking(move || span.in_scope(|| engine.predict(&request)))
        .await
        .map_err(|e| ApiError::Inference(format!("inference task aborted: {}", e)))?;

    metrics::histogram!("rul_inference_duration_seconds").record(start.elapsed().as_secs_f64());

    let prediction = outcome?;
    info!(
        predicted_rul = prediction.predicted_rul,
        status = %prediction.status,
        "Prediction served"
    );
    Ok(prediction)
}
