//! Prediction Routes

use axum::{extract::State, http::header, response::IntoResponse, Json};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::{ApiError, AppState};
use feature_engine::{FeatureRecord, UserInput};
use reporter::{to_csv, PredictionResult};

/// Body of the predict endpoints
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Submitted form values; unsubmitted widgets use their defaults
    #[serde(default)]
    pub inputs: UserInput,
}

/// validate → fill widget defaults → assemble
fn assemble_record(state: &AppState, request: &PredictRequest) -> Result<FeatureRecord, ApiError> {
    state.validator.validate(&request.inputs)?;
    let input = state.validator.with_defaults(&request.inputs);
    Ok(state.assembler.assemble(&input))
}

fn run_prediction(
    state: &AppState,
    request: &PredictRequest,
) -> Result<PredictionResult, ApiError> {
    let record = assemble_record(state, request)?;

    let start = Instant::now();
    let result = state.reporter.report(&record);
    metrics::histogram!("house_price_inference_seconds").record(start.elapsed().as_secs_f64());

    match result {
        Ok(result) => {
            metrics::counter!("house_price_predictions_total").increment(1);
            info!("Predicted {} ({}us)", result.formatted_price, result.latency_us);
            Ok(result)
        }
        Err(e) => {
            metrics::counter!("house_price_prediction_failures_total").increment(1);
            Err(e.into())
        }
    }
}

/// Assembled model input for the current form, without predicting
pub async fn assemble(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<FeatureRecord>, ApiError> {
    assemble_record(&state, &request).map(Json)
}

/// Predict a sale price
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictionResult>, ApiError> {
    run_prediction(&state, &request).map(Json)
}

/// Predict and download the result as CSV
pub async fn predict_csv(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = run_prediction(&state, &request)?;
    let csv = to_csv(&result)?;
    debug!("Serving {} ({} bytes)", state.csv_filename, csv.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", state.csv_filename),
            ),
        ],
        csv,
    ))
}
