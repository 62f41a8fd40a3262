//! Model and form description routes

use axum::{extract::State, http::header, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;
use data_validator::InputField;
use inference_engine::ModelMetadata;
use reporter::RankedFeature;

/// Response for the model endpoint
#[derive(Debug, Serialize)]
pub struct ModelResponse {
    pub metadata: ModelMetadata,
    pub feature_count: usize,
    pub features: Vec<String>,
}

/// Get the input widget catalog
pub async fn get_fields(State(state): State<Arc<AppState>>) -> Json<Vec<InputField>> {
    Json(state.validator.fields().to_vec())
}

/// Get model metadata and the feature list it expects
pub async fn get_model(State(state): State<Arc<AppState>>) -> Json<ModelResponse> {
    let engine = state.reporter.engine();

    Json(ModelResponse {
        metadata: engine.metadata().clone(),
        feature_count: engine.spec().len(),
        features: engine.spec().names().to_vec(),
    })
}

/// Get the ranked feature importances
pub async fn get_importances(State(state): State<Arc<AppState>>) -> Json<Vec<RankedFeature>> {
    Json(state.reporter.top_features().to_vec())
}

/// Get the importance bar chart
pub async fn get_chart(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/png")],
        state.chart_png.clone(),
    )
}
