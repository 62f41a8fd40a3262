//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_validator::ValidationError;
use reporter::ReportError;
use serde::Serialize;
use thiserror::Error;

/// Errors returned from request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("Metrics recorder is not installed")]
    MetricsUnavailable,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, field) = match &self {
            ApiError::Validation(e) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Some(e.field().to_string()))
            }
            ApiError::Report(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
            ApiError::MetricsUnavailable => (StatusCode::NOT_FOUND, None),
        };

        let body = ErrorBody {
            error: self.to_string(),
            field,
        };
        (status, Json(body)).into_response()
    }
}
