//! Regression Inference Engine
//!
//! Loads the externally trained price model and runs single-row predictions
//! through a narrow [`PriceModel`] capability, so backends can be swapped
//! without touching feature assembly or reporting.

mod artifact;
mod engine;
mod forest;
mod linear;
mod onnx;

pub use artifact::{load_model, ModelArtifact, ModelFormat, ModelMetadata};
pub use engine::{InferenceEngine, InferenceResult};
pub use forest::{ForestModel, RegressionTree, TreeNode};
pub use linear::LinearModel;
pub use onnx::OnnxModel;

use thiserror::Error;

/// Errors during model loading or inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
}

/// A trained regression model
pub trait PriceModel: Send + Sync {
    /// Predict the target for one row of features in model order
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError>;

    /// Per-feature importance weights, aligned with the model's input order
    fn feature_importances(&self) -> &[f64];
}

/// Reject importance vectors that cannot be ranked
pub(crate) fn check_importances(importances: &[f64], width: usize) -> Result<(), InferenceError> {
    if importances.len() != width {
        return Err(InferenceError::ModelLoadError(format!(
            "{} importances for {} input features",
            importances.len(),
            width
        )));
    }
    if let Some(idx) = importances.iter().position(|w| !w.is_finite()) {
        return Err(InferenceError::ModelLoadError(format!(
            "importance at index {} is not finite",
            idx
        )));
    }
    Ok(())
}
