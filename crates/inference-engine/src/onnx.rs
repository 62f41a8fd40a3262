//! ONNX Backend
//!
//! Runs an exported regression graph with tract. ONNX carries no importance
//! weights, so they come from a sidecar artifact.

use crate::{check_importances, InferenceError, PriceModel};
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::info;

/// Optimized tract plan taking a `[1, n_features]` f32 input
pub struct OnnxModel {
    plan: TypedRunnableModel<TypedModel>,
    n_features: usize,
    feature_importances: Vec<f64>,
}

impl OnnxModel {
    /// Load and optimize the graph; input width is taken from the importances
    pub fn load(path: &Path, feature_importances: Vec<f64>) -> Result<Self, InferenceError> {
        let n_features = feature_importances.len();
        check_importances(&feature_importances, n_features)?;

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, n_features]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| {
                InferenceError::ModelLoadError(format!("{}: {}", path.display(), e))
            })?;

        info!(
            "ONNX model loaded from {} ({} inputs)",
            path.display(),
            n_features
        );

        Ok(Self {
            plan,
            n_features,
            feature_importances,
        })
    }
}

impl PriceModel for OnnxModel {
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != self.n_features {
            return Err(InferenceError::InvalidInputShape {
                expected: self.n_features,
                actual: features.len(),
            });
        }
        let fail = |e: TractError| InferenceError::InferenceFailed(e.to_string());

        let row: Vec<f32> = features.iter().map(|&v| v as f32).collect();
        let input = Tensor::from_shape(&[1, self.n_features], &row).map_err(fail)?;
        let outputs = self.plan.run(tvec!(input.into())).map_err(fail)?;

        let output = outputs.first().ok_or_else(|| {
            InferenceError::InferenceFailed("model produced no outputs".to_string())
        })?;
        let output = output.cast_to::<f32>().map_err(fail)?;
        match output.as_slice::<f32>().map_err(fail)? {
            [value] => Ok(*value as f64),
            values => Err(InferenceError::InferenceFailed(format!(
                "expected a single output value, got {}",
                values.len()
            ))),
        }
    }

    fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_graph() {
        let result = OnnxModel::load(Path::new("/nonexistent/model.onnx"), vec![0.5, 0.5]);
        assert!(matches!(result, Err(InferenceError::ModelLoadError(_))));
    }

    #[test]
    fn test_non_finite_importances() {
        let result = OnnxModel::load(Path::new("/nonexistent/model.onnx"), vec![f64::NAN]);
        assert!(matches!(
            result,
            Err(InferenceError::ModelLoadError(msg)) if msg.contains("not finite")
        ));
    }
}
