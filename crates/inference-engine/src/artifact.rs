//! Model Artifact Loading

use crate::{ForestModel, InferenceError, LinearModel, OnnxModel, PriceModel};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// On-disk encoding of the model artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    /// JSON document with a `model.kind` of `forest` or `linear`
    Json,
    /// ONNX graph plus a JSON importances sidecar
    Onnx,
}

/// Descriptive information shipped alongside the model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    #[serde(default)]
    pub name: Option<String>,
    /// Coefficient of determination on the holdout set
    #[serde(default)]
    pub r2: Option<f64>,
    /// Root mean squared error on the holdout set, in currency units
    #[serde(default)]
    pub rmse: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    /// Backend that serves predictions; filled in by the loader
    #[serde(default, skip_deserializing)]
    pub backend: String,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum JsonModel {
    Forest(ForestModel),
    Linear(LinearModel),
}

#[derive(Deserialize)]
struct JsonArtifact {
    #[serde(default)]
    metadata: ModelMetadata,
    model: JsonModel,
}

#[derive(Deserialize)]
struct OnnxSidecar {
    feature_importances: Vec<f64>,
    #[serde(default)]
    metadata: ModelMetadata,
}

/// A loaded model and its metadata
pub struct ModelArtifact {
    pub model: Box<dyn PriceModel>,
    pub metadata: ModelMetadata,
}

impl std::fmt::Debug for ModelArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifact")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

fn read(path: &Path) -> Result<String, InferenceError> {
    std::fs::read_to_string(path)
        .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))
}

impl ModelArtifact {
    /// Parse a JSON model artifact
    pub fn from_json_str(json: &str) -> Result<Self, InferenceError> {
        let artifact: JsonArtifact = serde_json::from_str(json)
            .map_err(|e| InferenceError::ModelLoadError(format!("malformed model: {}", e)))?;

        let mut metadata = artifact.metadata;
        let model: Box<dyn PriceModel> = match artifact.model {
            JsonModel::Forest(forest) => {
                metadata.backend = format!("forest ({} trees)", forest.n_trees());
                Box::new(forest)
            }
            JsonModel::Linear(linear) => {
                metadata.backend = "linear".to_string();
                Box::new(linear)
            }
        };

        Ok(Self { model, metadata })
    }
}

/// Load the model artifact once at startup
pub fn load_model(
    path: &Path,
    format: ModelFormat,
    importances_path: Option<&Path>,
) -> Result<ModelArtifact, InferenceError> {
    info!("Loading {:?} model from {}", format, path.display());

    match format {
        ModelFormat::Json => ModelArtifact::from_json_str(&read(path)?),
        ModelFormat::Onnx => {
            let sidecar_path = importances_path.ok_or_else(|| {
                InferenceError::ModelLoadError(
                    "ONNX models need a feature importances file".to_string(),
                )
            })?;
            let sidecar: OnnxSidecar = serde_json::from_str(&read(sidecar_path)?).map_err(|e| {
                InferenceError::ModelLoadError(format!(
                    "malformed importances {}: {}",
                    sidecar_path.display(),
                    e
                ))
            })?;

            let model = OnnxModel::load(path, sidecar.feature_importances)?;
            let mut metadata = sidecar.metadata;
            metadata.backend = "onnx".to_string();

            Ok(ModelArtifact {
                model: Box::new(model),
                metadata,
            })
        }
    }
}
