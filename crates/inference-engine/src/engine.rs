//! Inference Engine Implementation

use crate::{InferenceError, ModelArtifact, ModelMetadata, PriceModel};
use feature_engine::{FeatureRecord, FeatureSpec};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Result of one inference call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InferenceResult {
    /// Estimated sale price
    pub price: f64,
    /// Inference latency in microseconds
    pub latency_us: u64,
}

/// Read-only pairing of a loaded model with the feature list it was trained on
pub struct InferenceEngine {
    model: Box<dyn PriceModel>,
    metadata: ModelMetadata,
    spec: Arc<FeatureSpec>,
}

impl InferenceEngine {
    /// Bind a model to its feature list; importances must line up one-to-one
    pub fn new(artifact: ModelArtifact, spec: Arc<FeatureSpec>) -> Result<Self, InferenceError> {
        let width = artifact.model.feature_importances().len();
        if width != spec.len() {
            return Err(InferenceError::ModelLoadError(format!(
                "model reports {} feature importances but the feature list has {} entries",
                width,
                spec.len()
            )));
        }

        info!(
            "Inference engine ready: backend={}, features={}",
            artifact.metadata.backend,
            spec.len()
        );

        Ok(Self {
            model: artifact.model,
            metadata: artifact.metadata,
            spec,
        })
    }

    /// Run the model on one record
    pub fn predict(&self, record: &FeatureRecord) -> Result<InferenceResult, InferenceError> {
        let start = Instant::now();

        if record.spec().names() != self.spec.names() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.spec.len(),
                actual: record.len(),
            });
        }

        let price = self.model.predict(record.values())?;
        if !price.is_finite() {
            return Err(InferenceError::InferenceFailed(format!(
                "model returned {}",
                price
            )));
        }

        let latency_us = start.elapsed().as_micros() as u64;
        debug!("Inference completed in {}us: {:.2}", latency_us, price);

        Ok(InferenceResult { price, latency_us })
    }

    /// Importance weights in feature list order
    pub fn feature_importances(&self) -> &[f64] {
        self.model.feature_importances()
    }

    pub fn spec(&self) -> &Arc<FeatureSpec> {
        &self.spec
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}
