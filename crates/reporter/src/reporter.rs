//! Prediction Reporter

use crate::{format_price, rank_importances, RankedFeature, ReportError};
use feature_engine::FeatureRecord;
use inference_engine::InferenceEngine;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

/// Everything shown to the user for one prediction request
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    /// Raw model estimate
    pub price: f64,
    /// Estimate rounded for display
    pub formatted_price: String,
    /// Input row that produced the estimate
    pub record: FeatureRecord,
    /// Most influential features, strongest first
    pub top_features: Vec<RankedFeature>,
    pub latency_us: u64,
}

/// Runs the model for one record and packages the result
pub struct PredictionReporter {
    engine: Arc<InferenceEngine>,
    ranking: Vec<RankedFeature>,
}

impl PredictionReporter {
    /// The model is immutable, so the importance ranking is computed once here.
    pub fn new(engine: Arc<InferenceEngine>, top_n: usize) -> Self {
        let ranking = rank_importances(engine.spec().names(), engine.feature_importances(), top_n);
        debug!(
            "Top features: {:?}",
            ranking.iter().map(|r| r.name.as_str()).collect::<Vec<_>>()
        );
        Self { engine, ranking }
    }

    pub fn engine(&self) -> &Arc<InferenceEngine> {
        &self.engine
    }

    /// Ranked feature importances
    pub fn top_features(&self) -> &[RankedFeature] {
        &self.ranking
    }

    /// Predict a price for the record. Model failures are returned, never
    /// retried.
    pub fn report(&self, record: &FeatureRecord) -> Result<PredictionResult, ReportError> {
        let inference = self.engine.predict(record).map_err(|e| {
            error!("Prediction failed: {}", e);
            e
        })?;

        Ok(PredictionResult {
            price: inference.price,
            formatted_price: format_price(inference.price),
            record: record.clone(),
            top_features: self.ranking.clone(),
            latency_us: inference.latency_us,
        })
    }
}
