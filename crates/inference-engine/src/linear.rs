//! Linear Regression Backend

use crate::{check_importances, InferenceError, PriceModel};
use serde::Deserialize;

#[derive(Deserialize)]
struct LinearArtifact {
    intercept: f64,
    coefficients: Vec<f64>,
    #[serde(default)]
    feature_importances: Option<Vec<f64>>,
}

/// `intercept + sum(coefficients[i] * features[i])`
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "LinearArtifact")]
pub struct LinearModel {
    intercept: f64,
    coefficients: Vec<f64>,
    feature_importances: Vec<f64>,
}

impl TryFrom<LinearArtifact> for LinearModel {
    type Error = InferenceError;

    fn try_from(artifact: LinearArtifact) -> Result<Self, Self::Error> {
        Self::new(
            artifact.intercept,
            artifact.coefficients,
            artifact.feature_importances,
        )
    }
}

impl LinearModel {
    /// Without explicit importances, the absolute coefficients normalized to
    /// sum to one are used.
    pub fn new(
        intercept: f64,
        coefficients: Vec<f64>,
        feature_importances: Option<Vec<f64>>,
    ) -> Result<Self, InferenceError> {
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(InferenceError::ModelLoadError(
                "linear model has non-finite parameters".to_string(),
            ));
        }

        let feature_importances = match feature_importances {
            Some(importances) => importances,
            None => {
                let total: f64 = coefficients.iter().map(|c| c.abs()).sum();
                coefficients
                    .iter()
                    .map(|c| if total > 0.0 { c.abs() / total } else { 0.0 })
                    .collect()
            }
        };
        check_importances(&feature_importances, coefficients.len())?;

        Ok(Self {
            intercept,
            coefficients,
            feature_importances,
        })
    }
}

impl PriceModel for LinearModel {
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != self.coefficients.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }

        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>())
    }

    fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_predict() {
        let model = LinearModel::new(10_000.0, vec![100.0, 50.0], None).unwrap();
        assert_eq!(model.predict(&[1500.0, 400.0]).unwrap(), 180_000.0);
    }

    #[test]
    fn test_derived_importances() {
        let model = LinearModel::new(0.0, vec![3.0, -1.0], None).unwrap();
        assert_eq!(model.feature_importances(), &[0.75, 0.25]);
    }

    #[test]
    fn test_explicit_importances_width() {
        assert!(LinearModel::new(0.0, vec![1.0, 2.0], Some(vec![1.0])).is_err());
    }

    #[test]
    fn test_shape_mismatch() {
        let model = LinearModel::new(0.0, vec![1.0], None).unwrap();
        assert!(matches!(
            model.predict(&[1.0, 2.0]),
            Err(InferenceError::InvalidInputShape { .. })
        ));
    }
}
