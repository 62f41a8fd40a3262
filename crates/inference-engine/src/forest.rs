//! Tree Ensemble Backend
//!
//! Random-forest style regressor exported as JSON: every tree is a flat node
//! array rooted at index 0, and the prediction is the mean of the tree outputs.

use crate::{check_importances, InferenceError, PriceModel};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Node of a binary regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go to `left` when `features[feature] <= threshold`, else `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { value: f64 },
}

/// Flat-array regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Child indices must point strictly forward, which rules out cycles
    fn check(&self, tree_idx: usize, n_features: usize) -> Result<(), InferenceError> {
        let invalid = |node: usize, reason: String| {
            InferenceError::ModelLoadError(format!("tree {} node {}: {}", tree_idx, node, reason))
        };

        if self.nodes.is_empty() {
            return Err(invalid(0, "tree has no nodes".to_string()));
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(invalid(
                            idx,
                            format!("feature {} out of {} inputs", feature, n_features),
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(idx, "threshold is not finite".to_string()));
                    }
                    for child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(invalid(idx, format!("bad child index {}", child)));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(invalid(idx, "leaf value is not finite".to_string()));
                    }
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, features: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[feature] <= threshold { left } else { right };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }
}

#[derive(Deserialize)]
struct ForestArtifact {
    n_features: usize,
    trees: Vec<RegressionTree>,
    feature_importances: Vec<f64>,
}

/// Averaging ensemble of regression trees
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "ForestArtifact")]
pub struct ForestModel {
    n_features: usize,
    trees: Vec<RegressionTree>,
    feature_importances: Vec<f64>,
}

impl TryFrom<ForestArtifact> for ForestModel {
    type Error = InferenceError;

    fn try_from(artifact: ForestArtifact) -> Result<Self, Self::Error> {
        Self::new(
            artifact.n_features,
            artifact.trees,
            artifact.feature_importances,
        )
    }
}

impl ForestModel {
    /// Build an ensemble, validating every tree
    pub fn new(
        n_features: usize,
        trees: Vec<RegressionTree>,
        feature_importances: Vec<f64>,
    ) -> Result<Self, InferenceError> {
        if trees.is_empty() {
            return Err(InferenceError::ModelLoadError(
                "ensemble has no trees".to_string(),
            ));
        }
        for (idx, tree) in trees.iter().enumerate() {
            tree.check(idx, n_features)?;
        }
        check_importances(&feature_importances, n_features)?;

        debug!(
            "Tree ensemble ready: {} trees over {} features",
            trees.len(),
            n_features
        );

        Ok(Self {
            n_features,
            trees,
            feature_importances,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

impl PriceModel for ForestModel {
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != self.n_features {
            return Err(InferenceError::InvalidInputShape {
                expected: self.n_features,
                actual: features.len(),
            });
        }

        let total: f64 = self.trees.iter().map(|tree| tree.evaluate(features)).sum();
        Ok(total / self.trees.len() as f64)
    }

    fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, low: f64, high: f64) -> RegressionTree {
        RegressionTree {
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: low },
                TreeNode::Leaf { value: high },
            ],
        }
    }

    #[test]
    fn test_forest_averages_trees() {
        let model = ForestModel::new(
            2,
            vec![stump(0, 1000.0, 100.0, 200.0), stump(1, 5.0, 150.0, 250.0)],
            vec![0.6, 0.4],
        )
        .unwrap();

        assert_eq!(model.predict(&[1500.0, 3.0]).unwrap(), 175.0);
        assert_eq!(model.predict(&[800.0, 9.0]).unwrap(), 175.0);
        assert_eq!(model.predict(&[2000.0, 9.0]).unwrap(), 225.0);
    }

    #[test]
    fn test_threshold_goes_left() {
        let model = ForestModel::new(1, vec![stump(0, 10.0, 1.0, 2.0)], vec![1.0]).unwrap();
        assert_eq!(model.predict(&[10.0]).unwrap(), 1.0);
    }

    #[test]
    fn test_shape_mismatch() {
        let model = ForestModel::new(2, vec![stump(0, 1.0, 0.0, 1.0)], vec![1.0, 0.0]).unwrap();
        assert!(matches!(
            model.predict(&[1.0]),
            Err(InferenceError::InvalidInputShape {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_backward_child_rejected() {
        let tree = RegressionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 1,
                    right: 0,
                },
                TreeNode::Leaf { value: 1.0 },
            ],
        };
        assert!(ForestModel::new(1, vec![tree], vec![1.0]).is_err());
    }

    #[test]
    fn test_feature_out_of_range_rejected() {
        assert!(ForestModel::new(1, vec![stump(3, 1.0, 0.0, 1.0)], vec![1.0]).is_err());
    }

    #[test]
    fn test_importance_width_checked() {
        assert!(ForestModel::new(2, vec![stump(0, 1.0, 0.0, 1.0)], vec![1.0]).is_err());
    }

    #[test]
    fn test_empty_forest_rejected() {
        assert!(ForestModel::new(1, vec![], vec![1.0]).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{
            "n_features": 1,
            "trees": [{"nodes": [
                {"feature": 0, "threshold": 2.5, "left": 1, "right": 2},
                {"value": 10.0},
                {"value": 20.0}
            ]}],
            "feature_importances": [1.0]
        }"#;
        let model: ForestModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.predict(&[3.0]).unwrap(), 20.0);

        let broken = json.replace("\"right\": 2", "\"right\": 7");
        assert!(serde_json::from_str::<ForestModel>(&broken).is_err());
    }
}
