//! Feature Specification

use crate::FeatureError;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Ordered list of feature names the model was trained on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSpec {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl FeatureSpec {
    /// Build a specification, rejecting duplicate names
    pub fn new<I, S>(names: I) -> Result<Self, FeatureError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(names.len());

        for (position, name) in names.iter().enumerate() {
            if index.insert(name.clone(), position).is_some() {
                return Err(FeatureError::DuplicateFeature(name.clone()));
            }
        }

        Ok(Self { names, index })
    }

    /// Parse a JSON array of feature names
    pub fn from_json_str(json: &str) -> Result<Self, FeatureError> {
        let names: Vec<String> = serde_json::from_str(json)?;
        if names.is_empty() {
            return Err(FeatureError::Empty);
        }
        Self::new(names)
    }

    /// Load the feature list artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FeatureError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FeatureError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let spec = Self::from_json_str(&json)?;
        info!("Loaded {} features from {}", spec.len(), path.display());
        Ok(spec)
    }

    /// Feature names in model order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of a feature in the model order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Serialize for FeatureSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.names.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_preserves_order() {
        let spec = FeatureSpec::new(["GrLivArea", "GarageArea", "TotalBsmtSF"]).unwrap();
        assert_eq!(spec.len(), 3);
        assert_eq!(spec.names()[0], "GrLivArea");
        assert_eq!(spec.position("TotalBsmtSF"), Some(2));
        assert_eq!(spec.position("LotArea"), None);
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = FeatureSpec::new(["A", "B", "A"]).unwrap_err();
        assert!(matches!(err, FeatureError::DuplicateFeature(name) if name == "A"));
    }

    #[test]
    fn test_from_json() {
        let spec = FeatureSpec::from_json_str(r#"["LotArea", "MSZoning_RL"]"#).unwrap();
        assert_eq!(spec.names(), &["LotArea".to_string(), "MSZoning_RL".to_string()]);
    }

    #[test]
    fn test_empty_artifact_rejected() {
        assert!(matches!(
            FeatureSpec::from_json_str("[]"),
            Err(FeatureError::Empty)
        ));
    }

    #[test]
    fn test_corrupt_artifact_rejected() {
        assert!(matches!(
            FeatureSpec::from_json_str(r#"{"features": 3}"#),
            Err(FeatureError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = FeatureSpec::load("/nonexistent/features.json").unwrap_err();
        assert!(matches!(err, FeatureError::Io { .. }));
    }
}
