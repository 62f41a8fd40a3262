//! Feature Vector Assembly

use crate::{FeatureSpec, UserInput};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use tracing::debug;

/// Value used for every feature the user did not supply
pub const MISSING_FEATURE_DEFAULT: f64 = 0.0;

/// One model input row, aligned index-for-index with its [`FeatureSpec`]
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    spec: Arc<FeatureSpec>,
    values: Vec<f64>,
}

impl FeatureRecord {
    /// Raw values in model order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn spec(&self) -> &FeatureSpec {
        &self.spec
    }

    /// Value of a named feature
    pub fn get(&self, name: &str) -> Option<f64> {
        self.spec.position(name).map(|idx| self.values[idx])
    }

    /// `(name, value)` pairs in model order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.spec
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// Serialized as an object whose keys follow model order.
impl Serialize for FeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

/// Builds [`FeatureRecord`]s against a fixed feature list
#[derive(Debug, Clone)]
pub struct FeatureAssembler {
    spec: Arc<FeatureSpec>,
}

impl FeatureAssembler {
    pub fn new(spec: Arc<FeatureSpec>) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &Arc<FeatureSpec> {
        &self.spec
    }

    /// Assemble one row: supplied values pass through unchanged, everything
    /// else becomes [`MISSING_FEATURE_DEFAULT`]. Keys not in the [`FeatureSpec`] are
    /// ignored.
    pub fn assemble(&self, input: &UserInput) -> FeatureRecord {
        let values: Vec<f64> = self
            .spec
            .names()
            .iter()
            .map(|name| input.get(name).unwrap_or(MISSING_FEATURE_DEFAULT))
            .collect();

        let supplied = self
            .spec
            .names()
            .iter()
            .filter(|name| input.contains(name))
            .count();
        debug!(
            "Assembled record: {} features, {} supplied, {} defaulted, {} ignored",
            values.len(),
            supplied,
            values.len() - supplied,
            input.len() - supplied
        );

        FeatureRecord {
            spec: Arc::clone(&self.spec),
            values,
        }
    }
}
