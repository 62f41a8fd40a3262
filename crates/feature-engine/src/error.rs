//! Feature Specification Error Types

use thiserror::Error;

/// Errors while loading a feature specification
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Artifact could not be read
    #[error("Failed to read feature list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Artifact is not a JSON array of strings
    #[error("Malformed feature list: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Same name appears twice
    #[error("Duplicate feature name: {0}")]
    DuplicateFeature(String),

    /// Artifact contains no features
    #[error("Feature list is empty")]
    Empty,
}
