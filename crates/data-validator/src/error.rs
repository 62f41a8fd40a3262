//! Validation Error Types

use thiserror::Error;

/// Errors during input validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of the widget's range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Integer widget received a fractional value
    #[error("{field} value {value} must be a whole number")]
    NotInteger { field: String, value: f64 },

    /// Value is not one of the selector's choices
    #[error("{field} value {value} is not one of {options:?}")]
    InvalidOption {
        field: String,
        value: f64,
        options: Vec<f64>,
    },

    /// NaN or infinity
    #[error("{field} value is not a finite number")]
    NotFinite { field: String },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            ValidationError::OutOfRange { field, .. }
            | ValidationError::NotInteger { field, .. }
            | ValidationError::InvalidOption { field, .. }
            | ValidationError::NotFinite { field } => field,
        }
    }
}
