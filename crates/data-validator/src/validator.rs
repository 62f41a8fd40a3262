//! Widget Range Validator

use crate::error::ValidationError;
use crate::fields::{house_fields, InputField, Widget};
use feature_engine::UserInput;
use tracing::{debug, warn};

/// Checks submitted values against the widgets that would have produced them
pub struct Validator {
    fields: Vec<InputField>,
}

impl Validator {
    /// Create a validator over the given widget catalog
    pub fn new(fields: Vec<InputField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[InputField] {
        &self.fields
    }

    /// Validate a single value against a widget
    pub fn validate_field(&self, field: &InputField, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite {
                field: field.name.to_string(),
            });
        }

        match &field.widget {
            Widget::Number { min, max, .. } | Widget::Slider { min, max, .. } => {
                if value.fract() != 0.0 {
                    return Err(ValidationError::NotInteger {
                        field: field.name.to_string(),
                        value,
                    });
                }
                let (min, max) = (*min as f64, *max as f64);
                if value < min || value > max {
                    return Err(ValidationError::OutOfRange {
                        field: field.name.to_string(),
                        value,
                        min,
                        max,
                    });
                }
            }
            Widget::Select { options } => {
                if !options.iter().any(|&option| option as f64 == value) {
                    return Err(ValidationError::InvalidOption {
                        field: field.name.to_string(),
                        value,
                        options: options.iter().map(|&o| o as f64).collect(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Validate every catalog field present in the input. Keys outside the
    /// catalog are left alone.
    pub fn validate(&self, input: &UserInput) -> Result<(), ValidationError> {
        let mut checked = 0;
        for field in &self.fields {
            if let Some(value) = input.get(field.name) {
                self.validate_field(field, value).map_err(|e| {
                    warn!("Rejected input: {}", e);
                    e
                })?;
                checked += 1;
            }
        }
        debug!("Validated {} of {} submitted values", checked, input.len());
        Ok(())
    }

    /// Start from every widget's initial value and overlay what was submitted
    pub fn with_defaults(&self, submitted: &UserInput) -> UserInput {
        let mut input: UserInput = self
            .fields
            .iter()
            .map(|field| (field.name, field.widget.default_value()))
            .collect();

        for (name, value) in submitted.iter() {
            input.insert(name, value);
        }
        input
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(house_fields())
    }
}
