//! Feature Engineering Engine
//!
//! Reconciles the model's authoritative feature list with the values a user
//! supplied, producing the single ordered row the model consumes.

mod assembler;
mod error;
mod input;
mod spec;

pub use assembler::{FeatureAssembler, FeatureRecord, MISSING_FEATURE_DEFAULT};
pub use error::FeatureError;
pub use input::UserInput;
pub use spec::FeatureSpec;
