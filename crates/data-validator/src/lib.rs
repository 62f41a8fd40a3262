//! Input Catalog and Validation
//!
//! Describes the house attribute widgets offered to the user and enforces the
//! bounds those widgets declare.

mod error;
mod fields;
mod validator;

pub use error::ValidationError;
pub use fields::{house_fields, InputField, Widget};
pub use validator::Validator;
