//! Error types for the source field.
//!
//! Only configuration problems are errors. Malformed stored values and
//! unresolvable sources degrade to a smaller selection instead.

use source_field_id::UnknownCategoryError;
use thiserror::Error;

/// Fatal source field errors.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The field's configured source type does not name a known category.
    #[error("Field is misconfigured: {0}")]
    UnknownSourceType(#[from] UnknownCategoryError),

    /// Field settings could not be decoded.
    #[error("Invalid field settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),

    /// A base criteria value was not a JSON object.
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),
}
