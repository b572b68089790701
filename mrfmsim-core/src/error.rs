//! Errors raised by record field access

use thiserror::Error;

/// Error type for record field access and construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The record has no field or attribute with this name
    #[error("'{record}' object has no attribute '{field}'")]
    NotFound { record: String, field: String },

    /// A keyword passed at construction is not part of the schema
    #[error("{record}() got an unexpected keyword argument '{field}'")]
    UnknownField { record: String, field: String },

    /// A schema field without a default was not given a value
    #[error("{record}() missing required argument: '{field}'")]
    MissingField { record: String, field: String },
}

impl FieldError {
    pub fn not_found(record: &str, field: &str) -> Self {
        Self::NotFound {
            record: record.to_string(),
            field: field.to_string(),
        }
    }

    /// Name of the field the error refers to
    pub fn field(&self) -> &str {
        match self {
            Self::NotFound { field, .. }
            | Self::UnknownField { field, .. }
            | Self::MissingField { field, .. } => field,
        }
    }
}
