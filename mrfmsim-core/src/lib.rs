//! mrfmsim Core - Fundamental types
//!
//! This crate provides the types shared by the mrfmsim crates:
//! - `Value`: plain (unit-less) field values
//! - `Record`: fixed-schema objects with per-field unit metadata
//! - `FieldError`: field access and construction errors

mod value;
mod record;
mod error;

pub use value::Value;
pub use record::{Record, FieldDescriptor, RecordSchema, DynamicRecord};
pub use error::FieldError;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Value, Record, FieldDescriptor, RecordSchema, DynamicRecord, FieldError};
}
