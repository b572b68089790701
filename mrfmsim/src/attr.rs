//! Field values as returned by `MrfmUnitRegistry::getattr`

use std::fmt;
use mrfmsim_core::{FieldError, Value};
use mrfmsim_units::UnitError;
use thiserror::Error;
use crate::MrfmQuantity;

/// A record field: the raw value, or a quantity when the field declares a unit
#[derive(Debug, Clone, PartialEq)]
pub enum Attr {
    Value(Value),
    Quantity(MrfmQuantity),
}

impl Attr {
    pub fn is_quantity(&self) -> bool {
        matches!(self, Attr::Quantity(_))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Attr::Value(v) => Some(v),
            Attr::Quantity(_) => None,
        }
    }

    pub fn as_quantity(&self) -> Option<&MrfmQuantity> {
        match self {
            Attr::Quantity(q) => Some(q),
            Attr::Value(_) => None,
        }
    }

    pub fn into_quantity(self) -> Option<MrfmQuantity> {
        match self {
            Attr::Quantity(q) => Some(q),
            Attr::Value(_) => None,
        }
    }
}

impl From<Value> for Attr {
    fn from(v: Value) -> Self {
        Attr::Value(v)
    }
}

impl From<MrfmQuantity> for Attr {
    fn from(q: MrfmQuantity) -> Self {
        Attr::Quantity(q)
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attr::Value(v) => write!(f, "{}", v),
            Attr::Quantity(q) => write!(f, "{}", q),
        }
    }
}

impl PartialEq<Value> for Attr {
    fn eq(&self, other: &Value) -> bool {
        self.as_value() == Some(other)
    }
}

impl PartialEq<MrfmQuantity> for Attr {
    fn eq(&self, other: &MrfmQuantity) -> bool {
        self.as_quantity() == Some(other)
    }
}

/// Errors from reading a record field with its unit
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttrError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Unit(#[from] UnitError),

    /// The field declares a unit but holds something that is not a number
    #[error("field '{field}' has unit '{unit}' but holds a {type_name} value")]
    NotNumeric {
        field: String,
        unit: String,
        type_name: &'static str,
    },
}
