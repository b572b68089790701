//! Errors raised by unit lookup, conversion and system resolution

use thiserror::Error;
use crate::Dimension;

/// Errors that can occur during unit lookup, conversion or system setup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// Unknown unit name or symbol
    #[error("'{0}' is not defined in the unit registry")]
    UnknownUnit(String),

    /// Malformed unit expression
    #[error("invalid unit expression '{expr}': {reason}")]
    InvalidExpression { expr: String, reason: String },

    /// Units have incompatible dimensions
    #[error("cannot convert from '{from}' ({from_dim}) to '{to}' ({to_dim})")]
    IncompatibleDimensions {
        from: String,
        to: String,
        from_dim: Dimension,
        to_dim: Dimension,
    },

    /// No unit system registered under this name
    #[error("unknown unit system '{0}'")]
    UnknownSystem(String),

    /// Malformed system definition text
    #[error("invalid system definition (line {line}): {reason}")]
    InvalidSystemDefinition { line: usize, reason: String },

    /// A rewrite rule names a unit that is not a single base dimension
    #[error("system '{system}': '{unit}' does not measure a single base dimension")]
    NotBaseDimension { system: String, unit: String },

    /// A system leaves a required base dimension undefined
    #[error("system '{system}' defines no base unit for {dimension}")]
    IncompleteSystem { system: String, dimension: String },

    /// A declared base-unit scale disagrees with the unit database
    #[error("system '{system}': scale {declared} for '{unit}' disagrees with the unit database ({expected})")]
    InconsistentScale {
        system: String,
        unit: String,
        declared: f64,
        expected: f64,
    },
}

impl UnitError {
    pub(crate) fn incompatible(from: &crate::Unit, to: &crate::Unit) -> Self {
        UnitError::IncompatibleDimensions {
            from: from.symbol(),
            to: to.symbol(),
            from_dim: from.dimension,
            to_dim: to.dimension,
        }
    }

    pub(crate) fn invalid_expression(expr: &str, reason: impl Into<String>) -> Self {
        UnitError::InvalidExpression {
            expr: expr.to_string(),
            reason: reason.into(),
        }
    }
}
