//! Unit representation with conversion factors

use std::fmt;
use std::ops::{Div, Mul};
use serde::{Serialize, Deserialize};
use crate::{Dimension, Format, Prefix, UnitError};

/// One named unit raised to a power inside a unit expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitTerm {
    /// The unit symbol (e.g., "m", "kg", "s")
    pub symbol: String,
    /// The unit name (e.g., "meter", "kilogram", "second")
    pub name: String,
    pub exponent: i32,
}

/// Represents a physical unit with its dimension and conversion factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    terms: Vec<UnitTerm>,
    /// The dimensional signature
    pub dimension: Dimension,
    /// Factor to convert to SI base unit (value_si = value * to_si_factor + to_si_offset)
    pub to_si_factor: f64,
    /// Offset for non-proportional units like temperature (Celsius, Fahrenheit)
    pub to_si_offset: f64,
    /// Category for organization (e.g., "length", "mass", "time")
    pub category: String,
}

impl Unit {
    /// Create a new unit with proportional conversion (no offset)
    pub fn new(
        symbol: &str,
        name: &str,
        dimension: Dimension,
        to_si_factor: f64,
        category: &str,
    ) -> Self {
        Self::with_offset(symbol, name, dimension, to_si_factor, 0.0, category)
    }

    /// Create a unit with offset (for temperature conversions)
    pub fn with_offset(
        symbol: &str,
        name: &str,
        dimension: Dimension,
        to_si_factor: f64,
        to_si_offset: f64,
        category: &str,
    ) -> Self {
        Unit {
            terms: vec![UnitTerm {
                symbol: symbol.to_string(),
                name: name.to_string(),
                exponent: 1,
            }],
            dimension,
            to_si_factor,
            to_si_offset,
            category: category.to_string(),
        }
    }

    /// The unit of pure numbers
    pub fn dimensionless() -> Self {
        Unit {
            terms: Vec::new(),
            dimension: Dimension::DIMENSIONLESS,
            to_si_factor: 1.0,
            to_si_offset: 0.0,
            category: "dimensionless".to_string(),
        }
    }

    /// Named factors of this unit with their exponents
    pub fn terms(&self) -> &[UnitTerm] {
        &self.terms
    }

    /// Abbreviated rendering, e.g. "m/s²"
    pub fn symbol(&self) -> String {
        Format::SHORT_PRETTY.render(&self.terms)
    }

    /// Long rendering, e.g. "meter / second ** 2"
    pub fn name(&self) -> String {
        Format::DEFAULT.render(&self.terms)
    }

    /// A single named unit to the first power
    pub fn is_atomic(&self) -> bool {
        matches!(self.terms.as_slice(), [t] if t.exponent == 1)
    }

    /// Check if this is a base SI unit
    pub fn is_si_base(&self) -> bool {
        self.to_si_factor == 1.0 && self.to_si_offset == 0.0
    }

    /// Check if this unit has an offset (non-proportional conversion)
    pub fn has_offset(&self) -> bool {
        self.to_si_offset != 0.0
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// Check if two units are dimensionally compatible (can be converted)
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Convert a value from this unit to SI base unit
    pub fn to_si(&self, value: f64) -> f64 {
        // value_si = value * factor + offset
        value * self.to_si_factor + self.to_si_offset
    }

    /// Convert a value from SI base unit to this unit
    pub fn from_si(&self, value_si: f64) -> f64 {
        // value = (value_si - offset) / factor
        (value_si - self.to_si_offset) / self.to_si_factor
    }

    /// Convert a value from this unit to another unit
    pub fn convert_to(&self, value: f64, target: &Unit) -> Result<f64, UnitError> {
        if !self.is_compatible(target) {
            return Err(UnitError::incompatible(self, target));
        }

        // Convert to SI, then from SI to target
        Ok(target.from_si(self.to_si(value)))
    }

    /// Apply an SI prefix to an atomic unit (meter -> nanometer)
    pub fn with_prefix(&self, prefix: &Prefix) -> Unit {
        let terms = self
            .terms
            .iter()
            .map(|t| UnitTerm {
                symbol: format!("{}{}", prefix.symbol, t.symbol),
                name: format!("{}{}", prefix.name, t.name),
                exponent: t.exponent,
            })
            .collect();

        Unit {
            terms,
            dimension: self.dimension,
            to_si_factor: self.to_si_factor * prefix.factor,
            to_si_offset: self.to_si_offset,
            category: self.category.clone(),
        }
    }

    /// Get the inverse unit (e.g., Hz -> s)
    ///
    /// # Panics
    ///
    /// Panics if an exponent overflows `i32`, like the other infallible
    /// operations below. The `try_*` forms report overflow as an error.
    pub fn inverse(&self) -> Unit {
        self.power(-1)
    }

    /// Multiply two units (e.g., m * m -> m^2)
    pub fn multiply(&self, other: &Unit) -> Unit {
        self.try_multiply(other).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Divide two units (e.g., m / s -> m/s)
    pub fn divide(&self, other: &Unit) -> Unit {
        self.try_divide(other).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Raise unit to a power (e.g., m^2, m^3)
    pub fn power(&self, exp: i32) -> Unit {
        self.try_power(exp).unwrap_or_else(|err| panic!("{}", err))
    }

    pub fn try_multiply(&self, other: &Unit) -> Result<Unit, UnitError> {
        let overflow = || exponent_overflow(format!("{} * {}", self.symbol(), other.symbol()));
        Ok(Unit {
            terms: merge_terms(&self.terms, other.terms.iter().cloned().map(Some)).ok_or_else(overflow)?,
            dimension: self.dimension.checked_multiply(&other.dimension).ok_or_else(overflow)?,
            to_si_factor: self.to_si_factor * other.to_si_factor,
            to_si_offset: 0.0, // Product of offset units loses meaning
            category: "derived".to_string(),
        })
    }

    pub fn try_divide(&self, other: &Unit) -> Result<Unit, UnitError> {
        let overflow = || exponent_overflow(format!("{} / {}", self.symbol(), other.symbol()));
        let inverted = other.terms.iter().map(|t| {
            t.exponent.checked_neg().map(|exponent| UnitTerm { exponent, ..t.clone() })
        });

        Ok(Unit {
            terms: merge_terms(&self.terms, inverted).ok_or_else(overflow)?,
            dimension: self.dimension.checked_divide(&other.dimension).ok_or_else(overflow)?,
            to_si_factor: self.to_si_factor / other.to_si_factor,
            to_si_offset: 0.0,
            category: "derived".to_string(),
        })
    }

    pub fn try_power(&self, exp: i32) -> Result<Unit, UnitError> {
        if exp == 1 {
            return Ok(self.clone());
        }
        let overflow = || exponent_overflow(format!("{}^{}", self.symbol(), exp));

        let terms = if exp == 0 {
            Vec::new()
        } else {
            self.terms
                .iter()
                .map(|t| {
                    t.exponent
                        .checked_mul(exp)
                        .map(|exponent| UnitTerm { exponent, ..t.clone() })
                })
                .collect::<Option<Vec<_>>>()
                .ok_or_else(overflow)?
        };

        Ok(Unit {
            terms,
            dimension: self.dimension.checked_power(exp).ok_or_else(overflow)?,
            to_si_factor: self.to_si_factor.powi(exp),
            to_si_offset: 0.0,
            category: self.category.clone(),
        })
    }

    /// Square root of a unit whose term exponents are all even (m² -> m)
    pub fn sqrt(&self) -> Result<Unit, UnitError> {
        if self.has_offset() || self.terms.iter().any(|t| t.exponent % 2 != 0) {
            return Err(UnitError::invalid_expression(
                &self.symbol(),
                "square root needs even exponents",
            ));
        }

        let terms = self
            .terms
            .iter()
            .map(|t| UnitTerm {
                exponent: t.exponent / 2,
                ..t.clone()
            })
            .collect();

        Ok(Unit {
            terms,
            dimension: Dimension::new(self.dimension.exponents.map(|e| e / 2)),
            to_si_factor: self.to_si_factor.sqrt(),
            to_si_offset: 0.0,
            category: self.category.clone(),
        })
    }
}

fn exponent_overflow(expr: String) -> UnitError {
    UnitError::invalid_expression(&expr, "unit exponent out of range")
}

/// Combine term lists, summing exponents of repeated units and dropping zeros.
/// `None` in `right`, or an exponent sum outside `i32`, yields `None`.
fn merge_terms(
    left: &[UnitTerm],
    right: impl Iterator<Item = Option<UnitTerm>>,
) -> Option<Vec<UnitTerm>> {
    let mut terms = left.to_vec();
    for term in right {
        let term = term?;
        match terms.iter_mut().find(|t| t.symbol == term.symbol) {
            Some(existing) => existing.exponent = existing.exponent.checked_add(term.exponent)?,
            None => terms.push(term),
        }
    }
    terms.retain(|t| t.exponent != 0);
    Some(terms)
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Mul for Unit {
    type Output = Unit;

    fn mul(self, rhs: Unit) -> Unit {
        self.multiply(&rhs)
    }
}

impl<'a> Mul<&'a Unit> for &'a Unit {
    type Output = Unit;

    fn mul(self, rhs: &'a Unit) -> Unit {
        self.multiply(rhs)
    }
}

impl Div for Unit {
    type Output = Unit;

    fn div(self, rhs: Unit) -> Unit {
        self.divide(&rhs)
    }
}

impl<'a> Div<&'a Unit> for &'a Unit {
    type Output = Unit;

    fn div(self, rhs: &'a Unit) -> Unit {
        self.divide(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PREFIXES;

    fn meter() -> Unit {
        Unit::new("m", "meter", Dimension::LENGTH, 1.0, "length")
    }

    fn kilometer() -> Unit {
        Unit::new("km", "kilometer", Dimension::LENGTH, 1000.0, "length")
    }

    fn second() -> Unit {
        Unit::new("s", "second", Dimension::TIME, 1.0, "time")
    }

    #[test]
    fn test_si_base_unit() {
        let m = meter();
        assert!(m.is_si_base());

        let km = kilometer();
        assert!(!km.is_si_base());
    }

    #[test]
    fn test_compatible_units() {
        let m = meter();
        let km = kilometer();
        let s = second();

        assert!(m.is_compatible(&km));
        assert!(!m.is_compatible(&s));
    }

    #[test]
    fn test_to_si_conversion() {
        let km = kilometer();
        assert_eq!(km.to_si(5.0), 5000.0);
    }

    #[test]
    fn test_from_si_conversion() {
        let km = kilometer();
        assert_eq!(km.from_si(5000.0), 5.0);
    }

    #[test]
    fn test_unit_conversion() {
        let m = meter();
        let km = kilometer();

        // Convert 5000 m to km
        let converted = m.convert_to(5000.0, &km).unwrap();
        assert_eq!(converted, 5.0);

        let err = m.convert_to(1.0, &second()).unwrap_err();
        assert!(matches!(err, UnitError::IncompatibleDimensions { .. }));
    }

    #[test]
    fn test_unit_power() {
        let m = meter();
        let m2 = m.power(2);

        assert_eq!(m2.symbol(), "m²");
        assert_eq!(m2.dimension, Dimension::AREA);
    }

    #[test]
    fn test_unit_multiply() {
        let m = meter();
        let m2 = &m * &m;

        assert_eq!(m2.dimension, Dimension::AREA);
        assert_eq!(m2.terms().len(), 1);
        assert_eq!(m2.symbol(), "m²");
    }

    #[test]
    fn test_unit_divide() {
        let velocity = meter() / second();

        assert_eq!(velocity.dimension, Dimension::VELOCITY);
        assert_eq!(velocity.symbol(), "m/s");
        assert_eq!(velocity.name(), "meter / second");
    }

    #[test]
    fn test_divide_cancels_terms() {
        let m = meter();
        let ratio = &m / &m;
        assert!(ratio.is_dimensionless());
        assert!(ratio.terms().is_empty());
        assert_eq!(ratio.symbol(), "");
    }

    #[test]
    fn test_with_prefix() {
        let nano = PREFIXES.iter().find(|p| p.name == "nano").unwrap();
        let nm = meter().with_prefix(nano);
        assert_eq!(nm.symbol(), "nm");
        assert_eq!(nm.name(), "nanometer");
        assert_eq!(nm.to_si_factor, 1e-9);
        assert!(nm.is_atomic());
    }

    #[test]
    fn test_inverse() {
        let hz = second().inverse();
        assert_eq!(hz.dimension, Dimension::FREQUENCY);
        assert_eq!(hz.symbol(), "1/s");
    }

    #[test]
    fn test_checked_algebra() {
        let m_max = meter().try_power(i32::MAX).unwrap();
        let err = m_max.try_multiply(&meter()).unwrap_err();
        assert!(matches!(err, UnitError::InvalidExpression { .. }));
        assert!(m_max.try_divide(&meter()).is_ok());

        let m_min = meter().try_power(i32::MIN).unwrap();
        assert!(m_min.try_divide(&meter()).is_err());
        assert!(m_min.try_power(-1).is_err());
        assert!(meter().try_divide(&m_min).is_err());

        let v = meter().try_divide(&second()).unwrap();
        assert_eq!(v, meter() / second());
        assert_eq!(v.try_power(2).unwrap().symbol(), "m²/s²");
    }
}
