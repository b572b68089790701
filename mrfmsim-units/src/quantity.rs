//! Quantity type - a magnitude with an associated unit

use std::fmt;
use std::ops::{Div, Mul, Neg};
use serde::{Serialize, Deserialize};
use crate::{Dimension, Format, System, Unit, UnitError};

/// A physical quantity: a magnitude with an associated unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quantity {
    /// The numeric magnitude
    pub value: f64,
    /// The unit of measurement
    pub unit: Unit,
}

impl Quantity {
    /// Create a new quantity
    pub fn new(value: f64, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// Create a dimensionless quantity (pure number)
    pub fn dimensionless(value: f64) -> Self {
        Quantity {
            value,
            unit: Unit::dimensionless(),
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.value
    }

    /// Short for `magnitude`
    pub fn m(&self) -> f64 {
        self.value
    }

    pub fn units(&self) -> &Unit {
        &self.unit
    }

    /// Get the dimension of this quantity
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.unit.is_dimensionless()
    }

    /// Check if two quantities have compatible dimensions
    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// Get the value in SI base units
    pub fn si_value(&self) -> f64 {
        self.unit.to_si(self.value)
    }

    /// Express in the SI base units of this dimension
    pub fn to_si(&self) -> Quantity {
        self.to_base_units(&System::si())
    }

    /// Express in the base units of `system`
    pub fn to_base_units(&self, system: &System) -> Quantity {
        let dimension = self.dimension();
        Quantity::new(
            system.base_magnitude(self.si_value(), dimension),
            system.base_unit_for(dimension),
        )
    }

    /// Convert to another unit
    pub fn to(&self, target: &Unit) -> Result<Quantity, UnitError> {
        let value = self.unit.convert_to(self.value, target)?;
        Ok(Quantity::new(value, target.clone()))
    }

    /// Add two quantities; the result keeps the unit of `self`
    pub fn add(&self, other: &Quantity) -> Result<Quantity, UnitError> {
        // Convert other to same unit as self, then add
        let converted = other.to(&self.unit)?;
        Ok(Quantity::new(self.value + converted.value, self.unit.clone()))
    }

    /// Subtract two quantities; the result keeps the unit of `self`
    pub fn sub(&self, other: &Quantity) -> Result<Quantity, UnitError> {
        let converted = other.to(&self.unit)?;
        Ok(Quantity::new(self.value - converted.value, self.unit.clone()))
    }

    /// Raise quantity to an integer power
    pub fn powi(&self, exp: i32) -> Quantity {
        Quantity::new(self.value.powi(exp), self.unit.power(exp))
    }

    /// Take the square root (every unit exponent must be even)
    pub fn sqrt(&self) -> Result<Quantity, UnitError> {
        Ok(Quantity::new(self.value.sqrt(), self.unit.sqrt()?))
    }

    /// Render with the given unit format
    pub fn display(&self, format: Format) -> QuantityDisplay<'_> {
        QuantityDisplay { quantity: self, format }
    }
}

/// A quantity paired with the format it is rendered in
pub struct QuantityDisplay<'a> {
    quantity: &'a Quantity,
    format: Format,
}

impl fmt::Display for QuantityDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(f, "{:.*}", precision, self.quantity.value)?,
            None => write!(f, "{:?}", self.quantity.value)?,
        }
        let unit = self.format.render(self.quantity.unit.terms());
        if !unit.is_empty() {
            write!(f, " {}", unit)?;
        }
        Ok(())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(Format::DEFAULT), f)
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        // Compare SI values for equality
        if !self.is_compatible(other) {
            return false;
        }
        self.si_value() == other.si_value()
    }
}

impl Mul<Unit> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: Unit) -> Quantity {
        Quantity::new(self, rhs)
    }
}

impl Mul<&Unit> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: &Unit) -> Quantity {
        Quantity::new(self, rhs.clone())
    }
}

impl Mul for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: Quantity) -> Quantity {
        Quantity::new(self.value * rhs.value, self.unit.multiply(&rhs.unit))
    }
}

impl Div for Quantity {
    type Output = Quantity;

    fn div(self, rhs: Quantity) -> Quantity {
        Quantity::new(self.value / rhs.value, self.unit.divide(&rhs.unit))
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        Quantity::new(self.value * rhs, self.unit)
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;

    fn div(self, rhs: f64) -> Quantity {
        Quantity::new(self.value / rhs, self.unit)
    }
}

impl Mul<Quantity> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: Quantity) -> Quantity {
        rhs * self
    }
}

impl Mul<Unit> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: Unit) -> Quantity {
        Quantity::new(self.value, self.unit.multiply(&rhs))
    }
}

impl Div<Unit> for Quantity {
    type Output = Quantity;

    fn div(self, rhs: Unit) -> Quantity {
        Quantity::new(self.value, self.unit.divide(&rhs))
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        Quantity::new(-self.value, self.unit)
    }
}
