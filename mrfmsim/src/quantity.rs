//! Units and quantities bound to the registry that created them

use std::fmt;
use std::ops::{Div, Mul, Neg};
use std::sync::Arc;
use mrfmsim_units::{parse_unit, Dimension, Format, Quantity, System, Unit, UnitError, UnitRegistry, UNITS};

/// The system and display format of the registry a value came from
#[derive(Debug, Clone)]
pub(crate) struct Scope {
    pub(crate) system: Arc<System>,
    pub(crate) format: Format,
}

impl Scope {
    pub(crate) fn of(registry: &UnitRegistry) -> Self {
        Scope {
            system: Arc::clone(registry.default_system()),
            format: registry.default_format(),
        }
    }
}

/// A unit produced by an `MrfmUnitRegistry`
#[derive(Debug, Clone)]
pub struct MrfmUnit {
    unit: Unit,
    scope: Scope,
}

impl MrfmUnit {
    pub(crate) fn scoped(unit: Unit, scope: Scope) -> Self {
        MrfmUnit { unit, scope }
    }

    pub fn as_unit(&self) -> &Unit {
        &self.unit
    }

    pub fn into_unit(self) -> Unit {
        self.unit
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension
    }
}

impl fmt::Display for MrfmUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scope.format.render(self.unit.terms()))
    }
}

impl PartialEq for MrfmUnit {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit
    }
}

/// A quantity that knows the unit system of its registry.
///
/// `base_magnitude` (short `bm`) is the magnitude in that system's base
/// units, so `1 T` reads as `1000` (µg / (µA s²)) under the mrfmsim system.
#[derive(Debug, Clone)]
pub struct MrfmQuantity {
    quantity: Quantity,
    scope: Scope,
}

impl MrfmQuantity {
    /// A quantity scoped to `registry`'s default system and format
    pub fn new(value: f64, unit: Unit, registry: &UnitRegistry) -> Self {
        Self::scoped(Quantity::new(value, unit), Scope::of(registry))
    }

    pub(crate) fn scoped(quantity: Quantity, scope: Scope) -> Self {
        MrfmQuantity { quantity, scope }
    }

    fn rescope(&self, quantity: Quantity) -> Self {
        Self::scoped(quantity, self.scope.clone())
    }

    pub fn magnitude(&self) -> f64 {
        self.quantity.value
    }

    /// Short for `magnitude`
    pub fn m(&self) -> f64 {
        self.quantity.value
    }

    pub fn units(&self) -> &Unit {
        &self.quantity.unit
    }

    pub fn dimension(&self) -> Dimension {
        self.quantity.dimension()
    }

    /// The system base units are taken from
    pub fn system(&self) -> &System {
        &self.scope.system
    }

    /// Magnitude in the base units of the quantity's system
    pub fn base_magnitude(&self) -> f64 {
        self.scope
            .system
            .base_magnitude(self.quantity.si_value(), self.dimension())
    }

    /// Short for `base_magnitude`
    pub fn bm(&self) -> f64 {
        self.base_magnitude()
    }

    pub fn to_base_units(&self) -> MrfmQuantity {
        self.rescope(self.quantity.to_base_units(&self.scope.system))
    }

    /// Convert to the unit given as an expression
    pub fn to(&self, expr: &str) -> Result<MrfmQuantity, UnitError> {
        let target = parse_unit(&UNITS, expr)?;
        Ok(self.rescope(self.quantity.to(&target)?))
    }

    pub fn add(&self, other: &MrfmQuantity) -> Result<MrfmQuantity, UnitError> {
        Ok(self.rescope(self.quantity.add(&other.quantity)?))
    }

    pub fn sub(&self, other: &MrfmQuantity) -> Result<MrfmQuantity, UnitError> {
        Ok(self.rescope(self.quantity.sub(&other.quantity)?))
    }

    pub fn powi(&self, exp: i32) -> MrfmQuantity {
        self.rescope(self.quantity.powi(exp))
    }

    pub fn as_quantity(&self) -> &Quantity {
        &self.quantity
    }

    pub fn into_quantity(self) -> Quantity {
        self.quantity
    }
}

impl fmt::Display for MrfmQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.quantity.display(self.scope.format), f)
    }
}

impl PartialEq for MrfmQuantity {
    fn eq(&self, other: &Self) -> bool {
        self.quantity == other.quantity
    }
}

impl Mul<MrfmUnit> for f64 {
    type Output = MrfmQuantity;

    fn mul(self, rhs: MrfmUnit) -> MrfmQuantity {
        MrfmQuantity::scoped(Quantity::new(self, rhs.unit), rhs.scope)
    }
}

impl Mul<&MrfmUnit> for f64 {
    type Output = MrfmQuantity;

    fn mul(self, rhs: &MrfmUnit) -> MrfmQuantity {
        self * rhs.clone()
    }
}

impl Mul for MrfmUnit {
    type Output = MrfmUnit;

    fn mul(self, rhs: MrfmUnit) -> MrfmUnit {
        MrfmUnit::scoped(self.unit.multiply(&rhs.unit), self.scope)
    }
}

impl Div for MrfmUnit {
    type Output = MrfmUnit;

    fn div(self, rhs: MrfmUnit) -> MrfmUnit {
        MrfmUnit::scoped(self.unit.divide(&rhs.unit), self.scope)
    }
}

impl Mul<f64> for MrfmQuantity {
    type Output = MrfmQuantity;

    fn mul(self, rhs: f64) -> MrfmQuantity {
        MrfmQuantity::scoped(self.quantity * rhs, self.scope)
    }
}

impl Div<f64> for MrfmQuantity {
    type Output = MrfmQuantity;

    fn div(self, rhs: f64) -> MrfmQuantity {
        MrfmQuantity::scoped(self.quantity / rhs, self.scope)
    }
}

impl Mul<MrfmQuantity> for f64 {
    type Output = MrfmQuantity;

    fn mul(self, rhs: MrfmQuantity) -> MrfmQuantity {
        rhs * self
    }
}

impl Mul<MrfmUnit> for MrfmQuantity {
    type Output = MrfmQuantity;

    fn mul(self, rhs: MrfmUnit) -> MrfmQuantity {
        MrfmQuantity::scoped(self.quantity * rhs.unit, self.scope)
    }
}

impl Div<MrfmUnit> for MrfmQuantity {
    type Output = MrfmQuantity;

    fn div(self, rhs: MrfmUnit) -> MrfmQuantity {
        MrfmQuantity::scoped(self.quantity / rhs.unit, self.scope)
    }
}

impl Mul for MrfmQuantity {
    type Output = MrfmQuantity;

    fn mul(self, rhs: MrfmQuantity) -> MrfmQuantity {
        MrfmQuantity::scoped(self.quantity * rhs.quantity, self.scope)
    }
}

impl Div for MrfmQuantity {
    type Output = MrfmQuantity;

    fn div(self, rhs: MrfmQuantity) -> MrfmQuantity {
        MrfmQuantity::scoped(self.quantity / rhs.quantity, self.scope)
    }
}

impl<'a> Mul<&'a MrfmQuantity> for &'a MrfmQuantity {
    type Output = MrfmQuantity;

    fn mul(self, rhs: &'a MrfmQuantity) -> MrfmQuantity {
        self.clone() * rhs.clone()
    }
}

impl<'a> Div<&'a MrfmQuantity> for &'a MrfmQuantity {
    type Output = MrfmQuantity;

    fn div(self, rhs: &'a MrfmQuantity) -> MrfmQuantity {
        self.clone() / rhs.clone()
    }
}

impl Neg for MrfmQuantity {
    type Output = MrfmQuantity;

    fn neg(self) -> MrfmQuantity {
        MrfmQuantity::scoped(-self.quantity, self.scope)
    }
}
