//! Dimensions as integer exponent vectors over the seven SI base quantities
//!
//! Exponents are stored in the order length, mass, time, current,
//! temperature, amount, luminosity. The index constants below address them.

use std::fmt;
use serde::{Serialize, Deserialize};

pub const LENGTH: usize = 0;
pub const MASS: usize = 1;
pub const TIME: usize = 2;
pub const CURRENT: usize = 3;
pub const TEMPERATURE: usize = 4;
pub const AMOUNT: usize = 5;
pub const LUMINOSITY: usize = 6;

pub const BASE_COUNT: usize = 7;

/// Base quantity names, in exponent order
pub const BASE_NAMES: [&str; BASE_COUNT] = [
    "length", "mass", "time", "current", "temperature", "amount", "luminosity",
];

/// Symbols used by `Display`
const BASE_SYMBOLS: [&str; BASE_COUNT] = ["L", "M", "T", "I", "Θ", "N", "J"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimension {
    pub exponents: [i32; BASE_COUNT],
}

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension::new([0; BASE_COUNT]);

    pub const LENGTH: Dimension = Dimension::new([1, 0, 0, 0, 0, 0, 0]);
    pub const MASS: Dimension = Dimension::new([0, 1, 0, 0, 0, 0, 0]);
    pub const TIME: Dimension = Dimension::new([0, 0, 1, 0, 0, 0, 0]);
    pub const CURRENT: Dimension = Dimension::new([0, 0, 0, 1, 0, 0, 0]);
    pub const TEMPERATURE: Dimension = Dimension::new([0, 0, 0, 0, 1, 0, 0]);
    pub const AMOUNT: Dimension = Dimension::new([0, 0, 0, 0, 0, 1, 0]);
    pub const LUMINOSITY: Dimension = Dimension::new([0, 0, 0, 0, 0, 0, 1]);

    /// The base quantities, indexed like `exponents`
    pub const BASE: [Dimension; BASE_COUNT] = [
        Self::LENGTH,
        Self::MASS,
        Self::TIME,
        Self::CURRENT,
        Self::TEMPERATURE,
        Self::AMOUNT,
        Self::LUMINOSITY,
    ];

    // Kinematics and mechanics
    pub const AREA: Dimension = Dimension::new([2, 0, 0, 0, 0, 0, 0]);
    pub const VOLUME: Dimension = Dimension::new([3, 0, 0, 0, 0, 0, 0]);
    pub const FREQUENCY: Dimension = Dimension::new([0, 0, -1, 0, 0, 0, 0]);
    pub const VELOCITY: Dimension = Dimension::new([1, 0, -1, 0, 0, 0, 0]);
    pub const ACCELERATION: Dimension = Dimension::new([1, 0, -2, 0, 0, 0, 0]);
    pub const FORCE: Dimension = Dimension::new([1, 1, -2, 0, 0, 0, 0]);
    pub const ENERGY: Dimension = Dimension::new([2, 1, -2, 0, 0, 0, 0]);
    pub const POWER: Dimension = Dimension::new([2, 1, -3, 0, 0, 0, 0]);
    pub const PRESSURE: Dimension = Dimension::new([-1, 1, -2, 0, 0, 0, 0]);
    pub const ACTION: Dimension = Dimension::new([2, 1, -1, 0, 0, 0, 0]);
    /// Energy per kelvin, the dimension of the Boltzmann constant
    pub const ENTROPY: Dimension = Dimension::new([2, 1, -2, 0, -1, 0, 0]);

    // Electromagnetism
    pub const CHARGE: Dimension = Dimension::new([0, 0, 1, 1, 0, 0, 0]);
    pub const VOLTAGE: Dimension = Dimension::new([2, 1, -3, -1, 0, 0, 0]);
    pub const RESISTANCE: Dimension = Dimension::new([2, 1, -3, -2, 0, 0, 0]);
    pub const CAPACITANCE: Dimension = Dimension::new([-2, -1, 4, 2, 0, 0, 0]);
    pub const INDUCTANCE: Dimension = Dimension::new([2, 1, -2, -2, 0, 0, 0]);
    pub const MAGNETIC_FLUX: Dimension = Dimension::new([2, 1, -2, -1, 0, 0, 0]);
    /// Tesla: kg / (A s²)
    pub const MAGNETIC_FLUX_DENSITY: Dimension = Dimension::new([0, 1, -2, -1, 0, 0, 0]);
    /// Ampere square meter, the dimension of the Bohr magneton
    pub const MAGNETIC_MOMENT: Dimension = Dimension::new([2, 0, 0, 1, 0, 0, 0]);

    pub const fn new(exponents: [i32; BASE_COUNT]) -> Self {
        Dimension { exponents }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents == [0; BASE_COUNT]
    }

    /// Exponent index when this is exactly one base quantity
    pub fn base_index(&self) -> Option<usize> {
        Self::BASE.iter().position(|base| base == self)
    }

    pub fn multiply(&self, other: &Dimension) -> Dimension {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn divide(&self, other: &Dimension) -> Dimension {
        self.zip_with(other, |a, b| a - b)
    }

    pub fn power(&self, exp: i32) -> Dimension {
        Dimension::new(self.exponents.map(|e| e * exp))
    }

    pub fn invert(&self) -> Dimension {
        self.power(-1)
    }

    /// `multiply`, or `None` when an exponent leaves the `i32` range
    pub fn checked_multiply(&self, other: &Dimension) -> Option<Dimension> {
        self.try_zip_with(other, i32::checked_add)
    }

    pub fn checked_divide(&self, other: &Dimension) -> Option<Dimension> {
        self.try_zip_with(other, i32::checked_sub)
    }

    pub fn checked_power(&self, exp: i32) -> Option<Dimension> {
        let mut exponents = self.exponents;
        for e in exponents.iter_mut() {
            *e = e.checked_mul(exp)?;
        }
        Some(Dimension::new(exponents))
    }

    fn zip_with(&self, other: &Dimension, op: impl Fn(i32, i32) -> i32) -> Dimension {
        let mut exponents = self.exponents;
        for (e, &rhs) in exponents.iter_mut().zip(other.exponents.iter()) {
            *e = op(*e, rhs);
        }
        Dimension::new(exponents)
    }

    fn try_zip_with(&self, other: &Dimension, op: impl Fn(i32, i32) -> Option<i32>) -> Option<Dimension> {
        let mut exponents = self.exponents;
        for (e, &rhs) in exponents.iter_mut().zip(other.exponents.iter()) {
            *e = op(*e, rhs)?;
        }
        Some(Dimension::new(exponents))
    }

    /// Common name of the dimension, if it has one
    pub fn name(&self) -> Option<&'static str> {
        if let Some(i) = self.base_index() {
            return Some(BASE_NAMES[i]);
        }
        NAMED
            .iter()
            .find(|(dimension, _)| dimension == self)
            .map(|&(_, name)| name)
    }
}

const NAMED: [(Dimension, &str); 16] = [
    (Dimension::DIMENSIONLESS, "dimensionless"),
    (Dimension::AREA, "area"),
    (Dimension::VOLUME, "volume"),
    (Dimension::FREQUENCY, "frequency"),
    (Dimension::VELOCITY, "velocity"),
    (Dimension::ACCELERATION, "acceleration"),
    (Dimension::FORCE, "force"),
    (Dimension::ENERGY, "energy"),
    (Dimension::POWER, "power"),
    (Dimension::PRESSURE, "pressure"),
    (Dimension::CHARGE, "charge"),
    (Dimension::VOLTAGE, "voltage"),
    (Dimension::RESISTANCE, "resistance"),
    (Dimension::MAGNETIC_FLUX, "magnetic flux"),
    (Dimension::MAGNETIC_FLUX_DENSITY, "magnetic flux density"),
    (Dimension::MAGNETIC_MOMENT, "magnetic moment"),
];

/// Renders as `M T^-2 I^-1`; the dimensionless case is `1`
impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let factors: Vec<String> = self
            .exponents
            .iter()
            .zip(BASE_SYMBOLS)
            .filter(|(&exp, _)| exp != 0)
            .map(|(&exp, symbol)| match exp {
                1 => symbol.to_string(),
                _ => format!("{}^{}", symbol, exp),
            })
            .collect();

        if factors.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", factors.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tesla_is_newton_per_ampere_meter() {
        let tesla = Dimension::FORCE
            .divide(&Dimension::CURRENT)
            .divide(&Dimension::LENGTH);
        assert_eq!(tesla, Dimension::MAGNETIC_FLUX_DENSITY);
        assert_eq!(tesla.name(), Some("magnetic flux density"));
        assert_eq!(tesla.to_string(), "M T^-2 I^-1");
    }

    #[test]
    fn test_spring_constant_dimension() {
        // aN/nm reduces to mass per time squared
        let k = Dimension::FORCE.divide(&Dimension::LENGTH);
        assert_eq!(k, Dimension::MASS.multiply(&Dimension::FREQUENCY.power(2)));
        assert_eq!(k.name(), None);
        assert!(!k.is_dimensionless());
    }

    #[test]
    fn test_base_quantities() {
        assert_eq!(Dimension::MASS.base_index(), Some(MASS));
        assert_eq!(Dimension::TEMPERATURE.base_index(), Some(TEMPERATURE));
        assert_eq!(Dimension::AREA.base_index(), None);
        assert_eq!(Dimension::DIMENSIONLESS.base_index(), None);
        assert_eq!(Dimension::CURRENT.name(), Some("current"));
        assert_eq!(Dimension::default(), Dimension::DIMENSIONLESS);
    }

    #[test]
    fn test_ratio_of_equal_dimensions() {
        let ratio = Dimension::ENERGY.divide(&Dimension::ENERGY);
        assert!(ratio.is_dimensionless());
        assert_eq!(ratio.to_string(), "1");
        assert_eq!(ratio.name(), Some("dimensionless"));
    }

    #[test]
    fn test_invert() {
        assert_eq!(Dimension::TIME.invert(), Dimension::FREQUENCY);
        assert_eq!(Dimension::AMOUNT.invert().to_string(), "N^-1");
    }

    #[test]
    fn test_checked_ops_detect_overflow() {
        let huge = Dimension::LENGTH.power(i32::MAX);
        assert_eq!(huge.checked_multiply(&Dimension::LENGTH), None);
        assert_eq!(huge.checked_divide(&Dimension::LENGTH), Some(Dimension::LENGTH.power(i32::MAX - 1)));
        assert_eq!(Dimension::LENGTH.power(2).checked_power(i32::MAX), None);
        assert_eq!(Dimension::FORCE.checked_power(2), Some(Dimension::FORCE.power(2)));
    }
}
