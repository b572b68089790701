//! Unit database - SI base and derived units, common non-SI units and the
//! physical constants used in MRFM work

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;
use std::sync::LazyLock;
use crate::prefix::{split_name, split_symbol};
use crate::{Dimension, Unit};

/// Shared unit database
pub static UNITS: LazyLock<UnitTable> = LazyLock::new(UnitTable::new);

/// The seven SI base units, in dimension index order
pub fn si_base_units() -> [Unit; 7] {
    [
        Unit::new("m", "meter", Dimension::LENGTH, 1.0, "length"),
        Unit::new("kg", "kilogram", Dimension::MASS, 1.0, "mass"),
        Unit::new("s", "second", Dimension::TIME, 1.0, "time"),
        Unit::new("A", "ampere", Dimension::CURRENT, 1.0, "current"),
        Unit::new("K", "kelvin", Dimension::TEMPERATURE, 1.0, "temperature"),
        Unit::new("mol", "mole", Dimension::AMOUNT, 1.0, "amount"),
        Unit::new("cd", "candela", Dimension::LUMINOSITY, 1.0, "luminosity"),
    ]
}

/// Table of all known atomic units
#[derive(Debug)]
pub struct UnitTable {
    units: HashMap<String, Unit>,
    names: HashMap<String, String>,
    aliases: HashMap<String, String>,
    prefixable: HashSet<String>,
}

impl UnitTable {
    pub fn new() -> Self {
        let mut table = UnitTable {
            units: HashMap::new(),
            names: HashMap::new(),
            aliases: HashMap::new(),
            prefixable: HashSet::new(),
        };
        table.register_all_units();
        table
    }

    /// Get an atomic unit by symbol, long name or alias
    pub fn get(&self, key: &str) -> Option<&Unit> {
        // Try direct lookup first
        if let Some(unit) = self.units.get(key) {
            return Some(unit);
        }
        self.names
            .get(key)
            .or_else(|| self.aliases.get(key))
            .and_then(|symbol| self.units.get(symbol))
    }

    /// Resolve a unit name, including SI-prefixed forms ("mT", "attonewton")
    /// and simple plurals ("nanometers")
    pub fn lookup(&self, key: &str) -> Option<Unit> {
        if let Some(unit) = self.get(key) {
            return Some(unit.clone());
        }
        if let Some(unit) = self.prefixed_name(key) {
            return Some(unit);
        }
        if let Some(unit) = self.prefixed_symbol(key) {
            return Some(unit);
        }

        // Plurals only apply to long names
        let singular = key.strip_suffix('s').filter(|s| s.chars().count() > 1)?;
        self.names
            .get(singular)
            .or_else(|| self.aliases.get(singular))
            .and_then(|symbol| self.units.get(symbol))
            .cloned()
            .or_else(|| self.prefixed_name(singular))
    }

    /// Check if a unit name resolves
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Get all units in a category
    pub fn by_category(&self, category: &str) -> Vec<&Unit> {
        self.units.values()
            .filter(|u| u.category == category)
            .collect()
    }

    /// Get all unit symbols, sorted
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.units.keys().map(|s| s.as_str()).collect();
        symbols.sort_unstable();
        symbols
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    fn prefixed_name(&self, key: &str) -> Option<Unit> {
        let (prefix, rest) = split_name(key)?;
        let symbol = self.names.get(rest)?;
        if !self.prefixable.contains(symbol) {
            return None;
        }
        self.units.get(symbol).map(|unit| unit.with_prefix(prefix))
    }

    fn prefixed_symbol(&self, key: &str) -> Option<Unit> {
        split_symbol(key).into_iter().find_map(|(prefix, rest)| {
            if !self.prefixable.contains(rest) {
                return None;
            }
            self.units.get(rest).map(|unit| unit.with_prefix(prefix))
        })
    }

    fn register(&mut self, unit: Unit) {
        let symbol = unit.symbol();
        self.names.insert(unit.name(), symbol.clone());
        self.units.insert(symbol, unit);
    }

    /// Register a unit that accepts SI prefixes
    fn register_prefixable(&mut self, unit: Unit) {
        self.prefixable.insert(unit.symbol());
        self.register(unit);
    }

    fn alias(&mut self, alias: &str, symbol: &str) {
        self.aliases.insert(alias.to_string(), symbol.to_string());
    }

    fn register_all_units(&mut self) {
        self.register_base_units();
        self.register_length_units();
        self.register_mass_units();
        self.register_time_units();
        self.register_temperature_units();
        self.register_frequency_units();
        self.register_mechanical_units();
        self.register_electromagnetic_units();
        self.register_volume_units();
        self.register_dimensionless_units();
        self.register_constants();
    }

    fn register_base_units(&mut self) {
        for unit in si_base_units() {
            // kilogram already carries a prefix; gram is the prefixable mass unit
            if unit.dimension == Dimension::MASS {
                self.register(unit);
            } else {
                self.register_prefixable(unit);
            }
        }

        self.alias("metre", "m");
        self.alias("amp", "A");
    }

    fn register_length_units(&mut self) {
        self.register(Unit::new("Å", "angstrom", Dimension::LENGTH, 1e-10, "length"));
        self.register(Unit::new("in", "inch", Dimension::LENGTH, 0.0254, "length"));
        self.register(Unit::new("ft", "foot", Dimension::LENGTH, 0.3048, "length"));
        self.register(Unit::new("mi", "mile", Dimension::LENGTH, 1609.344, "length"));

        self.alias("\u{212B}", "Å");
        self.alias("inches", "in");
        self.alias("feet", "ft");
    }

    fn register_mass_units(&mut self) {
        self.register_prefixable(Unit::new("g", "gram", Dimension::MASS, 1e-3, "mass"));
        self.register(Unit::new("t", "tonne", Dimension::MASS, 1e3, "mass"));
        self.register(Unit::new("Da", "dalton", Dimension::MASS, 1.66053906660e-27, "mass"));
        self.register(Unit::new("lb", "pound", Dimension::MASS, 0.45359237, "mass"));

        self.alias("u", "Da");
        self.alias("amu", "Da");
    }

    fn register_time_units(&mut self) {
        self.register(Unit::new("min", "minute", Dimension::TIME, 60.0, "time"));
        self.register(Unit::new("h", "hour", Dimension::TIME, 3600.0, "time"));
        self.register(Unit::new("d", "day", Dimension::TIME, 86400.0, "time"));
        // Julian year
        self.register(Unit::new("yr", "year", Dimension::TIME, 31557600.0, "time"));

        self.alias("sec", "s");
        self.alias("hr", "h");
    }

    fn register_temperature_units(&mut self) {
        // Celsius: K = C + 273.15
        self.register(Unit::with_offset(
            "degC", "degree_Celsius", Dimension::TEMPERATURE,
            1.0,
            273.15,
            "temperature"
        ));

        // Fahrenheit: K = (F + 459.67) * 5/9
        self.register(Unit::with_offset(
            "degF", "degree_Fahrenheit", Dimension::TEMPERATURE,
            5.0 / 9.0,
            459.67 * 5.0 / 9.0,
            "temperature"
        ));

        self.register(Unit::new("degR", "degree_Rankine", Dimension::TEMPERATURE, 5.0 / 9.0, "temperature"));

        self.alias("°C", "degC");
        self.alias("celsius", "degC");
        self.alias("°F", "degF");
        self.alias("fahrenheit", "degF");
        self.alias("°R", "degR");
        self.alias("rankine", "degR");
    }

    fn register_frequency_units(&mut self) {
        self.register_prefixable(Unit::new("Hz", "hertz", Dimension::FREQUENCY, 1.0, "frequency"));
        self.register(Unit::new("rpm", "revolutions_per_minute", Dimension::FREQUENCY, 1.0 / 60.0, "frequency"));
    }

    fn register_mechanical_units(&mut self) {
        // Force
        self.register_prefixable(Unit::new("N", "newton", Dimension::FORCE, 1.0, "force"));
        self.register(Unit::new("dyn", "dyne", Dimension::FORCE, 1e-5, "force"));
        self.register(Unit::new("lbf", "pound_force", Dimension::FORCE, 4.4482216152605, "force"));

        // Energy
        self.register_prefixable(Unit::new("J", "joule", Dimension::ENERGY, 1.0, "energy"));
        self.register_prefixable(Unit::new("eV", "electron_volt", Dimension::ENERGY, 1.602176634e-19, "energy"));
        self.register(Unit::new("erg", "erg", Dimension::ENERGY, 1e-7, "energy"));
        self.register(Unit::new("cal", "calorie", Dimension::ENERGY, 4.184, "energy"));
        self.register(Unit::new("Wh", "watt_hour", Dimension::ENERGY, 3600.0, "energy"));

        // Power
        self.register_prefixable(Unit::new("W", "watt", Dimension::POWER, 1.0, "power"));

        // Pressure
        self.register_prefixable(Unit::new("Pa", "pascal", Dimension::PRESSURE, 1.0, "pressure"));
        self.register_prefixable(Unit::new("bar", "bar", Dimension::PRESSURE, 1e5, "pressure"));
        self.register(Unit::new("atm", "atmosphere", Dimension::PRESSURE, 101325.0, "pressure"));
        self.register(Unit::new("torr", "torr", Dimension::PRESSURE, 101325.0 / 760.0, "pressure"));
        self.register(Unit::new("psi", "pound_force_per_square_inch", Dimension::PRESSURE, 6894.757293168361, "pressure"));

        self.alias("electronvolt", "eV");
    }

    fn register_electromagnetic_units(&mut self) {
        self.register_prefixable(Unit::new("C", "coulomb", Dimension::CHARGE, 1.0, "electromagnetic"));
        self.register_prefixable(Unit::new("V", "volt", Dimension::VOLTAGE, 1.0, "electromagnetic"));
        self.register_prefixable(Unit::new("Ω", "ohm", Dimension::RESISTANCE, 1.0, "electromagnetic"));
        self.register_prefixable(Unit::new("F", "farad", Dimension::CAPACITANCE, 1.0, "electromagnetic"));
        self.register_prefixable(Unit::new("H", "henry", Dimension::INDUCTANCE, 1.0, "electromagnetic"));
        self.register_prefixable(Unit::new("Wb", "weber", Dimension::MAGNETIC_FLUX, 1.0, "electromagnetic"));
        self.register_prefixable(Unit::new("T", "tesla", Dimension::MAGNETIC_FLUX_DENSITY, 1.0, "electromagnetic"));
        self.register(Unit::new("G", "gauss", Dimension::MAGNETIC_FLUX_DENSITY, 1e-4, "electromagnetic"));

        self.alias("\u{2126}", "Ω");
        self.alias("Gs", "G");
    }

    fn register_volume_units(&mut self) {
        self.register_prefixable(Unit::new("L", "liter", Dimension::VOLUME, 1e-3, "volume"));

        self.alias("l", "L");
        self.alias("litre", "L");
    }

    fn register_dimensionless_units(&mut self) {
        self.register_prefixable(Unit::new("rad", "radian", Dimension::DIMENSIONLESS, 1.0, "angle"));
        self.register(Unit::new("deg", "degree", Dimension::DIMENSIONLESS, PI / 180.0, "angle"));
        self.register(Unit::new("%", "percent", Dimension::DIMENSIONLESS, 1e-2, "dimensionless"));
        self.register(Unit::new("ppm", "parts_per_million", Dimension::DIMENSIONLESS, 1e-6, "dimensionless"));

        self.alias("°", "deg");
    }

    fn register_constants(&mut self) {
        // CODATA 2018
        let vacuum_permeability = Dimension::FORCE.divide(&Dimension::CURRENT.power(2));
        let vacuum_permittivity = Dimension::CAPACITANCE.divide(&Dimension::LENGTH);

        self.register(Unit::new("c", "speed_of_light", Dimension::VELOCITY, 299792458.0, "constant"));
        self.register(Unit::new("ℎ", "planck_constant", Dimension::ACTION, 6.62607015e-34, "constant"));
        self.register(Unit::new("ħ", "hbar", Dimension::ACTION, 1.054571817e-34, "constant"));
        self.register(Unit::new("k_B", "boltzmann_constant", Dimension::ENTROPY, 1.380649e-23, "constant"));
        self.register(Unit::new("e", "elementary_charge", Dimension::CHARGE, 1.602176634e-19, "constant"));
        self.register(Unit::new("μ_B", "bohr_magneton", Dimension::MAGNETIC_MOMENT, 9.2740100783e-24, "constant"));
        self.register(Unit::new("μ_N", "nuclear_magneton", Dimension::MAGNETIC_MOMENT, 5.0507837461e-27, "constant"));
        self.register(Unit::new("μ_0", "magnetic_constant", vacuum_permeability, 1.25663706212e-6, "constant"));
        self.register(Unit::new("ε_0", "electric_constant", vacuum_permittivity, 8.8541878128e-12, "constant"));
        self.register(Unit::new("N_A", "avogadro_constant", Dimension::AMOUNT.invert(), 6.02214076e23, "constant"));
        self.register(Unit::new("m_e", "electron_mass", Dimension::MASS, 9.1093837015e-31, "constant"));
        self.register(Unit::new("m_p", "proton_mass", Dimension::MASS, 1.67262192369e-27, "constant"));

        self.alias("reduced_planck_constant", "ħ");
        self.alias("k", "k_B");
        self.alias("mu_B", "μ_B");
        self.alias("mu_N", "μ_N");
        self.alias("mu_0", "μ_0");
        self.alias("vacuum_permeability", "μ_0");
        self.alias("eps_0", "ε_0");
        self.alias("vacuum_permittivity", "ε_0");
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * a.abs().max(b.abs())
    }

    #[test]
    fn test_unit_table() {
        let table = UnitTable::new();

        // Test basic lookup
        assert!(table.get("m").is_some());
        assert!(table.get("kg").is_some());
        assert!(table.get("s").is_some());

        // Long names and aliases
        assert!(table.get("meter").is_some());
        assert!(table.get("metre").is_some());
        assert!(table.get("kilogram").is_some());

        // Test unknown unit
        assert!(table.get("unknown_xyz").is_none());
        assert!(!table.contains("unknown_xyz"));
    }

    #[test]
    fn test_prefixed_symbols() {
        let mt = UNITS.lookup("mT").unwrap();
        assert_eq!(mt.dimension, Dimension::MAGNETIC_FLUX_DENSITY);
        assert_eq!(mt.to_si_factor, 1e-3);
        assert_eq!(mt.symbol(), "mT");

        let an = UNITS.lookup("aN").unwrap();
        assert_eq!(an.dimension, Dimension::FORCE);
        assert_eq!(an.to_si_factor, 1e-18);

        let ug = UNITS.lookup("ug").unwrap();
        assert_eq!(ug.symbol(), "µg");
        assert!(close(ug.to_si_factor, 1e-9));
    }

    #[test]
    fn test_prefixed_names() {
        let nm = UNITS.lookup("nanometer").unwrap();
        assert_eq!(nm.dimension, Dimension::LENGTH);
        assert_eq!(nm.to_si_factor, 1e-9);
        assert_eq!(nm.symbol(), "nm");

        let ua = UNITS.lookup("microampere").unwrap();
        assert_eq!(ua.dimension, Dimension::CURRENT);
        assert_eq!(ua.to_si_factor, 1e-6);

        assert!(UNITS.lookup("attonewton").is_some());
        assert!(UNITS.lookup("nanometers").is_some());
    }

    #[test]
    fn test_unprefixable_units() {
        // kilogram and constants take no prefix
        assert!(UNITS.lookup("mkg").is_none());
        assert!(UNITS.lookup("kilohbar").is_none());
        // "min" is minute, not milli-inch
        assert_eq!(UNITS.lookup("min").unwrap().to_si_factor, 60.0);
    }

    #[test]
    fn test_temperature_conversions() {
        let c = UNITS.get("degC").unwrap();

        // 0 C = 273.15 K
        assert_eq!(c.to_si(0.0), 273.15);
        assert!(c.has_offset());

        let f = UNITS.get("fahrenheit").unwrap();
        assert!(close(f.to_si(32.0), 273.15));
    }

    #[test]
    fn test_constants() {
        let mu_b = UNITS.get("bohr_magneton").unwrap();
        assert_eq!(mu_b.dimension, Dimension::MAGNETIC_MOMENT);
        assert_eq!(UNITS.get("mu_B").unwrap(), mu_b);

        let hbar = UNITS.get("hbar").unwrap();
        let h = UNITS.get("planck_constant").unwrap();
        assert!((h.to_si_factor / hbar.to_si_factor - 2.0 * PI).abs() < 1e-8);
    }

    #[test]
    fn test_by_category() {
        let length_units = UNITS.by_category("length");
        assert!(length_units.len() >= 5);

        // All should have LENGTH dimension
        for unit in length_units {
            assert_eq!(unit.dimension, Dimension::LENGTH);
        }
    }

    #[test]
    fn test_si_base_units() {
        for (i, unit) in si_base_units().iter().enumerate() {
            assert_eq!(unit.dimension, Dimension::BASE[i]);
            assert!(unit.is_si_base());
            assert!(UNITS.contains(&unit.symbol()));
        }
    }
}
