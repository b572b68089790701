//! The mrfmsim base-unit system
//!
//! MRFM quantities span tiny forces (attonewtons), short lengths
//! (nanometers) and small masses, so the system measures current in
//! microampere, length in nanometer, mass in microgram, temperature in kelvin
//! and time in second. Amount and luminosity stay as in SI.
//!
//! The system exists in two equivalent encodings: the direct table
//! [`MRFMSIM_BASE_UNITS`], installed by default, and the rewrite-rule text
//! [`MRFMSIM_SYSTEM`].

use std::fmt;
use mrfmsim_units::{Dimension, System, SystemDefinition, UnitError, UnitTable};

/// Name of the mrfmsim unit system
pub const MRFMSIM: &str = "mrfmsim";

/// The base dimensions the mrfmsim system chooses units for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseDimension {
    Current,
    Length,
    Mass,
    Temperature,
    Time,
}

impl BaseDimension {
    pub const ALL: [BaseDimension; 5] = [
        BaseDimension::Current,
        BaseDimension::Length,
        BaseDimension::Mass,
        BaseDimension::Temperature,
        BaseDimension::Time,
    ];

    pub fn dimension(self) -> Dimension {
        match self {
            BaseDimension::Current => Dimension::CURRENT,
            BaseDimension::Length => Dimension::LENGTH,
            BaseDimension::Mass => Dimension::MASS,
            BaseDimension::Temperature => Dimension::TEMPERATURE,
            BaseDimension::Time => Dimension::TIME,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BaseDimension::Current => "current",
            BaseDimension::Length => "length",
            BaseDimension::Mass => "mass",
            BaseDimension::Temperature => "temperature",
            BaseDimension::Time => "time",
        }
    }
}

impl fmt::Display for BaseDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Chosen unit for one base dimension
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseUnitEntry {
    pub dimension: BaseDimension,
    /// Unit name as known to the unit database
    pub unit: &'static str,
    /// Chosen units per native SI unit (1 kg = 1e9 µg)
    pub scale: f64,
}

/// Direct definition of the mrfmsim system
pub const MRFMSIM_BASE_UNITS: [BaseUnitEntry; 5] = [
    BaseUnitEntry { dimension: BaseDimension::Current, unit: "microampere", scale: 1e6 },
    BaseUnitEntry { dimension: BaseDimension::Length, unit: "nanometer", scale: 1e9 },
    BaseUnitEntry { dimension: BaseDimension::Mass, unit: "microgram", scale: 1e9 },
    BaseUnitEntry { dimension: BaseDimension::Temperature, unit: "kelvin", scale: 1.0 },
    BaseUnitEntry { dimension: BaseDimension::Time, unit: "second", scale: 1.0 },
];

/// Rewrite-rule definition of the mrfmsim system
pub const MRFMSIM_SYSTEM: &str = "\
@system mrfmsim using SI
    microampere: ampere
    nanometer: meter
    microgram: gram
    kelvin
    second
@end
";

/// Resolve the direct definition against the unit database
pub fn mrfmsim_system(table: &UnitTable) -> Result<System, UnitError> {
    let entries: Vec<(Dimension, &str, f64)> = MRFMSIM_BASE_UNITS
        .iter()
        .map(|entry| (entry.dimension.dimension(), entry.unit, entry.scale))
        .collect();
    System::from_scales(MRFMSIM, &System::si(), &entries, table)
}

/// Check that a rewrite-rule definition picks a unit for every base dimension
pub fn check_complete(definition: &SystemDefinition, table: &UnitTable) -> Result<(), UnitError> {
    let mut covered = Vec::with_capacity(definition.rules.len());
    for rule in &definition.rules {
        let unit = table
            .lookup(&rule.target)
            .ok_or_else(|| UnitError::UnknownUnit(rule.target.clone()))?;
        covered.push(unit.dimension);
    }

    match BaseDimension::ALL
        .iter()
        .find(|base| !covered.contains(&base.dimension()))
    {
        Some(missing) => Err(UnitError::IncompleteSystem {
            system: definition.name.clone(),
            dimension: missing.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mrfmsim_units::dimension::{CURRENT, LENGTH, MASS, TEMPERATURE, TIME};
    use mrfmsim_units::{BaseUnitRule, UNITS};

    #[test]
    fn test_entries_cover_every_dimension() {
        for (entry, base) in MRFMSIM_BASE_UNITS.iter().zip(BaseDimension::ALL) {
            assert_eq!(entry.dimension, base);
            assert!(entry.scale > 0.0);
        }
    }

    #[test]
    fn test_direct_system() {
        let system = mrfmsim_system(&UNITS).unwrap();
        assert_eq!(system.name(), MRFMSIM);
        assert_eq!(system.parent(), Some("SI"));

        let symbol = |i: usize| system.base_unit(i).unwrap().unit.symbol();
        assert_eq!(symbol(CURRENT), "µA");
        assert_eq!(symbol(LENGTH), "nm");
        assert_eq!(symbol(MASS), "µg");
        assert_eq!(symbol(TEMPERATURE), "K");
        assert_eq!(symbol(TIME), "s");
    }

    #[test]
    fn test_rule_text_matches_entries() {
        let def: SystemDefinition = MRFMSIM_SYSTEM.parse().unwrap();
        assert_eq!(def.name, MRFMSIM);
        let targets: Vec<&str> = def.rules.iter().map(|r| r.target.as_str()).collect();
        let units: Vec<&str> = MRFMSIM_BASE_UNITS.iter().map(|e| e.unit).collect();
        assert_eq!(targets, units);
        assert!(check_complete(&def, &UNITS).is_ok());
    }

    #[test]
    fn test_incomplete_definition() {
        let def = SystemDefinition::new("partial")
            .using("SI")
            .with_rule(BaseUnitRule::replacing("nanometer", "meter"))
            .with_rule(BaseUnitRule::new("second"));
        let err = check_complete(&def, &UNITS).unwrap_err();
        assert_eq!(err, UnitError::IncompleteSystem {
            system: "partial".to_string(),
            dimension: "current".to_string(),
        });
    }

    #[test]
    fn test_unknown_rule_unit() {
        let def = SystemDefinition::new("x").with_rule(BaseUnitRule::new("nanofurlong"));
        let err = check_complete(&def, &UNITS).unwrap_err();
        assert_eq!(err, UnitError::UnknownUnit("nanofurlong".to_string()));
    }
}
