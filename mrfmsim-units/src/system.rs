//! Unit systems - a choice of base unit for every base dimension
//!
//! A system is either built from a text definition in the usual
//! `@system NAME using PARENT` ... `@end` form, where each rule line
//! `target[: source]` replaces the parent's base unit for the target's
//! dimension, or from explicit (dimension, unit, scale) entries.

use std::fmt;
use std::str::FromStr;
use crate::dimension::{BASE_COUNT, BASE_NAMES};
use crate::units::{si_base_units, UnitTable};
use crate::{Dimension, Unit, UnitError};

/// Centimeter-gram-second system
pub const CGS_SYSTEM: &str = "\
@system cgs using SI
    centimeter
    gram
    second
@end
";

/// Relative tolerance for declared base-unit scales
const SCALE_TOLERANCE: f64 = 1e-9;

/// The unit a system measures one base dimension in
#[derive(Debug, Clone, PartialEq)]
pub struct BaseUnit {
    pub unit: Unit,
    /// Number of `unit` per native SI unit of the dimension
    pub scale: f64,
}

/// A named unit system
#[derive(Debug, Clone, PartialEq)]
pub struct System {
    name: String,
    parent: Option<String>,
    base: [BaseUnit; BASE_COUNT],
}

impl System {
    /// The SI system, the root every other system derives from
    pub fn si() -> Self {
        System {
            name: "SI".to_string(),
            parent: None,
            base: si_base_units().map(|unit| BaseUnit { unit, scale: 1.0 }),
        }
    }

    /// Build a system from its rewrite rules on top of `parent`.
    ///
    /// Each rule's scale comes from the unit database.
    pub fn from_definition(
        definition: &SystemDefinition,
        parent: &System,
        table: &UnitTable,
    ) -> Result<Self, UnitError> {
        let mut base = parent.base.clone();

        for rule in &definition.rules {
            let target = table
                .lookup(&rule.target)
                .ok_or_else(|| UnitError::UnknownUnit(rule.target.clone()))?;
            let index = base_index(&definition.name, &target)?;

            if let Some(source) = &rule.source {
                let source = table
                    .lookup(source)
                    .ok_or_else(|| UnitError::UnknownUnit(source.clone()))?;
                if !source.is_compatible(&target) {
                    return Err(UnitError::incompatible(&source, &target));
                }
            }

            let scale = units_per_si(target.to_si_factor);
            base[index] = BaseUnit { unit: target, scale };
        }

        Ok(System {
            name: definition.name.clone(),
            parent: Some(parent.name.clone()),
            base,
        })
    }

    /// Build a system from explicit base units with their scale factors.
    ///
    /// Every scale is checked against the unit database.
    pub fn from_scales(
        name: &str,
        parent: &System,
        entries: &[(Dimension, &str, f64)],
        table: &UnitTable,
    ) -> Result<Self, UnitError> {
        let mut base = parent.base.clone();

        for &(dimension, unit_name, scale) in entries {
            let unit = table
                .lookup(unit_name)
                .ok_or_else(|| UnitError::UnknownUnit(unit_name.to_string()))?;
            let index = dimension.base_index().ok_or_else(|| UnitError::NotBaseDimension {
                system: name.to_string(),
                unit: unit_name.to_string(),
            })?;
            if unit.dimension != dimension {
                return Err(UnitError::incompatible(&unit, &parent.base[index].unit));
            }

            let expected = 1.0 / unit.to_si_factor;
            if !(scale > 0.0) || (scale * unit.to_si_factor - 1.0).abs() > SCALE_TOLERANCE {
                return Err(UnitError::InconsistentScale {
                    system: name.to_string(),
                    unit: unit_name.to_string(),
                    declared: scale,
                    expected,
                });
            }

            base[index] = BaseUnit { unit, scale };
        }

        Ok(System {
            name: name.to_string(),
            parent: Some(parent.name.clone()),
            base,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Base unit for the dimension at `index` (see `dimension::BASE_NAMES`)
    pub fn base_unit(&self, index: usize) -> Option<&BaseUnit> {
        self.base.get(index)
    }

    pub fn base_units(&self) -> &[BaseUnit] {
        &self.base
    }

    /// Convert an SI magnitude of the given dimension into this system's base units
    pub fn base_magnitude(&self, value_si: f64, dimension: Dimension) -> f64 {
        // Scales with positive and negative exponents are applied separately
        // so that exact scale ratios stay exact (1 T -> 1e9 / 1e6)
        let mut numerator = 1.0;
        let mut denominator = 1.0;
        for (base, &exp) in self.base.iter().zip(dimension.exponents.iter()) {
            if exp > 0 {
                numerator *= base.scale.powi(exp);
            } else if exp < 0 {
                // scale^|exp| has saturated to 0 or inf long before i32::MIN
                denominator *= base.scale.powi(exp.saturating_neg());
            }
        }
        value_si * numerator / denominator
    }

    /// Number of base-unit magnitudes per SI magnitude for a dimension
    pub fn conversion_factor(&self, dimension: Dimension) -> f64 {
        self.base_magnitude(1.0, dimension)
    }

    /// The unit expression this system uses for a dimension, e.g. nm·µg/s²
    pub fn base_unit_for(&self, dimension: Dimension) -> Unit {
        self.base
            .iter()
            .zip(dimension.exponents.iter())
            .filter(|(_, &exp)| exp != 0)
            .fold(Unit::dimensionless(), |acc, (base, &exp)| {
                acc.multiply(&base.unit.power(exp))
            })
    }
}

/// Number of units per native SI unit for a unit of the given SI factor.
///
/// Decimal factors (prefixed units such as µg = 1e-9 kg) give the exact
/// power of ten rather than the rounded reciprocal.
fn units_per_si(factor: f64) -> f64 {
    if !(factor > 0.0 && factor.is_finite()) {
        return 1.0 / factor;
    }
    let decimal_exponent = -factor.log10().round() as i32;
    let power = if decimal_exponent >= 0 {
        10f64.powi(decimal_exponent)
    } else {
        1.0 / 10f64.powi(-decimal_exponent)
    };
    if (factor * power - 1.0).abs() <= SCALE_TOLERANCE {
        power
    } else {
        1.0 / factor
    }
}

fn base_index(system: &str, unit: &Unit) -> Result<usize, UnitError> {
    unit.dimension
        .base_index()
        .filter(|_| unit.is_atomic())
        .ok_or_else(|| UnitError::NotBaseDimension {
            system: system.to_string(),
            unit: unit.name(),
        })
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(parent) = &self.parent {
            write!(f, " using {}", parent)?;
        }
        let units: Vec<String> = self
            .base
            .iter()
            .zip(BASE_NAMES.iter())
            .map(|(base, dim)| format!("{}={}", dim, base.unit.symbol()))
            .collect();
        write!(f, " ({})", units.join(", "))
    }
}

/// One `target[: source]` line of a system definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUnitRule {
    pub target: String,
    pub source: Option<String>,
}

impl BaseUnitRule {
    pub fn new(target: &str) -> Self {
        BaseUnitRule { target: target.to_string(), source: None }
    }

    pub fn replacing(target: &str, source: &str) -> Self {
        BaseUnitRule {
            target: target.to_string(),
            source: Some(source.to_string()),
        }
    }
}

/// Text form of a unit system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemDefinition {
    pub name: String,
    pub parent: Option<String>,
    pub rules: Vec<BaseUnitRule>,
}

impl SystemDefinition {
    pub fn new(name: &str) -> Self {
        SystemDefinition {
            name: name.to_string(),
            parent: None,
            rules: Vec::new(),
        }
    }

    pub fn using(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn with_rule(mut self, rule: BaseUnitRule) -> Self {
        self.rules.push(rule);
        self
    }
}

impl FromStr for SystemDefinition {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |line: usize, reason: &str| UnitError::InvalidSystemDefinition {
            line,
            reason: reason.to_string(),
        };

        let mut lines = s
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.split('#').next().unwrap_or_default().trim()))
            .filter(|(_, line)| !line.is_empty());

        let (header_line, header) = lines.next().ok_or_else(|| invalid(1, "empty definition"))?;
        let header = header
            .strip_prefix("@system")
            .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
            .ok_or_else(|| invalid(header_line, "expected '@system NAME'"))?;

        let mut words = header.split_whitespace();
        let name = words.next().ok_or_else(|| invalid(header_line, "missing system name"))?;
        let parent = match (words.next(), words.next(), words.next()) {
            (None, _, _) => None,
            (Some("using"), Some(parent), None) if !parent.contains(',') => Some(parent.to_string()),
            (Some("using"), Some(_), _) => {
                return Err(invalid(header_line, "only a single parent system is supported"))
            }
            _ => return Err(invalid(header_line, "expected 'using PARENT'")),
        };

        let mut definition = SystemDefinition {
            name: name.to_string(),
            parent,
            rules: Vec::new(),
        };

        let mut last_line = header_line;
        while let Some((number, line)) = lines.next() {
            last_line = number;
            if line == "@end" {
                if let Some((extra, _)) = lines.next() {
                    return Err(invalid(extra, "unexpected content after '@end'"));
                }
                return Ok(definition);
            }

            let rule = match line.split_once(':') {
                Some((target, source)) => {
                    let (target, source) = (target.trim(), source.trim());
                    if source.is_empty() {
                        return Err(invalid(number, "missing source unit after ':'"));
                    }
                    BaseUnitRule::replacing(target, source)
                }
                None => BaseUnitRule::new(line),
            };
            if rule.target.is_empty() || rule.target.contains(char::is_whitespace) {
                return Err(invalid(number, "expected 'target[: source]'"));
            }
            definition.rules.push(rule);
        }

        Err(invalid(last_line, "missing '@end'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::{CURRENT, LENGTH, MASS, TIME};
    use crate::UNITS;

    const MICRO: &str = "\
@system micro using SI
    # base units
    micrometer: meter
    microgram: gram
    second
@end
";

    #[test]
    fn test_si_system() {
        let si = System::si();
        assert_eq!(si.name(), "SI");
        assert_eq!(si.parent(), None);
        assert_eq!(si.conversion_factor(Dimension::FORCE), 1.0);
        assert_eq!(si.base_unit_for(Dimension::FORCE).symbol(), "m·kg/s²");
    }

    #[test]
    fn test_parse_definition() {
        let def: SystemDefinition = MICRO.parse().unwrap();
        assert_eq!(def.name, "micro");
        assert_eq!(def.parent.as_deref(), Some("SI"));
        assert_eq!(def.rules.len(), 3);
        assert_eq!(def.rules[0], BaseUnitRule::replacing("micrometer", "meter"));
        assert_eq!(def.rules[2], BaseUnitRule::new("second"));
    }

    #[test]
    fn test_parse_definition_errors() {
        let err = "@system".parse::<SystemDefinition>().unwrap_err();
        assert!(matches!(err, UnitError::InvalidSystemDefinition { line: 1, .. }));

        let err = "@system x using SI\n  meter\n".parse::<SystemDefinition>().unwrap_err();
        assert_eq!(err, UnitError::InvalidSystemDefinition {
            line: 2,
            reason: "missing '@end'".to_string(),
        });

        let err = "@system x\n  meter:\n@end".parse::<SystemDefinition>().unwrap_err();
        assert!(matches!(err, UnitError::InvalidSystemDefinition { line: 2, .. }));

        let err = "@system x\n@end\nmeter".parse::<SystemDefinition>().unwrap_err();
        assert!(matches!(err, UnitError::InvalidSystemDefinition { line: 3, .. }));
    }

    #[test]
    fn test_from_definition() {
        let def: SystemDefinition = MICRO.parse().unwrap();
        let system = System::from_definition(&def, &System::si(), &UNITS).unwrap();

        assert_eq!(system.parent(), Some("SI"));
        assert_eq!(system.base_unit(LENGTH).unwrap().unit.symbol(), "µm");
        assert_eq!(system.base_unit(MASS).unwrap().unit.symbol(), "µg");
        // Unchanged dimensions come from the parent
        assert_eq!(system.base_unit(CURRENT).unwrap().unit.symbol(), "A");
        assert_eq!(system.base_unit(TIME).unwrap().scale, 1.0);

        let factor = system.conversion_factor(Dimension::LENGTH);
        assert!((factor - 1e6).abs() < 1e-6);
    }

    #[test]
    fn test_from_definition_errors() {
        let si = System::si();

        let def = SystemDefinition::new("x").with_rule(BaseUnitRule::new("furlong"));
        let err = System::from_definition(&def, &si, &UNITS).unwrap_err();
        assert_eq!(err, UnitError::UnknownUnit("furlong".to_string()));

        let def = SystemDefinition::new("x").with_rule(BaseUnitRule::new("newton"));
        let err = System::from_definition(&def, &si, &UNITS).unwrap_err();
        assert!(matches!(err, UnitError::NotBaseDimension { .. }));

        let def = SystemDefinition::new("x").with_rule(BaseUnitRule::replacing("nanometer", "second"));
        let err = System::from_definition(&def, &si, &UNITS).unwrap_err();
        assert!(matches!(err, UnitError::IncompatibleDimensions { .. }));
    }

    #[test]
    fn test_from_scales() {
        let si = System::si();
        let entries = [(Dimension::LENGTH, "nanometer", 1e9), (Dimension::MASS, "microgram", 1e9)];
        let system = System::from_scales("nano", &si, &entries, &UNITS).unwrap();
        assert_eq!(system.conversion_factor(Dimension::LENGTH), 1e9);
        assert_eq!(system.conversion_factor(Dimension::FORCE), 1e18);

        let bad = [(Dimension::LENGTH, "nanometer", 1e6)];
        let err = System::from_scales("nano", &si, &bad, &UNITS).unwrap_err();
        assert!(matches!(err, UnitError::InconsistentScale { .. }));

        let wrong_dim = [(Dimension::LENGTH, "second", 1.0)];
        let err = System::from_scales("nano", &si, &wrong_dim, &UNITS).unwrap_err();
        assert!(matches!(err, UnitError::IncompatibleDimensions { .. }));
    }

    #[test]
    fn test_exact_scale_ratios() {
        let entries = [
            (Dimension::CURRENT, "microampere", 1e6),
            (Dimension::MASS, "microgram", 1e9),
        ];
        let system = System::from_scales("x", &System::si(), &entries, &UNITS).unwrap();
        // tesla = kg / (A s^2)
        assert_eq!(system.base_magnitude(1.0, Dimension::MAGNETIC_FLUX_DENSITY), 1000.0);
    }

    #[test]
    fn test_rule_scales_are_exact_powers_of_ten() {
        let def = SystemDefinition::new("x")
            .using("SI")
            .with_rule(BaseUnitRule::replacing("microampere", "ampere"))
            .with_rule(BaseUnitRule::replacing("nanometer", "meter"))
            .with_rule(BaseUnitRule::replacing("microgram", "gram"));
        let system = System::from_definition(&def, &System::si(), &UNITS).unwrap();

        assert_eq!(system.base_unit(CURRENT).unwrap().scale, 1e6);
        assert_eq!(system.base_unit(LENGTH).unwrap().scale, 1e9);
        assert_eq!(system.base_unit(MASS).unwrap().scale, 1e9);
        assert_eq!(system.base_magnitude(1.0, Dimension::MAGNETIC_FLUX_DENSITY), 1000.0);
    }

    #[test]
    fn test_units_per_si() {
        assert_eq!(units_per_si(1e-3 * 1e-6), 1e9);
        assert_eq!(units_per_si(1e3), 1e-3);
        assert_eq!(units_per_si(1.0), 1.0);
        assert_eq!(units_per_si(0.3048), 1.0 / 0.3048);
    }

    #[test]
    fn test_cgs() {
        let def: SystemDefinition = CGS_SYSTEM.parse().unwrap();
        let cgs = System::from_definition(&def, &System::si(), &UNITS).unwrap();
        let dyne_per_newton = cgs.conversion_factor(Dimension::FORCE);
        assert!((dyne_per_newton - 1e5).abs() < 1e-6);
    }
}
