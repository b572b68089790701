//! Unit registry - the unit database plus named systems, the default system
//! and the default display format

use std::collections::HashMap;
use std::sync::Arc;
use crate::parse::{parse_quantity_string, parse_unit};
use crate::system::CGS_SYSTEM;
use crate::units::{UnitTable, UNITS};
use crate::{Format, Quantity, System, SystemDefinition, Unit, UnitError};

/// A unit registry.
///
/// All registries share the immutable unit database; systems and defaults
/// are per registry, so independent registries never interfere.
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    units: &'static UnitTable,
    systems: HashMap<String, Arc<System>>,
    default_system: Arc<System>,
    default_format: Format,
}

impl UnitRegistry {
    /// Registry with the `SI` and `cgs` systems, SI as default and format `D`
    pub fn new() -> Self {
        let units: &'static UnitTable = &UNITS;
        let si = Arc::new(System::si());
        let mut registry = UnitRegistry {
            units,
            systems: HashMap::from([(si.name().to_string(), Arc::clone(&si))]),
            default_system: si,
            default_format: Format::DEFAULT,
        };

        // CGS_SYSTEM is a fixed definition over known units
        match CGS_SYSTEM
            .parse::<SystemDefinition>()
            .and_then(|def| System::from_definition(&def, &System::si(), units))
        {
            Ok(cgs) => {
                registry.install_system(cgs);
            }
            Err(err) => tracing::warn!(%err, "built-in cgs system not installed"),
        }
        registry
    }

    /// The shared unit database
    pub fn units(&self) -> &'static UnitTable {
        self.units
    }

    pub fn system(&self, name: &str) -> Result<Arc<System>, UnitError> {
        self.systems
            .get(name)
            .cloned()
            .ok_or_else(|| UnitError::UnknownSystem(name.to_string()))
    }

    /// Names of all registered systems, sorted
    pub fn system_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.systems.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Resolve a system definition against its parent (SI when unnamed) and
    /// register it
    pub fn add_system(&mut self, definition: &SystemDefinition) -> Result<Arc<System>, UnitError> {
        let parent = self.system(definition.parent.as_deref().unwrap_or("SI"))?;
        let system = System::from_definition(definition, &parent, self.units)?;
        Ok(self.install_system(system))
    }

    /// Register an already resolved system, replacing one of the same name
    pub fn install_system(&mut self, system: System) -> Arc<System> {
        let system = Arc::new(system);
        tracing::debug!(
            system = system.name(),
            parent = system.parent().unwrap_or("-"),
            "registered unit system"
        );
        self.systems.insert(system.name().to_string(), Arc::clone(&system));
        system
    }

    pub fn set_default_system(&mut self, name: &str) -> Result<(), UnitError> {
        self.default_system = self.system(name)?;
        tracing::debug!(system = name, "default unit system changed");
        Ok(())
    }

    pub fn with_default_system(mut self, name: &str) -> Result<Self, UnitError> {
        self.set_default_system(name)?;
        Ok(self)
    }

    pub fn set_default_format(&mut self, format: Format) {
        self.default_format = format;
    }

    pub fn with_default_format(mut self, format: Format) -> Self {
        self.default_format = format;
        self
    }

    pub fn default_system(&self) -> &Arc<System> {
        &self.default_system
    }

    pub fn default_format(&self) -> Format {
        self.default_format
    }

    /// Parse a unit expression
    pub fn unit(&self, expr: &str) -> Result<Unit, UnitError> {
        parse_unit(self.units, expr)
    }

    pub fn quantity(&self, value: f64, expr: &str) -> Result<Quantity, UnitError> {
        Ok(Quantity::new(value, self.unit(expr)?))
    }

    /// Parse a quantity written as text, e.g. "1e-9 N"
    pub fn parse_expression(&self, s: &str) -> Result<Quantity, UnitError> {
        let (value, unit) = parse_quantity_string(self.units, s)?;
        Ok(Quantity::new(value, unit))
    }

    /// Express a quantity in the default system's base units
    pub fn to_base_units(&self, quantity: &Quantity) -> Quantity {
        quantity.to_base_units(&self.default_system)
    }

    /// Render a quantity in the default format
    pub fn format(&self, quantity: &Quantity) -> String {
        quantity.display(self.default_format).to_string()
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BaseUnitRule, Dimension};

    #[test]
    fn test_new_registry() {
        let ureg = UnitRegistry::new();
        assert_eq!(ureg.default_system().name(), "SI");
        assert_eq!(ureg.default_format(), Format::DEFAULT);
        assert_eq!(ureg.system_names(), vec!["SI", "cgs"]);
    }

    #[test]
    fn test_builtin_cgs_system() {
        let def: SystemDefinition = CGS_SYSTEM.parse().unwrap();
        let resolved = System::from_definition(&def, &System::si(), &UNITS).unwrap();

        let cgs = UnitRegistry::new().system("cgs").unwrap();
        assert_eq!(*cgs, resolved);
        assert_eq!(cgs.conversion_factor(Dimension::FORCE), 1e5);
    }

    #[test]
    fn test_unknown_system() {
        let mut ureg = UnitRegistry::new();
        let err = ureg.set_default_system("atomic").unwrap_err();
        assert_eq!(err, UnitError::UnknownSystem("atomic".to_string()));
        assert_eq!(ureg.default_system().name(), "SI");
    }

    #[test]
    fn test_add_system() {
        let def = SystemDefinition::new("nano")
            .using("SI")
            .with_rule(BaseUnitRule::replacing("nanometer", "meter"));
        let ureg = {
            let mut ureg = UnitRegistry::new();
            ureg.add_system(&def).unwrap();
            ureg.with_default_system("nano").unwrap()
        };

        let q = ureg.quantity(2.0, "m").unwrap();
        let base = ureg.to_base_units(&q);
        assert!((base.value - 2e9).abs() < 1e-3);
        assert_eq!(base.unit.symbol(), "nm");
    }

    #[test]
    fn test_add_system_unknown_parent() {
        let mut ureg = UnitRegistry::new();
        let def = SystemDefinition::new("x").using("imperial");
        let err = ureg.add_system(&def).unwrap_err();
        assert_eq!(err, UnitError::UnknownSystem("imperial".to_string()));
    }

    #[test]
    fn test_registries_are_independent() {
        let mut a = UnitRegistry::new();
        let b = UnitRegistry::new();
        a.set_default_system("cgs").unwrap();
        a.set_default_format(Format::SHORT_PRETTY);

        assert_eq!(a.default_system().name(), "cgs");
        assert_eq!(b.default_system().name(), "SI");
        assert_eq!(b.default_format(), Format::DEFAULT);
    }

    #[test]
    fn test_parse_expression_and_format() {
        let ureg = UnitRegistry::new().with_default_format(Format::SHORT_PRETTY);
        let q = ureg.parse_expression("3 m/s").unwrap();
        assert_eq!(q.dimension(), Dimension::VELOCITY);
        assert_eq!(ureg.format(&q), "3.0 m/s");
    }
}
