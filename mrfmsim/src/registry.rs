//! The MRFM unit registry

use std::sync::Arc;
use mrfmsim_core::{FieldDescriptor, Record};
use mrfmsim_units::{Format, System, SystemDefinition, UnitError, UnitRegistry};
use crate::quantity::Scope;
use crate::system::{check_complete, mrfmsim_system, MRFMSIM};
use crate::{Attr, AttrError, MrfmQuantity, MrfmUnit};

/// A unit registry whose default system is mrfmsim and whose default format
/// is `~P`, so that `1.0 * m / s` prints as `1.0 m/s`.
#[derive(Debug, Clone)]
pub struct MrfmUnitRegistry {
    registry: UnitRegistry,
}

impl MrfmUnitRegistry {
    /// Registry with the direct mrfmsim system installed as default
    pub fn new() -> Result<Self, UnitError> {
        let mut registry = UnitRegistry::new();
        let system = mrfmsim_system(registry.units())?;
        registry.install_system(system);
        registry.set_default_system(MRFMSIM)?;
        Ok(Self::finish(registry))
    }

    /// Registry with a rewrite-rule system as default.
    ///
    /// The definition must pick a unit for current, length, mass,
    /// temperature and time.
    pub fn with_definition(definition: &SystemDefinition) -> Result<Self, UnitError> {
        let mut registry = UnitRegistry::new();
        check_complete(definition, registry.units())?;
        let system = registry.add_system(definition)?;
        registry.set_default_system(system.name())?;
        Ok(Self::finish(registry))
    }

    fn finish(registry: UnitRegistry) -> Self {
        let registry = registry.with_default_format(Format::SHORT_PRETTY);
        tracing::debug!(
            system = registry.default_system().name(),
            format = %registry.default_format(),
            "mrfm unit registry ready"
        );
        MrfmUnitRegistry { registry }
    }

    /// The underlying unit registry
    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    pub fn default_system(&self) -> &Arc<System> {
        self.registry.default_system()
    }

    pub fn default_format(&self) -> Format {
        self.registry.default_format()
    }

    pub fn system(&self, name: &str) -> Result<Arc<System>, UnitError> {
        self.registry.system(name)
    }

    fn scope(&self) -> Scope {
        Scope::of(&self.registry)
    }

    /// Parse a unit expression, e.g. "mT" or "aN/nm"
    pub fn unit(&self, expr: &str) -> Result<MrfmUnit, UnitError> {
        Ok(MrfmUnit::scoped(self.registry.unit(expr)?, self.scope()))
    }

    pub fn quantity(&self, value: f64, expr: &str) -> Result<MrfmQuantity, UnitError> {
        Ok(MrfmQuantity::scoped(self.registry.quantity(value, expr)?, self.scope()))
    }

    /// Parse a quantity written as text, e.g. "1e-9 N"
    pub fn parse_expression(&self, s: &str) -> Result<MrfmQuantity, UnitError> {
        Ok(MrfmQuantity::scoped(self.registry.parse_expression(s)?, self.scope()))
    }

    /// Read a record field, attaching the unit its descriptor declares.
    ///
    /// Fields outside the descriptor table, and declared fields without a
    /// unit, come back as plain values.
    pub fn getattr<R: Record + ?Sized>(&self, record: &R, field: &str) -> Result<Attr, AttrError> {
        let raw = record.get(field)?;
        let Some(expr) = record.descriptor(field).and_then(FieldDescriptor::unit) else {
            return Ok(Attr::Value(raw));
        };

        let unit = self.unit(expr)?;
        let magnitude = raw.as_f64().ok_or_else(|| AttrError::NotNumeric {
            field: field.to_string(),
            unit: expr.to_string(),
            type_name: raw.type_name(),
        })?;
        Ok(Attr::Quantity(magnitude * unit))
    }

    /// Every declared field of a record, in declaration order
    pub fn attributes<R: Record + ?Sized>(&self, record: &R) -> Result<Vec<(String, Attr)>, AttrError> {
        record
            .fields()
            .iter()
            .map(|f| {
                self.getattr(record, f.name())
                    .map(|attr| (f.name().to_string(), attr))
            })
            .collect()
    }
}
