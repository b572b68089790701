//! Structured records with per-field unit metadata
//!
//! A record type declares its fields once, as a table of `FieldDescriptor`s.
//! Each descriptor may carry a unit annotation naming the unit the field's raw
//! numeric value is expressed in. Attributes that are readable on a record but
//! missing from the table (values computed after construction, for instance)
//! carry no unit by construction.

use crate::{FieldError, Value};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

/// Declaration of one schema field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: Cow<'static, str>,
    unit: Option<Cow<'static, str>>,
}

impl FieldDescriptor {
    /// Field without unit metadata
    pub const fn plain(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            unit: None,
        }
    }

    /// Field whose raw value is expressed in `unit`
    pub const fn with_unit(name: &'static str, unit: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            unit: Some(Cow::Borrowed(unit)),
        }
    }

    /// Descriptor built from runtime strings
    pub fn owned(name: impl Into<String>, unit: Option<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            unit: unit.map(Cow::Owned),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit annotation, `None` when absent or empty
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref().filter(|u| !u.trim().is_empty())
    }
}

/// A fixed-schema value object readable by field name
pub trait Record {
    /// Type name used in error messages
    fn record_name(&self) -> &str;

    /// Declared schema fields, in declaration order
    fn fields(&self) -> &[FieldDescriptor];

    /// Read a field or ad hoc attribute by name
    fn get(&self, name: &str) -> Result<Value, FieldError>;

    /// Descriptor of a declared field
    fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields().iter().find(|f| f.name() == name)
    }

    /// Whether `name` is part of the declared schema
    fn is_declared(&self, name: &str) -> bool {
        self.descriptor(name).is_some()
    }
}

/// Runtime-defined record schema
#[derive(Debug, Clone)]
pub struct RecordSchema {
    name: String,
    fields: Vec<FieldDescriptor>,
    defaults: HashMap<String, Value>,
}

impl RecordSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            defaults: HashMap::new(),
        }
    }

    /// Builder: add a required field
    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    /// Builder: add a field with a default value
    pub fn field_with_default(mut self, descriptor: FieldDescriptor, default: impl Into<Value>) -> Self {
        self.defaults.insert(descriptor.name().to_string(), default.into());
        self.fields.push(descriptor);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn default_value(&self, field: &str) -> Option<&Value> {
        self.defaults.get(field)
    }

    /// Build a record from keyword values, filling in defaults.
    ///
    /// Every keyword must name a declared field and every field without a
    /// default must be given.
    pub fn instantiate<I, K, V>(self: &Arc<Self>, values: I) -> Result<DynamicRecord, FieldError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut given: HashMap<String, Value> = HashMap::new();
        for (key, value) in values {
            let key = key.into();
            if !self.fields.iter().any(|f| f.name() == key) {
                return Err(FieldError::UnknownField {
                    record: self.name.clone(),
                    field: key,
                });
            }
            given.insert(key, value.into());
        }

        let mut declared = HashMap::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = match given.remove(field.name()) {
                Some(v) => v,
                None => self.defaults.get(field.name()).cloned().ok_or_else(|| {
                    FieldError::MissingField {
                        record: self.name.clone(),
                        field: field.name().to_string(),
                    }
                })?,
            };
            declared.insert(field.name().to_string(), value);
        }

        Ok(DynamicRecord {
            schema: Arc::clone(self),
            declared,
            extra: HashMap::new(),
        })
    }
}

/// Instance of a `RecordSchema`, plus attributes set after construction
#[derive(Debug, Clone)]
pub struct DynamicRecord {
    schema: Arc<RecordSchema>,
    declared: HashMap<String, Value>,
    extra: HashMap<String, Value>,
}

impl DynamicRecord {
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Set a field; names outside the schema become ad hoc attributes.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.declared.get_mut(&name) {
            *slot = value;
        } else {
            self.extra.insert(name, value);
        }
    }

    /// Builder form of `set_attr`
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_attr(name, value);
        self
    }
}

impl Record for DynamicRecord {
    fn record_name(&self) -> &str {
        self.schema.name()
    }

    fn fields(&self) -> &[FieldDescriptor] {
        self.schema.fields()
    }

    fn get(&self, name: &str) -> Result<Value, FieldError> {
        self.declared
            .get(name)
            .or_else(|| self.extra.get(name))
            .cloned()
            .ok_or_else(|| FieldError::not_found(self.schema.name(), name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component_schema() -> Arc<RecordSchema> {
        Arc::new(
            RecordSchema::new("Component")
                .field(FieldDescriptor::with_unit("a", "m"))
                .field(FieldDescriptor::with_unit("b", "mT"))
                .field_with_default(FieldDescriptor::plain("c"), 1),
        )
    }

    #[test]
    fn test_instantiate_fills_defaults() {
        let record = component_schema()
            .instantiate([("a", Value::Int(1)), ("b", Value::Float(2.0))])
            .unwrap();
        assert_eq!(record.get("a").unwrap(), Value::Int(1));
        assert_eq!(record.get("b").unwrap(), Value::Float(2.0));
        assert_eq!(record.get("c").unwrap(), Value::Int(1));
    }

    #[test]
    fn test_instantiate_missing_field() {
        let err = component_schema().instantiate([("a", 1)]).unwrap_err();
        assert_eq!(
            err,
            FieldError::MissingField {
                record: "Component".to_string(),
                field: "b".to_string()
            }
        );
    }

    #[test]
    fn test_instantiate_unknown_field() {
        let err = component_schema()
            .instantiate([("a", 1), ("b", 2), ("z", 3)])
            .unwrap_err();
        assert_eq!(err.field(), "z");
        assert!(matches!(err, FieldError::UnknownField { .. }));
    }

    #[test]
    fn test_extra_attributes_are_not_declared() {
        let record = component_schema()
            .instantiate([("a", 1), ("b", 2)])
            .unwrap()
            .with_attr("d", 2);
        assert_eq!(record.get("d").unwrap(), Value::Int(2));
        assert!(!record.is_declared("d"));
        assert!(record.is_declared("a"));
        assert_eq!(record.descriptor("a").unwrap().unit(), Some("m"));
        assert_eq!(record.descriptor("c").unwrap().unit(), None);
    }

    #[test]
    fn test_set_attr_on_declared_field() {
        let mut record = component_schema().instantiate([("a", 1), ("b", 2)]).unwrap();
        record.set_attr("a", 5);
        assert_eq!(record.get("a").unwrap(), Value::Int(5));
        assert!(record.descriptor("a").is_some());
    }

    #[test]
    fn test_get_missing_attribute() {
        let record = component_schema().instantiate([("a", 1), ("b", 2)]).unwrap();
        let err = record.get("nope").unwrap_err();
        assert_eq!(err.to_string(), "'Component' object has no attribute 'nope'");
    }

    #[test]
    fn test_empty_unit_annotation_is_no_unit() {
        let field = FieldDescriptor::with_unit("x", "");
        assert_eq!(field.unit(), None);
        let field = FieldDescriptor::owned("y", Some("nm".to_string()));
        assert_eq!(field.name(), "y");
        assert_eq!(field.unit(), Some("nm"));
    }
}
