//! Host boundary: attribute access on records and schema introspection.

use std::collections::BTreeSet;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TransformError;
use crate::value::Value;

/// Getter/setter access to the named attributes of one record instance.
pub trait Record {
    /// Current value of `name`, or `None` when the record has no such attribute.
    fn get_attribute(&self, name: &str) -> Option<Value>;

    /// Assign `value` to `name`.
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), TransformError>;
}

/// Schema introspection for a model type.
pub trait Schema {
    /// Model name, used in diagnostics.
    fn model_name(&self) -> &str;

    /// Whether the model declares an attribute called `name`.
    fn has_attribute(&self, name: &str) -> bool;

    /// Whether the backing storage exists yet.
    ///
    /// Configuration against an unprovisioned model is skipped, which lets
    /// model declarations load while storage is still being created.
    fn is_provisioned(&self) -> bool {
        true
    }
}

/// Attribute list for a model, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSchema {
    pub name: String,
    pub attributes: BTreeSet<String>,
    #[serde(default = "default_provisioned")]
    pub provisioned: bool,
}

fn default_provisioned() -> bool {
    true
}

impl ModelSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeSet::new(),
            provisioned: true,
        }
    }

    /// Add one attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.insert(name.into());
        self
    }

    /// Add several attributes.
    #[must_use]
    pub fn with_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes.extend(names.into_iter().map(Into::into));
        self
    }

    /// Mark the backing storage as present or absent.
    #[must_use]
    pub fn provisioned(mut self, provisioned: bool) -> Self {
        self.provisioned = provisioned;
        self
    }
}

impl Schema for ModelSchema {
    fn model_name(&self) -> &str {
        &self.name
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }

    fn is_provisioned(&self) -> bool {
        self.provisioned
    }
}

/// A record backed by an ordered list of named values.
///
/// Attributes keep their insertion order, so a serialized record comes back out
/// in the order it went in. Writing an attribute that was never present is
/// rejected, matching a fixed-column table row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapRecord {
    fields: Vec<(String, Value)>,
}

impl MapRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a field, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Record for MapRecord {
    fn get_attribute(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), TransformError> {
        match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, slot)) => {
                *slot = value;
                Ok(())
            }
            None => Err(TransformError::MissingAttribute(name.to_string())),
        }
    }
}

/// Serializes as a map in field order.
impl Serialize for MapRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Deserializes from a map, keeping document order.
impl<'de> Deserialize<'de> for MapRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = MapRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute names to scalar values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<MapRecord, A::Error> {
                let mut record = MapRecord::new();
                while let Some((name, value)) = access.next_entry::<String, Value>()? {
                    record.insert(name, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MapRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}
