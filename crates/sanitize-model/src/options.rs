//! Options attached to a transform name in an attribute declaration.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The options value given to one transform.
///
/// Each built-in transform expects one shape: `strip: true`, `truncate: 6`,
/// `case: "downcase"`, `gsub: { pattern, replacement }`. Custom transforms
/// receive no options; the flag form (`ssn: true`) just enables them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransformOption {
    Flag(bool),
    Integer(i64),
    Text(String),
    /// Regex plus replacement text.
    Replace { pattern: String, replacement: String },
    /// Regex only.
    Pattern { pattern: String },
}

impl TransformOption {
    pub fn replace(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self::Replace {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
        }
    }

    /// Short description of the shape, used in configuration errors.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Flag(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Text(_) => "string",
            Self::Replace { .. } => "pattern and replacement",
            Self::Pattern { .. } => "pattern",
        }
    }
}

impl From<bool> for TransformOption {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i64> for TransformOption {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for TransformOption {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TransformOption {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Ordered `transform name -> options` entries for one attribute.
///
/// Order is declaration order and is never changed; duplicate names are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformMap {
    entries: Vec<(String, TransformOption)>,
}

impl TransformMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, option: impl Into<TransformOption>) -> Self {
        self.push(name, option);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, option: impl Into<TransformOption>) {
        self.entries.push((name.into(), option.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TransformOption)> {
        self.entries.iter().map(|(name, option)| (name.as_str(), option))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for TransformMap {
    type Item = (String, TransformOption);
    type IntoIter = std::vec::IntoIter<(String, TransformOption)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for TransformMap
where
    K: Into<String>,
    V: Into<TransformOption>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, option) in iter {
            map.push(name, option);
        }
        map
    }
}

impl Serialize for TransformMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, option) in &self.entries {
            map.serialize_entry(name, option)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TransformMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TransformMapVisitor;

        impl<'de> Visitor<'de> for TransformMapVisitor {
            type Value = TransformMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of transform names to options")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TransformMap, A::Error> {
                let mut map = TransformMap::new();
                while let Some((name, option)) = access.next_entry::<String, TransformOption>()? {
                    map.push(name, option);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(TransformMapVisitor)
    }
}
