//! JSON model declarations.
//!
//! A declaration describes a model's schema and its sanitization in data:
//!
//! ```json
//! {
//!   "model": "person",
//!   "attributes": ["first_name", "ssn"],
//!   "sanitizes": [
//!     { "attribute": "first_name", "transforms": { "strip": true, "case": "titlecase" } },
//!     { "attribute": "ssn", "transforms": { "remove": "-" } }
//!   ],
//!   "sanitizes_with": "person"
//! }
//! ```
//!
//! Transform maps keep their key order, which is the order the chain runs in.

use std::path::Path;

use sanitize_model::{ModelSchema, TransformMap};
use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::error::{ConfigError, DeclarationError};
use crate::pipeline::LifecycleEvent;
use crate::registry::TransformRegistry;

/// One `sanitizes` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeDeclaration {
    pub attribute: String,
    pub transforms: TransformMap,
}

/// A model's schema and sanitization, as loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDeclaration {
    pub model: String,
    pub attributes: Vec<String>,
    #[serde(default = "default_provisioned")]
    pub provisioned: bool,
    #[serde(default)]
    pub trigger: LifecycleEvent,
    #[serde(default)]
    pub sanitizes: Vec<AttributeDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanitizes_with: Option<String>,
}

fn default_provisioned() -> bool {
    true
}

impl ModelDeclaration {
    /// Parse a declaration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, DeclarationError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a declaration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DeclarationError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DeclarationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// The schema this declaration describes.
    pub fn schema(&self) -> ModelSchema {
        ModelSchema::new(self.model.clone())
            .with_attributes(self.attributes.iter().cloned())
            .provisioned(self.provisioned)
    }

    /// Build a configuration by replaying the declaration through `registry`.
    pub fn build<R>(&self, registry: &TransformRegistry<R>) -> Result<ModelConfig<R>, ConfigError> {
        let mut config = ModelConfig::new(self.schema()).with_trigger(self.trigger);
        for entry in &self.sanitizes {
            config.configure(
                registry,
                &entry.attribute,
                entry
                    .transforms
                    .iter()
                    .map(|(name, option)| (name, option.clone())),
            )?;
        }
        if let Some(name) = &self.sanitizes_with {
            config.configure_whole_record_named(registry, name)?;
        }
        Ok(config)
    }
}

impl<R> ModelConfig<R> {
    /// Build a configuration from a parsed declaration.
    pub fn from_declaration(
        declaration: &ModelDeclaration,
        registry: &TransformRegistry<R>,
    ) -> Result<Self, DeclarationError> {
        Ok(declaration.build(registry)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanitize_model::{MapRecord, Schema};

    #[test]
    fn defaults_apply() {
        let declaration = ModelDeclaration::from_json(
            r#"{ "model": "person", "attributes": ["name"] }"#,
        )
        .unwrap();
        assert!(declaration.provisioned);
        assert_eq!(declaration.trigger, LifecycleEvent::BeforeValidation);
        assert!(declaration.sanitizes.is_empty());
        assert!(declaration.schema().has_attribute("name"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = ModelDeclaration::from_json(
            r#"{ "model": "person", "attributes": [], "sanitise": [] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, DeclarationError::Parse(_)));
    }

    #[test]
    fn repeated_entries_append() {
        let declaration = ModelDeclaration::from_json(
            r#"{
                "model": "person",
                "attributes": ["name"],
                "sanitizes": [
                    { "attribute": "name", "transforms": { "strip": true } },
                    { "attribute": "name", "transforms": { "case": "upcase" } }
                ]
            }"#,
        )
        .unwrap();
        let config = ModelConfig::<MapRecord>::from_declaration(&declaration, &TransformRegistry::new()).unwrap();
        let chain: Vec<&str> = config.attribute("name").unwrap().transform_names().collect();
        assert_eq!(chain, vec!["strip", "case"]);
    }
}
