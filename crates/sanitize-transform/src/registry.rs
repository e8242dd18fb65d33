//! Transform registry: resolves transform names to built-in or custom transforms.
//!
//! Custom transforms are registered explicitly under a string key. Resolution
//! happens once, when a model is configured; the resolved transform is cached
//! in the model's configuration and never looked up again.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use sanitize_model::{TransformError, TransformOption, Value};

use crate::builtin::{BuiltinKind, BuiltinTransform};
use crate::config::TransformSpec;
use crate::error::ConfigError;

/// Transforms one attribute value.
///
/// Receives the record for context, the attribute name, and the output of the
/// previous step in the chain; returns the new value.
pub trait AttributeTransform<R: ?Sized>: Send + Sync {
    fn transform(&self, record: &R, attribute: &str, value: Value) -> Result<Value, TransformError>;
}

impl<R: ?Sized, F> AttributeTransform<R> for F
where
    F: Fn(&R, &str, Value) -> Result<Value, TransformError> + Send + Sync,
{
    fn transform(&self, record: &R, attribute: &str, value: Value) -> Result<Value, TransformError> {
        self(record, attribute, value)
    }
}

/// Mutates a whole record in place. Runs once per pipeline, after every
/// attribute chain.
pub trait RecordTransform<R: ?Sized>: Send + Sync {
    fn transform(&self, record: &mut R) -> Result<(), TransformError>;
}

impl<R: ?Sized, F> RecordTransform<R> for F
where
    F: Fn(&mut R) -> Result<(), TransformError> + Send + Sync,
{
    fn transform(&self, record: &mut R) -> Result<(), TransformError> {
        self(record)
    }
}

/// A named case conversion usable as `case: "<name>"`.
pub trait CaseConverter: Send + Sync {
    fn convert(&self, value: &str) -> String;
}

impl<F> CaseConverter for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn convert(&self, value: &str) -> String {
        self(value)
    }
}

/// Registry of custom transforms for records of type `R`.
///
/// Built-in transform names always win over registered ones.
pub struct TransformRegistry<R> {
    attribute: HashMap<String, Arc<dyn AttributeTransform<R>>>,
    record: HashMap<String, Arc<dyn RecordTransform<R>>>,
    cases: HashMap<String, Arc<dyn CaseConverter>>,
}

impl<R> Default for TransformRegistry<R> {
    fn default() -> Self {
        Self {
            attribute: HashMap::new(),
            record: HashMap::new(),
            cases: HashMap::new(),
        }
    }
}

impl<R> fmt::Debug for TransformRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut attribute: Vec<&str> = self.attribute.keys().map(String::as_str).collect();
        let mut record: Vec<&str> = self.record.keys().map(String::as_str).collect();
        let mut cases: Vec<&str> = self.cases.keys().map(String::as_str).collect();
        attribute.sort_unstable();
        record.sort_unstable();
        cases.sort_unstable();
        f.debug_struct("TransformRegistry")
            .field("attribute", &attribute)
            .field("record", &record)
            .field("cases", &cases)
            .finish()
    }
}

impl<R> TransformRegistry<R> {
    /// Create an empty registry. Built-in transforms need no registration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an attribute transform under `name`.
    pub fn register_attribute_transform(
        &mut self,
        name: impl Into<String>,
        transform: impl AttributeTransform<R> + 'static,
    ) -> &mut Self {
        self.attribute.insert(name.into(), Arc::new(transform));
        self
    }

    /// Register a whole-record transform under `name`.
    pub fn register_record_transform(
        &mut self,
        name: impl Into<String>,
        transform: impl RecordTransform<R> + 'static,
    ) -> &mut Self {
        self.record.insert(name.into(), Arc::new(transform));
        self
    }

    /// Register a case conversion usable as `case: "<name>"`.
    pub fn register_case(
        &mut self,
        name: impl Into<String>,
        converter: impl CaseConverter + 'static,
    ) -> &mut Self {
        self.cases.insert(name.into(), Arc::new(converter));
        self
    }

    #[must_use]
    pub fn with_attribute_transform(
        mut self,
        name: impl Into<String>,
        transform: impl AttributeTransform<R> + 'static,
    ) -> Self {
        self.register_attribute_transform(name, transform);
        self
    }

    #[must_use]
    pub fn with_record_transform(
        mut self,
        name: impl Into<String>,
        transform: impl RecordTransform<R> + 'static,
    ) -> Self {
        self.register_record_transform(name, transform);
        self
    }

    #[must_use]
    pub fn with_case(mut self, name: impl Into<String>, converter: impl CaseConverter + 'static) -> Self {
        self.register_case(name, converter);
        self
    }

    /// Whether `name` resolves to anything in an attribute chain.
    pub fn contains(&self, name: &str) -> bool {
        BuiltinKind::from_name(name).is_some() || self.attribute.contains_key(name)
    }

    /// Custom case conversion registered under `name`.
    pub fn case_converter(&self, name: &str) -> Option<Arc<dyn CaseConverter>> {
        self.cases.get(name).map(Arc::clone)
    }

    /// Resolve one `(name, options)` entry of an attribute declaration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidOptions`] / [`ConfigError::InvalidPattern`] for
    ///   a built-in given unusable options
    /// - [`ConfigError::MissingOperation`] when `name` is only registered as a
    ///   whole-record transform
    /// - [`ConfigError::UnknownTransform`] otherwise
    pub fn resolve(&self, name: &str, option: &TransformOption) -> Result<TransformSpec<R>, ConfigError> {
        if let Some(kind) = BuiltinKind::from_name(name) {
            let builtin = BuiltinTransform::compile(kind, option, |case| self.case_converter(case))?;
            return Ok(TransformSpec::Builtin(builtin));
        }
        if let Some(transform) = self.attribute.get(name) {
            return Ok(TransformSpec::Custom(Arc::clone(transform)));
        }
        if self.record.contains_key(name) {
            return Err(ConfigError::MissingOperation {
                name: name.to_string(),
                operation: "an attribute transform",
            });
        }
        Err(ConfigError::UnknownTransform {
            name: name.to_string(),
        })
    }

    /// Resolve a whole-record transform by name.
    pub fn resolve_record(&self, name: &str) -> Result<Arc<dyn RecordTransform<R>>, ConfigError> {
        if let Some(transform) = self.record.get(name) {
            return Ok(Arc::clone(transform));
        }
        if self.contains(name) {
            return Err(ConfigError::MissingOperation {
                name: name.to_string(),
                operation: "a record transform",
            });
        }
        Err(ConfigError::UnknownTransform {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanitize_model::MapRecord;

    fn registry() -> TransformRegistry<MapRecord> {
        TransformRegistry::new()
            .with_attribute_transform(
                "ssn",
                |_: &MapRecord, _: &str, value: Value| -> Result<Value, TransformError> {
                    Ok(value)
                },
            )
            .with_record_transform("person", |_: &mut MapRecord| -> Result<(), TransformError> {
                Ok(())
            })
    }

    #[test]
    fn builtins_resolve_without_registration() {
        let registry = registry();
        let spec = registry.resolve("strip", &TransformOption::Flag(true)).unwrap();
        assert!(matches!(spec, TransformSpec::Builtin(_)));
        assert!(registry.contains("gsub"));
        assert!(registry.contains("pattern-replace"));
    }

    #[test]
    fn custom_transforms_resolve_by_name() {
        let registry = registry();
        let spec = registry.resolve("ssn", &TransformOption::Flag(true)).unwrap();
        assert!(matches!(spec, TransformSpec::Custom(_)));
        assert!(registry.resolve_record("person").is_ok());
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = registry()
            .resolve("zip", &TransformOption::Flag(true))
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::UnknownTransform { ref name } if name == "zip"));
    }

    #[test]
    fn wrong_capability_is_rejected() {
        let registry = registry();
        let err = registry
            .resolve("person", &TransformOption::Flag(true))
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::MissingOperation { .. }));

        let err = registry.resolve_record("ssn").err().unwrap();
        assert!(matches!(err, ConfigError::MissingOperation { .. }));
    }
}
