//! Per-model sanitization configuration.
//!
//! A [`ModelConfig`] is built once per model type, usually when the type is
//! first used, and then shared read-only by every record of that type.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use sanitize_model::{Record, Schema, TransformError, TransformOption, Value};
use tracing::{debug, warn};

use crate::builtin::BuiltinTransform;
use crate::error::{ConfigError, PipelineError};
use crate::hooks::{HookPhase, SanitizationHooks};
use crate::pipeline::{LifecycleEvent, SanitizationReport, run_sanitization};
use crate::registry::{AttributeTransform, RecordTransform, TransformRegistry};

/// A resolved transform: built-in with compiled options, or a custom one.
pub enum TransformSpec<R> {
    Builtin(BuiltinTransform),
    Custom(Arc<dyn AttributeTransform<R>>),
}

impl<R> TransformSpec<R> {
    /// Apply to the value of `attribute` on `record`.
    pub fn apply(&self, record: &R, attribute: &str, value: Value) -> Result<Value, TransformError> {
        match self {
            Self::Builtin(builtin) => builtin.apply(value),
            Self::Custom(transform) => transform.transform(record, attribute, value),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }
}

impl<R> Clone for TransformSpec<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Builtin(builtin) => Self::Builtin(builtin.clone()),
            Self::Custom(transform) => Self::Custom(Arc::clone(transform)),
        }
    }
}

impl<R> fmt::Debug for TransformSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(builtin) => f.debug_tuple("Builtin").field(builtin).finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// One step of an attribute chain: the declared name and what it resolved to.
pub struct ConfiguredTransform<R> {
    pub name: String,
    pub spec: TransformSpec<R>,
}

impl<R> Clone for ConfiguredTransform<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            spec: self.spec.clone(),
        }
    }
}

impl<R> fmt::Debug for ConfiguredTransform<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguredTransform")
            .field("name", &self.name)
            .field("spec", &self.spec)
            .finish()
    }
}

/// The ordered transform chain for one attribute.
pub struct AttributeConfig<R> {
    attribute: String,
    chain: Vec<ConfiguredTransform<R>>,
}

impl<R> AttributeConfig<R> {
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Transforms in the order they run.
    pub fn transforms(&self) -> &[ConfiguredTransform<R>] {
        &self.chain
    }

    pub fn transform_names(&self) -> impl Iterator<Item = &str> {
        self.chain.iter().map(|step| step.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

impl<R> Clone for AttributeConfig<R> {
    fn clone(&self) -> Self {
        Self {
            attribute: self.attribute.clone(),
            chain: self.chain.clone(),
        }
    }
}

impl<R> fmt::Debug for AttributeConfig<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeConfig")
            .field("attribute", &self.attribute)
            .field("chain", &self.chain)
            .finish()
    }
}

/// The single whole-record transform of a model.
pub struct WholeRecordTransform<R> {
    pub name: String,
    pub transform: Arc<dyn RecordTransform<R>>,
}

impl<R> Clone for WholeRecordTransform<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            transform: Arc::clone(&self.transform),
        }
    }
}

/// Sanitization configuration for one model type.
///
/// Holds the attribute chains in declaration order, at most one whole-record
/// transform, and the before/after callbacks. Configuration calls append:
/// configuring the same attribute twice extends its chain, and a repeated
/// transform name runs twice.
pub struct ModelConfig<R> {
    schema: Box<dyn Schema + Send + Sync>,
    trigger: LifecycleEvent,
    attributes: Vec<AttributeConfig<R>>,
    record_transform: Option<WholeRecordTransform<R>>,
    hooks: SanitizationHooks<R>,
}

impl<R> fmt::Debug for ModelConfig<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("model", &self.schema.model_name())
            .field("trigger", &self.trigger)
            .field("attributes", &self.attributes)
            .field(
                "record_transform",
                &self.record_transform.as_ref().map(|whole| &whole.name),
            )
            .field("hooks", &self.hooks)
            .finish()
    }
}

impl<R> ModelConfig<R> {
    /// Create an empty configuration for the model described by `schema`.
    pub fn new(schema: impl Schema + Send + Sync + 'static) -> Self {
        Self {
            schema: Box::new(schema),
            trigger: LifecycleEvent::default(),
            attributes: Vec::new(),
            record_transform: None,
            hooks: SanitizationHooks::default(),
        }
    }

    /// Bind the pipeline to a different lifecycle event.
    #[must_use]
    pub fn with_trigger(mut self, trigger: LifecycleEvent) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn model_name(&self) -> &str {
        self.schema.model_name()
    }

    pub fn schema(&self) -> &dyn Schema {
        self.schema.as_ref()
    }

    pub fn is_provisioned(&self) -> bool {
        self.schema.is_provisioned()
    }

    pub fn trigger(&self) -> LifecycleEvent {
        self.trigger
    }

    /// Append transforms to `attribute`'s chain.
    ///
    /// Every entry is resolved through `registry` now; the resolved transforms
    /// are stored, so runs never look names up again. Nothing is stored if any
    /// entry fails to resolve.
    ///
    /// When the model's storage is not provisioned yet the call does nothing
    /// and succeeds.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingAttribute`] if the model has no such attribute
    /// - [`ConfigError::EmptyTransformSet`] if `transforms` is empty
    /// - any resolution error from [`TransformRegistry::resolve`]
    pub fn configure<I, K, V>(
        &mut self,
        registry: &TransformRegistry<R>,
        attribute: &str,
        transforms: I,
    ) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<TransformOption>,
    {
        if !self.schema.is_provisioned() {
            warn!(
                model = %self.model_name(),
                attribute = %attribute,
                "Storage not provisioned, skipping sanitization config"
            );
            return Ok(());
        }
        if !self.schema.has_attribute(attribute) {
            return Err(ConfigError::MissingAttribute {
                model: self.model_name().to_string(),
                attribute: attribute.to_string(),
            });
        }

        let mut resolved = Vec::new();
        for (name, option) in transforms {
            let name = name.into();
            let spec = registry.resolve(&name, &option.into())?;
            resolved.push(ConfiguredTransform { name, spec });
        }
        if resolved.is_empty() {
            return Err(ConfigError::EmptyTransformSet {
                attribute: attribute.to_string(),
            });
        }

        debug!(
            model = %self.model_name(),
            attribute = %attribute,
            transforms = resolved.len(),
            "Configured attribute sanitization"
        );

        match self
            .attributes
            .iter_mut()
            .find(|config| config.attribute == attribute)
        {
            Some(config) => config.chain.extend(resolved),
            None => self.attributes.push(AttributeConfig {
                attribute: attribute.to_string(),
                chain: resolved,
            }),
        }
        Ok(())
    }

    /// Set the whole-record transform, replacing any previous one.
    ///
    /// Skipped when the model's storage is not provisioned.
    pub fn configure_whole_record<T>(&mut self, transform: T)
    where
        T: RecordTransform<R> + 'static,
    {
        self.set_record_transform(type_name::<T>().to_string(), Arc::new(transform));
    }

    /// Set the whole-record transform registered under `name`.
    pub fn configure_whole_record_named(
        &mut self,
        registry: &TransformRegistry<R>,
        name: &str,
    ) -> Result<(), ConfigError> {
        if !self.schema.is_provisioned() {
            warn!(
                model = %self.model_name(),
                transform = %name,
                "Storage not provisioned, skipping record transform"
            );
            return Ok(());
        }
        let transform = registry.resolve_record(name)?;
        self.set_record_transform(name.to_string(), transform);
        Ok(())
    }

    fn set_record_transform(&mut self, name: String, transform: Arc<dyn RecordTransform<R>>) {
        if !self.schema.is_provisioned() {
            warn!(
                model = %self.model_name(),
                transform = %name,
                "Storage not provisioned, skipping record transform"
            );
            return;
        }
        if let Some(previous) = &self.record_transform {
            debug!(
                model = %self.model_name(),
                previous = %previous.name,
                "Replacing record transform"
            );
        }
        self.record_transform = Some(WholeRecordTransform { name, transform });
    }

    /// Register a callback that runs before any transform.
    pub fn before_sanitization<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut R) -> Result<(), TransformError> + Send + Sync + 'static,
    {
        self.hooks.register(HookPhase::BeforeSanitization, hook);
        self
    }

    /// Register a callback that runs after every transform.
    pub fn after_sanitization<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut R) -> Result<(), TransformError> + Send + Sync + 'static,
    {
        self.hooks.register(HookPhase::AfterSanitization, hook);
        self
    }

    pub fn hooks(&self) -> &SanitizationHooks<R> {
        &self.hooks
    }

    /// Attribute chains in declaration order.
    pub fn attributes(&self) -> &[AttributeConfig<R>] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeConfig<R>> {
        self.attributes.iter().find(|config| config.attribute == name)
    }

    pub fn record_transform(&self) -> Option<&WholeRecordTransform<R>> {
        self.record_transform.as_ref()
    }

    /// True once any attribute chain or a whole-record transform is set.
    ///
    /// Unconfigured models skip the pipeline entirely, callbacks included.
    pub fn is_configured(&self) -> bool {
        !self.attributes.is_empty() || self.record_transform.is_some()
    }
}

impl<R: Record> ModelConfig<R> {
    /// Run the pipeline on `record`.
    pub fn sanitize(&self, record: &mut R) -> Result<SanitizationReport, PipelineError> {
        run_sanitization(record, self)
    }

    /// Host lifecycle entry point: runs the pipeline when `event` is the one
    /// this model is bound to, and returns `None` otherwise.
    pub fn handle_event(
        &self,
        event: LifecycleEvent,
        record: &mut R,
    ) -> Result<Option<SanitizationReport>, PipelineError> {
        if event != self.trigger {
            return Ok(None);
        }
        self.sanitize(record).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanitize_model::{MapRecord, ModelSchema};

    fn person_schema() -> ModelSchema {
        ModelSchema::new("person").with_attributes(["first_name", "last_name", "ssn"])
    }

    #[test]
    fn configure_appends_in_declaration_order() {
        let registry = TransformRegistry::<MapRecord>::new();
        let mut config = ModelConfig::new(person_schema());
        config
            .configure(&registry, "last_name", [("case", TransformOption::from("upcase"))])
            .unwrap();
        config
            .configure(&registry, "first_name", [("strip", true)])
            .unwrap();
        config
            .configure(&registry, "last_name", [("truncate", 6i64)])
            .unwrap();

        let names: Vec<&str> = config.attributes().iter().map(AttributeConfig::attribute).collect();
        assert_eq!(names, vec!["last_name", "first_name"]);
        let chain: Vec<&str> = config.attribute("last_name").unwrap().transform_names().collect();
        assert_eq!(chain, vec!["case", "truncate"]);
    }

    #[test]
    fn failed_entry_leaves_chain_untouched() {
        let registry = TransformRegistry::<MapRecord>::new();
        let mut config = ModelConfig::new(person_schema());
        let err = config
            .configure(
                &registry,
                "first_name",
                [
                    ("strip", TransformOption::Flag(true)),
                    ("bogus", TransformOption::Flag(true)),
                ],
            )
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTransform { .. }));
        assert!(!config.is_configured());
    }

    #[test]
    fn unprovisioned_model_skips_configuration() {
        let registry = TransformRegistry::<MapRecord>::new();
        let mut config = ModelConfig::new(person_schema().provisioned(false));
        config
            .configure(&registry, "not_a_column", [("bogus", true)])
            .unwrap();
        config.configure_whole_record(|_: &mut MapRecord| -> Result<(), TransformError> { Ok(()) });
        assert!(!config.is_configured());
    }

    #[test]
    fn whole_record_transform_is_replaced() {
        let registry = TransformRegistry::<MapRecord>::new()
            .with_record_transform("person", |_: &mut MapRecord| -> Result<(), TransformError> {
                Ok(())
            });
        let mut config = ModelConfig::new(person_schema());
        config.configure_whole_record(|_: &mut MapRecord| -> Result<(), TransformError> { Ok(()) });
        config.configure_whole_record_named(&registry, "person").unwrap();
        assert_eq!(config.record_transform().unwrap().name, "person");
        assert!(config.is_configured());
    }
}
