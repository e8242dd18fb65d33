//! Pipeline executor.
//!
//! Runs a model's configuration against one record:
//!
//! 1. before-sanitization callbacks
//! 2. every attribute chain, in declaration order
//! 3. the whole-record transform, if any
//! 4. after-sanitization callbacks
//!
//! The first failure aborts the run. Values written before the failure stay
//! written.

use std::fmt;

use sanitize_model::Record;
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, trace};

use crate::config::{AttributeConfig, ModelConfig};
use crate::error::PipelineError;
use crate::hooks::HookPhase;

/// Where a pipeline run is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Idle,
    RunningBefore,
    RunningAttributes,
    RunningRecordTransform,
    RunningAfter,
    Done,
}

impl PipelineStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::RunningBefore => "running_before",
            Self::RunningAttributes => "running_attributes",
            Self::RunningRecordTransform => "running_record_transform",
            Self::RunningAfter => "running_after",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host lifecycle events a model's pipeline can be bound to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// Before the host validates the record. Validation sees sanitized values.
    #[default]
    BeforeValidation,
    /// Before the host persists the record.
    BeforeSave,
}

impl LifecycleEvent {
    /// Declaration spelling of the event.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BeforeValidation => "before_validation",
            Self::BeforeSave => "before_save",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one attribute chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeOutcome {
    pub attribute: String,
    pub transforms_applied: usize,
    pub changed: bool,
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizationReport {
    pub model: String,
    /// True when the model has no sanitization configured and nothing ran.
    pub skipped: bool,
    pub attributes: Vec<AttributeOutcome>,
    pub record_transform_applied: bool,
    pub before_hooks: usize,
    pub after_hooks: usize,
}

impl SanitizationReport {
    fn skipped(model: &str) -> Self {
        Self {
            model: model.to_string(),
            skipped: true,
            ..Self::default()
        }
    }

    /// Number of attributes whose value changed.
    pub fn changed_count(&self) -> usize {
        self.attributes.iter().filter(|outcome| outcome.changed).count()
    }

    pub fn transforms_applied(&self) -> usize {
        self.attributes
            .iter()
            .map(|outcome| outcome.transforms_applied)
            .sum()
    }
}

/// Run `config`'s pipeline on `record`.
///
/// Models with nothing configured are skipped entirely; their callbacks do
/// not run either.
///
/// # Errors
///
/// Returns the first [`PipelineError`] raised by a callback, a transform, or
/// the record itself. Earlier writes are not undone.
pub fn run_sanitization<R: Record>(
    record: &mut R,
    config: &ModelConfig<R>,
) -> Result<SanitizationReport, PipelineError> {
    let model = config.model_name();
    if !config.is_configured() {
        trace!(
            model = %model,
            from = %PipelineStage::Idle,
            to = %PipelineStage::Done,
            "No sanitization configured"
        );
        return Ok(SanitizationReport::skipped(model));
    }

    let span = info_span!("sanitize", model = %model);
    let _guard = span.enter();

    let mut report = SanitizationReport {
        model: model.to_string(),
        ..SanitizationReport::default()
    };

    trace!(from = %PipelineStage::Idle, stage = %PipelineStage::RunningBefore);
    report.before_hooks = config.hooks().run(HookPhase::BeforeSanitization, record)?;

    trace!(stage = %PipelineStage::RunningAttributes);
    for attribute in config.attributes() {
        let outcome = sanitize_attribute(record, attribute)?;
        report.attributes.push(outcome);
    }

    if let Some(whole) = config.record_transform() {
        trace!(stage = %PipelineStage::RunningRecordTransform, transform = %whole.name);
        whole
            .transform
            .transform(record)
            .map_err(|source| PipelineError::RecordTransform { source })?;
        report.record_transform_applied = true;
    }

    trace!(stage = %PipelineStage::RunningAfter);
    report.after_hooks = config.hooks().run(HookPhase::AfterSanitization, record)?;

    debug!(
        stage = %PipelineStage::Done,
        attributes = report.attributes.len(),
        changed = report.changed_count(),
        "Sanitized record"
    );
    Ok(report)
}

/// Fold one attribute's value through its chain and write the result back.
///
/// The value is written even when no step changed it.
fn sanitize_attribute<R: Record>(
    record: &mut R,
    config: &AttributeConfig<R>,
) -> Result<AttributeOutcome, PipelineError> {
    let attribute = config.attribute();
    let original = record
        .get_attribute(attribute)
        .ok_or_else(|| PipelineError::MissingAttribute {
            attribute: attribute.to_string(),
        })?;

    let mut value = original.clone();
    for step in config.transforms() {
        value = step
            .spec
            .apply(record, attribute, value)
            .map_err(|source| PipelineError::Attribute {
                attribute: attribute.to_string(),
                transform: step.name.clone(),
                source,
            })?;
    }

    let changed = value != original;
    record
        .set_attribute(attribute, value)
        .map_err(|source| PipelineError::Assign {
            attribute: attribute.to_string(),
            source,
        })?;
    trace!(attribute = %attribute, transforms = config.len(), changed, "Sanitized attribute");

    Ok(AttributeOutcome {
        attribute: attribute.to_string(),
        transforms_applied: config.len(),
        changed,
    })
}

/// A record type whose sanitization configuration lives with the type.
///
/// Implementors usually keep the configuration in a `static LazyLock`, so it
/// is built once, the first time any record of the type is sanitized.
pub trait Sanitizable: Record + Sized + 'static {
    fn sanitization_config() -> &'static ModelConfig<Self>;

    /// Run the pipeline on this record.
    fn sanitize(&mut self) -> Result<SanitizationReport, PipelineError> {
        run_sanitization(self, Self::sanitization_config())
    }

    /// Forward a host lifecycle event; sanitizes only on the bound event.
    fn on_lifecycle_event(
        &mut self,
        event: LifecycleEvent,
    ) -> Result<Option<SanitizationReport>, PipelineError> {
        Self::sanitization_config().handle_event(event, self)
    }
}
