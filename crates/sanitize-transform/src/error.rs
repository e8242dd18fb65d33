//! Error types for configuring and running sanitization pipelines.

use std::path::PathBuf;

use sanitize_model::TransformError;
use thiserror::Error;

use crate::hooks::HookPhase;
use crate::pipeline::PipelineStage;

/// Errors raised while declaring a model's sanitization configuration.
///
/// These are raised at declaration time; a model whose declaration fails is
/// not usable.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The attribute does not exist on the model.
    #[error("missing attribute: {attribute} on {model}")]
    MissingAttribute { model: String, attribute: String },

    /// `configure` was called with no transforms.
    #[error("no transforms given for {attribute}; supply at least one")]
    EmptyTransformSet { attribute: String },

    /// The name is neither a built-in transform nor a registered custom one.
    #[error("unknown transform: '{name}'")]
    UnknownTransform { name: String },

    /// The name is registered, but not with the operation this use requires.
    #[error("transform '{name}' does not provide {operation}")]
    MissingOperation {
        name: String,
        operation: &'static str,
    },

    /// A built-in transform was given options of the wrong shape.
    #[error("invalid options for {transform}: expected {expected}, got {actual}")]
    InvalidOptions {
        transform: &'static str,
        expected: &'static str,
        actual: String,
    },

    /// A pattern option failed to compile.
    #[error("invalid pattern for {transform}: {source}")]
    InvalidPattern {
        transform: &'static str,
        #[source]
        source: regex::Error,
    },
}

impl ConfigError {
    pub(crate) fn invalid_options(
        transform: &'static str,
        expected: &'static str,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidOptions {
            transform,
            expected,
            actual: actual.into(),
        }
    }
}

/// Errors that abort a pipeline run for one record.
///
/// Attributes sanitized before the failure keep their new values; there is no
/// rollback.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PipelineError {
    /// A before/after sanitization callback failed.
    #[error("{phase} callback #{index} failed: {source}")]
    Hook {
        phase: HookPhase,
        index: usize,
        #[source]
        source: TransformError,
    },

    /// A configured attribute is missing from the record.
    #[error("record has no attribute {attribute}")]
    MissingAttribute { attribute: String },

    /// One transform in an attribute chain failed.
    #[error("{transform} failed on {attribute}: {source}")]
    Attribute {
        attribute: String,
        transform: String,
        #[source]
        source: TransformError,
    },

    /// Writing the sanitized value back to the record failed.
    #[error("could not assign sanitized {attribute}: {source}")]
    Assign {
        attribute: String,
        #[source]
        source: TransformError,
    },

    /// The whole-record transform failed.
    #[error("record transform failed: {source}")]
    RecordTransform {
        #[source]
        source: TransformError,
    },
}

impl PipelineError {
    /// Stage the pipeline was in when it failed.
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::Hook {
                phase: HookPhase::BeforeSanitization,
                ..
            } => PipelineStage::RunningBefore,
            Self::Hook {
                phase: HookPhase::AfterSanitization,
                ..
            } => PipelineStage::RunningAfter,
            Self::MissingAttribute { .. } | Self::Attribute { .. } | Self::Assign { .. } => {
                PipelineStage::RunningAttributes
            }
            Self::RecordTransform { .. } => PipelineStage::RunningRecordTransform,
        }
    }
}

/// Errors raised while loading a JSON model declaration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeclarationError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse declaration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
