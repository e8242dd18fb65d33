//! Run-time error types raised while transforming attribute values.

use thiserror::Error;

/// Errors raised by a transform, a hook, or the record itself during a run.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TransformError {
    /// A `case` transform named an identifier with no known conversion.
    #[error("unsupported case: {case}")]
    UnsupportedCase { case: String },

    /// A transform received a value of a shape it cannot handle.
    #[error("{transform} does not support {kind} values")]
    UnsupportedValue {
        transform: String,
        kind: &'static str,
    },

    /// The record has no attribute with this name.
    #[error("missing attribute: {0}")]
    MissingAttribute(String),

    /// The record refused a write (read-only attribute, type mismatch, ...).
    #[error("cannot assign {attribute}: {message}")]
    Rejected { attribute: String, message: String },

    /// Failure reported by user-supplied code.
    #[error("{0}")]
    Message(String),
}

impl TransformError {
    pub fn unsupported(transform: impl Into<String>, kind: &'static str) -> Self {
        Self::UnsupportedValue {
            transform: transform.into(),
            kind,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}
