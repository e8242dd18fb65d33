//! Per-attribute sanitization pipeline.
//!
//! A model declares, per attribute, an ordered chain of transforms. Before the
//! host validates a record, the pipeline folds each attribute's value through
//! its chain and writes the result back, then runs an optional whole-record
//! transform. Callbacks bracket the run.
//!
//! - **registry**: names to built-in or custom transforms
//! - **builtin**: the built-in transform family, compiled at configure time
//! - **normalization**: pure string/number helpers the built-ins use
//! - **config**: per-model configuration
//! - **pipeline**: the executor
//! - **declaration**: JSON model declarations
//!
//! # Example
//!
//! ```
//! use sanitize_model::{MapRecord, ModelSchema, TransformOption, Value};
//! use sanitize_transform::{ModelConfig, TransformRegistry};
//!
//! let registry = TransformRegistry::new();
//! let mut config = ModelConfig::new(ModelSchema::new("person").with_attribute("name"));
//! config
//!     .configure(
//!         &registry,
//!         "name",
//!         [
//!             ("strip", TransformOption::from(true)),
//!             ("case", TransformOption::from("upcase")),
//!         ],
//!     )
//!     .unwrap();
//!
//! let mut record = MapRecord::new().with("name", "  ann  ");
//! config.sanitize(&mut record).unwrap();
//! assert_eq!(record.get("name"), Some(&Value::from("ANN")));
//! ```

pub mod builtin;
pub mod config;
pub mod declaration;
pub mod error;
pub mod hooks;
pub mod normalization;
pub mod pipeline;
pub mod registry;

pub use builtin::{BuiltinKind, BuiltinTransform, CaseStyle};
pub use config::{AttributeConfig, ConfiguredTransform, ModelConfig, TransformSpec, WholeRecordTransform};
pub use declaration::{AttributeDeclaration, ModelDeclaration};
pub use error::{ConfigError, DeclarationError, PipelineError};
pub use hooks::{HookPhase, SanitizationHooks};
pub use pipeline::{
    AttributeOutcome, LifecycleEvent, PipelineStage, SanitizationReport, Sanitizable, run_sanitization,
};
pub use registry::{AttributeTransform, CaseConverter, RecordTransform, TransformRegistry};
