//! Types shared between the sanitization pipeline and its host.
//!
//! - **value**: scalar attribute values
//! - **record**: attribute access on records, schema introspection
//! - **options**: per-transform options and ordered transform maps
//! - **error**: run-time transform errors

pub mod error;
pub mod options;
pub mod record;
pub mod value;

pub use error::TransformError;
pub use options::{TransformMap, TransformOption};
pub use record::{MapRecord, ModelSchema, Record, Schema};
pub use value::Value;
