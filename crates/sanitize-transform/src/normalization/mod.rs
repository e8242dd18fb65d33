//! Value normalization functions behind the built-in transforms.
//!
//! - **case**: case conversions (upcase, camelcase, titlecase, ...)
//! - **text**: whitespace trimming, squishing, truncation
//! - **pattern**: regex replacement and substring removal
//! - **numeric**: rounding
//! - **blank**: nullifying blank values

pub mod blank;
pub mod case;
pub mod numeric;
pub mod pattern;
pub mod text;

pub use blank::nullify_blank;
pub use case::{camelcase, capitalize, pascalcase, swapcase, titlecase, underscore};
pub use numeric::{round_float, round_integer};
pub use pattern::{remove_literal, remove_pattern, replace_pattern};
pub use text::{squish, strip, truncate_chars};
