//! Built-in transforms and their option handling.
//!
//! Options are checked and compiled once, when an attribute is configured.
//! Applying a compiled transform only fails when the value has a shape the
//! transform cannot handle, or when a `case` names an unknown conversion.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use sanitize_model::{TransformError, TransformOption, Value};

use crate::error::ConfigError;
use crate::normalization::{
    camelcase, capitalize, nullify_blank, pascalcase, remove_literal, remove_pattern,
    replace_pattern, round_float, round_integer, squish, strip, swapcase, titlecase,
    truncate_chars,
};
use crate::registry::CaseConverter;

/// The fixed set of built-in transform names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    Case,
    PatternReplace,
    Nullify,
    Remove,
    Round,
    Squish,
    Strip,
    Truncate,
}

impl BuiltinKind {
    pub const ALL: [BuiltinKind; 8] = [
        Self::Case,
        Self::PatternReplace,
        Self::Nullify,
        Self::Remove,
        Self::Round,
        Self::Squish,
        Self::Strip,
        Self::Truncate,
    ];

    /// Look up a built-in by name. Accepts the short names (`gsub`, `remove`)
    /// and the long spellings (`pattern_replace`, `remove-substring`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "case" => Some(Self::Case),
            "gsub" | "pattern_replace" | "pattern-replace" => Some(Self::PatternReplace),
            "nullify" => Some(Self::Nullify),
            "remove" | "remove_substring" | "remove-substring" => Some(Self::Remove),
            "round" => Some(Self::Round),
            "squish" => Some(Self::Squish),
            "strip" => Some(Self::Strip),
            "truncate" => Some(Self::Truncate),
            _ => None,
        }
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Case => "case",
            Self::PatternReplace => "gsub",
            Self::Nullify => "nullify",
            Self::Remove => "remove",
            Self::Round => "round",
            Self::Squish => "squish",
            Self::Strip => "strip",
            Self::Truncate => "truncate",
        }
    }

    fn expected_options(self) -> &'static str {
        match self {
            Self::Case => "a case name",
            Self::PatternReplace => "a pattern and replacement",
            Self::Nullify | Self::Squish | Self::Strip => "a boolean",
            Self::Remove => "a string or pattern",
            Self::Round => "an integer precision",
            Self::Truncate => "a non-negative integer length",
        }
    }
}

impl fmt::Display for BuiltinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case conversion selected by `case: "<name>"`.
#[derive(Clone)]
pub enum CaseStyle {
    Upcase,
    Downcase,
    Capitalize,
    Swapcase,
    Camelcase,
    Pascalcase,
    Titlecase,
    /// Any other identifier. Without a registered converter it fails when
    /// applied, not when configured.
    Custom {
        name: String,
        converter: Option<Arc<dyn CaseConverter>>,
    },
}

impl CaseStyle {
    /// Resolve a case name; `custom` is consulted for non-standard names.
    pub fn resolve(name: &str, custom: impl FnOnce(&str) -> Option<Arc<dyn CaseConverter>>) -> Self {
        match name {
            "upcase" => Self::Upcase,
            "downcase" => Self::Downcase,
            "capitalize" => Self::Capitalize,
            "swapcase" => Self::Swapcase,
            "camelcase" => Self::Camelcase,
            "pascalcase" => Self::Pascalcase,
            "titlecase" => Self::Titlecase,
            other => Self::Custom {
                name: other.to_string(),
                converter: custom(other),
            },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Upcase => "upcase",
            Self::Downcase => "downcase",
            Self::Capitalize => "capitalize",
            Self::Swapcase => "swapcase",
            Self::Camelcase => "camelcase",
            Self::Pascalcase => "pascalcase",
            Self::Titlecase => "titlecase",
            Self::Custom { name, .. } => name,
        }
    }

    /// Convert `value`.
    ///
    /// # Errors
    ///
    /// [`TransformError::UnsupportedCase`] for a custom name with no converter.
    pub fn convert(&self, value: &str) -> Result<String, TransformError> {
        Ok(match self {
            Self::Upcase => value.to_uppercase(),
            Self::Downcase => value.to_lowercase(),
            Self::Capitalize => capitalize(value),
            Self::Swapcase => swapcase(value),
            Self::Camelcase => camelcase(value),
            Self::Pascalcase => pascalcase(value),
            Self::Titlecase => titlecase(value),
            Self::Custom {
                converter: Some(converter),
                ..
            } => converter.convert(value),
            Self::Custom {
                name,
                converter: None,
            } => {
                return Err(TransformError::UnsupportedCase { case: name.clone() });
            }
        })
    }
}

impl fmt::Debug for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom { name, converter } => f
                .debug_struct("Custom")
                .field("name", name)
                .field("registered", &converter.is_some())
                .finish(),
            other => f.write_str(other.name()),
        }
    }
}

/// What `remove` takes out of the value.
#[derive(Debug, Clone)]
pub enum Removal {
    Literal(String),
    Pattern(Regex),
}

/// A built-in transform with its options compiled.
#[derive(Debug, Clone)]
pub enum BuiltinTransform {
    Case(CaseStyle),
    PatternReplace { pattern: Regex, replacement: String },
    Nullify(bool),
    Remove(Removal),
    Round(i32),
    Squish(bool),
    Strip(bool),
    Truncate(usize),
}

impl BuiltinTransform {
    /// Check `option` against what `kind` expects and compile it.
    ///
    /// `cases` looks up custom case conversions by name.
    pub fn compile(
        kind: BuiltinKind,
        option: &TransformOption,
        cases: impl FnOnce(&str) -> Option<Arc<dyn CaseConverter>>,
    ) -> Result<Self, ConfigError> {
        let invalid = || {
            ConfigError::invalid_options(kind.name(), kind.expected_options(), option.shape())
        };
        let compiled = match (kind, option) {
            (BuiltinKind::Case, TransformOption::Text(name)) => {
                Self::Case(CaseStyle::resolve(name, cases))
            }
            (
                BuiltinKind::PatternReplace,
                TransformOption::Replace {
                    pattern,
                    replacement,
                },
            ) => Self::PatternReplace {
                pattern: compile_pattern(kind, pattern)?,
                replacement: replacement.clone(),
            },
            (BuiltinKind::Nullify, TransformOption::Flag(enabled)) => Self::Nullify(*enabled),
            (BuiltinKind::Remove, TransformOption::Text(needle)) => {
                Self::Remove(Removal::Literal(needle.clone()))
            }
            (BuiltinKind::Remove, TransformOption::Pattern { pattern }) => {
                Self::Remove(Removal::Pattern(compile_pattern(kind, pattern)?))
            }
            (BuiltinKind::Round, TransformOption::Integer(digits)) => {
                Self::Round(i32::try_from(*digits).map_err(|_| invalid())?)
            }
            (BuiltinKind::Squish, TransformOption::Flag(enabled)) => Self::Squish(*enabled),
            (BuiltinKind::Strip, TransformOption::Flag(enabled)) => Self::Strip(*enabled),
            (BuiltinKind::Truncate, TransformOption::Integer(length)) => {
                Self::Truncate(usize::try_from(*length).map_err(|_| invalid())?)
            }
            _ => return Err(invalid()),
        };
        Ok(compiled)
    }

    pub fn kind(&self) -> BuiltinKind {
        match self {
            Self::Case(_) => BuiltinKind::Case,
            Self::PatternReplace { .. } => BuiltinKind::PatternReplace,
            Self::Nullify(_) => BuiltinKind::Nullify,
            Self::Remove(_) => BuiltinKind::Remove,
            Self::Round(_) => BuiltinKind::Round,
            Self::Squish(_) => BuiltinKind::Squish,
            Self::Strip(_) => BuiltinKind::Strip,
            Self::Truncate(_) => BuiltinKind::Truncate,
        }
    }

    /// Apply the transform to one value.
    ///
    /// Null passes through every transform except `truncate`, which works on
    /// the string form and so turns null into empty text. Disabled flags
    /// (`strip: false`, ...) leave any value untouched.
    pub fn apply(&self, value: Value) -> Result<Value, TransformError> {
        match self {
            Self::Case(style) => map_text(self.kind(), value, |text| style.convert(text)),
            Self::PatternReplace {
                pattern,
                replacement,
            } => map_text(self.kind(), value, |text| {
                Ok(replace_pattern(text, pattern, replacement))
            }),
            Self::Nullify(true) => Ok(nullify_blank(value)),
            Self::Remove(Removal::Literal(needle)) => {
                map_text(self.kind(), value, |text| Ok(remove_literal(text, needle)))
            }
            Self::Remove(Removal::Pattern(pattern)) => {
                map_text(self.kind(), value, |text| Ok(remove_pattern(text, pattern)))
            }
            Self::Round(digits) => match value {
                Value::Float(number) => Ok(Value::Float(round_float(number, *digits))),
                Value::Int(number) => Ok(Value::Int(round_integer(number, *digits))),
                Value::Null => Ok(Value::Null),
                other => Err(TransformError::unsupported(self.kind().name(), other.kind())),
            },
            Self::Squish(true) => map_text(self.kind(), value, |text| Ok(squish(text))),
            Self::Strip(true) => map_text(self.kind(), value, |text| Ok(strip(text).to_string())),
            Self::Truncate(length) => {
                let text = value.to_string();
                Ok(Value::Text(truncate_chars(&text, *length).to_string()))
            }
            Self::Nullify(false) | Self::Squish(false) | Self::Strip(false) => Ok(value),
        }
    }
}

fn compile_pattern(kind: BuiltinKind, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        transform: kind.name(),
        source,
    })
}

/// Apply `f` to text values; null passes through, anything else is rejected.
fn map_text<F>(kind: BuiltinKind, value: Value, f: F) -> Result<Value, TransformError>
where
    F: FnOnce(&str) -> Result<String, TransformError>,
{
    match value {
        Value::Text(text) => f(&text).map(Value::Text),
        Value::Null => Ok(Value::Null),
        other => Err(TransformError::unsupported(kind.name(), other.kind())),
    }
}
