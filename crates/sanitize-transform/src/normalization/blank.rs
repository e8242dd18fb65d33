//! Blank-to-null normalization.

use sanitize_model::Value;

/// Replace blank values with [`Value::Null`].
///
/// `false` is blank but is kept as-is, so boolean columns never lose an
/// explicit `false`.
pub fn nullify_blank(value: Value) -> Value {
    match value {
        Value::Bool(false) => value,
        _ if value.is_blank() => Value::Null,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullify_maps_blank_text_to_null() {
        assert_eq!(nullify_blank(Value::from("    ")), Value::Null);
        assert_eq!(nullify_blank(Value::from("")), Value::Null);
        assert_eq!(nullify_blank(Value::from("John")), Value::from("John"));
        assert_eq!(nullify_blank(Value::Bool(false)), Value::Bool(false));
        assert_eq!(nullify_blank(Value::Int(0)), Value::Int(0));
    }
}
