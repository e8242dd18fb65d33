//! Regex replacement and substring removal.

use regex::Regex;

/// Replace every match of `pattern` with `replacement`.
///
/// `$1` and `${name}` in the replacement expand to capture groups.
pub fn replace_pattern(value: &str, pattern: &Regex, replacement: &str) -> String {
    pattern.replace_all(value, replacement).into_owned()
}

/// Remove every occurrence of `needle`.
pub fn remove_literal(value: &str, needle: &str) -> String {
    if needle.is_empty() {
        return value.to_string();
    }
    value.replace(needle, "")
}

/// Remove every match of `pattern`.
pub fn remove_pattern(value: &str, pattern: &Regex) -> String {
    pattern.replace_all(value, regex::NoExpand("")).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_non_digits() {
        let pattern = Regex::new("[^0-9]").unwrap();
        assert_eq!(
            replace_pattern("+1 (801) 111-3333", &pattern, ""),
            "18011113333"
        );
    }

    #[test]
    fn replace_expands_groups() {
        let pattern = Regex::new(r"(\d{3})(\d{4})").unwrap();
        assert_eq!(replace_pattern("5551234", &pattern, "$1-$2"), "555-1234");
    }

    #[test]
    fn remove_literal_and_pattern() {
        assert_eq!(remove_literal("55555-4444-", "-"), "555554444");
        assert_eq!(remove_literal("abc", ""), "abc");
        let pattern = Regex::new(r"\s+").unwrap();
        assert_eq!(remove_pattern("a b\tc", &pattern), "abc");
    }
}
