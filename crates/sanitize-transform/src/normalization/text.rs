//! Whitespace and length normalization.

/// Trim leading and trailing ASCII whitespace and NUL characters.
///
/// Interior whitespace is left alone.
pub fn strip(value: &str) -> &str {
    value.trim_matches(|ch: char| ch.is_ascii_whitespace() || ch == '\0' || ch == '\x0b')
}

/// Trim both ends and collapse every interior whitespace run to one space.
///
/// ```
/// use sanitize_transform::normalization::squish;
///
/// assert_eq!(squish("  John \t  John \n"), "John John");
/// ```
pub fn squish(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep at most `max_chars` characters. No omission marker is appended.
pub fn truncate_chars(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &value[..byte_idx],
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_only_touches_the_ends() {
        assert_eq!(strip("    John"), "John");
        assert_eq!(strip("John     "), "John");
        assert_eq!(strip("Jo    hn"), "Jo    hn");
        assert_eq!(strip("  a  b  "), "a  b");
        assert_eq!(strip("\0\t x \r\n"), "x");
    }

    #[test]
    fn squish_collapses_runs() {
        assert_eq!(squish("    John    John    "), "John John");
        assert_eq!(squish("  a   b  "), "a b");
        assert_eq!(squish("\u{a0}a\u{2003}b"), "a b");
        assert_eq!(squish("   "), "");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate_chars("Johnny", 4), "John");
        assert_eq!(truncate_chars("Jo", 4), "Jo");
        assert_eq!(truncate_chars("Zoë Ünal", 3), "Zoë");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
