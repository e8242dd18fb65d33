//! Case conversions.
//!
//! Word boundaries follow the usual inflector rules: underscores separate
//! words, and a capital letter after a lowercase letter or digit starts a new
//! one (`JohnPatrick` -> `john_patrick`).

/// First character upper, the rest lower.
///
/// ```
/// use sanitize_transform::normalization::capitalize;
///
/// assert_eq!(capitalize("jOHN"), "John");
/// ```
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Swap upper and lower case on every character.
pub fn swapcase(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_uppercase() {
            out.extend(ch.to_lowercase());
        } else if ch.is_lowercase() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// `john_patrick` -> `johnPatrick`, `JohnPatrick` -> `johnPatrick`.
pub fn camelcase(value: &str) -> String {
    camelize(value, false)
}

/// `john_patrick` -> `JohnPatrick`.
pub fn pascalcase(value: &str) -> String {
    camelize(value, true)
}

fn camelize(value: &str, upper_first: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for (idx, segment) in value.split('_').enumerate() {
        if idx == 0 {
            let mut chars = segment.chars();
            if let Some(first) = chars.next() {
                if upper_first {
                    out.extend(first.to_uppercase());
                } else {
                    out.extend(first.to_lowercase());
                }
                out.push_str(chars.as_str());
            }
        } else {
            // Only the leading alphanumeric run is capitalized.
            let split = segment
                .find(|ch: char| !ch.is_ascii_alphanumeric())
                .unwrap_or(segment.len());
            let (word, rest) = segment.split_at(split);
            out.push_str(&capitalize(word));
            out.push_str(rest);
        }
    }
    out
}

/// `JohnPatrick` -> `john_patrick`, `first-name` -> `first_name`.
pub fn underscore(value: &str) -> String {
    if !value.chars().any(|ch| ch.is_ascii_uppercase() || ch == '-') {
        return value.to_string();
    }
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len() + 4);
    for (idx, &ch) in chars.iter().enumerate() {
        if ch.is_ascii_uppercase() && idx > 0 {
            let prev = chars[idx - 1];
            let next_is_lower = chars.get(idx + 1).is_some_and(char::is_ascii_lowercase);
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        if ch == '-' {
            out.push('_');
        } else {
            out.push(ch);
        }
    }
    out.to_lowercase()
}

/// `john_patrick` -> `John Patrick`, `JohnPatrick` -> `John Patrick`.
pub fn titlecase(value: &str) -> String {
    let human = humanize(&underscore(value));
    let chars: Vec<char> = human.chars().collect();
    let mut out = String::with_capacity(human.len());
    for (idx, &ch) in chars.iter().enumerate() {
        if ch.is_ascii_lowercase() && starts_title_word(&chars, idx) {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn humanize(value: &str) -> String {
    let trimmed = value.trim_start_matches('_');
    let trimmed = trimmed.strip_suffix("_id").unwrap_or(trimmed);
    let spaced = trimmed.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) if is_word_char(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(chars.as_str());
            out
        }
        _ => spaced,
    }
}

fn starts_title_word(chars: &[char], idx: usize) -> bool {
    let Some(&prev) = idx.checked_sub(1).and_then(|i| chars.get(i)) else {
        return true;
    };
    if is_word_char(prev) {
        return false;
    }
    // Keep contractions and possessives lowercase: "don't", "john's".
    let quote_like = matches!(prev, '\'' | '\u{2019}' | '`' | '(' | ')');
    let before_quote = idx
        .checked_sub(2)
        .and_then(|i| chars.get(i))
        .is_some_and(|&ch| is_word_char(ch));
    !(quote_like && before_quote)
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
