//! Key → identifier normalization.
//!
//! Every type name and member name in the generated document goes through
//! [`to_pascal_case`]; the serialization annotation uses [`serialization_key`].

/// Keep only `[A-Za-z0-9_]`.
pub fn remove_special_characters(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Integer-literal guard followed by special-character stripping.
///
/// `"123"` → `"_123"`, `"-5"` → `"_5"`, `"@type"` → `"type"`.
pub fn sanitize(raw: &str) -> String {
    if raw.trim().parse::<i32>().is_ok() {
        remove_special_characters(&format!("_{raw}"))
    } else {
        remove_special_characters(raw)
    }
}

/// Sanitize, then upper-case the first letter of every `_`-separated segment.
///
/// Underscores are dropped, except that an identifier which would start
/// with a digit keeps one leading underscore. Keys with no usable characters
/// collapse to `_`.
pub fn to_pascal_case(raw: &str) -> String {
    let sanitized = sanitize(raw);
    let mut out = String::with_capacity(sanitized.len());
    for segment in sanitized.split('_').filter(|s| !s.is_empty()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars);
        }
    }
    match out.chars().next() {
        None => "_".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{out}"),
        Some(_) => out,
    }
}

/// Key bound by the serialization annotation: the literal key without
/// special characters and without the integer guard.
pub fn serialization_key(raw: &str) -> String {
    remove_special_characters(raw)
}
