//! Small helpers for tagged-element reading and writing.

/// Checks if an attribute is a namespace declaration (`xmlns` or `xmlns:*`).
///
/// Namespace declarations are not data and are never mapped to fields.
pub fn is_namespace_declaration(key: &str) -> bool {
    key == "xmlns" || key.starts_with("xmlns:")
}

/// Converts a Rust boolean to its string representation for XML.
pub fn bool_to_string(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

/// Returns `true` when text consists of XML whitespace only.
pub fn is_blank(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\n' | '\r' | '\t'))
}

/// Checks whether `name` can be written as an element name.
///
/// A name starts with a letter or `_` and continues with letters, digits,
/// `-`, `_`, `.` or `:`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}
