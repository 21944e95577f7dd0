//! Text helpers for GraphQL documents.

/// Characters that carry no meaning between GraphQL tokens in builder output.
const INSIGNIFICANT: [char; 4] = [' ', '\t', '\n', '\r'];

/// Removes every space, tab, carriage return and newline from `text`.
///
/// Builder output is newline-delimited without any indentation guarantee, so
/// golden comparisons are made on this compact form.
#[must_use]
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !INSIGNIFICANT.contains(c)).collect()
}

/// Compares two documents after stripping whitespace from both.
#[must_use]
pub fn whitespace_insensitive_eq(left: &str, right: &str) -> bool {
    let mut l = left.chars().filter(|c| !INSIGNIFICANT.contains(c));
    let mut r = right.chars().filter(|c| !INSIGNIFICANT.contains(c));
    loop {
        match (l.next(), r.next()) {
            (None, None) => return true,
            (Some(a), Some(b)) if a == b => {}
            _ => return false,
        }
    }
}

/// Returns true if `s` matches the GraphQL `Name` production
/// (`[_A-Za-z][_0-9A-Za-z]*`).
#[must_use]
pub fn is_name(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(b) if b == b'_' || b.is_ascii_alphabetic() => {}
        _ => return false,
    }
    bytes.all(|b| b == b'_' || b.is_ascii_alphanumeric())
}
