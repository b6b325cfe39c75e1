//! Label normalization for section names and sequence entries.
//!
//! Section labels arrive as free text ("Verse 2", "verse2", "VERSE  ii",
//! "Chorus"). Everything that compares labels goes through [`normalize`],
//! and everything that needs to tell repeated sections apart goes through
//! [`split_base_and_ordinal`].
//!
//! # Examples
//!
//! ```
//! use cuebuild::label::{normalize, split_base_and_ordinal};
//!
//! assert_eq!(normalize("  Verse   One "), "verse one");
//! assert_eq!(split_base_and_ordinal("Verse 2"), ("verse".to_string(), Some("2".to_string())));
//! assert_eq!(split_base_and_ordinal("Verse iv"), ("verse".to_string(), Some("4".to_string())));
//! assert_eq!(split_base_and_ordinal("Chorus"), ("chorus".to_string(), None));
//! ```

use serde_json::Value;

/// Roman numerals accepted as ordinals, indexed by value - 1.
const ROMAN_NUMERALS: [&str; 20] = [
    "i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x", "xi", "xii", "xiii", "xiv", "xv",
    "xvi", "xvii", "xviii", "xix", "xx",
];

/// Lowercase, collapse internal whitespace, and trim.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonicalize an ordinal token.
///
/// Accepts plain digits (leading zeros dropped), roman numerals `i` through
/// `xx`, and a digit run followed by one letter (`2a`). Anything else is
/// not an ordinal.
pub fn normalize_ordinal(text: &str) -> Option<String> {
    let token = text.trim().to_lowercase();
    if token.is_empty() {
        return None;
    }

    if token.bytes().all(|b| b.is_ascii_digit()) {
        return Some(canonical_digits(&token));
    }

    if let Some(value) = roman_value(&token) {
        return Some(value.to_string());
    }

    let mut chars = token.chars();
    let suffix = chars.next_back()?;
    let digits = chars.as_str();
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) && suffix.is_ascii_lowercase()
    {
        return Some(format!("{}{}", canonical_digits(digits), suffix));
    }

    None
}

/// Ordinal from a loosely-typed JSON value (the `number` field of a
/// sequence entry).
///
/// Booleans, nulls, containers, and non-finite floats yield `None`. Finite
/// floats are truncated toward zero.
pub fn ordinal_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Some(int.to_string())
            } else if let Some(uint) = number.as_u64() {
                Some(uint.to_string())
            } else {
                let float = number.as_f64()?;
                float.is_finite().then(|| (float.trunc() as i64).to_string())
            }
        }
        Value::String(text) => normalize_ordinal(text),
        _ => None,
    }
}

/// Split a label into its base phrase and trailing ordinal.
///
/// A spaced trailing ordinal (`"Verse 2"`) is tried first, then an unspaced
/// join (`"verse2"`). The base is always normalized. Labels without an
/// ordinal come back whole with `None`.
pub fn split_base_and_ordinal(text: &str) -> (String, Option<String>) {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return (String::new(), None);
    }

    if let Some((head, last)) = normalized.rsplit_once(' ')
        && let Some(ordinal) = normalize_ordinal(last)
    {
        let base = head.trim();
        if !base.is_empty() {
            return (base.to_string(), Some(ordinal));
        }
    }

    if let Some((base, ordinal)) = split_unspaced_suffix(&normalized) {
        return (base, Some(ordinal));
    }

    (normalized, None)
}

/// Strip a digit-run suffix (with an optional trailing letter) from an
/// unspaced join such as `verse2` or `chorus12b`.
///
/// Roman numerals are only recognized as separate tokens; glued to a word
/// they are indistinguishable from ordinary letters ("mix", "music").
fn split_unspaced_suffix(normalized: &str) -> Option<(String, String)> {
    let bytes = normalized.as_bytes();
    let mut end = bytes.len();
    if bytes.last().is_some_and(u8::is_ascii_lowercase) {
        end -= 1;
    }
    let start = bytes[..end]
        .iter()
        .rposition(|b| !b.is_ascii_digit())
        .map_or(0, |pos| pos + 1);
    if start == end || start == 0 {
        return None;
    }

    let base = normalize(&normalized[..start]);
    if base.is_empty() {
        return None;
    }
    let ordinal = normalize_ordinal(&normalized[start..])?;
    Some((base, ordinal))
}

fn roman_value(token: &str) -> Option<usize> {
    ROMAN_NUMERALS
        .iter()
        .position(|numeral| *numeral == token)
        .map(|index| index + 1)
}

fn canonical_digits(digits: &str) -> String {
    match digits.parse::<u64>() {
        Ok(value) => value.to_string(),
        Err(_) => digits.to_string(),
    }
}
