//! Lenient coercion of loosely-typed payload values.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// RGBA color with components in `0.0..=1.0`.
pub type Rgba = [f32; 4];

pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];

/// Parse a color given either as `[r, g, b, a]` or as
/// `{"red": .., "green": .., "blue": .., "alpha": ..}`.
///
/// Object components that are missing take the matching component of
/// `default`; anything malformed returns `default` whole.
pub fn parse_color(value: Option<&Value>, default: Rgba) -> Rgba {
    match value {
        Some(Value::Array(items)) if items.len() == 4 => {
            let mut color = [0.0; 4];
            for (slot, item) in color.iter_mut().zip(items) {
                match number(item) {
                    Some(component) => *slot = component as f32,
                    None => return default,
                }
            }
            color
        }
        Some(Value::Object(map)) => {
            let mut color = default;
            for (slot, key) in color.iter_mut().zip(["red", "green", "blue", "alpha"]) {
                match map.get(key) {
                    None => {}
                    Some(item) => match number(item) {
                        Some(component) => *slot = component as f32,
                        None => return default,
                    },
                }
            }
            color
        }
        _ => default,
    }
}

/// A strictly positive, finite duration in seconds from a number or a
/// numeric string.
pub fn positive_seconds(value: Option<&Value>) -> Option<f64> {
    let seconds = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (seconds.is_finite() && seconds > 0.0).then_some(seconds)
}

/// Trimmed, non-empty text.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

/// Deserialize a list of records, skipping entries that are not JSON
/// objects. `null` reads as empty; a non-list is still an error.
pub fn objects<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    keep_objects(items).map_err(D::Error::custom)
}

/// [`objects`] for an optional list, where `null` stays absent.
pub fn optional_objects<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Option::<Vec<Value>>::deserialize(deserializer)?
        .map(keep_objects)
        .transpose()
        .map_err(D::Error::custom)
}

/// Deserialize a list of text lines. Numbers and booleans are written out
/// as text; `null` and nested values are dropped.
pub fn text_lines<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.iter().filter_map(line_text).collect())
}

/// Deserialize a list of slides, each a list of lines as in
/// [`text_lines`]. Entries that are not lists are skipped.
pub fn text_slides<'de, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items
        .iter()
        .filter_map(|slide| match slide {
            Value::Array(lines) => Some(lines.iter().filter_map(line_text).collect()),
            _ => None,
        })
        .collect())
}

/// Deserialize a number given as a JSON number or a numeric string.
/// Anything else reads as absent.
pub fn loose_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(number))
}

fn keep_objects<T: DeserializeOwned>(items: Vec<Value>) -> serde_json::Result<Vec<T>> {
    items
        .into_iter()
        .filter(Value::is_object)
        .map(serde_json::from_value)
        .collect()
}

fn line_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Numbers and numeric strings, as `f64`.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
