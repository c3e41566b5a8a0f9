//! Ordered-fallback field pickers over untyped JSON objects.
//!
//! Every picker is total. A missing key, a value of the wrong type, or a
//! blank string all read as "absent" and the next candidate is tried.

use serde_json::{Map, Value};

/// An untyped JSON object as delivered by the upstream.
pub type Record = Map<String, Value>;

/// Returns the value of the first key in `keys` holding a non-blank string.
///
/// The string is returned untrimmed; blankness is only used to skip it.
#[must_use]
pub fn pick_string<'a>(record: &'a Record, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| record.get(*key).and_then(non_blank_str))
}

/// Returns the first key in `keys` holding a finite number, or a string that
/// parses to one.
#[must_use]
pub fn pick_number(record: &Record, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|key| record.get(*key).and_then(value_as_number))
}

/// Like [`pick_string`], but each candidate is a key path walked through
/// nested objects.
#[must_use]
pub fn pick_string_from_nested<'a>(record: &'a Record, paths: &[&[&str]]) -> Option<&'a str> {
    paths
        .iter()
        .find_map(|path| walk_path(record, path).and_then(non_blank_str))
}

/// Like [`pick_number`], but each candidate is a key path walked through
/// nested objects.
#[must_use]
pub fn pick_number_from_nested(record: &Record, paths: &[&[&str]]) -> Option<f64> {
    paths
        .iter()
        .find_map(|path| walk_path(record, path).and_then(value_as_number))
}

/// Follows `path` from `record`. Aborts as soon as an intermediate value is
/// not an object.
#[must_use]
pub fn walk_path<'a>(record: &'a Record, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut current = record.get(*first)?;
    for key in rest {
        current = current.as_object()?.get(*key)?;
    }
    Some(current)
}

/// Reads `key` from `record` as a nested object.
#[must_use]
pub fn child_record<'a>(record: &'a Record, key: &str) -> Option<&'a Record> {
    record.get(key).and_then(Value::as_object)
}

pub(crate) fn non_blank_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}

pub(crate) fn value_as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_number_str(s),
        _ => None,
    }
}

/// Parses a numeric string, ignoring surrounding whitespace. Blank,
/// non-numeric, and non-finite (`"inf"`, `"NaN"`) strings yield `None`.
pub(crate) fn parse_number_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
