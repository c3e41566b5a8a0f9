//! Heuristic date coercion for upstream timestamp fields.
//!
//! Upstream order payloads carry purchase dates in three shapes:
//!
//! - a plain string (`"2026-02-20T15:42:10Z"`, `"2026-02-19"`), returned
//!   verbatim when it parses as a date;
//! - a composite object (`{"day": "2026-02-19", "hour": "10:30"}`), combined
//!   into a single UTC timestamp;
//! - an epoch number, in seconds below `1e12` and in milliseconds above.
//!
//! Coerced values are emitted as ISO-8601 with millisecond precision and a
//! `Z` suffix (`"2026-02-19T10:30:00.000Z"`).

use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use guestdesk_core::parse_date_time;
use regex::Regex;
use serde_json::Value;

use crate::resolve::{pick_string, walk_path, Record};

/// Epoch values below this magnitude are seconds, at or above it milliseconds.
const EPOCH_MILLIS_THRESHOLD: f64 = 1_000_000_000_000.0;

/// Largest representable timestamp magnitude, in milliseconds (±100,000,000 days).
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

const DAY_KEYS: &[&str] = &["day", "date"];
const HOUR_KEYS: &[&str] = &["hour", "time"];
const DEFAULT_HOUR: &str = "00:00:00";

static HOUR_MINUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("valid regex"));

/// Coerces an upstream date value into an ISO-8601 string.
///
/// Returns `None` for anything that does not resolve to a real date; a failed
/// coercion is never an error.
#[must_use]
pub fn coerce_date(value: &Value) -> Option<String> {
    match value {
        Value::Object(parts) => coerce_day_and_hour(parts),
        Value::String(text) => parse_date_time(text).map(|_| text.clone()),
        Value::Number(n) => n.as_f64().and_then(coerce_epoch),
        _ => None,
    }
}

/// Returns the first key in `keys` whose value coerces to a date.
#[must_use]
pub fn pick_date(record: &Record, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| record.get(*key).and_then(coerce_date))
}

/// Like [`pick_date`], but each candidate is a nested key path.
#[must_use]
pub fn pick_date_from_nested(record: &Record, paths: &[&[&str]]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| walk_path(record, path).and_then(coerce_date))
}

fn coerce_day_and_hour(parts: &Record) -> Option<String> {
    let day = pick_string(parts, DAY_KEYS)?;
    let hour = pick_string(parts, HOUR_KEYS).unwrap_or(DEFAULT_HOUR);

    // `HH:MM` gains seconds so the combined value is a full timestamp.
    let hour = if HOUR_MINUTE_RE.is_match(hour) {
        format!("{hour}:00")
    } else {
        hour.to_string()
    };

    parse_date_time(&format!("{day}T{hour}"))
        .or_else(|| parse_date_time(day))
        .map(to_iso)
}

#[allow(clippy::cast_possible_truncation)]
fn coerce_epoch(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let millis = if value < EPOCH_MILLIS_THRESHOLD {
        value * 1000.0
    } else {
        value
    };
    if millis.abs() > MAX_EPOCH_MILLIS {
        return None;
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64).map(to_iso)
}

fn to_iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
