//! Inspection of scanned ticket QR payloads.
//!
//! Tickets encode either a JSON object, a URL, or an opaque reference. The
//! decoded rows are for display; the order lookup always uses the raw value.

use serde::Serialize;
use serde_json::Value;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QrKind {
    Json,
    Url,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QrRow {
    pub key: String,
    pub value: String,
}

impl QrRow {
    fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrDetails {
    pub kind: QrKind,
    pub raw: String,
    pub rows: Vec<QrRow>,
    /// Pretty-printed payload, present for [`QrKind::Json`] only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty_json: Option<String>,
}

impl QrDetails {
    /// The value to search orders by: the raw scan, trimmed. `None` when the
    /// scan is blank.
    #[must_use]
    pub fn lookup_reference(&self) -> Option<&str> {
        let trimmed = self.raw.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Classifies a scanned QR value and breaks it into display rows.
///
/// - a JSON object yields one row per top-level key; string values are
///   shown verbatim and everything else as compact JSON;
/// - an absolute URL yields `host`, `path`, and then each decoded query pair
///   in order;
/// - anything else yields a single `value` row.
#[must_use]
pub fn inspect_qr(raw: &str) -> QrDetails {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) {
        let rows = map
            .iter()
            .map(|(key, value)| match value {
                Value::String(text) => QrRow::new(key.as_str(), text.as_str()),
                other => QrRow::new(key.as_str(), other.to_string()),
            })
            .collect();
        let pretty_json = serde_json::to_string_pretty(&map).ok();
        return QrDetails {
            kind: QrKind::Json,
            raw: raw.to_string(),
            rows,
            pretty_json,
        };
    }

    if let Ok(url) = Url::parse(raw) {
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };
        let mut rows = vec![QrRow::new("host", host), QrRow::new("path", url.path())];
        rows.extend(
            url.query_pairs()
                .map(|(key, value)| QrRow::new(key.into_owned(), value.into_owned())),
        );
        return QrDetails {
            kind: QrKind::Url,
            raw: raw.to_string(),
            rows,
            pretty_json: None,
        };
    }

    QrDetails {
        kind: QrKind::Text,
        raw: raw.to_string(),
        rows: vec![QrRow::new("value", raw)],
        pretty_json: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(details: &QrDetails) -> Vec<(&str, &str)> {
        details
            .rows
            .iter()
            .map(|row| (row.key.as_str(), row.value.as_str()))
            .collect()
    }

    #[test]
    fn json_object_rows_follow_key_order() {
        let details = inspect_qr(r#"{"ticket": "T-100", "seats": 2, "meta": {"vip": true}}"#);
        assert_eq!(details.kind, QrKind::Json);
        assert_eq!(
            pairs(&details),
            vec![
                ("ticket", "T-100"),
                ("seats", "2"),
                ("meta", r#"{"vip":true}"#),
            ]
        );
        let pretty = details.pretty_json.expect("pretty json");
        assert!(pretty.contains("\n  \"ticket\": \"T-100\""));
    }

    #[test]
    fn url_rows_include_host_path_and_query() {
        let details = inspect_qr("https://tickets.example.com:8443/v/abc?order=ord_1&seat=A%2012");
        assert_eq!(details.kind, QrKind::Url);
        assert_eq!(
            pairs(&details),
            vec![
                ("host", "tickets.example.com:8443"),
                ("path", "/v/abc"),
                ("order", "ord_1"),
                ("seat", "A 12"),
            ]
        );
        assert!(details.pretty_json.is_none());
    }

    #[test]
    fn plain_reference_is_text() {
        let details = inspect_qr("ORD-2026-0042");
        assert_eq!(details.kind, QrKind::Text);
        assert_eq!(pairs(&details), vec![("value", "ORD-2026-0042")]);
    }

    #[test]
    fn json_scalar_is_text() {
        assert_eq!(inspect_qr("12345").kind, QrKind::Text);
        assert_eq!(inspect_qr("[1, 2]").kind, QrKind::Text);
    }

    #[test]
    fn lookup_reference_is_trimmed_raw_value() {
        assert_eq!(inspect_qr("  ORD-1 \n").lookup_reference(), Some("ORD-1"));
        assert_eq!(
            inspect_qr(r#"{"id": "x"}"#).lookup_reference(),
            Some(r#"{"id": "x"}"#)
        );
        assert_eq!(inspect_qr("   ").lookup_reference(), None);
    }

    #[test]
    fn serializes_kind_in_lowercase() {
        let json = serde_json::to_value(inspect_qr("ORD-1")).unwrap();
        assert_eq!(json["kind"], "text");
        assert!(json.get("prettyJson").is_none());
    }
}
