//! Decoding of a raw orders response body, as a fetching caller would hand
//! it over: the body bytes as text plus the response's content type.

use guestdesk_core::CanonicalOrder;
use serde_json::Value;

use crate::error::OrdersError;
use crate::parse::{parse_orders_response_with, NormalizeOptions};

const JSON_CONTENT_TYPE: &str = "application/json";
const HTML_MARKERS: &[&str] = &["<html", "<!doctype html"];

/// Decodes and normalizes an orders response body.
///
/// A body served as `application/json` is deserialized; anything else is
/// kept as text. A text payload, or a JSON body that decodes to a bare
/// string, is rejected with [`OrdersError::HtmlResponse`] when it looks like
/// an HTML page (usually a login screen).
///
/// # Errors
///
/// - [`OrdersError::Json`] when a JSON body fails to deserialize.
/// - [`OrdersError::HtmlResponse`] when a string payload is an HTML document.
/// - [`OrdersError::NoParsableItems`] when normalization yields no orders.
///   The error carries the first `sample_len` characters of the body (or of
///   its compact JSON encoding).
pub fn decode_orders_body(
    body: &str,
    content_type: &str,
    options: &NormalizeOptions,
    sample_len: usize,
) -> Result<Vec<CanonicalOrder>, OrdersError> {
    let payload = if content_type
        .to_ascii_lowercase()
        .contains(JSON_CONTENT_TYPE)
    {
        serde_json::from_str::<Value>(body)?
    } else {
        Value::String(body.to_string())
    };

    if let Value::String(text) = &payload {
        if looks_like_html(text) {
            return Err(OrdersError::HtmlResponse);
        }
    }

    let orders = parse_orders_response_with(&payload, options);
    if orders.is_empty() {
        let sample = match &payload {
            Value::String(text) => truncate_chars(text, sample_len),
            other => truncate_chars(&other.to_string(), sample_len),
        };
        tracing::warn!(sample_len, "orders response contained no parsable items");
        return Err(OrdersError::NoParsableItems { sample });
    }

    tracing::debug!(orders = orders.len(), "decoded orders body");
    Ok(orders)
}

fn looks_like_html(body: &str) -> bool {
    let lower = body.to_lowercase();
    HTML_MARKERS.iter().any(|marker| lower.contains(marker))
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
