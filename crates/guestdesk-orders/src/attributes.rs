//! Scans over `attributes` arrays of semantically keyed rows.
//!
//! Partners attach free-form attribute rows to orders and line items:
//!
//! ```json
//! [{"key": "completed_at", "value": "2026-02-20T15:42:10Z"},
//!  {"label": "Customer First Name", "value": {"text": "Jane"}}]
//! ```
//!
//! The key may live under `name`, `key`, `label`, or `field`, and is matched
//! after normalization (lower-cased, non-alphanumerics stripped), so
//! `"Customer First Name"`, `customer_first_name`, and `customerFirstName`
//! all read as `customerfirstname`. Values are either scalars or objects
//! wrapping the scalar.

use serde_json::Value;

use crate::dates::coerce_date;
use crate::resolve::{child_record, parse_number_str, pick_number, pick_string, Record};

const ATTRIBUTE_KEY_FIELDS: &[&str] = &["name", "key", "label", "field"];

const DATE_VALUE_FIELDS: &[&str] = &["value", "text", "answer"];
const DATE_NESTED_FIELDS: &[&str] = &["value", "date", "datetime", "completed_at"];

const STRING_VALUE_FIELDS: &[&str] = &["value", "text", "answer", "content"];
const STRING_NESTED_FIELDS: &[&str] = &["value", "text", "url", "src"];

const SCALAR_VALUE_FIELDS: &[&str] = &["value", "text", "answer"];
const SCALAR_NESTED_FIELDS: &[&str] = &["value", "text"];
const CURRENCY_NESTED_FIELDS: &[&str] = &["currency", "code"];
const UNIT_PRICE_NESTED_FIELDS: &[&str] = &["value", "unit_price", "unitPrice"];

const FIRST_NAME_FIELDS: &[&str] = &["first_name", "firstName", "firstname"];
const LAST_NAME_FIELDS: &[&str] = &["last_name", "lastName", "lastname"];
const CUSTOMER_FIRST_FIELDS: &[&str] = &["first_name", "firstName", "firstname", "first"];
const CUSTOMER_LAST_FIELDS: &[&str] = &["last_name", "lastName", "lastname", "last"];

const FIRST_NAME_KEYS: &[&str] = &["customerfirstname", "customerfirst", "firstname", "first"];
const LAST_NAME_KEYS: &[&str] = &["customerlastname", "customerlast", "lastname", "last"];

/// Customer name parts recovered from a line item's attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerNames {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Per-line pricing and date recovered from a line item's attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinePricing {
    pub unit_price: Option<f64>,
    pub currency: Option<String>,
    pub date: Option<String>,
}

/// Lower-cases `input` and strips everything but ASCII letters and digits.
#[must_use]
pub fn normalize_attr_key(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Returns the first attribute row keyed by one of `wanted` whose value
/// coerces to a date.
#[must_use]
pub fn pick_date_from_attributes(attributes: Option<&Value>, wanted: &[&str]) -> Option<String> {
    let targets = normalized_targets(wanted);

    keyed_rows(attributes)
        .filter(|(key, _)| targets.contains(key))
        .find_map(|(_, row)| {
            let direct = DATE_VALUE_FIELDS.iter().filter_map(|field| row.get(*field));
            let nested = child_record(row, "value").into_iter().flat_map(|inner| {
                DATE_NESTED_FIELDS
                    .iter()
                    .filter_map(move |field| inner.get(*field))
            });
            direct.chain(nested).find_map(coerce_date)
        })
}

/// Returns the first non-blank string value of an attribute row keyed by one
/// of `wanted`.
#[must_use]
pub fn pick_string_from_attributes(attributes: Option<&Value>, wanted: &[&str]) -> Option<String> {
    let targets = normalized_targets(wanted);

    keyed_rows(attributes)
        .filter(|(key, _)| targets.contains(key))
        .find_map(|(_, row)| {
            pick_string(row, STRING_VALUE_FIELDS)
                .or_else(|| {
                    child_record(row, "value")
                        .and_then(|inner| pick_string(inner, STRING_NESTED_FIELDS))
                })
                .map(str::to_string)
        })
}

/// Recovers the customer's first and last name from attribute rows.
///
/// Three row shapes are recognized, checked per row in this order:
///
/// 1. a row keyed as a first/last name (`customer_first_name`, `first`, ...)
///    holding the name as a scalar or wrapped scalar;
/// 2. a row keyed `customer` whose value object has name fields;
/// 3. any row whose value object (or its `customer` child) has name fields.
///
/// Each part keeps the first match; scanning continues until both are found
/// or the rows run out.
#[must_use]
pub fn customer_names_from_attributes(attributes: Option<&Value>) -> CustomerNames {
    let mut names = CustomerNames::default();

    for (key, row) in keyed_rows(attributes) {
        let inner = child_record(row, "value");
        let inner_customer = inner.and_then(|value| child_record(value, "customer"));
        let nested_first = inner
            .and_then(|value| pick_string(value, FIRST_NAME_FIELDS))
            .or_else(|| inner_customer.and_then(|c| pick_string(c, FIRST_NAME_FIELDS)));
        let nested_last = inner
            .and_then(|value| pick_string(value, LAST_NAME_FIELDS))
            .or_else(|| inner_customer.and_then(|c| pick_string(c, LAST_NAME_FIELDS)));

        if names.first_name.is_none() && FIRST_NAME_KEYS.contains(&key.as_str()) {
            names.first_name = scalar_value(row).or(nested_first).map(str::to_string);
        }
        if names.last_name.is_none() && LAST_NAME_KEYS.contains(&key.as_str()) {
            names.last_name = scalar_value(row).or(nested_last).map(str::to_string);
        }

        if key == "customer" {
            if let Some(value) = inner {
                if names.first_name.is_none() {
                    names.first_name =
                        pick_string(value, CUSTOMER_FIRST_FIELDS).map(str::to_string);
                }
                if names.last_name.is_none() {
                    names.last_name =
                        pick_string(value, CUSTOMER_LAST_FIELDS).map(str::to_string);
                }
            }
        }

        if names.first_name.is_none() {
            names.first_name = nested_first.map(str::to_string);
        }
        if names.last_name.is_none() {
            names.last_name = nested_last.map(str::to_string);
        }

        if names.first_name.is_some() && names.last_name.is_some() {
            break;
        }
    }

    names
}

/// Recovers the unit price, currency, and date of a line item from attribute
/// rows keyed `unit_price`, `currency`, and `date`.
#[must_use]
pub fn pricing_from_attributes(attributes: Option<&Value>) -> LinePricing {
    let mut pricing = LinePricing::default();

    for (key, row) in keyed_rows(attributes) {
        let inner = child_record(row, "value");
        let scalar = scalar_value(row);

        match key.as_str() {
            "unitprice" if pricing.unit_price.is_none() => {
                pricing.unit_price = scalar
                    .and_then(parse_number_str)
                    .or_else(|| pick_number(row, SCALAR_VALUE_FIELDS))
                    .or_else(|| {
                        inner.and_then(|value| pick_number(value, UNIT_PRICE_NESTED_FIELDS))
                    });
            }
            "currency" if pricing.currency.is_none() => {
                pricing.currency = scalar
                    .or_else(|| inner.and_then(|value| pick_string(value, CURRENCY_NESTED_FIELDS)))
                    .map(str::to_string);
            }
            "date" if pricing.date.is_none() => {
                pricing.date = scalar
                    .or_else(|| inner.and_then(|value| pick_string(value, &["date"])))
                    .map(str::to_string);
            }
            _ => {}
        }
    }

    pricing
}

/// Yields each object row of an `attributes` array with its normalized key.
/// Non-array input and non-object rows are skipped.
fn keyed_rows(attributes: Option<&Value>) -> impl Iterator<Item = (String, &Record)> {
    attributes
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
        .map(|row| {
            let key = pick_string(row, ATTRIBUTE_KEY_FIELDS).unwrap_or_default();
            (normalize_attr_key(key), row)
        })
}

/// The row's own scalar, or the scalar wrapped in its `value` object.
fn scalar_value(row: &Record) -> Option<&str> {
    pick_string(row, SCALAR_VALUE_FIELDS).or_else(|| {
        child_record(row, "value").and_then(|inner| pick_string(inner, SCALAR_NESTED_FIELDS))
    })
}

fn normalized_targets(wanted: &[&str]) -> Vec<String> {
    wanted.iter().map(|key| normalize_attr_key(key)).collect()
}
