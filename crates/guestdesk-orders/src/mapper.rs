//! Mapping of one raw order object into a [`CanonicalOrder`].
//!
//! Each canonical field is resolved through an ordered list of strategies;
//! a later strategy runs only when every earlier one came back absent.
//! Missing fields degrade to defaults; only the id policy can drop a row.

use guestdesk_core::{CanonicalOrder, MissingIdPolicy};
use rand::Rng;
use serde_json::Value;

use crate::attributes::pick_date_from_attributes;
use crate::dates::{pick_date, pick_date_from_nested};
use crate::resolve::{
    pick_number, pick_number_from_nested, pick_string, pick_string_from_nested, Record,
};

const ID_KEYS: &[&str] = &[
    "id",
    "order_id",
    "orderId",
    "uuid",
    "reference",
    "external_ref",
    "externalRef",
];

const FIRST_NAME_KEYS: &[&str] = &[
    "first_name",
    "firstName",
    "customer_first_name",
    "guest_first_name",
];
const FIRST_NAME_PATHS: &[&[&str]] = &[
    &["customer", "first_name"],
    &["customer", "firstName"],
    &["guest", "first_name"],
    &["guest", "firstName"],
    &["buyer", "first_name"],
    &["buyer", "firstName"],
];
const LAST_NAME_KEYS: &[&str] = &[
    "last_name",
    "lastName",
    "customer_last_name",
    "guest_last_name",
];
const LAST_NAME_PATHS: &[&[&str]] = &[
    &["customer", "last_name"],
    &["customer", "lastName"],
    &["guest", "last_name"],
    &["guest", "lastName"],
    &["buyer", "last_name"],
    &["buyer", "lastName"],
];
const GUEST_NAME_KEYS: &[&str] = &[
    "customer_name",
    "customerName",
    "guest_name",
    "guestName",
    "name",
];
const GUEST_NAME_PATHS: &[&[&str]] = &[
    &["customer", "name"],
    &["guest", "name"],
    &["buyer", "name"],
    &["customer", "fullName"],
];

const PRODUCT_KEYS: &[&str] = &[
    "product_name",
    "productName",
    "product",
    "item_name",
    "ticket_name",
    "title",
];
const PRODUCT_PATHS: &[&[&str]] = &[
    &["product", "name"],
    &["item", "name"],
    &["ticket", "name"],
    &["line_item", "name"],
    &["lineItem", "name"],
];

const NUM_PRODUCTS_KEYS: &[&str] = &["num_products", "numProducts"];
const QUANTITY_KEYS: &[&str] = &[
    "quantity",
    "qty",
    "units",
    "count",
    "total_quantity",
    "totalQuantity",
];
const QUANTITY_PATHS: &[&[&str]] = &[
    &["product", "quantity"],
    &["line_item", "quantity"],
    &["lineItem", "quantity"],
    &["item", "quantity"],
];
const PRODUCT_COUNT_KEYS: &[&str] = &[
    "product_count",
    "productCount",
    "items_count",
    "itemsCount",
    "lines_count",
    "linesCount",
];

const TOTAL_PRICE_KEYS: &[&str] = &[
    "amount",
    "total_price",
    "totalPrice",
    "price",
    "total_amount",
    "totalAmount",
    "grand_total",
    "grandTotal",
];
const TOTAL_PRICE_PATHS: &[&[&str]] = &[
    &["order", "amount"],
    &["order", "total"],
    &["payment", "amount"],
    &["payment", "total"],
    &["totals", "amount"],
    &["totals", "total_price"],
    &["pricing", "total"],
    &["price", "amount"],
];
const CURRENCY_KEYS: &[&str] = &["currency", "currency_code", "currencyCode"];
const CURRENCY_PATHS: &[&[&str]] = &[
    &["payment", "currency"],
    &["totals", "currency"],
    &["pricing", "currency"],
    &["price", "currency"],
];

const STATUS_KEYS: &[&str] = &["status", "state", "order_status", "orderStatus"];

const COMPLETED_AT_KEYS: &[&str] = &["completed_at", "completedAt"];
const COMPLETED_AT_PATHS: &[&[&str]] = &[
    &["purchase", "completed_at"],
    &["purchase", "completedAt"],
];
const COMPLETED_DAY_KEYS: &[&str] = &["completed_at_day", "completedAtDay"];
const COMPLETED_DAY_PATHS: &[&[&str]] = &[
    &["purchase", "completed_at_day"],
    &["purchase", "completedAtDay"],
];

const START_DATE_KEYS: &[&str] = &["start_date", "startDate"];
const START_DATE_PATHS: &[&[&str]] = &[
    &["event", "start_date"],
    &["event", "startDate"],
    &["product", "start_date"],
    &["product", "startDate"],
];

const UNKNOWN_GUEST: &str = "Unknown guest";
const UNKNOWN_PRODUCT: &str = "Unknown product";
const UNKNOWN_STATUS: &str = "unknown";

const FALLBACK_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const FALLBACK_ID_LEN: usize = 8;

/// Maps one raw order object, generating an id when none is present.
///
/// Returns `None` only when `item` is not a JSON object.
#[must_use]
pub fn map_order(item: &Value) -> Option<CanonicalOrder> {
    map_order_with(item, MissingIdPolicy::Generate)
}

/// Maps one raw order object under an explicit missing-id policy.
///
/// With [`MissingIdPolicy::Drop`], an object without any id candidate also
/// maps to `None`.
#[must_use]
pub fn map_order_with(item: &Value, missing_id: MissingIdPolicy) -> Option<CanonicalOrder> {
    let row = item.as_object()?;

    let id = match (pick_string(row, ID_KEYS), missing_id) {
        (Some(id), _) => id.to_string(),
        (None, MissingIdPolicy::Generate) => {
            let id = generate_fallback_id();
            tracing::debug!(%id, "order has no id; generated a fallback");
            id
        }
        (None, MissingIdPolicy::Drop) => {
            tracing::debug!("order has no id; dropping row");
            return None;
        }
    };

    let quantity = resolve_quantity(row);

    Some(CanonicalOrder {
        id,
        guest_name: resolve_guest_name(row),
        product: pick_string(row, PRODUCT_KEYS)
            .or_else(|| pick_string_from_nested(row, PRODUCT_PATHS))
            .unwrap_or(UNKNOWN_PRODUCT)
            .to_string(),
        quantity,
        product_count: resolve_product_count(row, quantity),
        total_price: pick_number(row, TOTAL_PRICE_KEYS)
            .or_else(|| pick_number_from_nested(row, TOTAL_PRICE_PATHS)),
        currency: pick_string(row, CURRENCY_KEYS)
            .or_else(|| pick_string_from_nested(row, CURRENCY_PATHS))
            .map(str::to_string),
        status: pick_string(row, STATUS_KEYS)
            .unwrap_or(UNKNOWN_STATUS)
            .to_string(),
        date: resolve_purchase_date(row).unwrap_or_default(),
        start_date: pick_string(row, START_DATE_KEYS)
            .or_else(|| pick_string_from_nested(row, START_DATE_PATHS))
            .map(str::to_string),
        raw: row.clone(),
    })
}

/// Direct name fields, then nested name objects, then `first + last`.
fn resolve_guest_name(row: &Record) -> String {
    if let Some(name) =
        pick_string(row, GUEST_NAME_KEYS).or_else(|| pick_string_from_nested(row, GUEST_NAME_PATHS))
    {
        return name.to_string();
    }

    let first = pick_string(row, FIRST_NAME_KEYS)
        .or_else(|| pick_string_from_nested(row, FIRST_NAME_PATHS))
        .unwrap_or_default();
    let last = pick_string(row, LAST_NAME_KEYS)
        .or_else(|| pick_string_from_nested(row, LAST_NAME_PATHS))
        .unwrap_or_default();
    let joined = format!("{first} {last}");
    let joined = joined.trim();

    if joined.is_empty() {
        UNKNOWN_GUEST.to_string()
    } else {
        joined.to_string()
    }
}

fn resolve_quantity(row: &Record) -> f64 {
    pick_number(row, NUM_PRODUCTS_KEYS)
        .or_else(|| pick_number(row, QUANTITY_KEYS))
        .or_else(|| pick_number_from_nested(row, QUANTITY_PATHS))
        .unwrap_or(1.0)
}

#[allow(clippy::cast_precision_loss)]
fn resolve_product_count(row: &Record, quantity: f64) -> f64 {
    // A null `line_items` falls through to `lineItems`; any other value,
    // array or not, shadows it.
    let line_items = row
        .get("line_items")
        .filter(|value| !value.is_null())
        .or_else(|| row.get("lineItems"));

    pick_number(row, NUM_PRODUCTS_KEYS)
        .or_else(|| pick_number(row, PRODUCT_COUNT_KEYS))
        .or_else(|| line_items.and_then(Value::as_array).map(|items| items.len() as f64))
        .unwrap_or(quantity)
}

/// Full timestamps outrank day-only values. Within each tier the direct
/// fields come first, then the `attributes` rows, then `purchase.*`.
fn resolve_purchase_date(row: &Record) -> Option<String> {
    let attributes = row.get("attributes");

    [
        (COMPLETED_AT_KEYS, COMPLETED_AT_PATHS),
        (COMPLETED_DAY_KEYS, COMPLETED_DAY_PATHS),
    ]
    .into_iter()
    .find_map(|(keys, paths)| {
        pick_date(row, keys)
            .or_else(|| pick_date_from_attributes(attributes, keys))
            .or_else(|| pick_date_from_nested(row, paths))
    })
}

fn generate_fallback_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..FALLBACK_ID_LEN)
        .map(|_| char::from(FALLBACK_ID_ALPHABET[rng.random_range(0..FALLBACK_ID_ALPHABET.len())]))
        .collect();
    format!("order_{suffix}")
}

#[cfg(test)]
#[path = "mapper_test.rs"]
mod tests;
