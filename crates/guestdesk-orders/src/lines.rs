//! Line-item and totals extraction for the order detail view.
//!
//! Line items are read from the first productive location among
//! `products`, `line_items`, `lineItems`, and `items`, at the top level and
//! then under a nested `order` object. Locations are never merged: when a
//! payload carries both `items` and `order.line_items`, only the first one
//! that yields a line is used.

use guestdesk_core::{CanonicalOrder, OrderLine, OrderTotals};
use serde::Serialize;
use serde_json::Value;

use crate::attributes::{
    customer_names_from_attributes, pick_string_from_attributes, pricing_from_attributes,
};
use crate::resolve::{child_record, pick_number, pick_string, Record};

const LINE_ARRAY_KEYS: &[&str] = &["products", "line_items", "lineItems", "items"];

const LINE_NAME_KEYS: &[&str] = &[
    "name",
    "product_name",
    "productName",
    "title",
    "ticket_name",
    "ticketName",
];
const LINE_QUANTITY_KEYS: &[&str] = &["quantity", "qty", "count", "units"];
const LINE_AMOUNT_KEYS: &[&str] = &["amount", "price", "total", "total_price", "totalPrice"];
const LINE_START_DATE_KEYS: &[&str] = &["start_date", "startDate", "date"];
const IMAGE_KEYS: &[&str] = &["image", "image_url", "imageUrl"];
const IMAGE_ATTRIBUTE_KEYS: &[&str] = &[
    "image",
    "image_url",
    "imageUrl",
    "product_image",
    "productImage",
];

const CURRENCY_KEYS: &[&str] = &["currency", "currency_code", "currencyCode"];
const NUM_PRODUCTS_KEYS: &[&str] = &["num_products", "numProducts"];
const TOTAL_AMOUNT_KEYS: &[&str] = &["amount", "total_amount", "totalAmount", "price"];

const DEFAULT_LINE_NAME: &str = "Product";

/// An order together with the line items and totals shown on its detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub order: CanonicalOrder,
    pub lines: Vec<OrderLine>,
    pub totals: OrderTotals,
}

impl OrderDetail {
    #[must_use]
    pub fn from_order(order: &CanonicalOrder) -> Self {
        Self {
            lines: extract_order_lines(&order.raw),
            totals: extract_order_totals(&order.raw),
            order: order.clone(),
        }
    }
}

/// Extracts the line items of a raw order object.
///
/// Non-object items are skipped; a location whose items are all non-objects
/// counts as unproductive and the next location is tried.
#[must_use]
pub fn extract_order_lines(raw: &Record) -> Vec<OrderLine> {
    let nested = child_record(raw, "order");
    let top_level = LINE_ARRAY_KEYS.iter().map(|key| raw.get(*key));
    let under_order = LINE_ARRAY_KEYS
        .iter()
        .map(|key| nested.and_then(|order| order.get(*key)));

    top_level
        .chain(under_order)
        .filter_map(|candidate| candidate.and_then(Value::as_array))
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(map_line)
                .collect::<Vec<_>>()
        })
        .find(|lines| !lines.is_empty())
        .unwrap_or_default()
}

/// Extracts order-level totals, preferring a `total` object (top-level or
/// under `order`) over fields on the order itself.
#[must_use]
pub fn extract_order_totals(raw: &Record) -> OrderTotals {
    let total = child_record(raw, "total")
        .or_else(|| child_record(raw, "order").and_then(|order| child_record(order, "total")));

    OrderTotals {
        num_products: total
            .and_then(|t| pick_number(t, NUM_PRODUCTS_KEYS))
            .or_else(|| pick_number(raw, NUM_PRODUCTS_KEYS)),
        amount: total
            .and_then(|t| pick_number(t, TOTAL_AMOUNT_KEYS))
            .or_else(|| pick_number(raw, TOTAL_AMOUNT_KEYS)),
        currency: total
            .and_then(|t| pick_string(t, CURRENCY_KEYS))
            .or_else(|| pick_string(raw, CURRENCY_KEYS))
            .map(str::to_string),
    }
}

fn map_line(row: &Record) -> OrderLine {
    let attributes = row.get("attributes");
    let pricing = pricing_from_attributes(attributes);
    let names = customer_names_from_attributes(attributes);

    let image_url = pick_string(row, IMAGE_KEYS)
        .or_else(|| child_record(row, "product").and_then(|p| pick_string(p, IMAGE_KEYS)))
        .map(str::to_string)
        .or_else(|| pick_string_from_attributes(attributes, IMAGE_ATTRIBUTE_KEYS));

    OrderLine {
        name: pick_string(row, LINE_NAME_KEYS)
            .unwrap_or(DEFAULT_LINE_NAME)
            .to_string(),
        quantity: pick_number(row, LINE_QUANTITY_KEYS).unwrap_or(1.0),
        amount: pricing
            .unit_price
            .or_else(|| pick_number(row, LINE_AMOUNT_KEYS)),
        currency: pricing
            .currency
            .or_else(|| pick_string(row, CURRENCY_KEYS).map(str::to_string)),
        start_date: pricing
            .date
            .or_else(|| pick_string(row, LINE_START_DATE_KEYS).map(str::to_string)),
        image_url,
        first_name: names.first_name,
        last_name: names.last_name,
    }
}
