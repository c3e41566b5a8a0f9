use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::parse_date_time;

/// An order normalized from an upstream commerce payload of unknown shape.
///
/// Every field except `raw` is resolved through ordered fallbacks, so a
/// record is always produced even when the upstream omits most fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalOrder {
    /// Upstream order id, or a generated `order_xxxxxxxx` placeholder.
    pub id: String,
    /// `"Unknown guest"` when no name source resolved.
    pub guest_name: String,
    /// `"Unknown product"` when no product source resolved.
    pub product: String,
    pub quantity: f64,
    pub product_count: f64,
    pub total_price: Option<f64>,
    /// Currency code exactly as the upstream sent it (e.g. `"EUR"`).
    pub currency: Option<String>,
    /// `"unknown"` when the upstream carries no status.
    pub status: String,
    /// ISO-8601 purchase timestamp, or an empty string when none resolved.
    pub date: String,
    pub start_date: Option<String>,
    /// The upstream object this record was built from, kept for line
    /// extraction and debug display.
    pub raw: serde_json::Map<String, serde_json::Value>,
}

impl CanonicalOrder {
    /// Returns `true` when a purchase date was resolved.
    #[must_use]
    pub fn has_date(&self) -> bool {
        !self.date.is_empty()
    }

    /// Parses `date` back into a UTC timestamp, accepting every layout the
    /// normalizer keeps.
    ///
    /// Day-only values (`"2026-02-19"`) resolve to midnight UTC.
    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        parse_date_time(&self.date)
    }
}

/// One line item inside an order, as shown on the order detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub name: String,
    pub quantity: f64,
    /// Unit price when an attribute carries one, otherwise the line amount.
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub start_date: Option<String>,
    pub image_url: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl OrderLine {
    /// Joins the per-line customer first and last name.
    #[must_use]
    pub fn customer_name(&self) -> Option<String> {
        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        (!joined.is_empty()).then_some(joined)
    }
}

/// Order-level totals for the detail view. Each field resolves independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub num_products: Option<f64>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

impl OrderTotals {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_products.is_none() && self.amount.is_none() && self.currency.is_none()
    }
}
