use std::collections::HashMap;

use guestdesk_core::{AppConfig, CanonicalOrder, MissingIdPolicy};
use serde_json::Value;

use crate::locate::{locate_order_arrays_with_depth, DEFAULT_MAX_DEPTH};
use crate::mapper::map_order_with;

/// Knobs threaded from configuration into normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Deepest object level the array locator descends to.
    pub max_depth: usize,
    pub missing_id: MissingIdPolicy,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            missing_id: MissingIdPolicy::Generate,
        }
    }
}

impl NormalizeOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_depth: config.orders_max_depth,
            missing_id: config.orders_missing_id,
        }
    }
}

/// Normalizes an orders payload with default options.
#[must_use]
pub fn parse_orders_response(payload: &Value) -> Vec<CanonicalOrder> {
    parse_orders_response_with(payload, &NormalizeOptions::default())
}

/// Normalizes an orders payload of unknown shape into canonical orders.
///
/// Candidate arrays are tried in discovery order and the first one that maps
/// at least one row wins; later candidates are never merged in. Rows sharing
/// an id collapse to the last one seen, kept at the position the id first
/// appeared. When no candidate yields a row, an object payload is mapped as
/// a single order. Anything else yields an empty result.
#[must_use]
pub fn parse_orders_response_with(
    payload: &Value,
    options: &NormalizeOptions,
) -> Vec<CanonicalOrder> {
    let accepted = locate_order_arrays_with_depth(payload, options.max_depth)
        .enumerate()
        .find_map(|(index, rows)| {
            let mapped: Vec<_> = rows
                .iter()
                .filter_map(|row| map_order_with(row, options.missing_id))
                .collect();
            if mapped.is_empty() {
                return None;
            }
            tracing::debug!(
                candidate = index,
                rows = rows.len(),
                mapped = mapped.len(),
                "accepted candidate order array"
            );
            Some(mapped)
        });

    if let Some(orders) = accepted {
        return dedupe_by_id(orders);
    }

    match map_order_with(payload, options.missing_id) {
        Some(order) => {
            tracing::debug!(id = %order.id, "no order array found; mapped payload as a single order");
            vec![order]
        }
        None => Vec::new(),
    }
}

fn dedupe_by_id(orders: Vec<CanonicalOrder>) -> Vec<CanonicalOrder> {
    let total = orders.len();
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(total);
    let mut unique: Vec<CanonicalOrder> = Vec::with_capacity(total);

    for order in orders {
        match positions.get(&order.id) {
            Some(&position) => unique[position] = order,
            None => {
                positions.insert(order.id.clone(), unique.len());
                unique.push(order);
            }
        }
    }

    if unique.len() < total {
        tracing::debug!(
            collapsed = total - unique.len(),
            "collapsed duplicate order ids"
        );
    }
    unique
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
