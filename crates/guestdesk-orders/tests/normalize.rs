//! End-to-end normalization of representative upstream payloads.
//!
//! Each fixture mirrors a response shape seen from the commerce API: flat
//! `orders` arrays, deeply wrapped `data.result.rows`, bare single orders,
//! and rows annotated with `attributes` arrays.

use guestdesk_core::{MissingIdPolicy, OrderCache};
use serde_json::{json, Value};

use guestdesk_orders::{
    locate_order_arrays, parse_orders_response, parse_orders_response_with, NormalizeOptions,
    OrderDetail,
};

fn wrap(levels: usize, leaf: Value) -> Value {
    (0..levels).fold(leaf, |inner, _| json!({ "data": inner }))
}

// ---------------------------------------------------------------------------
// Purity
// ---------------------------------------------------------------------------

#[test]
fn parsing_twice_yields_identical_output() {
    let payload = json!({
        "data": {"rows": [
            {"id": "ord_1", "customer_name": "John Doe", "amount": "10"},
            {"id": "ord_2", "guest": {"firstName": "Ana", "lastName": "Lee"}},
        ]}
    });
    assert_eq!(parse_orders_response(&payload), parse_orders_response(&payload));
}

// ---------------------------------------------------------------------------
// Payload shapes
// ---------------------------------------------------------------------------

#[test]
fn flat_orders_array() {
    let payload = json!({
        "orders": [{
            "id": "ord_1",
            "customer_name": "John Doe",
            "product_name": "Day Pass",
            "num_products": 2,
            "amount": 129.5,
            "currency": "EUR",
            "status": "completed",
        }]
    });

    let orders = parse_orders_response(&payload);
    assert_eq!(orders.len(), 1);
    let order = &orders[0];
    assert_eq!(order.id, "ord_1");
    assert_eq!(order.guest_name, "John Doe");
    assert_eq!(order.product, "Day Pass");
    assert_eq!(order.product_count, 2.0);
    assert_eq!(order.quantity, 2.0);
    assert_eq!(order.total_price, Some(129.5));
    assert_eq!(order.currency.as_deref(), Some("EUR"));
    assert_eq!(order.status, "completed");
}

#[test]
fn deeply_nested_rows() {
    let payload = json!({
        "data": {
            "result": {
                "rows": [{
                    "orderId": "A-77",
                    "customer": {"firstName": "Jane", "lastName": "Smith"},
                    "num_products": 3,
                    "product": {"name": "Season Pass"},
                    "amount": "499.00",
                    "currency": "CHF",
                    "orderStatus": "paid",
                    "completedAtDay": "2026-02-19",
                }]
            }
        }
    });

    let orders = parse_orders_response(&payload);
    assert_eq!(orders.len(), 1);
    let order = &orders[0];
    assert_eq!(order.id, "A-77");
    assert_eq!(order.guest_name, "Jane Smith");
    assert_eq!(order.product, "Season Pass");
    assert_eq!(order.quantity, 3.0);
    assert_eq!(order.total_price, Some(499.0));
    assert_eq!(order.status, "paid");
    assert_eq!(order.date, "2026-02-19");
}

#[test]
fn attribute_timestamp_outranks_direct_day() {
    let payload = json!([{
        "id": "ord_3",
        "completed_at_day": "2026-02-20",
        "attributes": [{"key": "completed_at", "value": "2026-02-20T15:42:10Z"}],
    }]);
    let orders = parse_orders_response(&payload);
    assert_eq!(orders[0].date, "2026-02-20T15:42:10Z");
    assert!(orders[0].completed_at().is_some());
}

#[test]
fn bare_single_order_object() {
    let payload = json!({
        "id": "solo-1",
        "customerName": "Sam Roe",
        "productName": "Night Ski",
        "total_price": 35,
    });
    let orders = parse_orders_response(&payload);
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, "solo-1");
    assert_eq!(orders[0].product, "Night Ski");
}

#[test]
fn duplicate_rows_collapse_to_later_fields() {
    let payload = json!({"orders": [
        {"id": "dup", "status": "pending", "amount": 10},
        {"id": "other"},
        {"id": "dup", "status": "completed", "amount": 12},
    ]});
    let orders = parse_orders_response(&payload);
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, "dup");
    assert_eq!(orders[0].status, "completed");
    assert_eq!(orders[0].total_price, Some(12.0));
    assert_eq!(orders[1].id, "other");
}

#[test]
fn arrays_at_depth_cap_are_found() {
    let payload = wrap(5, json!({"orders": [{"id": "deep-enough"}]}));
    let orders = parse_orders_response(&payload);
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, "deep-enough");
}

#[test]
fn arrays_nested_beyond_depth_cap_are_not_found() {
    let payload = wrap(6, json!({"orders": [{"id": "too-deep"}]}));

    assert_eq!(locate_order_arrays(&payload).count(), 0);

    let orders = parse_orders_response(&payload);
    assert!(orders.iter().all(|order| order.id != "too-deep"));

    let strict = NormalizeOptions {
        missing_id: MissingIdPolicy::Drop,
        ..NormalizeOptions::default()
    };
    assert!(parse_orders_response_with(&payload, &strict).is_empty());
}

// ---------------------------------------------------------------------------
// List → detail join
// ---------------------------------------------------------------------------

#[test]
fn cached_order_resolves_detail_lines() {
    let payload = json!({"orders": [{
        "id": "ord_9",
        "line_items": [
            {
                "name": "Adult Day Pass",
                "quantity": 2,
                "attributes": [
                    {"key": "unit_price", "value": "64.50"},
                    {"key": "customer_first_name", "value": "Jane"},
                    {"key": "customer_last_name", "value": "Smith"},
                ],
            },
        ],
        "total": {"num_products": 2, "amount": 129, "currency": "EUR"},
    }]});

    let cache: OrderCache = parse_orders_response(&payload).into_iter().collect();
    let order = cache.get("ord_9").expect("order cached by id");
    let detail = OrderDetail::from_order(order);

    assert_eq!(detail.lines.len(), 1);
    assert_eq!(detail.lines[0].amount, Some(64.5));
    assert_eq!(detail.lines[0].customer_name().as_deref(), Some("Jane Smith"));
    assert_eq!(detail.totals.amount, Some(129.0));
    assert_eq!(detail.totals.currency.as_deref(), Some("EUR"));
}

#[test]
fn canonical_orders_serialize_in_camel_case() {
    let payload = json!([{"id": "a", "customer_name": "Kim", "start_date": "2026-03-01"}]);
    let value = serde_json::to_value(parse_orders_response(&payload)).unwrap();
    assert_eq!(value[0]["guestName"], "Kim");
    assert_eq!(value[0]["productCount"], 1.0);
    assert_eq!(value[0]["startDate"], "2026-03-01");
    assert!(value[0]["totalPrice"].is_null());
    assert_eq!(value[0]["raw"]["customer_name"], "Kim");
}
