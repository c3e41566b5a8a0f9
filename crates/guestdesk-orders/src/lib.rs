//! Normalization of heterogeneous commerce order payloads into
//! [`guestdesk_core::CanonicalOrder`] records.
//!
//! The upstream orders API changes shape across endpoints, versions, and
//! partners. Nothing here assumes a schema: arrays of order-like objects are
//! located structurally, and each canonical field is resolved through an
//! ordered list of candidate keys and nested paths.

pub mod attributes;
pub mod dates;
pub mod error;
pub mod intake;
pub mod lines;
pub mod locate;
pub mod mapper;
pub mod parse;
pub mod qr;
pub mod resolve;

pub use error::OrdersError;
pub use intake::decode_orders_body;
pub use lines::{extract_order_lines, extract_order_totals, OrderDetail};
pub use locate::{locate_order_arrays, OrderArrays, DEFAULT_MAX_DEPTH};
pub use mapper::{map_order, map_order_with};
pub use parse::{parse_orders_response, parse_orders_response_with, NormalizeOptions};
pub use qr::{inspect_qr, QrDetails, QrKind, QrRow};
