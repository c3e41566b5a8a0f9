//! Command handlers for the order tools.
//!
//! Each handler reads its input, runs it through the normalizer, and prints
//! pretty JSON to stdout. Logging goes to stderr so output stays pipeable.

use std::path::Path;

use guestdesk_core::{AppConfig, CanonicalOrder, OrderCache};
use guestdesk_orders::{decode_orders_body, inspect_qr, NormalizeOptions, OrderDetail};
use serde::Serialize;

pub(crate) fn run_orders(config: &AppConfig, file: &Path, content_type: &str) -> anyhow::Result<()> {
    let orders = load_orders(config, file, content_type)?;
    tracing::info!(orders = orders.len(), file = %file.display(), "normalized orders");
    print_json(&orders)
}

pub(crate) fn run_detail(
    config: &AppConfig,
    file: &Path,
    id: &str,
    content_type: &str,
) -> anyhow::Result<()> {
    let cache: OrderCache = load_orders(config, file, content_type)?
        .into_iter()
        .collect();

    let Some(order) = cache.get(id) else {
        anyhow::bail!("order {id} not found among {} cached orders", cache.len());
    };
    print_json(&OrderDetail::from_order(order))
}

pub(crate) fn run_qr(value: &str) -> anyhow::Result<()> {
    let details = inspect_qr(value);
    match details.lookup_reference() {
        Some(reference) => tracing::info!(%reference, kind = ?details.kind, "decoded ticket QR"),
        None => tracing::warn!("QR value is blank; nothing to look up"),
    }
    print_json(&details)
}

fn load_orders(
    config: &AppConfig,
    file: &Path,
    content_type: &str,
) -> anyhow::Result<Vec<CanonicalOrder>> {
    let body = std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", file.display()))?;
    let options = NormalizeOptions::from_app_config(config);
    Ok(decode_orders_body(
        &body,
        content_type,
        &options,
        config.orders_sample_len,
    )?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
