//! Text and JSON rendering of an [`AcquisitionState`].
//!
//! Everything here is a pure function over the state so the listing view can
//! be tested without a store.

use std::fmt::Write as _;

use rust_decimal::Decimal;
use serde_json::{json, Value};
use storefront_catalog::{AcquisitionState, ClassifiedError};
use storefront_core::Product;

const EMPTY_RESULT_LINE: &str = "No products match the selected filters.";

/// One-time notice shown when the controller moves to the fallback store.
pub(crate) fn switch_notice(error: &ClassifiedError) -> String {
    format!(
        "notice: primary store unavailable ({}: {}); showing the fallback catalog",
        error.kind, error.message
    )
}

pub(crate) fn format_price(price: Decimal) -> String {
    format!("${:.2}", price.round_dp(2))
}

fn product_line(product: &Product) -> String {
    let price = if product.is_on_sale() {
        format!(
            "{} (was {})",
            format_price(product.sale_price),
            format_price(product.price)
        )
    } else {
        format_price(product.price)
    };
    let stock = if product.in_stock() {
        format!("{} in stock", product.total_stock)
    } else {
        "out of stock".to_string()
    };
    format!(
        "{:<32} {:<12} {:>22}  {stock}",
        product.title, product.brand, price
    )
}

/// Renders the listing view: an error block, the empty-result line, or one
/// row per product followed by a paging footer.
pub(crate) fn render_listing(state: &AcquisitionState) -> String {
    let mut out = String::new();

    if let Some(error) = &state.error {
        let _ = writeln!(out, "error: {}", error.kind.user_message());
        let _ = write!(out, "  {}: {}", error.kind, error.message);
        if let Some(code) = &error.code {
            let _ = write!(out, " (code {code})");
        }
        out.push('\n');
        return out;
    }

    if state.is_empty_result() {
        out.push_str(EMPTY_RESULT_LINE);
        out.push('\n');
        return out;
    }

    for product in &state.products {
        out.push_str(&product_line(product));
        out.push('\n');
    }

    let source = state.served_by.unwrap_or(state.mode);
    let _ = writeln!(
        out,
        "page {}/{} | {} products | source: {source}",
        state.page_info.page, state.page_info.total_pages, state.page_info.total_count
    );
    out
}

pub(crate) fn state_json(state: &AcquisitionState) -> Value {
    let error = state.error.as_ref().map(|error| {
        json!({
            "kind": error.kind.as_str(),
            "message": error.message,
            "code": error.code,
            "userMessage": error.kind.user_message(),
        })
    });

    json!({
        "mode": state.mode,
        "servedBy": state.served_by,
        "switched": state.switched,
        "products": state.products,
        "pagination": state.page_info,
        "error": error,
    })
}
