//! Wire types for the two product stores.
//!
//! ## Primary store
//! `GET /api/shop/products/get` answers with an envelope:
//! `{"success": true, "data": [...], "pagination": {...}}`. Older deployments
//! omit `pagination`; the client derives it from the record count. A 2xx
//! with `"success": false` is a failure whose `message` is surfaced.
//!
//! ## Fallback store
//! `POST /v1/products:query` takes a structured query body and answers with
//! `{"documents": [...], "totalCount": n, "page": n, "totalPages": n}`.
//! Paging fields may be absent on small collections.

use serde::{Deserialize, Serialize};
use storefront_core::{PageInfo, Product};

/// Response envelope from the primary store's listing endpoint.
#[derive(Debug, Deserialize)]
pub struct PrimaryListResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Product>,
    #[serde(default)]
    pub pagination: Option<PageInfo>,
}

fn default_success() -> bool {
    true
}

/// Structured query accepted by the fallback store.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery<'a> {
    #[serde(rename = "where")]
    pub filters: Vec<FieldFilter<'a>>,
    pub order_by: OrderBy,
    pub page: u32,
    pub page_size: u32,
}

/// `field IN values`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FieldFilter<'a> {
    pub field: &'static str,
    pub op: &'static str,
    pub values: Vec<&'a str>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct OrderBy {
    pub field: &'static str,
    pub direction: &'static str,
}

/// Response from the fallback store's query endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackQueryResponse {
    #[serde(default)]
    pub documents: Vec<Product>,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}
