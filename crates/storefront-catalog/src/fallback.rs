//! HTTP client for the secondary document store (the fallback store).

use reqwest::{Client, Url};
use storefront_core::{Facet, FetchRequest, PageInfo, ProductPage};

use crate::classify::{classify, RawFailure};
use crate::error::CatalogError;
use crate::http::{build_client, endpoint_url, fetch_body};
use crate::source::{AcquisitionResult, DataSource};
use crate::types::{FallbackQueryResponse, FieldFilter, OrderBy, StructuredQuery};

const QUERY_ENDPOINT: &str = "v1/products:query";

/// Client for `POST /v1/products:query`.
///
/// The fallback store is seeded independently of the primary one, so the
/// same request may return different records from each.
pub struct FallbackStoreClient {
    client: Client,
    query_url: Url,
    api_key: Option<String>,
}

impl FallbackStoreClient {
    /// Creates a client for the store rooted at `base_url`. When `api_key` is
    /// set it is sent as `x-api-key` on every query.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidBaseUrl`] if `base_url` is not an http(s) URL.
    /// - [`CatalogError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        api_key: Option<&str>,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            query_url: endpoint_url(base_url, QUERY_ENDPOINT)?,
            api_key: api_key.map(str::to_owned),
        })
    }

    async fn fetch_page(&self, request: &FetchRequest) -> Result<ProductPage, RawFailure> {
        let query = structured_query(request);
        tracing::debug!(url = %self.query_url, ?query, "querying fallback store");

        let mut builder = self
            .client
            .post(self.query_url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&query);
        if let Some(key) = &self.api_key {
            builder = builder.header("x-api-key", key);
        }

        let (_, body) = fetch_body(builder).await?;
        let parsed = serde_json::from_str::<FallbackQueryResponse>(&body).map_err(|e| {
            RawFailure::Malformed {
                detail: format!("fallback query body: {e}"),
            }
        })?;

        let derived = match parsed.total_count {
            Some(total_count) => PageInfo::derive(total_count, request.page(), request.page_size()),
            None => PageInfo::from_page_records(
                parsed.documents.len(),
                request.page(),
                request.page_size(),
            ),
        };
        let info = PageInfo {
            total_count: derived.total_count,
            page: parsed.page.unwrap_or(derived.page),
            total_pages: parsed.total_pages.unwrap_or(derived.total_pages),
        };

        Ok(ProductPage {
            products: parsed.documents,
            info,
        })
    }
}

/// Translates a listing request into the fallback store's query body.
pub(crate) fn structured_query(request: &FetchRequest) -> StructuredQuery<'_> {
    let filters = [Facet::Category, Facet::Brand]
        .into_iter()
        .filter_map(|facet| {
            request.selected(facet).map(|values| FieldFilter {
                field: facet.as_str(),
                op: "in",
                values: values.iter().map(String::as_str).collect(),
            })
        })
        .collect();

    let sort = request.sort();
    StructuredQuery {
        filters,
        order_by: OrderBy {
            field: sort.field(),
            direction: if sort.is_descending() { "desc" } else { "asc" },
        },
        page: request.page(),
        page_size: request.page_size(),
    }
}

impl DataSource for FallbackStoreClient {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn get(&self, request: &FetchRequest) -> AcquisitionResult {
        self.fetch_page(request).await.map_err(|failure| {
            tracing::warn!(source = self.name(), ?failure, "product store call failed");
            classify(&failure)
        })
    }
}
