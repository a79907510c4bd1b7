//! HTTP client for the storefront's own product API (the primary store).

use std::sync::Arc;

use reqwest::{Client, Url};
use storefront_core::{Facet, FetchRequest, PageInfo, ProductPage, SortKey};

use crate::auth::AuthProvider;
use crate::classify::{classify, RawFailure};
use crate::error::CatalogError;
use crate::http::{build_client, endpoint_url, fetch_body};
use crate::source::{AcquisitionResult, DataSource};
use crate::types::PrimaryListResponse;

const LISTING_ENDPOINT: &str = "api/shop/products/get";

/// Client for `GET /api/shop/products/get`.
///
/// Facet selections are sent as comma-joined query values
/// (`category=men,women`), the sort as the store's own `sortBy` vocabulary.
/// The signed-in user's token, if any, goes in a bearer `Authorization`
/// header; the store answers 401 without one.
pub struct PrimaryStoreClient {
    client: Client,
    listing_url: Url,
    auth: Arc<dyn AuthProvider>,
}

impl PrimaryStoreClient {
    /// Creates a client for the store rooted at `base_url`.
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
        auth: Arc<dyn AuthProvider>,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            listing_url: endpoint_url(base_url, LISTING_ENDPOINT)?,
            auth,
        })
    }

    /// Builds the listing URL for `request`, percent-encoding every value.
    pub(crate) fn listing_url(&self, request: &FetchRequest) -> Url {
        let mut url = self.listing_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for facet in [Facet::Category, Facet::Brand] {
                if let Some(values) = request.selected(facet) {
                    let joined = values.iter().map(String::as_str).collect::<Vec<_>>().join(",");
                    pairs.append_pair(facet.as_str(), &joined);
                }
            }
            pairs.append_pair("sortBy", sort_param(request.sort()));
            pairs.append_pair("page", &request.page().to_string());
            pairs.append_pair("limit", &request.page_size().to_string());
        }
        url
    }

    async fn fetch_page(&self, request: &FetchRequest) -> Result<ProductPage, RawFailure> {
        let url = self.listing_url(request);
        tracing::debug!(%url, "requesting product page from primary store");

        let mut builder = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(identity) = self.auth.current_identity() {
            builder = builder.bearer_auth(identity.token());
        }

        let (status, body) = fetch_body(builder).await?;
        let parsed = serde_json::from_str::<PrimaryListResponse>(&body).map_err(|e| {
            RawFailure::Malformed {
                detail: format!("primary listing body: {e}"),
            }
        })?;

        if !parsed.success {
            return Err(RawFailure::Http {
                status: status.as_u16(),
                body: Some(body),
            });
        }

        let info = parsed.pagination.unwrap_or_else(|| {
            PageInfo::from_page_records(parsed.data.len(), request.page(), request.page_size())
        });
        Ok(ProductPage {
            products: parsed.data,
            info,
        })
    }
}

/// The primary store's `sortBy` vocabulary.
fn sort_param(sort: SortKey) -> &'static str {
    match sort {
        SortKey::PriceAsc => "price-lowtohigh",
        SortKey::PriceDesc => "price-hightolow",
        SortKey::TitleAsc => "title-atoz",
        SortKey::TitleDesc => "title-ztoa",
    }
}

impl DataSource for PrimaryStoreClient {
    fn name(&self) -> &'static str {
        "primary"
    }

    async fn get(&self, request: &FetchRequest) -> AcquisitionResult {
        self.fetch_page(request).await.map_err(|failure| {
            tracing::warn!(source = self.name(), ?failure, "product store call failed");
            classify(&failure)
        })
    }
}
