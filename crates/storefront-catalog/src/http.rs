//! Plumbing shared by both store clients.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};

use crate::classify::RawFailure;
use crate::error::CatalogError;

/// Builds a `reqwest::Client` with the shared timeout and `User-Agent`.
///
/// Both stores get the same timeout so neither is favoured when one is slow.
pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, CatalogError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Resolves `endpoint` against `base_url`.
///
/// The base is normalised to end with exactly one slash so that joining
/// appends to its path instead of replacing the last segment.
pub(crate) fn endpoint_url(base_url: &str, endpoint: &str) -> Result<Url, CatalogError> {
    let invalid = |reason: String| CatalogError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason,
    };
    let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
    let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme \"{}\"", base.scheme())));
    }
    base.join(endpoint).map_err(|e| invalid(e.to_string()))
}

/// Sends the request and returns the status and body of a 2xx response.
///
/// Non-2xx responses become [`RawFailure::Http`] with the body attached so the
/// classifier can pick up the store's message.
pub(crate) async fn fetch_body(request: RequestBuilder) -> Result<(StatusCode, String), RawFailure> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(RawFailure::Http {
            status: status.as_u16(),
            body: Some(body).filter(|b| !b.trim().is_empty()),
        });
    }

    Ok((status, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_appends_to_base_path() {
        let url = endpoint_url("http://localhost:5000/store", "api/shop/products/get").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/store/api/shop/products/get");
    }

    #[test]
    fn endpoint_url_tolerates_trailing_slashes() {
        let url = endpoint_url("http://localhost:8080//", "v1/products:query").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v1/products:query");
    }

    #[test]
    fn endpoint_url_rejects_garbage() {
        let err = endpoint_url("not a url", "v1/products:query").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn endpoint_url_rejects_non_http_scheme() {
        let err = endpoint_url("ftp://files.example.com", "v1/products:query").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidBaseUrl { .. }));
    }
}
