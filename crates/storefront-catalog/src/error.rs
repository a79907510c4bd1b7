use std::fmt;

use thiserror::Error;

/// Errors raised while building a store client.
///
/// Runtime acquisition failures never use this type; they are reported as
/// [`ClassifiedError`] through the acquisition controller.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Semantic category of a failed store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    NotFound,
    ServerFault,
    Timeout,
    NetworkFault,
    GenericApiFault,
}

impl ErrorKind {
    /// Source-level unavailability: the whole store is unusable for this
    /// caller, as opposed to a transient or per-request fault.
    #[must_use]
    pub fn triggers_fallback(self) -> bool {
        matches!(self, ErrorKind::Unauthorized | ErrorKind::NotFound)
    }

    /// Message used when the store's response carries none.
    #[must_use]
    pub fn default_message(self) -> &'static str {
        match self {
            ErrorKind::Unauthorized => "not authorized to read products",
            ErrorKind::NotFound => "product listing endpoint not found",
            ErrorKind::ServerFault => "product store reported an internal error",
            ErrorKind::Timeout => "request to product store timed out",
            ErrorKind::NetworkFault => "product store is unreachable",
            ErrorKind::GenericApiFault => "product store returned an unexpected response",
        }
    }

    /// Shopper-facing text for this category.
    #[must_use]
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorKind::Unauthorized => "Please sign in again to see the full catalog.",
            ErrorKind::NotFound => "The catalog is not available right now.",
            ErrorKind::ServerFault => "Something went wrong on our side. Try again shortly.",
            ErrorKind::Timeout => "The catalog took too long to respond. Try again.",
            ErrorKind::NetworkFault => "Could not reach the catalog. Check your connection.",
            ErrorKind::GenericApiFault => "We could not load products. Try again.",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::NotFound => "not_found",
            ErrorKind::ServerFault => "server_fault",
            ErrorKind::Timeout => "timeout",
            ErrorKind::NetworkFault => "network_fault",
            ErrorKind::GenericApiFault => "generic_api_fault",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A store failure after classification. Created once per failed call and
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub message: String,
    /// Provider-specific code, passed through untouched.
    pub code: Option<String>,
}

impl ClassifiedError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// A classified error carrying the category's default message.
    #[must_use]
    pub fn from_kind(kind: ErrorKind) -> Self {
        Self::new(kind, kind.default_message())
    }
}
