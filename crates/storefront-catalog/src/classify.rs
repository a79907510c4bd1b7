//! Maps raw store failures onto [`ErrorKind`] categories.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//!
//! | Input | Category |
//! |-------|----------|
//! | transport abort / timeout | [`ErrorKind::Timeout`] |
//! | HTTP 401 | [`ErrorKind::Unauthorized`] |
//! | HTTP 404 | [`ErrorKind::NotFound`] |
//! | HTTP 500 | [`ErrorKind::ServerFault`] |
//! | any other HTTP response | [`ErrorKind::GenericApiFault`] |
//! | no response at all | [`ErrorKind::NetworkFault`] |
//!
//! Classification is pure and total: every [`RawFailure`] yields exactly one
//! [`ClassifiedError`].

use serde_json::Value;

use crate::error::{ClassifiedError, ErrorKind};

/// A store call failure before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawFailure {
    /// The transport gave up: timeout, or the connection dropped mid-response.
    Timeout { detail: String },
    /// The store answered with a status (or envelope) signalling failure.
    Http { status: u16, body: Option<String> },
    /// The store answered successfully but the body could not be decoded.
    Malformed { detail: String },
    /// No response was received (DNS, refused connection, TLS handshake).
    Unreachable { detail: String },
}

impl From<reqwest::Error> for RawFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_body() {
            RawFailure::Timeout {
                detail: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            RawFailure::Http {
                status: status.as_u16(),
                body: None,
            }
        } else if err.is_decode() {
            RawFailure::Malformed {
                detail: err.to_string(),
            }
        } else {
            RawFailure::Unreachable {
                detail: err.to_string(),
            }
        }
    }
}

#[must_use]
pub fn classify(failure: &RawFailure) -> ClassifiedError {
    match failure {
        RawFailure::Timeout { .. } => ClassifiedError::from_kind(ErrorKind::Timeout),
        RawFailure::Http { status, body } => {
            let kind = match status {
                401 => ErrorKind::Unauthorized,
                404 => ErrorKind::NotFound,
                500 => ErrorKind::ServerFault,
                _ => ErrorKind::GenericApiFault,
            };
            let parsed = body
                .as_deref()
                .and_then(|b| serde_json::from_str::<Value>(b).ok());
            let message = parsed
                .as_ref()
                .and_then(extract_message)
                .unwrap_or_else(|| kind.default_message().to_string());
            ClassifiedError {
                kind,
                message,
                code: parsed.as_ref().and_then(extract_code),
            }
        }
        RawFailure::Malformed { .. } => ClassifiedError::from_kind(ErrorKind::GenericApiFault),
        RawFailure::Unreachable { .. } => ClassifiedError::from_kind(ErrorKind::NetworkFault),
    }
}

/// `message`, then `error.message`, then a bare `error` string.
fn extract_message(body: &Value) -> Option<String> {
    let candidates = [
        body.get("message"),
        body.get("error").and_then(|e| e.get("message")),
        body.get("error"),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_owned)
}

/// `code`, then `error.status`, then `error.code`; numbers are stringified.
fn extract_code(body: &Value) -> Option<String> {
    let error = body.get("error");
    let candidates = [
        body.get("code"),
        error.and_then(|e| e.get("status")),
        error.and_then(|e| e.get("code")),
    ];
    candidates.into_iter().flatten().find_map(|v| match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, body: Option<&str>) -> RawFailure {
        RawFailure::Http {
            status,
            body: body.map(str::to_owned),
        }
    }

    #[test]
    fn timeout_maps_to_timeout() {
        let err = classify(&RawFailure::Timeout {
            detail: "operation timed out".to_owned(),
        });
        assert_eq!(err.kind, ErrorKind::Timeout);
        assert_eq!(err.message, ErrorKind::Timeout.default_message());
        assert!(err.code.is_none());
    }

    #[test]
    fn status_codes_map_in_order() {
        assert_eq!(classify(&http(401, None)).kind, ErrorKind::Unauthorized);
        assert_eq!(classify(&http(404, None)).kind, ErrorKind::NotFound);
        assert_eq!(classify(&http(500, None)).kind, ErrorKind::ServerFault);
        assert_eq!(classify(&http(503, None)).kind, ErrorKind::GenericApiFault);
        assert_eq!(classify(&http(403, None)).kind, ErrorKind::GenericApiFault);
        assert_eq!(classify(&http(200, None)).kind, ErrorKind::GenericApiFault);
    }

    #[test]
    fn unreachable_maps_to_network_fault() {
        let err = classify(&RawFailure::Unreachable {
            detail: "connection refused".to_owned(),
        });
        assert_eq!(err.kind, ErrorKind::NetworkFault);
    }

    #[test]
    fn malformed_body_maps_to_generic_api_fault() {
        let err = classify(&RawFailure::Malformed {
            detail: "expected value at line 1".to_owned(),
        });
        assert_eq!(err.kind, ErrorKind::GenericApiFault);
    }

    #[test]
    fn message_taken_from_top_level_field() {
        let err = classify(&http(
            401,
            Some(r#"{"success":false,"message":"Unauthorised user!"}"#),
        ));
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.message, "Unauthorised user!");
    }

    #[test]
    fn message_and_code_taken_from_nested_error_object() {
        let err = classify(&http(
            401,
            Some(
                r#"{"error":{"code":401,"message":"Missing or invalid credentials.","status":"UNAUTHENTICATED"}}"#,
            ),
        ));
        assert_eq!(err.message, "Missing or invalid credentials.");
        assert_eq!(err.code.as_deref(), Some("UNAUTHENTICATED"));
    }

    #[test]
    fn numeric_code_is_stringified() {
        let err = classify(&http(500, Some(r#"{"code":17,"error":"boom"}"#)));
        assert_eq!(err.kind, ErrorKind::ServerFault);
        assert_eq!(err.message, "boom");
        assert_eq!(err.code.as_deref(), Some("17"));
    }

    #[test]
    fn non_json_body_falls_back_to_default_message() {
        let err = classify(&http(404, Some("<html>Not Found</html>")));
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, ErrorKind::NotFound.default_message());
        assert!(err.code.is_none());
    }

    #[test]
    fn blank_message_is_ignored() {
        let err = classify(&http(500, Some(r#"{"message":"   "}"#)));
        assert_eq!(err.message, ErrorKind::ServerFault.default_message());
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable() {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1")
            .send()
            .await
            .unwrap_err();
        let raw = RawFailure::from(err);
        assert!(
            matches!(raw, RawFailure::Unreachable { .. }),
            "expected Unreachable, got {raw:?}"
        );
        assert_eq!(classify(&raw).kind, ErrorKind::NetworkFault);
    }

    #[test]
    fn only_unauthorized_and_not_found_trigger_fallback() {
        assert!(ErrorKind::Unauthorized.triggers_fallback());
        assert!(ErrorKind::NotFound.triggers_fallback());
        for kind in [
            ErrorKind::ServerFault,
            ErrorKind::Timeout,
            ErrorKind::NetworkFault,
            ErrorKind::GenericApiFault,
        ] {
            assert!(!kind.triggers_fallback(), "{kind} must not trigger fallback");
        }
    }
}
