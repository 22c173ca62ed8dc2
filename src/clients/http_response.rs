//! HTTP response types for the catalog SDK.
//!
//! This module provides the [`HttpResponse`] type for accessing the status,
//! headers and parsed JSON body of a catalog API response.

use std::collections::HashMap;

/// A parsed response from the catalog API.
///
/// Header names are stored lowercase. The body is parsed as JSON; an empty
/// body becomes an empty object and an unparseable body is kept as
/// `{"raw_body": "..."}`.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use storefront_catalog::clients::HttpResponse;
///
/// let response = HttpResponse::new(
///     404,
///     HashMap::new(),
///     serde_json::json!({"message": "Product with id '0' not found"}),
/// );
///
/// assert!(!response.is_ok());
/// assert_eq!(response.error_message(), "Product with id '0' not found");
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new response.
    #[must_use]
    pub fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Parses a raw body the way the SDK stores it.
    #[must_use]
    pub fn parse_body(body_text: &str) -> serde_json::Value {
        if body_text.trim().is_empty() {
            return serde_json::json!({});
        }
        serde_json::from_str(body_text)
            .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
    }

    /// Returns `true` for 2xx responses.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Best-effort human readable description of a failed response.
    ///
    /// Uses the body's `message` or `error` field when present, otherwise the
    /// canonical reason phrase for the status code.
    #[must_use]
    pub fn error_message(&self) -> String {
        ["message", "error"]
            .iter()
            .find_map(|field| self.body.get(field).and_then(serde_json::Value::as_str))
            .map_or_else(|| self.status_text().to_string(), ToString::to_string)
    }

    /// Canonical reason phrase for the status code.
    #[must_use]
    pub fn status_text(&self) -> &'static str {
        reqwest::StatusCode::from_u16(self.code)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("Unknown Status")
    }
}
