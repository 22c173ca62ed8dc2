//! HTTP request types for the catalog SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing GET requests against the catalog API.

use std::collections::HashMap;

use crate::clients::cancel::CancellationToken;
use crate::clients::errors::InvalidHttpRequestError;
use crate::clients::retry::RetryPolicy;

/// A GET request to be sent to the catalog API.
///
/// Query parameters keep their insertion order so that the same request
/// always produces the same URL.
///
/// # Example
///
/// ```rust
/// use storefront_catalog::clients::HttpRequest;
///
/// let request = HttpRequest::builder("products/search")
///     .query_param("q", "phone case")
///     .query_param("limit", "10")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.path_and_query(), "products/search?q=phone%20case&limit=10");
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The path (relative to the base URL) for this request.
    pub path: String,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
    /// Retry policy overriding the client's default.
    pub retry: Option<RetryPolicy>,
    /// Caller-owned cancellation signal.
    pub cancel: Option<CancellationToken>,
}

impl HttpRequest {
    /// Creates a new builder for the given path.
    #[must_use]
    pub fn builder(path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - the path is empty
    /// - a retry override has a zero timeout
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.path.trim_matches('/').is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }
        if self.retry.is_some_and(|policy| policy.timeout.is_zero()) {
            return Err(InvalidHttpRequestError::ZeroTimeout);
        }
        Ok(())
    }

    /// Returns the path with its percent-encoded query string.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        let path = self.path.trim_start_matches('/');
        if self.query.is_empty() {
            return path.to_string();
        }
        let query = self
            .query
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        format!("{path}?{query}")
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    path: String,
    query: Vec<(String, String)>,
    extra_headers: Option<HashMap<String, String>>,
    retry: Option<RetryPolicy>,
    cancel: Option<CancellationToken>,
}

impl HttpRequestBuilder {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
            extra_headers: None,
            retry: None,
            cancel: None,
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Overrides the client's retry policy for this request.
    #[must_use]
    pub const fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// Attaches a cancellation token.
    #[must_use]
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            path: self.path,
            query: self.query,
            extra_headers: self.extra_headers,
            retry: self.retry,
            cancel: self.cancel,
        };
        request.verify()?;
        Ok(request)
    }
}
