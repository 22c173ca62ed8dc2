//! Transport seam between the retry loop and the network.
//!
//! [`HttpClient`](crate::clients::HttpClient) owns retry, timeout and
//! cancellation handling; a [`Transport`] only performs a single attempt.
//! [`ReqwestTransport`] is the production implementation.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;

use crate::clients::errors::HttpError;
use crate::clients::http_response::HttpResponse;

/// A fully resolved request handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedRequest {
    /// Absolute URL including the query string.
    pub url: String,
    /// Headers to send.
    pub headers: HashMap<String, String>,
}

/// Performs a single GET attempt.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status, and `Err` only when no response was obtained.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends the request once.
    async fn send(&self, request: &PreparedRequest) -> Result<HttpResponse, HttpError>;
}

/// [`Transport`] backed by a `reqwest` client using rustls.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a fresh `reqwest` client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    /// Wraps an existing `reqwest` client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<HttpResponse, HttpError> {
        let mut req_builder = self.client.get(&request.url);
        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        Ok(HttpResponse::new(
            code,
            headers,
            HttpResponse::parse_body(&body_text),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_transport_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestTransport>();
    }

    #[tokio::test]
    async fn test_send_returns_non_success_status_as_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products/0"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"message": "Product with id '0' not found"})),
            )
            .mount(&mock_server)
            .await;

        let transport = ReqwestTransport::new();
        let request = PreparedRequest {
            url: format!("{}/products/0", mock_server.uri()),
            headers: HashMap::new(),
        };

        let response = transport.send(&request).await.unwrap();
        assert_eq!(response.code, 404);
        assert_eq!(response.error_message(), "Product with id '0' not found");
    }

    #[tokio::test]
    async fn test_send_forwards_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products/category-list"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["laptops"])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = ReqwestTransport::new();
        let mut headers = HashMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        let request = PreparedRequest {
            url: format!("{}/products/category-list", mock_server.uri()),
            headers,
        };

        let response = transport.send(&request).await.unwrap();
        assert!(response.is_ok());
        assert_eq!(response.body, serde_json::json!(["laptops"]));
    }

    #[tokio::test]
    async fn test_send_reports_network_errors() {
        let transport = ReqwestTransport::new();
        let request = PreparedRequest {
            // Port 9 (discard) on localhost is expected to refuse connections.
            url: "http://127.0.0.1:9/products".to_string(),
            headers: HashMap::new(),
        };

        let result = transport.send(&request).await;
        assert!(matches!(result, Err(HttpError::Network(_))));
    }
}
