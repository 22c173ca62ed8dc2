//! HTTP client for catalog API communication.
//!
//! This module provides the [`HttpClient`] type, which wraps a [`Transport`]
//! with per-attempt timeouts, exponential backoff and cancellation.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::cancel::CancellationToken;
use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::clients::retry::RetryPolicy;
use crate::clients::transport::{PreparedRequest, ReqwestTransport, Transport};
use crate::config::{BaseUrl, CatalogConfig};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Callback invoked before each retry with the upcoming retry number
/// (starting at 1) and the error that triggered it.
pub type RetryHook = Arc<dyn Fn(u32, &HttpError) + Send + Sync>;

/// HTTP client for making requests to the catalog API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers including User-Agent
/// - A timeout on every attempt
/// - Exponential backoff for timeouts, transport failures, 5xx and 429
/// - Caller-driven cancellation
///
/// Non-retryable responses (2xx, 3xx, and 4xx other than 429) are returned
/// as `Ok`; deciding whether they are usable is left to the caller.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_catalog::CatalogConfig;
/// use storefront_catalog::clients::{HttpClient, HttpRequest};
///
/// let config = CatalogConfig::default();
/// let client = HttpClient::new(&config);
///
/// let request = HttpRequest::builder("products/1").build().unwrap();
/// let response = client.fetch(request).await?;
/// if response.is_ok() {
///     println!("Product: {}", response.body);
/// }
/// ```
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    base_url: BaseUrl,
    default_headers: HashMap<String, String>,
    retry: RetryPolicy,
    on_retry: Option<RetryHook>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("transport", &self.transport)
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .field("retry", &self.retry)
            .field("on_retry", &self.on_retry.as_ref().map(|_| "<hook>"))
            .finish()
    }
}

impl HttpClient {
    /// Creates a new HTTP client using the `reqwest` transport.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Creates a new HTTP client over the given transport.
    #[must_use]
    pub fn with_transport(config: &CatalogConfig, transport: Arc<dyn Transport>) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}storefront-catalog v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());

        Self {
            transport,
            base_url: config.base_url().clone(),
            default_headers,
            retry: *config.retry(),
            on_retry: None,
        }
    }

    /// Installs a callback that runs before every retry.
    #[must_use]
    pub fn with_retry_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(u32, &HttpError) + Send + Sync + 'static,
    {
        self.on_retry = Some(Arc::new(hook));
        self
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the default retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Sends a GET request, retrying transient failures.
    ///
    /// Attempt `k` (counting from 0) that fails with a timeout, a transport
    /// error, a 5xx or a 429 is followed by a wait of `base_delay * 2^k` and
    /// another attempt, up to `max_retries` retries. Cancellation is checked
    /// during every attempt and every wait and is never retried.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - The caller cancels the request (`Cancelled`)
    /// - The last attempt timed out (`Timeout`) or failed in transit (`Network`, `Transport`)
    /// - A retryable status persisted past the last retry (`MaxRetries`), or
    ///   on the only attempt when no retries are configured (`Response`)
    pub async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let policy = request.retry.unwrap_or(self.retry);
        let prepared = self.prepare(&request);
        let cancel = request.cancel.as_ref();

        let mut attempt: u32 = 0;
        loop {
            let error = match self.attempt(&prepared, policy.timeout, cancel).await {
                Ok(response) if !RetryPolicy::is_retryable_status(response.code) => {
                    return Ok(response);
                }
                Ok(response) => HttpError::Response(HttpResponseError {
                    code: response.code,
                    message: response.error_message(),
                }),
                Err(error) => error,
            };

            if !error.is_retryable() {
                return Err(error);
            }
            if attempt >= policy.max_retries {
                return Err(Self::exhausted(error, attempt + 1));
            }

            let delay = policy.delay_for(attempt);
            tracing::warn!(
                url = %prepared.url,
                attempt = attempt + 1,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %error,
                "Catalog request failed, retrying"
            );
            if let Some(hook) = &self.on_retry {
                hook(attempt + 1, &error);
            }

            Self::backoff(delay, cancel).await?;
            attempt += 1;
        }
    }

    /// Resolves the request against the base URL and merges headers.
    fn prepare(&self, request: &HttpRequest) -> PreparedRequest {
        let mut headers = self.default_headers.clone();
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }
        PreparedRequest {
            url: self.base_url.join(&request.path_and_query()),
            headers,
        }
    }

    /// Runs a single attempt under the timeout, racing the cancellation token.
    async fn attempt(
        &self,
        prepared: &PreparedRequest,
        timeout: Duration,
        cancel: Option<&CancellationToken>,
    ) -> Result<HttpResponse, HttpError> {
        let send = tokio::time::timeout(timeout, self.transport.send(prepared));
        let outcome = match cancel {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => return Err(HttpError::Cancelled),
                outcome = send => outcome,
            },
            None => send.await,
        };

        outcome.unwrap_or_else(|_| {
            Err(HttpError::Timeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            })
        })
    }

    /// Sleeps for the backoff delay unless cancelled first.
    async fn backoff(delay: Duration, cancel: Option<&CancellationToken>) -> Result<(), HttpError> {
        match cancel {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => Err(HttpError::Cancelled),
                () = tokio::time::sleep(delay) => Ok(()),
            },
            None => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
        }
    }

    /// Converts the final retryable failure into the error returned to callers.
    fn exhausted(error: HttpError, tries: u32) -> HttpError {
        match error {
            HttpError::Response(e) if tries > 1 => {
                HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code: e.code,
                    tries,
                    message: e.message,
                })
            }
            other => other,
        }
    }
}
