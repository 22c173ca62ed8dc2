//! HTTP-specific error types for the catalog SDK.
//!
//! This module contains error types for HTTP operations, including response
//! errors, retry exhaustion, timeouts, cancellation and request validation
//! failures.
//!
//! # Error Handling
//!
//! The SDK uses specific error types for different failure scenarios:
//!
//! - [`HttpResponseError`]: A non-2xx HTTP response
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted on a retryable status
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_catalog::clients::{HttpClient, HttpRequest, HttpError};
//!
//! match client.fetch(request).await {
//!     Ok(response) => println!("Status {}", response.code),
//!     Err(HttpError::MaxRetries(e)) => {
//!         println!("Retries exhausted after {} tries", e.tries);
//!     }
//!     Err(HttpError::Timeout { timeout_ms }) => {
//!         println!("No answer within {timeout_ms}ms");
//!     }
//!     Err(HttpError::Cancelled) => println!("Cancelled by caller"),
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error describing an HTTP response with a non-successful status.
///
/// # Example
///
/// ```rust
/// use storefront_catalog::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "Product with id '999' not found".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "HTTP 404: Product with id '999' not found");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Message taken from the response body, or the status reason phrase.
    pub message: String,
}

/// Error returned when maximum retry attempts have been exhausted.
///
/// This error is raised when a request keeps failing with a retryable
/// status (5xx or 429) after all configured attempts have been made.
///
/// # Example
///
/// ```rust
/// use storefront_catalog::clients::MaxHttpRetriesExceededError;
///
/// let error = MaxHttpRetriesExceededError {
///     code: 503,
///     tries: 4,
///     message: "Service Unavailable".to_string(),
/// };
///
/// assert!(error.to_string().starts_with("Exceeded maximum retry count of 4"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Exceeded maximum retry count of {tries}. Last response: HTTP {code}: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Message from the last response.
    pub message: String,
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request path is empty.
    #[error("Cannot send a request without a path.")]
    EmptyPath,

    /// The per-attempt timeout is zero.
    #[error("Cannot send a request with a zero timeout.")]
    ZeroTimeout,
}

/// Unified error type for all HTTP-related errors.
///
/// Use [`HttpError::is_retryable`] to tell transient failures from terminal ones.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A retryable status when the policy allowed no retries.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted on a retryable status.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The attempt did not complete within the per-attempt timeout.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// The caller cancelled the request.
    #[error("Request was cancelled")]
    Cancelled,

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failure reported by a non-reqwest transport.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl HttpError {
    /// Returns `true` for failures expected to be transient.
    ///
    /// Timeouts, network and transport failures, 5xx and 429 are retryable.
    /// Cancellation, validation failures and exhausted retries are not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Response(e) => super::RetryPolicy::is_retryable_status(e.code),
            Self::Timeout { .. } | Self::Network(_) | Self::Transport(_) => true,
            Self::MaxRetries(_) | Self::InvalidRequest(_) | Self::Cancelled => false,
        }
    }

    /// The HTTP status code behind this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            _ => None,
        }
    }
}
