//! HTTP client types for catalog API communication.
//!
//! This module provides the retrying HTTP layer that sits between the
//! catalog client and the network.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client with timeout, backoff and cancellation
//! - [`HttpRequest`]: A GET request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`RetryPolicy`]: Attempt count, base delay and per-attempt timeout
//! - [`CancellationToken`]: Caller-owned cancellation signal
//! - [`Transport`]: The single-attempt seam, implemented by [`ReqwestTransport`]
//!
//! # Retry Behavior
//!
//! - **Timeouts, network errors**: retried
//! - **5xx and 429**: retried; after the last retry the call fails with
//!   [`MaxHttpRetriesExceededError`]
//! - **Other 4xx**: returned to the caller immediately as a response
//! - **Cancellation**: terminal, never retried
//!
//! The wait before attempt `k + 1` is `base_delay * 2^k`.

mod cancel;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod retry;
mod transport;

pub use cancel::CancellationToken;
pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, RetryHook, SDK_VERSION};
pub use http_request::{HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use retry::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT};
pub use transport::{PreparedRequest, ReqwestTransport, Transport};
