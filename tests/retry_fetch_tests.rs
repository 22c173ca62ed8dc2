//! Integration tests for the retrying fetch.
//!
//! These tests drive [`HttpClient`] over a scripted in-process transport with
//! Tokio's paused clock, so backoff delays and timeouts are observed exactly
//! without waiting in real time.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storefront_catalog::clients::{
    CancellationToken, HttpClient, HttpError, HttpRequest, HttpResponse, PreparedRequest,
    RetryPolicy, Transport,
};
use storefront_catalog::CatalogConfig;
use tokio::time::Instant;

/// What the scripted transport does on one attempt.
#[derive(Clone, Copy, Debug)]
enum Step {
    Status(u16),
    Fail,
    Hang,
}

/// Transport that replays a script and records when it was called.
#[derive(Debug)]
struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    then: Step,
    calls: Mutex<Vec<Instant>>,
}

impl ScriptedTransport {
    fn new(steps: &[Step], then: Step) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.iter().copied().collect()),
            then,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, _request: &PreparedRequest) -> Result<HttpResponse, HttpError> {
        self.calls.lock().unwrap().push(Instant::now());
        let step = self.steps.lock().unwrap().pop_front().unwrap_or(self.then);

        match step {
            Step::Status(code) => Ok(HttpResponse::new(
                code,
                HashMap::new(),
                serde_json::json!({ "status": code }),
            )),
            Step::Fail => Err(HttpError::Transport("connection reset".to_string())),
            Step::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(HttpResponse::new(200, HashMap::new(), serde_json::json!({})))
            }
        }
    }
}

fn client(transport: Arc<ScriptedTransport>, policy: RetryPolicy) -> HttpClient {
    let config = CatalogConfig::builder().retry(policy).build().unwrap();
    HttpClient::with_transport(&config, transport)
}

fn policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        base_delay: Duration::from_millis(1000),
        timeout: Duration::from_millis(10_000),
    }
}

fn request() -> HttpRequest {
    HttpRequest::builder("products").build().unwrap()
}

/// Asserts that consecutive calls are separated by the given delays.
fn assert_gaps(calls: &[Instant], expected_ms: &[u64]) {
    assert_eq!(calls.len(), expected_ms.len() + 1, "unexpected call count");
    for (window, expected) in calls.windows(2).zip(expected_ms) {
        let gap = window[1] - window[0];
        let expected = Duration::from_millis(*expected);
        assert!(
            gap >= expected && gap < expected + Duration::from_millis(5),
            "expected a gap of {expected:?}, got {gap:?}"
        );
    }
}

// ============================================================================
// Retry Counting and Backoff
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_failures_then_success_backs_off_exponentially() {
    let transport = ScriptedTransport::new(
        &[Step::Status(500), Step::Status(503)],
        Step::Status(200),
    );
    let client = client(transport.clone(), policy(3));

    let response = tokio_test::assert_ok!(client.fetch(request()).await);

    assert_eq!(response.code, 200);
    assert_gaps(&transport.calls(), &[1000, 2000]);
}

#[tokio::test(start_paused = true)]
async fn test_persistent_server_error_exhausts_all_attempts() {
    let transport = ScriptedTransport::new(&[], Step::Status(500));
    let client = client(transport.clone(), policy(3));

    let error = tokio_test::assert_err!(client.fetch(request()).await);

    assert!(matches!(
        error,
        HttpError::MaxRetries(ref e) if e.tries == 4 && e.code == 500
    ));
    assert_gaps(&transport.calls(), &[1000, 2000, 4000]);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limited_response_is_retried() {
    let transport = ScriptedTransport::new(&[Step::Status(429)], Step::Status(200));
    let client = client(transport.clone(), policy(3));

    let response = client.fetch(request()).await.unwrap();

    assert_eq!(response.code, 200);
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_transport_failure_is_retried() {
    let transport = ScriptedTransport::new(&[Step::Fail, Step::Fail], Step::Status(200));
    let client = client(transport.clone(), policy(3));

    let response = client.fetch(request()).await.unwrap();

    assert_eq!(response.code, 200);
    assert_gaps(&transport.calls(), &[1000, 2000]);
}

#[tokio::test(start_paused = true)]
async fn test_transport_failure_surfaces_after_last_retry() {
    let transport = ScriptedTransport::new(&[], Step::Fail);
    let client = client(transport.clone(), policy(2));

    let error = client.fetch(request()).await.unwrap_err();

    assert!(matches!(error, HttpError::Transport(_)));
    assert_eq!(transport.call_count(), 3);
}

// ============================================================================
// Non-Retryable Outcomes
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_not_found_is_returned_without_retry() {
    let transport = ScriptedTransport::new(&[], Step::Status(404));
    let client = client(transport.clone(), policy(3));

    let response = client.fetch(request()).await.unwrap();

    assert_eq!(response.code, 404);
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_bad_request_is_returned_without_retry() {
    let transport = ScriptedTransport::new(&[], Step::Status(400));
    let client = client(transport.clone(), policy(3));

    let response = client.fetch(request()).await.unwrap();

    assert_eq!(response.code, 400);
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_no_retries_policy_reports_plain_response_error() {
    let transport = ScriptedTransport::new(&[], Step::Status(502));
    let client = client(
        transport.clone(),
        RetryPolicy::no_retries(Duration::from_secs(1)),
    );

    let error = client.fetch(request()).await.unwrap_err();

    assert!(matches!(error, HttpError::Response(ref e) if e.code == 502));
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_request_is_rejected_before_sending() {
    let transport = ScriptedTransport::new(&[], Step::Status(200));
    let client = client(transport.clone(), policy(3));

    let mut invalid = request();
    invalid.path = "/".to_string();

    let error = client.fetch(invalid).await.unwrap_err();

    assert!(matches!(error, HttpError::InvalidRequest(_)));
    assert_eq!(transport.call_count(), 0);
}

// ============================================================================
// Timeouts
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_hanging_attempt_times_out_and_is_retried() {
    let transport = ScriptedTransport::new(&[Step::Hang], Step::Status(200));
    let client = client(
        transport.clone(),
        RetryPolicy {
            max_retries: 1,
            base_delay: Duration::from_millis(250),
            timeout: Duration::from_millis(100),
        },
    );

    let response = client.fetch(request()).await.unwrap();

    assert_eq!(response.code, 200);
    // 100ms attempt timeout followed by the 250ms backoff.
    assert_gaps(&transport.calls(), &[350]);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_surfaces_after_last_retry() {
    let transport = ScriptedTransport::new(&[], Step::Hang);
    let client = client(
        transport.clone(),
        RetryPolicy {
            max_retries: 1,
            base_delay: Duration::from_millis(10),
            timeout: Duration::from_millis(100),
        },
    );

    let error = client.fetch(request()).await.unwrap_err();

    assert!(matches!(error, HttpError::Timeout { timeout_ms: 100 }));
    assert_eq!(transport.call_count(), 2);
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_cancelled_token_stops_before_first_attempt() {
    let transport = ScriptedTransport::new(&[], Step::Status(200));
    let client = client(transport.clone(), policy(3));

    let token = CancellationToken::new();
    token.cancel();
    let request = HttpRequest::builder("products")
        .cancel_token(token)
        .build()
        .unwrap();

    let error = client.fetch(request).await.unwrap_err();

    assert!(matches!(error, HttpError::Cancelled));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_backoff_is_terminal() {
    let transport = ScriptedTransport::new(&[], Step::Status(500));
    let client = client(transport.clone(), policy(3));

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        canceller.cancel();
    });

    let request = HttpRequest::builder("products")
        .cancel_token(token)
        .build()
        .unwrap();
    let error = client.fetch(request).await.unwrap_err();

    assert!(matches!(error, HttpError::Cancelled));
    // Attempts at 0ms and 1000ms; the 2000ms backoff is interrupted.
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_attempt_is_terminal() {
    let transport = ScriptedTransport::new(&[], Step::Hang);
    let client = client(transport.clone(), policy(3));

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let request = HttpRequest::builder("products")
        .cancel_token(token)
        .build()
        .unwrap();
    let error = client.fetch(request).await.unwrap_err();

    assert!(matches!(error, HttpError::Cancelled));
    assert_eq!(transport.call_count(), 1);
}

// ============================================================================
// Policy Overrides and Hooks
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_request_policy_overrides_client_policy() {
    let transport = ScriptedTransport::new(&[], Step::Status(500));
    let client = client(transport.clone(), policy(3));

    let request = HttpRequest::builder("products")
        .retry(RetryPolicy {
            max_retries: 1,
            base_delay: Duration::from_millis(200),
            timeout: Duration::from_secs(1),
        })
        .build()
        .unwrap();
    let error = client.fetch(request).await.unwrap_err();

    assert!(matches!(error, HttpError::MaxRetries(ref e) if e.tries == 2));
    assert_gaps(&transport.calls(), &[200]);
}

#[tokio::test(start_paused = true)]
async fn test_retry_hook_sees_each_retry() {
    let transport = ScriptedTransport::new(
        &[Step::Status(500), Step::Fail],
        Step::Status(200),
    );
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);
    let client = client(transport, policy(3)).with_retry_hook(move |attempt, error| {
        recorder
            .lock()
            .unwrap()
            .push((attempt, error.is_retryable()));
    });

    client.fetch(request()).await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![(1, true), (2, true)]);
}
