//! Retry with exponential back-off for GET requests against the ERP.
//!
//! Unlike a typed-error retry loop, [`fetch_with_retry`] hands back the raw
//! [`reqwest::Response`] so callers can tell an HTTP error status (an
//! `Ok` response whose status is not 2xx) apart from a transport failure
//! (an `Err`).

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

/// How many times to retry and how long to wait before the first retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one. `0` disables retries.
    pub max_retries: u32,
    /// Sleep before the first retry; doubled after every retry.
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_retries: u32, initial_backoff_ms: u64) -> Self {
        Self {
            max_retries,
            initial_backoff: Duration::from_millis(initial_backoff_ms),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, 300)
    }
}

/// Returns `true` for statuses worth retrying: 429 and every 5xx.
///
/// Other 4xx responses are client errors; asking again returns the same
/// answer.
pub(crate) fn is_retriable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Sends a GET to `url`, retrying on 429, 5xx, and transport errors.
///
/// Back-off schedule with the default policy (`300 ms`, 3 retries):
///
/// | Attempt | Sleep before next attempt |
/// |---------|---------------------------|
/// | 1       | 300 ms                    |
/// | 2       | 600 ms                    |
/// | 3       | 1 200 ms                  |
/// | 4       | — (last attempt)          |
///
/// A 2xx response, or any non-retriable status, is returned as soon as it
/// arrives. Once retries are exhausted the most recent failing response is
/// returned; if no attempt ever produced a response, the last transport
/// error is returned instead.
///
/// # Errors
///
/// Returns the last [`reqwest::Error`] when every attempt failed at the
/// transport level.
pub async fn fetch_with_retry(
    client: &Client,
    url: &str,
    policy: RetryPolicy,
) -> Result<Response, reqwest::Error> {
    let mut backoff = policy.initial_backoff;
    let mut last_response: Option<Response> = None;
    let mut attempt = 0u32;

    loop {
        let failure = match client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) if !is_retriable_status(response.status()) => return Ok(response),
            other => other,
        };

        if attempt >= policy.max_retries {
            return match failure {
                Ok(response) => Ok(response),
                Err(err) => last_response.map_or(Err(err), Ok),
            };
        }

        let cause = match &failure {
            Ok(response) => format!("HTTP {}", response.status()),
            Err(err) => err.to_string(),
        };
        if let Ok(response) = failure {
            last_response = Some(response);
        }

        attempt += 1;
        tracing::warn!(
            url,
            attempt,
            max_retries = policy.max_retries,
            delay_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX),
            cause = %cause,
            "ERP request failed; retrying after back-off"
        );
        tokio::time::sleep(backoff).await;
        backoff = backoff.saturating_mul(2);
    }
}
