//! OpenTDB HTTP client
//!
//! Issues the upstream GET request with a fixed timeout and a single
//! immediate retry on network failure.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::params::QueryParams;
use super::response::{ApiErrorCode, RawQuestion, TriviaResponse};

// == Fetch Outcome ==
/// Result of one upstream round trip, including the retry.
///
/// The caching decision is a pure function of the variant: `Success` and
/// `ApiError` are stored, `RetriedThenFailed` never is.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// Upstream answered with `response_code` 0 and a question batch
    Success(Vec<RawQuestion>),
    /// Upstream answered with an error code (deterministic for these params)
    ApiError(ApiErrorCode),
    /// Both the request and its retry failed (timeout, connection, bad body)
    RetriedThenFailed(String),
}

// == Question Source ==
/// Abstraction over the upstream provider.
///
/// The production implementation is [`TriviaClient`]; tests substitute a
/// scripted source to exercise the cache without a network.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Performs one fetch (with retry) and reports the measured wall-clock
    /// latency in milliseconds.
    async fn fetch(&self, params: &QueryParams) -> (FetchOutcome, f64);
}

// == Trivia Client ==
/// HTTP client for the OpenTDB question endpoint.
#[derive(Debug, Clone)]
pub struct TriviaClient {
    client: Client,
    base_url: String,
}

impl TriviaClient {
    /// Creates a client for `base_url` with the given request timeout.
    ///
    /// Falls back to a default-configured client if the builder fails,
    /// which only happens when the TLS backend cannot initialize.
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// One request attempt: GET, status check, JSON decode.
    async fn attempt(&self, params: &QueryParams) -> Result<TriviaResponse, reqwest::Error> {
        self.client
            .get(&self.base_url)
            .query(&params.to_pairs())
            .send()
            .await?
            .error_for_status()?
            .json::<TriviaResponse>()
            .await
    }
}

#[async_trait]
impl QuestionSource for TriviaClient {
    async fn fetch(&self, params: &QueryParams) -> (FetchOutcome, f64) {
        let started = Instant::now();

        // One immediate retry on failure, no backoff. Latency covers the
        // full round trip including the retry.
        let mut last_error = String::new();
        for attempt in 0..2 {
            match self.attempt(params).await {
                Ok(response) => {
                    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
                    let outcome = match ApiErrorCode::from_code(response.response_code) {
                        None => {
                            debug!(
                                questions = response.results.len(),
                                latency_ms, "upstream fetch succeeded"
                            );
                            FetchOutcome::Success(response.results)
                        }
                        Some(code) => {
                            warn!(%code, latency_ms, "upstream reported error code");
                            FetchOutcome::ApiError(code)
                        }
                    };
                    return (outcome, latency_ms);
                }
                Err(err) => {
                    warn!(attempt, error = %err, "upstream request failed");
                    last_error = err.to_string();
                }
            }
        }

        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
        (FetchOutcome::RetriedThenFailed(last_error), latency_ms)
    }
}
