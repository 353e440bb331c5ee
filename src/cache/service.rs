//! Fetch Cache Module
//!
//! The caching fetch layer between the route handlers and the upstream
//! provider: cache check, upstream call, and the store decision, serialized
//! under one lock so concurrent misses cannot double-issue the same request.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{CacheStats, ResponseCache};
use crate::upstream::{ApiErrorCode, FetchOutcome, QueryParams, QuestionSource, RawQuestion};

// == Fetch Error ==
/// What a fetch can fail with, from the caller's point of view.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Upstream reported an error code; served from cache or fresh
    #[error(transparent)]
    Api(ApiErrorCode),
    /// The request and its retry both failed; never cached
    #[error("try again later: {0}")]
    Network(String),
}

// == Fetch Result ==
/// Outcome of one [`FetchCache::get`] call.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// The question batch or the typed failure
    pub payload: Result<Vec<RawQuestion>, FetchError>,
    /// True when the payload came from a valid cache entry
    pub served_from_cache: bool,
    /// Upstream round-trip time in milliseconds; 0 for cache hits
    pub latency_ms: f64,
}

// == Fetch Cache ==
/// Caching front of the upstream question source.
///
/// Successful batches and upstream error codes are cached for the TTL;
/// network failures are returned but never stored, so the next call tries
/// upstream again.
#[derive(Clone)]
pub struct FetchCache {
    source: Arc<dyn QuestionSource>,
    store: Arc<Mutex<ResponseCache>>,
}

impl FetchCache {
    // == Constructor ==
    /// Creates a fetch cache over `source` backed by `store`.
    pub fn new(source: Arc<dyn QuestionSource>, store: Arc<Mutex<ResponseCache>>) -> Self {
        Self { source, store }
    }

    // == Get ==
    /// Serves `params` from the cache when possible, fetching otherwise.
    pub async fn get(&self, params: &QueryParams) -> FetchResult {
        self.get_inner(params, true).await
    }

    // == Get Fresh ==
    /// Always fetches upstream, skipping the cache read. The result is
    /// still stored, so a following [`FetchCache::get`] can hit.
    ///
    /// Game starts use this: a new game should never replay a cached batch.
    pub async fn get_fresh(&self, params: &QueryParams) -> FetchResult {
        self.get_inner(params, false).await
    }

    async fn get_inner(&self, params: &QueryParams, use_cache: bool) -> FetchResult {
        let key = params.cache_key();

        // The lock spans check, fetch and store: two concurrent misses on
        // the same key would otherwise both call upstream.
        let mut store = self.store.lock().await;

        if use_cache {
            if let Some(payload) = store.lookup(&key) {
                debug!(%key, "cache hit");
                return FetchResult {
                    payload: payload.map_err(FetchError::Api),
                    served_from_cache: true,
                    latency_ms: 0.0,
                };
            }
        }

        let (outcome, latency_ms) = self.source.fetch(params).await;

        let payload = match outcome {
            FetchOutcome::Success(batch) => {
                store.store(key, Ok(batch.clone()));
                Ok(batch)
            }
            FetchOutcome::ApiError(code) => {
                // A deterministic "this query fails" answer is worth caching
                // for the TTL window as much as a success is.
                store.store(key, Err(code));
                Err(FetchError::Api(code))
            }
            FetchOutcome::RetriedThenFailed(reason) => Err(FetchError::Network(reason)),
        };

        FetchResult {
            payload,
            served_from_cache: false,
            latency_ms,
        }
    }

    // == Stats ==
    /// Snapshot of the underlying cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    // == Store Handle ==
    /// Shared handle to the backing store, for the cleanup task.
    pub fn store_handle(&self) -> Arc<Mutex<ResponseCache>> {
        self.store.clone()
    }
}
