//! Resilient store wrapper.
//!
//! Wraps a [`RemoteCache`] with a bounded retry budget and linear backoff
//! for transient faults, and distinguishes three operation contracts:
//!
//! - [`ResilientStore::get`] propagates an error once the budget is
//!   exhausted (callers on this path must know the cache is unavailable);
//! - [`ResilientStore::cache_set`] swallows exhaustion, a cache write is
//!   never guaranteed;
//! - [`ResilientStore::cache_get`] returns empty on exhaustion and consults
//!   a bounded in-process memoization table first.
//!
//! The memoization table is size-bounded only. Its entries live for the
//! process lifetime (or until evicted by capacity) independent of the
//! remote entry's TTL, so a value that has expired remotely may still be
//! observed as present through `cache_get`. That divergence is inherited
//! behavior, kept deliberately; see DESIGN.md.

use super::errors::{StoreError, StoreResult};
use super::traits::RemoteCache;
use crate::config::StoreConfig;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Shared, retry-aware front to the remote cache.
///
/// Cloned freely; all clones share the remote client, the memoization table
/// and the cancellation token.
#[derive(Clone)]
pub struct ResilientStore {
    remote: Arc<dyn RemoteCache>,
    attempts: u32,
    base_delay: Duration,
    memo: moka::future::Cache<String, String>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for ResilientStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientStore")
            .field("provider", &self.remote.provider_name())
            .field("attempts", &self.attempts)
            .field("base_delay", &self.base_delay)
            .field("memo_entries", &self.memo.entry_count())
            .finish()
    }
}

impl ResilientStore {
    /// Build a store from configuration.
    ///
    /// `cancel` aborts in-flight backoff sleeps when the surrounding
    /// request or process shuts down.
    pub fn from_config(
        remote: Arc<dyn RemoteCache>,
        config: &StoreConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self::with_policy(
            remote,
            config.retry_attempts,
            config.retry_base_delay(),
            config.memo_capacity,
            cancel,
        )
    }

    /// Build a store with an explicit retry policy.
    pub fn with_policy(
        remote: Arc<dyn RemoteCache>,
        attempts: u32,
        base_delay: Duration,
        memo_capacity: u64,
        cancel: CancellationToken,
    ) -> Self {
        let memo = moka::future::Cache::builder()
            .max_capacity(memo_capacity)
            .build();

        Self {
            remote,
            attempts: attempts.max(1),
            base_delay,
            memo,
            cancel,
        }
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &'static str {
        self.remote.provider_name()
    }

    /// Reachability of the remote backend (single attempt, no retry).
    pub async fn health_check(&self) -> StoreResult<bool> {
        self.remote.health_check().await
    }

    /// Read a key, retrying transient faults.
    ///
    /// Exhausting the budget propagates the last transient fault: business
    /// logic on this path must know when the cache is truly unavailable.
    pub async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.with_retry("get", || self.remote.get(key)).await
    }

    /// Best-effort write, retrying transient faults.
    ///
    /// Exhaustion is swallowed: callers must not treat a cache write as
    /// guaranteed.
    pub async fn cache_set(&self, key: &str, value: &str, ttl: Duration) {
        match self
            .with_retry("set", || self.remote.set(key, value, ttl))
            .await
        {
            Ok(()) => {}
            Err(error) => {
                warn!(key = key, error = %error, "cache write dropped after retry budget");
            }
        }
    }

    /// Best-effort read through the memoization table.
    ///
    /// Successful non-empty reads are memoized; misses and failures are
    /// not. Exhaustion returns empty instead of propagating.
    pub async fn cache_get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.memo.get(key).await {
            debug!(key = key, "memoized cache HIT");
            return Some(value);
        }

        match self.with_retry("get", || self.remote.get(key)).await {
            Ok(Some(value)) => {
                self.memo.insert(key.to_string(), value.clone()).await;
                Some(value)
            }
            Ok(None) => None,
            Err(error) => {
                warn!(key = key, error = %error, "cache read degraded to miss after retry budget");
                None
            }
        }
    }

    /// Run `operation` up to the attempt budget, sleeping
    /// `attempt_index * base_delay` before each retry. Only transient
    /// faults are retried; anything else propagates immediately.
    async fn with_retry<T, Fut>(
        &self,
        operation: &'static str,
        mut run: impl FnMut() -> Fut,
    ) -> StoreResult<T>
    where
        Fut: Future<Output = StoreResult<T>>,
    {
        let mut last_transient = None;

        for attempt in 0..self.attempts {
            let backoff = self.base_delay * attempt;
            if !backoff.is_zero() {
                tokio::select! {
                    () = self.cancel.cancelled() => return Err(StoreError::Cancelled),
                    () = tokio::time::sleep(backoff) => {}
                }
            }

            match run().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transient() => {
                    debug!(
                        operation = operation,
                        attempt = attempt + 1,
                        max_attempts = self.attempts,
                        error = %error,
                        "transient cache fault"
                    );
                    last_transient = Some(error);
                }
                Err(error) => return Err(error),
            }
        }

        // attempts is clamped to >= 1, so at least one run recorded a fault
        Err(last_transient.expect("retry loop ran at least once"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::providers::MemoryCacheService;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FatalCache {
        calls: AtomicU32,
    }

    #[async_trait]
    impl RemoteCache for FatalCache {
        async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Backend("wrong type".into()))
        }

        async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> StoreResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Backend("wrong type".into()))
        }

        async fn health_check(&self) -> StoreResult<bool> {
            Ok(false)
        }

        fn provider_name(&self) -> &'static str {
            "fatal"
        }
    }

    fn store_over(remote: Arc<dyn RemoteCache>) -> ResilientStore {
        ResilientStore::with_policy(
            remote,
            3,
            Duration::from_millis(10),
            10,
            CancellationToken::new(),
        )
    }

    #[tokio::test]
    async fn test_fatal_fault_is_not_retried() {
        let remote = Arc::new(FatalCache {
            calls: AtomicU32::new(0),
        });
        let store = store_over(remote.clone());

        let result = store.get("k").await;
        assert_eq!(result, Err(StoreError::Backend("wrong type".into())));
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cache_get_round_trip_and_memoization() {
        let remote = Arc::new(MemoryCacheService::new());
        let store = store_over(remote.clone());

        remote
            .set("uid:abc", "3.5", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(store.cache_get("uid:abc").await, Some("3.5".to_string()));

        // Remote entry gone, memoized copy still served.
        remote.set("uid:abc", "0", Duration::from_millis(1)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(store.cache_get("uid:abc").await, Some("3.5".to_string()));
    }

    #[tokio::test]
    async fn test_cancellation_aborts_backoff() {
        struct AlwaysTimeout;

        #[async_trait]
        impl RemoteCache for AlwaysTimeout {
            async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
                Err(StoreError::Timeout("scripted".into()))
            }
            async fn set(&self, _k: &str, _v: &str, _t: Duration) -> StoreResult<()> {
                Err(StoreError::Timeout("scripted".into()))
            }
            async fn health_check(&self) -> StoreResult<bool> {
                Ok(false)
            }
            fn provider_name(&self) -> &'static str {
                "timeout"
            }
        }

        let cancel = CancellationToken::new();
        let store = ResilientStore::with_policy(
            Arc::new(AlwaysTimeout),
            5,
            Duration::from_secs(30),
            10,
            cancel.clone(),
        );

        cancel.cancel();
        let result = store.get("k").await;
        assert_eq!(result, Err(StoreError::Cancelled));
    }
}
