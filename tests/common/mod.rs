//! Shared test fixtures.
#![allow(dead_code)]

use async_trait::async_trait;
use scoring_core::store::{MemoryCacheService, RemoteCache, StoreError, StoreResult};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

/// Scripted remote cache: fails transiently a configured number of times
/// (or unconditionally), then delegates to a real in-memory backend.
/// Counts every `get`/`set` invocation so retry budgets can be asserted.
pub struct FlakyCache {
    inner: MemoryCacheService,
    remaining_failures: AtomicU32,
    always_fail: AtomicBool,
    calls: AtomicU32,
}

impl FlakyCache {
    /// Fail the first `failures` invocations, succeed afterwards.
    pub fn failing(failures: u32) -> Self {
        Self {
            inner: MemoryCacheService::new(),
            remaining_failures: AtomicU32::new(failures),
            always_fail: AtomicBool::new(false),
            calls: AtomicU32::new(0),
        }
    }

    /// Fail every invocation until told otherwise.
    pub fn always_failing() -> Self {
        let cache = Self::failing(0);
        cache.always_fail.store(true, Ordering::SeqCst);
        cache
    }

    /// Flip unconditional failure on or off mid-test.
    pub fn set_always_fail(&self, on: bool) {
        self.always_fail.store(on, Ordering::SeqCst);
    }

    /// Number of `get`/`set` invocations the underlying client has seen.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Seed the backing store directly, bypassing the failure script.
    pub async fn seed(&self, key: &str, value: &str) {
        self.inner
            .set(key, value, Duration::from_secs(3600))
            .await
            .expect("memory backend never fails");
    }

    /// Read the backing store directly, bypassing the failure script.
    pub async fn seeded_get(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.expect("memory backend never fails")
    }

    fn try_fail(&self) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.always_fail.load(Ordering::SeqCst) {
            return Err(StoreError::Timeout("scripted failure".to_string()));
        }

        let failed = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| {
                remaining.checked_sub(1)
            })
            .is_ok();

        if failed {
            Err(StoreError::Connection("scripted failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteCache for FlakyCache {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.try_fail()?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()> {
        self.try_fail()?;
        self.inner.set(key, value, ttl).await
    }

    async fn health_check(&self) -> StoreResult<bool> {
        Ok(!self.always_fail.load(Ordering::SeqCst))
    }

    fn provider_name(&self) -> &'static str {
        "flaky"
    }
}
