//! In-memory cache provider.
//!
//! Per-entry expiry over a concurrent map. Used for development and tests;
//! unlike the remote providers it never fails transiently, so the retry
//! machinery above it is exercised only with the scripted test fakes.

use crate::store::errors::StoreResult;
use crate::store::traits::RemoteCache;
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
struct StoredEntry {
    value: String,
    expires_at: Instant,
}

/// Process-local remote-cache stand-in with real TTL semantics.
#[derive(Debug, Default)]
pub struct MemoryCacheService {
    entries: DashMap<String, StoredEntry>,
}

impl MemoryCacheService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (non-expired) entries, for tests and diagnostics.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .iter()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RemoteCache for MemoryCacheService {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > Instant::now() {
                return Ok(Some(entry.value.clone()));
            }
        }
        // Expired entries read as absent; drop them on the way out.
        let _ = self
            .entries
            .remove_if(key, |_, entry| entry.expires_at <= Instant::now());
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()> {
        self.entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        debug!(key = key, ttl_seconds = ttl.as_secs(), "cache SET (memory)");
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<bool> {
        Ok(true)
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }
}
