//! Remote cache client trait definition.

use super::errors::StoreResult;
use async_trait::async_trait;
use std::time::Duration;

/// Contract for a remote key-value cache client.
///
/// Implemented by concrete providers (Redis, in-memory). The trait is
/// object-safe so the resilient wrapper can hold `Arc<dyn RemoteCache>` and
/// tests can inject scripted fakes.
#[async_trait]
pub trait RemoteCache: Send + Sync {
    /// Get a value by key. `Ok(None)` is a miss.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Set a value with a TTL; an entry read after its TTL has elapsed
    /// must behave as absent.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()>;

    /// Check if the backend is reachable.
    async fn health_check(&self) -> StoreResult<bool>;

    /// Name of the cache provider, for logs and the health endpoint.
    fn provider_name(&self) -> &'static str;
}
