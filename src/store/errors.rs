//! Store error types.

use thiserror::Error;

/// Errors that can occur against the remote cache.
///
/// Timeouts and connection failures are *transient*: the resilient wrapper
/// retries them up to its attempt budget. Anything else propagates
/// immediately without retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Cache operation timed out.
    #[error("cache operation timed out: {0}")]
    Timeout(String),

    /// Failed to reach the cache backend.
    #[error("cache connection error: {0}")]
    Connection(String),

    /// The backend answered with a non-transient fault.
    #[error("cache backend error: {0}")]
    Backend(String),

    /// The surrounding request was cancelled mid-retry.
    #[error("cache operation cancelled")]
    Cancelled,
}

impl StoreError {
    /// Whether a retry may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Timeout(_) | StoreError::Connection(_))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
