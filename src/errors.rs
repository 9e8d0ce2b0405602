//! Error types for the scoring service.

use crate::store::StoreError;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    /// One or more fields failed schema validation. Resolved inside the
    /// core as a 422 payload; never crosses the boundary as `Err`.
    #[error("validation failed: {0:?}")]
    Validation(BTreeMap<String, String>),

    /// Digest mismatch. Surfaces as 403 with no detail about which part
    /// of the digest failed.
    #[error("authentication failed")]
    Forbidden,

    /// Method name with no routing-table entry. Surfaces as 404.
    #[error("unknown method: {0}")]
    UnknownMethod(String),

    /// The store exhausted its retry budget (or hit a fatal backend fault)
    /// on a path that must know when the cache is truly unavailable.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Anything else. Surfaces as 500, logged with full context.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for ScoringError {
    fn from(error: serde_json::Error) -> Self {
        ScoringError::Internal(format!("JSON serialization error: {error}"))
    }
}

pub type Result<T> = std::result::Result<T, ScoringError>;
