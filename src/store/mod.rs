//! # Cache Store Module
//!
//! The resilient cache layer backing the scoring handlers.
//!
//! ## Architecture
//!
//! ```text
//! ResilientStore                 <- retry/backoff + memoization, shared per process
//!   └── Arc<dyn RemoteCache>     <- object-safe client contract
//!         ├── RedisCacheService    <- ConnectionManager-based async Redis
//!         └── MemoryCacheService   <- per-entry-TTL concurrent map
//! ```
//!
//! Transient faults (timeout, connection) are retried with linear backoff;
//! every other fault propagates immediately. The three public operations
//! carry different exhaustion contracts; see [`ResilientStore`].

pub mod errors;
pub mod providers;
pub mod resilient;
pub mod traits;

pub use errors::{StoreError, StoreResult};
pub use providers::{MemoryCacheService, RedisCacheService};
pub use resilient::ResilientStore;
pub use traits::RemoteCache;
