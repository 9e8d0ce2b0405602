//! # Scoring Core
//!
//! Validation, dispatch and resilient cache core for the scoring API
//! service.
//!
//! ## Overview
//!
//! The service accepts a loosely-typed JSON method envelope, enforces a
//! declarative per-field schema, authenticates the caller against a
//! precomputed digest, routes to one of two business operations and backs
//! them with a cache store that tolerates transient failures of the remote
//! key-value backend.
//!
//! ## Module Organization
//!
//! - [`validation`] - declarative field/schema engine and request shapes
//! - [`auth`] - digest verification
//! - [`dispatch`] - method routing pipeline
//! - [`scoring`] - the two business formulas
//! - [`store`] - remote-cache providers and the resilient retry wrapper
//! - [`web`] - thin axum boundary
//! - [`config`] - validated service configuration
//! - [`errors`] - the core error taxonomy
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scoring_core::config::ServiceConfig;
//! use scoring_core::store::{MemoryCacheService, ResilientStore};
//! use scoring_core::web::{router, AppState};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! let config = ServiceConfig::default();
//! let store = ResilientStore::from_config(
//!     Arc::new(MemoryCacheService::new()),
//!     &config.store,
//!     CancellationToken::new(),
//! );
//! let app = router(AppState::new(store));
//! ```

pub mod auth;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod errors;
pub mod logging;
pub mod scoring;
pub mod store;
pub mod validation;
pub mod web;

pub use errors::{Result, ScoringError};
