//! # Request Validation Engine
//!
//! Declarative schema validation for the scoring API.
//!
//! A request shape is an ordered table of [`FieldSpec`]s (name, kind,
//! required, nullable) evaluated by a single generic validator against a
//! loose JSON mapping. Results accumulate in a per-request
//! [`ValidatedRequest`]: the populated field names in declaration order,
//! and a field-to-message error map. Request-level policies (the
//! online-score pair rule, the client-ids presence rule) attach synthetic
//! errors on top of the per-field results.
//!
//! Schemas are plain process-wide data; all mutable state lives in the
//! per-request result, so concurrent requests can never observe each
//! other's values.

pub mod fields;
pub mod requests;
pub mod schema;

pub use fields::{FieldKind, FieldSpec, Presence};
pub use requests::{
    enforce_client_ids_present, enforce_score_pairs, MethodRequest, CLIENTS_INTERESTS_SCHEMA,
    METHOD_REQUEST_SCHEMA, ONLINE_SCORE_SCHEMA, SCORE_FIELD_PAIRS,
};
pub use schema::{RequestSchema, ValidatedRequest};
