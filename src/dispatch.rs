//! # Method Dispatcher
//!
//! Linear request pipeline: envelope validation, then the auth gate and
//! admin short-circuit, then routing lookup, argument validation and the
//! cross-field policy, then the handler. Schema and auth rejections are
//! resolved here into `(payload, status)` pairs; only store exhaustion on
//! the hard-read path and genuinely unexpected faults cross the boundary
//! as `Err`, for the transport to convert into a 500.

use crate::auth::check_auth;
use crate::constants::{error_reason, status, ADMIN_SCORE};
use crate::errors::{Result, ScoringError};
use crate::scoring::{get_interests, get_score, ScoreParams};
use crate::store::ResilientStore;
use crate::validation::{
    enforce_client_ids_present, enforce_score_pairs, MethodRequest, ValidatedRequest,
    CLIENTS_INTERESTS_SCHEMA, METHOD_REQUEST_SCHEMA, ONLINE_SCORE_SCHEMA,
};
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

/// Mutable diagnostic context a request carries through the pipeline.
///
/// The transport seeds it (request id) and logs it with the response;
/// handlers are required to record their observability fields here:
/// `has` for online-score, `nclients` for clients-interests.
pub type DispatchContext = Map<String, Value>;

/// Validate, authenticate and route one parsed request body.
///
/// Returns the `(result_or_errors, status)` pair the transport serializes.
pub async fn dispatch(
    body: &Value,
    context: &mut DispatchContext,
    store: &ResilientStore,
) -> Result<(Value, u16)> {
    resolve(dispatch_inner(body, context, store).await)
}

/// Fold the core error taxonomy into `(payload, status)` pairs. Store and
/// internal faults stay `Err`; the transport owns the 500 conversion.
fn resolve(outcome: Result<Value>) -> Result<(Value, u16)> {
    match outcome {
        Ok(payload) => Ok((payload, status::OK)),
        Err(ScoringError::Validation(errors)) => Ok((json!(errors), status::INVALID_REQUEST)),
        Err(ScoringError::Forbidden) => Ok((
            json!(error_reason(status::FORBIDDEN)),
            status::FORBIDDEN,
        )),
        Err(ScoringError::UnknownMethod(method)) => Ok((
            json!(format!("unknown method: {method}")),
            status::NOT_FOUND,
        )),
        Err(unexpected) => Err(unexpected),
    }
}

async fn dispatch_inner(
    body: &Value,
    context: &mut DispatchContext,
    store: &ResilientStore,
) -> Result<Value> {
    let Some(input) = body.as_object() else {
        let mut errors = std::collections::BTreeMap::new();
        errors.insert(
            "body".to_string(),
            "request body must be a JSON object".to_string(),
        );
        return Err(ScoringError::Validation(errors));
    };

    let validated = METHOD_REQUEST_SCHEMA.validate(input);
    if !validated.is_valid() {
        debug!(errors = ?validated.errors(), "envelope rejected");
        return Err(ScoringError::Validation(validated.into_errors()));
    }

    let envelope = MethodRequest::from_validated(&validated);

    if !check_auth(&envelope) {
        warn!(login = %envelope.login, "authentication failed");
        return Err(ScoringError::Forbidden);
    }

    if envelope.is_admin() {
        debug!(method = %envelope.method, "admin short-circuit");
        return Ok(json!({ "score": ADMIN_SCORE }));
    }

    match envelope.method.as_str() {
        "online_score" => online_score(&envelope, context, store).await,
        "clients_interests" => clients_interests(&envelope, context, store).await,
        unknown => {
            info!(method = unknown, "no route for method");
            Err(ScoringError::UnknownMethod(unknown.to_string()))
        }
    }
}

fn validate_arguments(
    envelope: &MethodRequest,
    schema: &'static crate::validation::RequestSchema,
    policy: fn(&mut ValidatedRequest),
) -> Result<ValidatedRequest> {
    let mut validated = schema.validate(&envelope.arguments);
    policy(&mut validated);

    if validated.is_valid() {
        Ok(validated)
    } else {
        debug!(schema = validated.schema_name(), errors = ?validated.errors(), "arguments rejected");
        Err(ScoringError::Validation(validated.into_errors()))
    }
}

async fn online_score(
    envelope: &MethodRequest,
    context: &mut DispatchContext,
    store: &ResilientStore,
) -> Result<Value> {
    let validated = validate_arguments(envelope, &ONLINE_SCORE_SCHEMA, enforce_score_pairs)?;

    context.insert("has".to_string(), json!(validated.populated_fields()));

    let params = ScoreParams::from_validated(&validated);
    let score = get_score(store, &params).await;

    Ok(json!({ "score": score }))
}

async fn clients_interests(
    envelope: &MethodRequest,
    context: &mut DispatchContext,
    store: &ResilientStore,
) -> Result<Value> {
    let validated =
        validate_arguments(envelope, &CLIENTS_INTERESTS_SCHEMA, enforce_client_ids_present)?;

    let client_ids = validated.get_ids("client_ids").unwrap_or_default();
    context.insert("nclients".to_string(), json!(client_ids.len()));

    let mut interests = Map::new();
    for client_id in client_ids {
        let entries = get_interests(store, client_id).await?;
        interests.insert(client_id.to_string(), json!(entries));
    }

    Ok(Value::Object(interests))
}
