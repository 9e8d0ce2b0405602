//! # Method Endpoint Handler
//!
//! `POST /method` is the single entry point for business requests. The
//! handler owns exactly the transport concerns: body parsing (malformed
//! JSON is a 400, before the core ever sees it), request-id propagation,
//! the response envelope, and the 500 conversion for faults the core let
//! through.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::{error, info};
use uuid::Uuid;

use crate::constants::{error_reason, status};
use crate::dispatch::{dispatch, DispatchContext};
use crate::web::errors::ApiError;
use crate::web::state::AppState;

pub async fn method_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let request_id = extract_request_id(&headers);

    let parsed: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(e) => {
            info!(request_id = %request_id, error = %e, "unparseable request body");
            return ApiError::BadRequest(e.to_string()).into_response();
        }
    };

    let mut context = DispatchContext::new();
    context.insert("request_id".to_string(), json!(request_id));

    let (payload, code) = match dispatch(&parsed, &mut context, &state.store).await {
        Ok(outcome) => outcome,
        Err(fault) => {
            error!(request_id = %context["request_id"], error = %fault, "unexpected fault");
            (json!(error_reason(status::INTERNAL_ERROR)), status::INTERNAL_ERROR)
        }
    };

    let envelope = if code < 400 {
        json!({ "response": payload, "code": code })
    } else {
        json!({ "error": payload, "code": code })
    };

    context.insert("code".to_string(), json!(code));
    info!(context = %serde_json::Value::Object(context), "method request handled");

    let http_status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (http_status, Json(envelope)).into_response()
}

/// `X-Request-Id` header when supplied, fresh UUID otherwise.
fn extract_request_id(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", "abc-123".parse().unwrap());
        assert_eq!(extract_request_id(&headers), "abc-123");
    }

    #[test]
    fn test_request_id_generated_when_absent() {
        let generated = extract_request_id(&HeaderMap::new());
        assert_eq!(generated.len(), 32);
    }
}
