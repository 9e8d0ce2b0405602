//! Transport-level error responses.
//!
//! These cover only what the boundary itself owns: unparseable bodies,
//! unknown paths, and the conversion of unexpected core faults into 500.
//! Everything the core resolves (422/403/404-by-method) arrives as a
//! `(payload, status)` pair and never passes through here.

use crate::constants::{error_reason, status};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed request body: {0}")]
    BadRequest(String),

    #[error("no such route")]
    NotFound,

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    fn code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => status::BAD_REQUEST,
            ApiError::NotFound => status::NOT_FOUND,
            ApiError::Internal => status::INTERNAL_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.code();
        let body = json!({ "error": error_reason(code), "code": code });
        let http_status =
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (http_status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::BadRequest("x".into()).code(), 400);
        assert_eq!(ApiError::NotFound.code(), 404);
        assert_eq!(ApiError::Internal.code(), 500);
    }
}
