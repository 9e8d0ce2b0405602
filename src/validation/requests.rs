//! Concrete request schemas and their request-level policies.

use super::fields::{FieldKind, FieldSpec};
use super::schema::{RequestSchema, ValidatedRequest};
use crate::constants::ADMIN_LOGIN;
use serde_json::{Map, Value};

/// Outer method envelope: account/login/token/arguments/method.
pub static METHOD_REQUEST_SCHEMA: RequestSchema = RequestSchema::new(
    "method_request",
    &[
        FieldSpec::new("account", FieldKind::Text, false, true),
        FieldSpec::new("login", FieldKind::Text, true, true),
        FieldSpec::new("token", FieldKind::Text, true, true),
        FieldSpec::new("arguments", FieldKind::Arguments, true, true),
        FieldSpec::new("method", FieldKind::Text, true, false),
    ],
);

/// `online_score` arguments: every field optional, the pair policy below
/// decides whether the combination is usable.
pub static ONLINE_SCORE_SCHEMA: RequestSchema = RequestSchema::new(
    "online_score",
    &[
        FieldSpec::new("first_name", FieldKind::Text, false, true),
        FieldSpec::new("last_name", FieldKind::Text, false, true),
        FieldSpec::new("email", FieldKind::Email, false, true),
        FieldSpec::new("phone", FieldKind::Phone, false, true),
        FieldSpec::new("birthday", FieldKind::BirthDay, false, true),
        FieldSpec::new("gender", FieldKind::Gender, false, true),
    ],
);

/// `clients_interests` arguments.
pub static CLIENTS_INTERESTS_SCHEMA: RequestSchema = RequestSchema::new(
    "clients_interests",
    &[
        FieldSpec::new("client_ids", FieldKind::ClientIds, true, false),
        FieldSpec::new("date", FieldKind::Date, false, true),
    ],
);

/// At least one of these attribute pairs must be fully populated for an
/// online-score request to be scorable.
pub static SCORE_FIELD_PAIRS: &[&[&str]] = &[
    &["phone", "email"],
    &["first_name", "last_name"],
    &["gender", "birthday"],
];

/// Cross-field policy for `online_score`: on an otherwise-valid request,
/// reject with a synthetic `arguments` error unless some required pair is
/// a subset of the populated fields.
pub fn enforce_score_pairs(validated: &mut ValidatedRequest) {
    if !validated.is_valid() {
        return;
    }

    let satisfied = SCORE_FIELD_PAIRS
        .iter()
        .any(|pair| pair.iter().all(|field| validated.has(field)));

    if !satisfied {
        validated.add_error(
            "arguments",
            "at least one pair of phone/email, first_name/last_name or gender/birthday is required"
                .to_string(),
        );
    }
}

/// Operation-level policy for `clients_interests`: `client_ids` must have
/// actually populated, defending against a legitimately-empty-but-required
/// list slipping through.
pub fn enforce_client_ids_present(validated: &mut ValidatedRequest) {
    if !validated.is_valid() {
        return;
    }

    if !validated.has("client_ids") {
        validated.add_error("client_ids", "field is required".to_string());
    }
}

/// Typed view of a valid method envelope.
///
/// Built only after [`METHOD_REQUEST_SCHEMA`] validation succeeded; fields
/// that were accepted-as-empty read as empty strings, matching how the
/// digest is computed over them.
#[derive(Debug, Clone)]
pub struct MethodRequest {
    pub account: String,
    pub login: String,
    pub token: String,
    pub arguments: Map<String, Value>,
    pub method: String,
}

impl MethodRequest {
    pub fn from_validated(validated: &ValidatedRequest) -> Self {
        Self {
            account: validated.get_str("account").unwrap_or_default().to_string(),
            login: validated.get_str("login").unwrap_or_default().to_string(),
            token: validated.get_str("token").unwrap_or_default().to_string(),
            arguments: validated
                .get("arguments")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
            method: validated.get_str("method").unwrap_or_default().to_string(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.login == ADMIN_LOGIN
    }
}
