//! End-to-end dispatch behavior: envelope in, `(payload, status)` out.

mod common;

use chrono::Local;
use common::FlakyCache;
use scoring_core::auth::{admin_digest, user_digest};
use scoring_core::constants::status;
use scoring_core::dispatch::{dispatch, DispatchContext};
use scoring_core::store::{MemoryCacheService, ResilientStore};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn memory_store() -> ResilientStore {
    ResilientStore::with_policy(
        Arc::new(MemoryCacheService::new()),
        3,
        Duration::from_millis(5),
        10,
        CancellationToken::new(),
    )
}

fn user_envelope(method: &str, arguments: Value) -> Value {
    json!({
        "account": "horns&hoofs",
        "login": "h&f",
        "token": user_digest("horns&hoofs", "h&f"),
        "arguments": arguments,
        "method": method,
    })
}

async fn run(body: Value, store: &ResilientStore) -> (Value, u16, DispatchContext) {
    let mut context = DispatchContext::new();
    let (payload, code) = dispatch(&body, &mut context, store)
        .await
        .expect("no unexpected fault on this path");
    (payload, code, context)
}

#[tokio::test]
async fn test_admin_short_circuit_returns_fixed_score() {
    let store = memory_store();
    let body = json!({
        "login": "admin",
        "token": admin_digest(&Local::now().format("%Y%m%d%H").to_string()),
        "arguments": {},
        "method": "online_score",
    });

    let (payload, code, _) = run(body, &store).await;
    assert_eq!(code, status::OK);
    assert_eq!(payload, json!({"score": 42.0}));
}

#[tokio::test]
async fn test_wrong_token_is_forbidden() {
    let store = memory_store();
    let mut body = user_envelope("online_score", json!({"phone": "79175002040", "email": "a@b"}));
    body["token"] = json!("not-the-digest");

    let mut context = DispatchContext::new();
    let (_, code) = dispatch(&body, &mut context, &store).await.unwrap();
    assert_eq!(code, status::FORBIDDEN);
}

#[tokio::test]
async fn test_online_score_happy_path_writes_has_context() {
    let store = memory_store();
    let body = user_envelope("online_score", json!({"phone": "79175002040", "email": "a@b"}));

    let (payload, code, context) = run(body, &store).await;
    assert_eq!(code, status::OK);
    assert_eq!(payload, json!({"score": 3.0}));
    assert_eq!(context["has"], json!(["email", "phone"]));
}

#[tokio::test]
async fn test_online_score_empty_arguments_rejected() {
    let store = memory_store();
    let body = user_envelope("online_score", json!({}));

    let (payload, code, _) = run(body, &store).await;
    assert_eq!(code, status::INVALID_REQUEST);
    assert!(payload.get("arguments").is_some());
}

#[tokio::test]
async fn test_online_score_bad_field_named_in_errors() {
    let store = memory_store();
    let body = user_envelope("online_score", json!({"phone": "89175002040", "email": "a@b"}));

    let (payload, code, _) = run(body, &store).await;
    assert_eq!(code, status::INVALID_REQUEST);
    assert!(payload.get("phone").is_some());
}

#[tokio::test]
async fn test_clients_interests_happy_path() {
    let store = memory_store();
    let body = user_envelope("clients_interests", json!({"client_ids": [1, 2], "date": "19.07.2017"}));

    let (payload, code, context) = run(body, &store).await;
    assert_eq!(code, status::OK);
    assert_eq!(context["nclients"], json!(2));

    let map = payload.as_object().expect("interests payload is a map");
    assert_eq!(map.len(), 2);
    for key in ["1", "2"] {
        let interests = map[key].as_array().expect("two interests per client");
        assert_eq!(interests.len(), 2);
    }
}

#[tokio::test]
async fn test_clients_interests_missing_ids_rejected() {
    let store = memory_store();
    let body = user_envelope("clients_interests", json!({"date": "19.07.2017"}));

    let (payload, code, _) = run(body, &store).await;
    assert_eq!(code, status::INVALID_REQUEST);
    assert!(payload.get("client_ids").is_some());
}

#[tokio::test]
async fn test_unknown_method_is_unroutable() {
    let store = memory_store();
    let body = user_envelope("exotic_method", json!({"client_ids": [1]}));

    let (_, code, _) = run(body, &store).await;
    assert_eq!(code, status::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_envelope_reports_every_bad_field() {
    let store = memory_store();
    let body = json!({"account": 5, "method": ""});

    let (payload, code, _) = run(body, &store).await;
    assert_eq!(code, status::INVALID_REQUEST);
    for field in ["account", "login", "token", "arguments", "method"] {
        assert!(payload.get(field).is_some(), "missing error for {field}");
    }
}

#[tokio::test]
async fn test_non_object_body_rejected() {
    let store = memory_store();
    let (_, code, _) = run(json!([1, 2, 3]), &store).await;
    assert_eq!(code, status::INVALID_REQUEST);
}

#[tokio::test]
async fn test_store_outage_fails_interests_but_not_score() {
    let remote = Arc::new(FlakyCache::always_failing());
    let store = ResilientStore::with_policy(
        remote,
        3,
        Duration::from_millis(5),
        10,
        CancellationToken::new(),
    );

    // The hard-read path must surface the outage to the transport.
    let body = user_envelope("clients_interests", json!({"client_ids": [1]}));
    let mut context = DispatchContext::new();
    assert!(dispatch(&body, &mut context, &store).await.is_err());

    // The score path degrades to recomputation instead.
    let body = user_envelope("online_score", json!({"phone": "79175002040", "email": "a@b"}));
    let mut context = DispatchContext::new();
    let (payload, code) = dispatch(&body, &mut context, &store).await.unwrap();
    assert_eq!(code, status::OK);
    assert_eq!(payload, json!({"score": 3.0}));
}
