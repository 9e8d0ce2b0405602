//! # Scoring Handlers
//!
//! The two business formulas behind the dispatcher. Both are pure
//! arithmetic/sampling over already-validated fields; the only interesting
//! part is how they lean on the store: `get_score` is fully best-effort
//! (cache miss or outage degrades to recomputation), while `get_interests`
//! reads through [`ResilientStore::get`] and therefore surfaces a hard
//! failure when the cache is truly unavailable.

use crate::errors::{Result, ScoringError};
use crate::store::ResilientStore;
use crate::validation::ValidatedRequest;
use md5::{Digest, Md5};
use rand::seq::SliceRandom;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// How long a computed score stays cached.
const SCORE_TTL: Duration = Duration::from_secs(60 * 60);

/// How long a generated interest sample stays cached.
const INTERESTS_TTL: Duration = Duration::from_secs(10);

/// The fixed interest universe; every client gets a random two-of-these.
pub static INTERESTS: &[&str] = &[
    "cars", "pets", "travel", "hi-tech", "sport", "music", "books", "tv", "cinema", "geek", "otus",
];

/// Validated online-score fields, canonicalized for scoring.
///
/// `phone` is kept in decimal-string form regardless of whether the wire
/// carried a string or an integer, because the cache key hashes that form.
#[derive(Debug, Clone, Default)]
pub struct ScoreParams {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<String>,
    pub gender: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ScoreParams {
    /// Extract from a valid online-score argument set. Only populated
    /// fields become `Some`; an accepted-but-empty field stays `None`.
    pub fn from_validated(validated: &ValidatedRequest) -> Self {
        let owned = |name: &str| validated.get_str(name).map(str::to_string);

        Self {
            phone: validated.get("phone").and_then(phone_string),
            email: owned("email"),
            birthday: owned("birthday"),
            gender: validated.get_i64("gender"),
            first_name: owned("first_name"),
            last_name: owned("last_name"),
        }
    }
}

fn phone_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Compute (or fetch) the online score.
///
/// The cache key is a content hash of the identity attributes, so two
/// requests about the same person share a cached score. A cached positive
/// value short-circuits; outages degrade silently to recomputation.
pub async fn get_score(store: &ResilientStore, params: &ScoreParams) -> f64 {
    let key = score_cache_key(params);

    if let Some(cached) = store.cache_get(&key).await {
        if let Ok(score) = cached.parse::<f64>() {
            if score > 0.0 {
                debug!(key = %key, score = score, "score served from cache");
                return score;
            }
        }
    }

    let mut score = 0.0;
    if params.phone.is_some() {
        score += 1.5;
    }
    if params.email.is_some() {
        score += 1.5;
    }
    if params.birthday.is_some() && params.gender.is_some() {
        score += 1.5;
    }
    if params.first_name.is_some() && params.last_name.is_some() {
        score += 0.5;
    }

    store.cache_set(&key, &score.to_string(), SCORE_TTL).await;
    score
}

/// Derive the score cache key from the identity attributes.
fn score_cache_key(params: &ScoreParams) -> String {
    let mut hasher = Md5::new();
    hasher.update(params.first_name.as_deref().unwrap_or(""));
    hasher.update(params.last_name.as_deref().unwrap_or(""));
    hasher.update(params.phone.as_deref().unwrap_or(""));
    hasher.update(params.birthday.as_deref().unwrap_or(""));
    format!("uid:{}", hex::encode(hasher.finalize()))
}

/// Generate and persist a client's interests, then read them back through
/// the failure-propagating `get` path.
pub async fn get_interests(store: &ResilientStore, client_id: i64) -> Result<Vec<String>> {
    let key = format!("i:{client_id}");

    let sample: Vec<&str> = INTERESTS
        .choose_multiple(&mut rand::thread_rng(), 2)
        .copied()
        .collect();
    let payload = serde_json::to_string(&sample)?;

    store.cache_set(&key, &payload, INTERESTS_TTL).await;

    match store.get(&key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| ScoringError::Internal(format!("malformed interests entry: {e}"))),
        None => Ok(Vec::new()),
    }
}
