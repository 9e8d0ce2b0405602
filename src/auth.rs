//! # Authentication Guard
//!
//! Verifies the caller's precomputed digest. Admin requests are keyed to
//! the local wall-clock hour and the admin secret; everything else to
//! account + login and the shared secret. Verification never errors: a
//! mismatch simply reads as unauthenticated and the dispatcher turns it
//! into a FORBIDDEN outcome without leaking which part failed.

use crate::constants::{ADMIN_SALT, SALT};
use crate::validation::MethodRequest;
use chrono::Local;
use sha2::{Digest, Sha512};

/// Check the envelope's token against the expected digest.
pub fn check_auth(envelope: &MethodRequest) -> bool {
    let digest = if envelope.is_admin() {
        admin_digest(&Local::now().format("%Y%m%d%H").to_string())
    } else {
        user_digest(&envelope.account, &envelope.login)
    };
    digest == envelope.token
}

/// Digest for the admin path, keyed to an `%Y%m%d%H` hour stamp.
pub fn admin_digest(hour_stamp: &str) -> String {
    sha512_hex(&format!("{hour_stamp}{ADMIN_SALT}"))
}

/// Digest for the per-account path.
pub fn user_digest(account: &str, login: &str) -> String {
    sha512_hex(&format!("{account}{login}{SALT}"))
}

fn sha512_hex(input: &str) -> String {
    hex::encode(Sha512::digest(input.as_bytes()))
}
