//! # System Constants
//!
//! Status codes, response reasons, the gender enumeration and the
//! authentication salts shared by the dispatcher, the auth guard and the
//! scoring handlers.

use serde::{Deserialize, Serialize};

/// Shared secret mixed into non-admin digests.
pub const SALT: &str = "Otus";

/// Login that marks a request as administrative.
pub const ADMIN_LOGIN: &str = "admin";

/// Secret mixed into the hour-keyed admin digest.
pub const ADMIN_SALT: &str = "42";

/// Fixed score returned on the admin short-circuit path.
pub const ADMIN_SCORE: f64 = 42.0;

/// Numeric statuses the core hands back to the transport.
pub mod status {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const FORBIDDEN: u16 = 403;
    pub const NOT_FOUND: u16 = 404;
    pub const INVALID_REQUEST: u16 = 422;
    pub const INTERNAL_ERROR: u16 = 500;
}

/// Human-readable reason for an error status, used when a handler produced
/// no more specific payload.
pub fn error_reason(code: u16) -> &'static str {
    match code {
        status::BAD_REQUEST => "Bad Request",
        status::FORBIDDEN => "Forbidden",
        status::NOT_FOUND => "Not Found",
        status::INVALID_REQUEST => "Invalid Request",
        status::INTERNAL_ERROR => "Internal Server Error",
        _ => "Unknown Error",
    }
}

/// Gender values accepted by the online-score arguments schema.
///
/// The wire format is the bare integer, so `Unknown` (0) is a meaningful
/// value and must never be conflated with an absent field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Unknown = 0,
    Male = 1,
    Female = 2,
}

impl Gender {
    /// Decode the wire integer, rejecting anything outside the enumeration.
    pub fn from_wire(value: i64) -> Option<Self> {
        match value {
            0 => Some(Gender::Unknown),
            1 => Some(Gender::Male),
            2 => Some(Gender::Female),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_from_wire() {
        assert_eq!(Gender::from_wire(0), Some(Gender::Unknown));
        assert_eq!(Gender::from_wire(1), Some(Gender::Male));
        assert_eq!(Gender::from_wire(2), Some(Gender::Female));
        assert_eq!(Gender::from_wire(3), None);
        assert_eq!(Gender::from_wire(-1), None);
    }

    #[test]
    fn test_error_reason_known_codes() {
        assert_eq!(error_reason(status::FORBIDDEN), "Forbidden");
        assert_eq!(error_reason(status::INVALID_REQUEST), "Invalid Request");
        assert_eq!(error_reason(999), "Unknown Error");
    }
}
