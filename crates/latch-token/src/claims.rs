//! Value objects produced by encode and decode.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// An issued token, shaped for the login response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Full `Bearer ...` string, ready for an Authorization header.
    pub token: String,

    /// Lifetime in seconds.
    pub expires_in: i64,
}

/// The plaintext fields recovered from a valid token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    pub username: String,
    pub permission: String,

    /// Expiry as milliseconds since the Unix epoch.
    pub expires_at: i64,
}

impl TokenClaims {
    /// Expiry as a timestamp, if it is representable.
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.expires_at)
    }

    /// Whether the token is expired at `now`. Expiry is exclusive: a token
    /// whose expiry equals `now` is already expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now.timestamp_millis()
    }

    /// Get time until expiration.
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        Duration::milliseconds(self.expires_at.saturating_sub(now.timestamp_millis()))
    }
}
