//! Error types for credential parsing and token handling.

use crate::keys::KeyRole;
use thiserror::Error;

/// Errors that can occur while parsing credentials or encoding/decoding tokens.
///
/// Every variant carries a stable numeric [`code`](TokenError::code) that is
/// safe to hand to clients.
#[derive(Debug, Error)]
pub enum TokenError {
    /// No Authorization header, or an empty one.
    #[error("authorization header is empty")]
    AuthEmpty,

    /// The header does not use the Basic scheme.
    #[error("authorization must be basic type")]
    AuthInvalidScheme,

    /// The Basic payload is not base64 or carries no username.
    #[error("authorization credentials are malformed")]
    AuthMalformed,

    /// The credential store rejected the username/password pair.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Token text does not have the `Bearer <hex>.<hex>.<hex>.<hex>` shape,
    /// or its fields do not decrypt to the expected plaintexts.
    #[error("token is malformed")]
    TokenMalformed,

    /// Validator field does not match the payload.
    #[error("token signature is invalid")]
    TokenInvalidSignature,

    /// Token expiry is not in the future.
    #[error("token has expired")]
    TokenExpired { expires_at: i64 },

    /// Key material has a length AES does not accept.
    #[error("invalid {role} key: expected 16, 24 or 32 bytes, got {len}")]
    InvalidKey { role: KeyRole, len: usize },

    /// Token lifetime is not positive or overflows the expiry timestamp.
    #[error("invalid token lifetime: {0} seconds")]
    InvalidTtl(i64),

    /// A configured password hash could not be parsed.
    #[error("invalid password hash for user {username}: {reason}")]
    InvalidPasswordHash { username: String, reason: String },

    /// Hashing a new password failed.
    #[error("failed to hash password: {0}")]
    PasswordHashing(String),
}

/// Broad classification used to pick the HTTP status for an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller-supplied credentials or tokens were rejected (401).
    Authorization,
    /// Configuration or internal fault (500).
    Internal,
}

impl TokenError {
    /// Stable numeric code for this error.
    pub fn code(&self) -> u16 {
        match self {
            TokenError::AuthEmpty => 1001,
            TokenError::AuthInvalidScheme => 1002,
            TokenError::AuthMalformed => 1003,
            TokenError::InvalidCredentials => 1004,
            TokenError::TokenMalformed => 1101,
            TokenError::TokenInvalidSignature => 1102,
            TokenError::TokenExpired { .. } => 1103,
            TokenError::InvalidKey { .. } => 5001,
            TokenError::InvalidTtl(_) => 5002,
            TokenError::InvalidPasswordHash { .. } => 5003,
            TokenError::PasswordHashing(_) => 5004,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            TokenError::AuthEmpty
            | TokenError::AuthInvalidScheme
            | TokenError::AuthMalformed
            | TokenError::InvalidCredentials
            | TokenError::TokenMalformed
            | TokenError::TokenInvalidSignature
            | TokenError::TokenExpired { .. } => ErrorCategory::Authorization,
            TokenError::InvalidKey { .. }
            | TokenError::InvalidTtl(_)
            | TokenError::InvalidPasswordHash { .. }
            | TokenError::PasswordHashing(_) => ErrorCategory::Internal,
        }
    }

    pub fn is_authorization(&self) -> bool {
        self.category() == ErrorCategory::Authorization
    }
}
