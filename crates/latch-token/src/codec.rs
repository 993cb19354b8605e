//! Token encoding and verification.

use crate::cipher::{COUNTER_SEED, Keystream, transform};
use crate::claims::{Token, TokenClaims};
use crate::credentials::Credentials;
use crate::error::TokenError;
use crate::keys::CodecKeys;
use chrono::{DateTime, Utc};
use latch_core::CounterLayout;
use subtle::ConstantTimeEq;

/// Scheme prefix on every token string.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Permission label written into tokens unless overridden.
pub const DEFAULT_PERMISSION: &str = "Admin";

const FIELD_SEPARATOR: char = '.';

/// Encodes credentials into bearer tokens and verifies them again.
///
/// Both directions share one set of keys and one [`CounterLayout`]; a token
/// only decodes under the configuration that minted it.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    keys: CodecKeys,
    layout: CounterLayout,
    permission: String,
}

/// Borrowed pieces of a structurally valid token.
struct TokenParts<'a> {
    /// `<user>.<permission>.<expiry>` exactly as received.
    payload: &'a str,
    fields: [&'a str; 3],
    validator: &'a str,
}

impl TokenCodec {
    /// Create a codec with the default layout and permission label.
    pub fn new(keys: CodecKeys) -> Self {
        Self {
            keys,
            layout: CounterLayout::default(),
            permission: DEFAULT_PERMISSION.to_string(),
        }
    }

    pub fn with_layout(mut self, layout: CounterLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = permission.into();
        self
    }

    pub fn layout(&self) -> CounterLayout {
        self.layout
    }

    pub fn permission(&self) -> &str {
        &self.permission
    }

    /// Mint a token for `credentials` that expires `ttl_seconds` after `now`.
    ///
    /// The output is a pure function of the inputs: the same credentials at
    /// the same millisecond give the same token.
    pub fn encode(
        &self,
        credentials: &Credentials,
        now: DateTime<Utc>,
        ttl_seconds: i64,
    ) -> Result<Token, TokenError> {
        if credentials.username.is_empty() {
            return Err(TokenError::AuthMalformed);
        }
        if ttl_seconds <= 0 {
            return Err(TokenError::InvalidTtl(ttl_seconds));
        }

        let expires_at = ttl_seconds
            .checked_mul(1000)
            .and_then(|ms| now.timestamp_millis().checked_add(ms))
            .ok_or(TokenError::InvalidTtl(ttl_seconds))?;
        let expiry = expires_at.to_string();

        let sealed = self.apply_payload_keystream([
            credentials.username.as_bytes(),
            self.permission.as_bytes(),
            expiry.as_bytes(),
        ]);
        let payload = sealed
            .iter()
            .map(hex::encode)
            .collect::<Vec<_>>()
            .join(".");
        let validator = self.validator_hex(&payload);

        Ok(Token {
            token: format!("{BEARER_PREFIX}{payload}{FIELD_SEPARATOR}{validator}"),
            expires_in: ttl_seconds,
        })
    }

    /// Verify `token` and recover its claims.
    ///
    /// Checks run in order: shape, validator, field plaintexts, expiry.
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let parts = split_token(token)?;

        let expected = self.validator_hex(parts.payload);
        if !bool::from(expected.as_bytes().ct_eq(parts.validator.as_bytes())) {
            return Err(TokenError::TokenInvalidSignature);
        }

        let [user, permission, expiry] = parts.fields;
        let sealed = [decode_hex(user)?, decode_hex(permission)?, decode_hex(expiry)?];
        let [user, permission, expiry] = self.apply_payload_keystream([
            sealed[0].as_slice(),
            sealed[1].as_slice(),
            sealed[2].as_slice(),
        ]);

        let username = String::from_utf8(user).map_err(|_| TokenError::TokenMalformed)?;
        let permission = String::from_utf8(permission).map_err(|_| TokenError::TokenMalformed)?;
        let expires_at: i64 = std::str::from_utf8(&expiry)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or(TokenError::TokenMalformed)?;

        let claims = TokenClaims {
            username,
            permission,
            expires_at,
        };

        if claims.is_expired_at(now) {
            tracing::debug!(username = %claims.username, expires_at, "rejecting expired token");
            return Err(TokenError::TokenExpired { expires_at });
        }

        Ok(claims)
    }

    /// Run the three payload fields through the payload-key keystream.
    /// Encryption and decryption are the same operation.
    fn apply_payload_keystream(&self, fields: [&[u8]; 3]) -> [Vec<u8>; 3] {
        let key = self.keys.payload();
        match self.layout {
            CounterLayout::ResetPerField => fields.map(|f| transform(f, key, COUNTER_SEED)),
            CounterLayout::Continuous => {
                let mut stream = Keystream::new(key, COUNTER_SEED);
                fields.map(|f| stream.apply(f))
            }
        }
    }

    fn validator_hex(&self, payload: &str) -> String {
        hex::encode(transform(
            payload.as_bytes(),
            self.keys.validator(),
            COUNTER_SEED,
        ))
    }
}

/// Split `Bearer <hex>.<hex>.<hex>.<hex>` into its parts.
fn split_token(token: &str) -> Result<TokenParts<'_>, TokenError> {
    let body = token
        .strip_prefix(BEARER_PREFIX)
        .ok_or(TokenError::TokenMalformed)?;
    let (payload, validator) = body
        .rsplit_once(FIELD_SEPARATOR)
        .ok_or(TokenError::TokenMalformed)?;

    let mut fields = payload.split(FIELD_SEPARATOR);
    let (Some(user), Some(permission), Some(expiry), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(TokenError::TokenMalformed);
    };

    if ![user, permission, expiry, validator]
        .iter()
        .all(|f| is_hex_field(f))
    {
        return Err(TokenError::TokenMalformed);
    }

    Ok(TokenParts {
        payload,
        fields: [user, permission, expiry],
        validator,
    })
}

fn is_hex_field(field: &str) -> bool {
    !field.is_empty() && field.len() % 2 == 0 && field.bytes().all(|b| b.is_ascii_hexdigit())
}

fn decode_hex(field: &str) -> Result<Vec<u8>, TokenError> {
    hex::decode(field).map_err(|_| TokenError::TokenMalformed)
}
