//! Credential verification performed before a token is issued.

use crate::credentials::Credentials;
use crate::error::TokenError;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use latch_core::UserEntry;
use rand::RngCore;
use std::collections::HashMap;

/// Decides whether a parsed username/password pair may receive a token.
///
/// Callers must consult a store before [`TokenCodec::encode`](crate::TokenCodec::encode);
/// the codec itself trusts whatever credentials it is given.
pub trait CredentialStore: Send + Sync {
    fn verify(&self, credentials: &Credentials) -> bool;
}

/// Accepts every well-formed credential pair.
///
/// This matches a deployment with no user database: possession of any
/// syntactically valid Basic header is enough to obtain a token.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAnyStore;

impl CredentialStore for AcceptAnyStore {
    fn verify(&self, _credentials: &Credentials) -> bool {
        true
    }
}

/// Checks passwords against Argon2 PHC hashes keyed by username.
#[derive(Debug, Clone, Default)]
pub struct PasswordHashStore {
    users: HashMap<String, String>,
}

impl PasswordHashStore {
    /// Build a store from configured users. Every hash is parsed up front so a
    /// bad entry fails at startup rather than at login.
    pub fn from_users(users: &[UserEntry]) -> Result<Self, TokenError> {
        let mut map = HashMap::with_capacity(users.len());
        for user in users {
            PasswordHash::new(&user.password_hash).map_err(|e| {
                TokenError::InvalidPasswordHash {
                    username: user.username.clone(),
                    reason: e.to_string(),
                }
            })?;
            map.insert(user.username.clone(), user.password_hash.clone());
        }
        Ok(Self { users: map })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl CredentialStore for PasswordHashStore {
    fn verify(&self, credentials: &Credentials) -> bool {
        let Some(password) = credentials.password.as_deref() else {
            return false;
        };
        let Some(phc) = self.users.get(&credentials.username) else {
            return false;
        };
        let Ok(parsed) = PasswordHash::new(phc) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Hash `password` with Argon2id and a fresh random salt, returning a PHC string.
pub fn hash_password(password: &str) -> Result<String, TokenError> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| TokenError::PasswordHashing(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| TokenError::PasswordHashing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> PasswordHashStore {
        PasswordHashStore::from_users(&[UserEntry {
            username: "admin".to_string(),
            password_hash: hash_password("pass").unwrap(),
        }])
        .unwrap()
    }

    #[test]
    fn test_accept_any() {
        assert!(AcceptAnyStore.verify(&Credentials::new("anyone", None)));
    }

    #[test]
    fn test_password_hash_store() {
        let store = store();
        assert_eq!(store.len(), 1);
        assert!(store.verify(&Credentials::new("admin", Some("pass".into()))));
        assert!(!store.verify(&Credentials::new("admin", Some("wrong".into()))));
        assert!(!store.verify(&Credentials::new("admin", None)));
        assert!(!store.verify(&Credentials::new("mallory", Some("pass".into()))));
    }

    #[test]
    fn test_bad_hash_rejected_at_construction() {
        let err = PasswordHashStore::from_users(&[UserEntry {
            username: "admin".to_string(),
            password_hash: "plaintext".to_string(),
        }])
        .unwrap_err();
        assert!(matches!(err, TokenError::InvalidPasswordHash { username, .. } if username == "admin"));
    }

    #[test]
    fn test_hashes_are_salted() {
        assert_ne!(hash_password("pass").unwrap(), hash_password("pass").unwrap());
    }
}
