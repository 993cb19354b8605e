//! Symmetric key material for the token codec.

use crate::error::TokenError;
use rand::Rng;
use rand::distr::Alphanumeric;
use std::fmt;
use zeroize::Zeroize;

/// Which of the two codec keys a value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// Encrypts the username, permission and expiry fields.
    Payload,
    /// Encrypts the joined payload into the validator field.
    Validator,
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRole::Payload => f.write_str("payload"),
            KeyRole::Validator => f.write_str("validator"),
        }
    }
}

/// AES key size, selected by the length of the key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    fn from_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(KeySize::Aes128),
            24 => Some(KeySize::Aes192),
            32 => Some(KeySize::Aes256),
            _ => None,
        }
    }

    fn bits(self) -> usize {
        match self {
            KeySize::Aes128 => 128,
            KeySize::Aes192 => 192,
            KeySize::Aes256 => 256,
        }
    }
}

/// An AES key. The material is wiped when the key is dropped.
#[derive(Clone)]
pub struct CipherKey {
    bytes: Vec<u8>,
    size: KeySize,
}

impl Drop for CipherKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl CipherKey {
    /// Build a key from raw bytes (16, 24 or 32 of them).
    pub fn new(role: KeyRole, bytes: impl Into<Vec<u8>>) -> Result<Self, TokenError> {
        let bytes = bytes.into();
        let size = KeySize::from_len(bytes.len()).ok_or(TokenError::InvalidKey {
            role,
            len: bytes.len(),
        })?;
        Ok(Self { bytes, size })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Key size in bits.
    pub fn bits(&self) -> usize {
        self.size.bits()
    }

    pub(crate) fn size(&self) -> KeySize {
        self.size
    }
}

impl fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CipherKey(AES-{}, <redacted>)", self.bits())
    }
}

/// The two independent keys every encode and decode needs.
#[derive(Debug, Clone)]
pub struct CodecKeys {
    payload: CipherKey,
    validator: CipherKey,
}

impl CodecKeys {
    pub fn new(payload: CipherKey, validator: CipherKey) -> Self {
        Self { payload, validator }
    }

    /// Build both keys from raw bytes.
    pub fn from_bytes(payload: &[u8], validator: &[u8]) -> Result<Self, TokenError> {
        Ok(Self {
            payload: CipherKey::new(KeyRole::Payload, payload)?,
            validator: CipherKey::new(KeyRole::Validator, validator)?,
        })
    }

    /// Build both keys from text secrets; the UTF-8 bytes of each secret are the key.
    pub fn from_secrets(payload: &str, validator: &str) -> Result<Self, TokenError> {
        Self::from_bytes(payload.as_bytes(), validator.as_bytes())
    }

    pub fn payload(&self) -> &CipherKey {
        &self.payload
    }

    pub fn validator(&self) -> &CipherKey {
        &self.validator
    }
}

/// Generate a random alphanumeric secret of `len` characters.
///
/// The result is usable with [`CodecKeys::from_secrets`] when `len` is 16, 24 or 32.
pub fn generate_secret(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
