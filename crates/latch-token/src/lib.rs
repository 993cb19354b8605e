//! # latch-token
//!
//! Stateless bearer tokens minted from HTTP Basic credentials.
//!
//! This crate provides functionality for:
//! - Parsing `Authorization: Basic ...` header values into [`Credentials`]
//! - Encoding a username, permission label and expiry into an opaque token
//! - Decoding a token back into [`TokenClaims`], rejecting tampered or expired tokens
//! - Checking credentials against a [`CredentialStore`] before issuing
//!
//! ## Token Layout
//!
//! ```text
//! Bearer <user>.<permission>.<expiry>.<validator>
//! ```
//!
//! | Field | Plaintext | Key |
//! |-------|-----------|-----|
//! | `user` | username (UTF-8) | payload key |
//! | `permission` | permission label, `"Admin"` by default | payload key |
//! | `expiry` | expiry as decimal epoch milliseconds | payload key |
//! | `validator` | the text `<user>.<permission>.<expiry>` | validator key |
//!
//! Every field is lowercase hex of an AES-CTR ciphertext whose 128-bit counter
//! starts at [`COUNTER_SEED`]. There is no nonce: the same inputs always give
//! the same token, and fields encrypted under the same key share keystream.
//! Tokens must therefore be treated as opaque bearer secrets, not as
//! confidential containers.

pub mod cipher;
pub mod claims;
pub mod codec;
pub mod credentials;
pub mod error;
pub mod keys;
pub mod store;

pub use cipher::{COUNTER_SEED, Keystream, transform};
pub use claims::{Token, TokenClaims};
pub use codec::{BEARER_PREFIX, DEFAULT_PERMISSION, TokenCodec};
pub use credentials::{BASIC_SCHEME, Credentials, parse_basic_header};
pub use error::{ErrorCategory, TokenError};
pub use keys::{CipherKey, CodecKeys, KeyRole, generate_secret};
pub use latch_core::CounterLayout;
pub use store::{AcceptAnyStore, CredentialStore, PasswordHashStore, hash_password};
