//! AES in counter mode.
//!
//! Counter mode XORs data with a keystream, so the same call both encrypts
//! and decrypts. The counter is a single 128-bit big-endian integer that
//! starts at the caller's seed and increments once per 16-byte block.

use crate::keys::{CipherKey, KeySize};
use aes::{Aes128, Aes192, Aes256};
use ctr::cipher::generic_array::GenericArray;
use ctr::cipher::{KeyIvInit, StreamCipher};

type Aes128Ctr = ctr::Ctr128BE<Aes128>;
type Aes192Ctr = ctr::Ctr128BE<Aes192>;
type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// Initial counter value for every token field.
pub const COUNTER_SEED: u128 = 5;

/// Encrypt or decrypt `data` under `key` with the counter starting at `counter_seed`.
pub fn transform(data: &[u8], key: &CipherKey, counter_seed: u128) -> Vec<u8> {
    Keystream::new(key, counter_seed).apply(data)
}

/// A running counter-mode keystream.
///
/// Successive [`apply`](Keystream::apply) calls continue where the previous
/// one stopped, including part-way through a block.
pub struct Keystream {
    inner: KeystreamInner,
}

enum KeystreamInner {
    Aes128(Aes128Ctr),
    Aes192(Aes192Ctr),
    Aes256(Aes256Ctr),
}

impl Keystream {
    pub fn new(key: &CipherKey, counter_seed: u128) -> Self {
        let k = key.as_bytes();
        let iv = GenericArray::from(counter_seed.to_be_bytes());

        // CipherKey guarantees the slice length matches the size variant.
        let inner = match key.size() {
            KeySize::Aes128 => {
                KeystreamInner::Aes128(Aes128Ctr::new(GenericArray::from_slice(k), &iv))
            }
            KeySize::Aes192 => {
                KeystreamInner::Aes192(Aes192Ctr::new(GenericArray::from_slice(k), &iv))
            }
            KeySize::Aes256 => {
                KeystreamInner::Aes256(Aes256Ctr::new(GenericArray::from_slice(k), &iv))
            }
        };

        Self { inner }
    }

    /// XOR the next `data.len()` keystream bytes into a copy of `data`.
    pub fn apply(&mut self, data: &[u8]) -> Vec<u8> {
        let mut buf = data.to_vec();
        match &mut self.inner {
            KeystreamInner::Aes128(c) => c.apply_keystream(&mut buf),
            KeystreamInner::Aes192(c) => c.apply_keystream(&mut buf),
            KeystreamInner::Aes256(c) => c.apply_keystream(&mut buf),
        }
        buf
    }
}
