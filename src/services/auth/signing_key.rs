//! HMAC-SHA-512 key material derived from the configured base64 secret.
//!
//! Built once at boot and handed to [`TokenProvider`](super::TokenProvider);
//! nothing mutates it afterwards, so request workers share it without locks.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::config::ConfigError;

/// HS512 needs at least 512 bits of key material.
pub const MIN_SECRET_LEN: usize = 64;

#[derive(Clone)]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.write_str("SigningKey(..)")
    }
}

impl SigningKey {
    pub fn from_base64(secret: &str) -> Result<Self, ConfigError> {
        let bytes = STANDARD
            .decode(secret.trim())
            .map_err(|_| ConfigError::SecretEncoding)?;

        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort {
                len: bytes.len(),
                min: MIN_SECRET_LEN,
            });
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        })
    }

    pub(crate) fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}
