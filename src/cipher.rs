// src/cipher.rs
//! Symmetric field cipher — AES-256-GCM over base64url tokens
//!
//! A token is `base64url_no_pad(nonce || ciphertext+tag)` under a single
//! process-wide 256-bit key. This adapter is the only producer and consumer
//! of that encoding; the key is injected at construction, never read from
//! ambient state.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use thiserror::Error;

/// Key length in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// Nonce length in bytes (GCM standard)
pub const NONCE_LEN: usize = 12;

#[derive(Error, Debug)]
pub enum CipherError {
    #[error("key must be base64url of exactly {KEY_LEN} bytes")]
    InvalidKey,

    #[error("token is not valid base64url: {0}")]
    TokenEncoding(base64::DecodeError),

    #[error("token is too short to carry a nonce")]
    TokenTruncated,

    #[error("integrity check failed (wrong key or corrupted token)")]
    Verification,

    #[error("decrypted bytes are not valid UTF-8")]
    NotUtf8,

    #[error("encryption failed")]
    Encrypt,
}

/// Decrypts (and, for fixtures and tooling, encrypts) individual record
/// fields with a fixed symmetric key.
#[derive(Clone)]
pub struct FieldCipher {
    cipher: Aes256Gcm,
}

impl FieldCipher {
    /// Build a cipher from a base64url-encoded 32-byte key.
    pub fn from_base64_key(encoded: &str) -> Result<Self, CipherError> {
        let bytes = URL_SAFE
            .decode(encoded.trim())
            .map_err(|_| CipherError::InvalidKey)?;
        if bytes.len() != KEY_LEN {
            return Err(CipherError::InvalidKey);
        }
        let cipher = Aes256Gcm::new_from_slice(&bytes).map_err(|_| CipherError::InvalidKey)?;
        Ok(Self { cipher })
    }

    /// Decrypt a token back to the plaintext field value.
    pub fn decrypt(&self, token: &str) -> Result<String, CipherError> {
        let raw = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(CipherError::TokenEncoding)?;
        if raw.len() <= NONCE_LEN {
            return Err(CipherError::TokenTruncated);
        }
        let (nonce, ciphertext) = raw.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CipherError::Verification)?;
        String::from_utf8(plaintext).map_err(|_| CipherError::NotUtf8)
    }

    /// Encrypt a field value into a fresh token (new random nonce each call).
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CipherError::Encrypt)?;
        let mut raw = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        raw.extend_from_slice(&nonce);
        raw.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(raw))
    }
}

/// Mint a fresh base64url key, suitable for a config file.
pub fn generate_key() -> String {
    let key = Aes256Gcm::generate_key(&mut OsRng);
    URL_SAFE.encode(key)
}
