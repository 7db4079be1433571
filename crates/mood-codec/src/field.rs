//! Single-field AES-256-GCM codec.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::CodecError;
use crate::key::PinKey;

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key`.
///
/// Every call draws a fresh nonce, so equal plaintexts produce different
/// stored values.
///
/// # Errors
///
/// Returns `CodecError::Nonce` if the OS random source fails.
pub fn encrypt_field(plaintext: &str, key: &PinKey) -> Result<String, CodecError> {
    let cipher = cipher(key)?;
    let mut nonce_bytes = [0u8; NONCE_LEN];
    getrandom::fill(&mut nonce_bytes).map_err(|e| CodecError::Nonce(e.to_string()))?;
    let nonce = Nonce::from_slice(&nonce_bytes);
    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|_| CodecError::Encrypt)?;

    let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    payload.extend_from_slice(&nonce_bytes);
    payload.extend_from_slice(&ciphertext);
    Ok(STANDARD.encode(payload))
}

/// Decrypt a value produced by [`encrypt_field`].
///
/// # Errors
///
/// Returns `CodecError::Decrypt` when `key` was derived from a different PIN
/// or the value was altered, and an encoding error for malformed input.
pub fn decrypt_field(stored: &str, key: &PinKey) -> Result<String, CodecError> {
    let payload = STANDARD.decode(stored.trim())?;
    if payload.len() < NONCE_LEN + TAG_LEN {
        return Err(CodecError::Truncated(payload.len()));
    }
    let (nonce_bytes, ciphertext) = payload.split_at(NONCE_LEN);
    let plaintext = cipher(key)?
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| CodecError::Decrypt)?;
    String::from_utf8(plaintext).map_err(|_| CodecError::NotUtf8)
}

fn cipher(key: &PinKey) -> Result<Aes256Gcm, CodecError> {
    Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| CodecError::Encrypt)
}
