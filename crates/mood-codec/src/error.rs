use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    /// The stored field is not valid base64.
    #[error("field is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// The stored field is shorter than a nonce plus an authentication tag.
    #[error("field is truncated ({0} bytes)")]
    Truncated(usize),

    /// The OS random source could not produce a nonce.
    #[error("nonce generation failed: {0}")]
    Nonce(String),

    #[error("encryption failed")]
    Encrypt,

    /// Authentication failed: wrong PIN or tampered ciphertext.
    #[error("decryption failed (wrong PIN or corrupted field)")]
    Decrypt,

    #[error("decrypted field is not UTF-8")]
    NotUtf8,
}
