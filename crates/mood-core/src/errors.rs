//! Cross-cutting error types for the mood journal.
//!
//! Domain-specific errors (`CodecError`, `StoreError`, `TurnError`) are defined
//! in their respective crates. The `moodd` binary converges them with `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any journal crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The session attribute bag echoed by the platform could not be decoded.
    #[error("Invalid session attributes: {0}")]
    InvalidAttributes(#[from] serde_json::Error),

    /// The OS random source failed.
    #[error("Random source unavailable: {0}")]
    Random(String),
}
