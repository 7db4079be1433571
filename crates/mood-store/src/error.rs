//! Error types for mood-store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No participant is registered for the presented token.
    #[error("Unknown participant")]
    UnknownParticipant,

    /// A participant is already registered for the presented token.
    #[error("Participant already registered")]
    AlreadyRegistered,

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// A row could not be mapped back into an entity.
    #[error("Query failed: {0}")]
    Query(String),

    /// The in-memory gateway's lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,

    /// The in-memory gateway was told to reject writes.
    #[error("Write rejected")]
    WriteRejected,

    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    #[error(transparent)]
    Core(#[from] mood_core::errors::CoreError),
}
