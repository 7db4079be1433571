use mood_codec::CodecError;
use mood_core::errors::CoreError;
use mood_core::intents::IntentCall;
use mood_store::StoreError;
use thiserror::Error;

/// Failures that abort a turn before the dialogue runs.
#[derive(Debug, Error)]
pub enum TurnError {
    /// The caller's token does not resolve to a participant.
    #[error("caller is not a registered participant")]
    Unauthorized,

    /// The store could not be reached while resolving the caller.
    #[error("participant lookup failed: {0}")]
    Store(#[from] StoreError),
}

/// Recoverable failures inside a turn. Each one is rendered as speech.
#[derive(Debug, Error)]
pub enum DialogueFailure {
    #[error("PIN does not match the stored hash")]
    PinMismatch,

    /// The intent needs dialogue context that the attributes do not carry.
    #[error("intent arrived without the state it continues")]
    MissingContextState,

    #[error("no entry with that name")]
    EntryNotFound,

    /// Carries the intent to re-elicit the name on.
    #[error("an entry with that name already exists")]
    DuplicateEntryName(IntentCall),

    #[error("persistence failed: {0}")]
    Persistence(#[from] StoreError),

    /// Stored entries could not be opened with the session PIN.
    #[error("entries could not be opened: {0}")]
    Unreadable(#[from] CodecError),

    #[error("entry id could not be generated: {0}")]
    Identifier(#[from] CoreError),

    #[error("intent not understood in this context")]
    UnrecognizedIntent,
}
