use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity anchor for one journal owner.
///
/// Only the hash of the PIN is ever held here; the plaintext PIN lives in the
/// session attributes of a conversation and nowhere else.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    pub pin_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Result of resolving a bearer token to a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantLookup {
    Found(Participant),
    NotFound,
}
