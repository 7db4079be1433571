//! The persistence seam consumed by the dialogue engine.

use mood_core::entities::{Participant, ParticipantLookup, SealedEntry};

use crate::error::StoreError;

/// Storage for participants and their sealed entries.
///
/// Every method takes the raw bearer token; implementations hash it before it
/// reaches storage. Entries cross this boundary only in sealed form.
#[allow(async_fn_in_trait)]
pub trait JournalGateway {
    /// Resolve a token to its participant.
    async fn find_participant(&self, token: &str) -> Result<ParticipantLookup, StoreError>;

    /// Compare `pin_hash` with the stored hash. Unknown tokens never match.
    async fn check_pin_hash(&self, token: &str, pin_hash: &str) -> Result<bool, StoreError>;

    /// Append one entry at the end of the participant's journal.
    async fn append_entry(&self, token: &str, entry: &SealedEntry) -> Result<(), StoreError>;

    /// All entries of the participant in insertion order.
    async fn list_entries(&self, token: &str) -> Result<Vec<SealedEntry>, StoreError>;

    /// Remove the entry with `entry_id`. Returns `false` if nothing was removed.
    async fn delete_entry(&self, token: &str, entry_id: &str) -> Result<bool, StoreError>;

    /// Provision a participant for `token` with an already-hashed PIN.
    async fn register_participant(
        &self,
        token: &str,
        pin_hash: &str,
    ) -> Result<Participant, StoreError>;
}
