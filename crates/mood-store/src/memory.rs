//! In-process gateway backed by a mutex-guarded map.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use mood_codec::hash_secret;
use mood_core::entities::{Participant, ParticipantLookup, SealedEntry};
use mood_core::ids::{PREFIX_PARTICIPANT, generate_id};

use crate::error::StoreError;
use crate::gateway::JournalGateway;

#[derive(Debug)]
struct Journal {
    participant: Participant,
    entries: Vec<SealedEntry>,
}

/// Keyed by token hash. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    journals: Mutex<HashMap<String, Journal>>,
    reject_writes: AtomicBool,
}

impl MemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, `append_entry` and `delete_entry` fail with
    /// [`StoreError::WriteRejected`].
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Journal>>, StoreError> {
        self.journals.lock().map_err(|_| StoreError::Poisoned)
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteRejected);
        }
        Ok(())
    }
}

impl JournalGateway for MemoryGateway {
    async fn find_participant(&self, token: &str) -> Result<ParticipantLookup, StoreError> {
        let journals = self.lock()?;
        Ok(journals
            .get(&hash_secret(token))
            .map_or(ParticipantLookup::NotFound, |j| {
                ParticipantLookup::Found(j.participant.clone())
            }))
    }

    async fn check_pin_hash(&self, token: &str, pin_hash: &str) -> Result<bool, StoreError> {
        let journals = self.lock()?;
        Ok(journals
            .get(&hash_secret(token))
            .is_some_and(|j| j.participant.pin_hash == pin_hash))
    }

    async fn append_entry(&self, token: &str, entry: &SealedEntry) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut journals = self.lock()?;
        let journal = journals
            .get_mut(&hash_secret(token))
            .ok_or(StoreError::UnknownParticipant)?;
        journal.entries.push(entry.clone());
        Ok(())
    }

    async fn list_entries(&self, token: &str) -> Result<Vec<SealedEntry>, StoreError> {
        let journals = self.lock()?;
        let journal = journals
            .get(&hash_secret(token))
            .ok_or(StoreError::UnknownParticipant)?;
        Ok(journal.entries.clone())
    }

    async fn delete_entry(&self, token: &str, entry_id: &str) -> Result<bool, StoreError> {
        self.check_writable()?;
        let mut journals = self.lock()?;
        let journal = journals
            .get_mut(&hash_secret(token))
            .ok_or(StoreError::UnknownParticipant)?;
        let before = journal.entries.len();
        journal.entries.retain(|e| e.id != entry_id);
        Ok(journal.entries.len() < before)
    }

    async fn register_participant(
        &self,
        token: &str,
        pin_hash: &str,
    ) -> Result<Participant, StoreError> {
        let mut journals = self.lock()?;
        let token_hash = hash_secret(token);
        if journals.contains_key(&token_hash) {
            return Err(StoreError::AlreadyRegistered);
        }
        let participant = Participant {
            id: generate_id(PREFIX_PARTICIPANT)?,
            pin_hash: pin_hash.to_string(),
            created_at: Utc::now(),
        };
        journals.insert(
            token_hash,
            Journal {
                participant: participant.clone(),
                entries: Vec::new(),
            },
        );
        Ok(participant)
    }
}
