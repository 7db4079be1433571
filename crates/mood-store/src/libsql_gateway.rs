//! libSQL-backed gateway.

use chrono::Utc;
use libsql::Builder;
use mood_codec::hash_secret;
use mood_core::entities::{Participant, ParticipantLookup, SealedEntry};
use mood_core::ids::{PREFIX_PARTICIPANT, generate_id};
use tracing::debug;

use crate::error::StoreError;
use crate::gateway::JournalGateway;
use crate::helpers::{row_to_entry, row_to_participant};

/// Journal storage in a local libSQL database.
pub struct LibsqlGateway {
    #[allow(dead_code)]
    db: libsql::Database,
    pub(crate) conn: libsql::Connection,
}

impl LibsqlGateway {
    /// Open a local database at `path` (or `":memory:"`) and run migrations.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Per-connection in SQLite.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| StoreError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let gateway = Self { db, conn };
        gateway.run_migrations().await?;
        debug!(path, "journal database opened");
        Ok(gateway)
    }

    async fn participant_id(&self, token: &str) -> Result<Option<String>, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id FROM participants WHERE token_hash = ?1",
                [hash_secret(token)],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }

    async fn require_participant_id(&self, token: &str) -> Result<String, StoreError> {
        self.participant_id(token)
            .await?
            .ok_or(StoreError::UnknownParticipant)
    }
}

impl JournalGateway for LibsqlGateway {
    async fn find_participant(&self, token: &str) -> Result<ParticipantLookup, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, pin_hash, created_at FROM participants WHERE token_hash = ?1",
                [hash_secret(token)],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(ParticipantLookup::Found(row_to_participant(&row)?)),
            None => Ok(ParticipantLookup::NotFound),
        }
    }

    async fn check_pin_hash(&self, token: &str, pin_hash: &str) -> Result<bool, StoreError> {
        Ok(match self.find_participant(token).await? {
            ParticipantLookup::Found(participant) => participant.pin_hash == pin_hash,
            ParticipantLookup::NotFound => false,
        })
    }

    async fn append_entry(&self, token: &str, entry: &SealedEntry) -> Result<(), StoreError> {
        let participant_id = self.require_participant_id(token).await?;
        let activities = serde_json::to_string(&entry.activities)
            .map_err(|e| StoreError::Query(format!("Failed to encode activities: {e}")))?;

        self.conn
            .execute(
                "INSERT INTO entries (id, participant_id, name, mood, rating, activities, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    entry.id.as_str(),
                    participant_id.as_str(),
                    entry.name.as_str(),
                    entry.mood.as_str(),
                    entry.rating.as_str(),
                    activities,
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;
        debug!(entry_id = %entry.id, "entry appended");
        Ok(())
    }

    async fn list_entries(&self, token: &str) -> Result<Vec<SealedEntry>, StoreError> {
        let participant_id = self.require_participant_id(token).await?;
        let mut rows = self
            .conn
            .query(
                "SELECT id, name, mood, rating, activities FROM entries
                 WHERE participant_id = ?1 ORDER BY seq ASC",
                [participant_id],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_entry(&row)?);
        }
        Ok(entries)
    }

    async fn delete_entry(&self, token: &str, entry_id: &str) -> Result<bool, StoreError> {
        let participant_id = self.require_participant_id(token).await?;
        let affected = self
            .conn
            .execute(
                "DELETE FROM entries WHERE id = ?1 AND participant_id = ?2",
                [entry_id, participant_id.as_str()],
            )
            .await?;
        debug!(entry_id, affected, "entry delete");
        Ok(affected > 0)
    }

    async fn register_participant(
        &self,
        token: &str,
        pin_hash: &str,
    ) -> Result<Participant, StoreError> {
        if self.participant_id(token).await?.is_some() {
            return Err(StoreError::AlreadyRegistered);
        }
        let participant = Participant {
            id: generate_id(PREFIX_PARTICIPANT)?,
            pin_hash: pin_hash.to_string(),
            created_at: Utc::now(),
        };
        self.conn
            .execute(
                "INSERT INTO participants (id, token_hash, pin_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![
                    participant.id.as_str(),
                    hash_secret(token),
                    participant.pin_hash.as_str(),
                    participant.created_at.to_rfc3339()
                ],
            )
            .await?;
        Ok(participant)
    }
}
