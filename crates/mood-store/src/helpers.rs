//! Row-to-entity parsing helpers.

use chrono::{DateTime, Utc};
use mood_core::entities::{Participant, SealedEntry};

use crate::error::StoreError;

/// Parse a TEXT timestamp written either by `to_rfc3339()` or by `SQLite`'s
/// `datetime('now')`.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Columns: `id, pin_hash, created_at`.
pub fn row_to_participant(row: &libsql::Row) -> Result<Participant, StoreError> {
    Ok(Participant {
        id: row.get::<String>(0)?,
        pin_hash: row.get::<String>(1)?,
        created_at: parse_datetime(&row.get::<String>(2)?)?,
    })
}

/// Columns: `id, name, mood, rating, activities`.
pub fn row_to_entry(row: &libsql::Row) -> Result<SealedEntry, StoreError> {
    let activities = row.get::<String>(4)?;
    Ok(SealedEntry {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        mood: row.get::<String>(2)?,
        rating: row.get::<String>(3)?,
        activities: serde_json::from_str(&activities)
            .map_err(|e| StoreError::Query(format!("Invalid activities column: {e}")))?,
    })
}
