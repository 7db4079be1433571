//! Whole-entry sealing. Each textual field is encrypted on its own.

use mood_core::entities::{Entry, SealedEntry};

use crate::error::CodecError;
use crate::field::{decrypt_field, encrypt_field};
use crate::key::PinKey;

/// Encrypt name, mood, rating and every activity of `entry`.
///
/// # Errors
///
/// Propagates the first field failure.
pub fn seal_entry(entry: &Entry, key: &PinKey) -> Result<SealedEntry, CodecError> {
    Ok(SealedEntry {
        id: entry.id.clone(),
        name: encrypt_field(&entry.name, key)?,
        mood: encrypt_field(&entry.mood, key)?,
        rating: encrypt_field(&entry.rating, key)?,
        activities: entry
            .activities
            .iter()
            .map(|a| encrypt_field(a, key))
            .collect::<Result<_, _>>()?,
    })
}

/// Inverse of [`seal_entry`]. Activity order is preserved.
///
/// # Errors
///
/// Returns `CodecError::Decrypt` if `key` came from a different PIN.
pub fn open_entry(sealed: &SealedEntry, key: &PinKey) -> Result<Entry, CodecError> {
    Ok(Entry {
        id: sealed.id.clone(),
        name: decrypt_field(&sealed.name, key)?,
        mood: decrypt_field(&sealed.mood, key)?,
        rating: decrypt_field(&sealed.rating, key)?,
        activities: sealed
            .activities
            .iter()
            .map(|a| decrypt_field(a, key))
            .collect::<Result<_, _>>()?,
    })
}
