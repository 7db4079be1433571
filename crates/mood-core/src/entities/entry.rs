use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One journal record in plaintext.
///
/// Rating and mood are opaque strings at this layer; validation belongs to the
/// voice platform's slot types.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub name: String,
    pub mood: String,
    pub rating: String,
    pub activities: Vec<String>,
}

impl Entry {
    /// Case-insensitive name comparison used for lookups and duplicate checks.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Case-insensitive mood comparison used by the listing filter.
    #[must_use]
    pub fn has_mood(&self, mood: &str) -> bool {
        self.mood.to_lowercase() == mood.trim().to_lowercase()
    }
}

/// A journal record as stored: the id is plaintext, every other field is an
/// encoded ciphertext produced by the entry codec.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SealedEntry {
    pub id: String,
    pub name: String,
    pub mood: String,
    pub rating: String,
    pub activities: Vec<String>,
}
