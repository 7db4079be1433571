//! Journal storage configuration.

use serde::{Deserialize, Serialize};

const IN_MEMORY: &str = ":memory:";

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("moodjournal").join("journal.db"))
        .map_or_else(|| ".moodjournal/journal.db".to_string(), |path| path.display().to_string())
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// libSQL database file, or `:memory:` for a throwaway store.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

impl StorageConfig {
    pub fn is_in_memory(&self) -> bool {
        self.database_path == IN_MEMORY
    }
}
