//! # mood-config
//!
//! Layered configuration loading for the mood journal using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`MOODJOURNAL_*` prefix, `__` as separator)
//! 2. Project-level `.moodjournal/config.toml`
//! 3. User-level `~/.config/moodjournal/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `MOODJOURNAL_SERVER__BIND` -> `server.bind`,
//! `MOODJOURNAL_RESPONSES__GOODBYE` -> `responses.goodbye`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use mood_config::MoodConfig;
//!
//! let config = MoodConfig::load_with_dotenv().expect("config");
//! println!("listening on {}", config.server.bind);
//! ```

mod error;
mod responses;
mod server;
mod storage;

pub use error::ConfigError;
pub use responses::ResponsesConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MoodConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub responses: ResponsesConfig,
}

impl MoodConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".moodjournal/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("MOODJOURNAL_").split("__"))
    }

    /// Reject values that would only fail later at bind time.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unparsable bind address or
    /// an empty database path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "server.bind".into(),
                reason: format!("'{}' is not a socket address", self.server.bind),
            });
        }
        if self.storage.database_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.database_path".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("moodjournal").join("config.toml"))
    }
}
