//! HTTP listener configuration.

use serde::{Deserialize, Serialize};

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address the `moodd serve` listener binds to.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Expected voice-platform application id. Empty disables the check.
    #[serde(default)]
    pub skill_id: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            skill_id: String::new(),
        }
    }
}

impl ServerConfig {
    /// Whether inbound requests must carry a matching application id.
    pub fn checks_skill_id(&self) -> bool {
        !self.skill_id.trim().is_empty()
    }
}
