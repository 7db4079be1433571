//! ID prefix constants and generation.
//!
//! IDs have the shape `{prefix}-{8 hex chars}`, e.g. `ent-a3f8b2c1`.

use crate::errors::CoreError;

pub const PREFIX_ENTRY: &str = "ent";
pub const PREFIX_PARTICIPANT: &str = "par";

/// Generate a prefixed ID from 4 bytes of OS randomness.
///
/// # Errors
///
/// Returns `CoreError::Random` if the OS random source is unavailable.
pub fn generate_id(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes).map_err(|e| CoreError::Random(e.to_string()))?;
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{prefix}-{hex}"))
}
