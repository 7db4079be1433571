use std::fmt;

use sha2::{Digest, Sha256};

pub(crate) const KEY_LEN: usize = 32;

/// Symmetric key derived from a participant's PIN.
///
/// The same derivation is used for sealing and opening, so a key derived from
/// the same PIN in a later conversation opens entries sealed in an earlier one.
#[derive(Clone, PartialEq, Eq)]
pub struct PinKey([u8; KEY_LEN]);

impl PinKey {
    #[must_use]
    pub fn derive(pin: &str) -> Self {
        let digest = Sha256::digest(pin.as_bytes());
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&digest);
        Self(key)
    }

    pub(crate) const fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for PinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PinKey(<redacted>)")
    }
}

/// Lowercase hex SHA-256 of `secret`. Used for PIN hashes and token hashes.
#[must_use]
pub fn hash_secret(secret: &str) -> String {
    Sha256::digest(secret.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        assert_eq!(PinKey::derive("1234"), PinKey::derive("1234"));
        assert_ne!(PinKey::derive("1234"), PinKey::derive("4321"));
    }

    #[test]
    fn debug_output_hides_key_bytes() {
        assert_eq!(format!("{:?}", PinKey::derive("1234")), "PinKey(<redacted>)");
    }

    #[test]
    fn hash_matches_known_sha256() {
        assert_eq!(
            hash_secret("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
