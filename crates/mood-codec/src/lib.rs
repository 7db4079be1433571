//! # mood-codec
//!
//! Field-level encryption for journal entries, keyed by the participant's PIN.
//!
//! - [`PinKey`] derives a 256-bit key from the PIN with SHA-256.
//! - [`encrypt_field`] / [`decrypt_field`] seal one string with AES-256-GCM
//!   under a fresh random nonce; the stored form is `base64(nonce ‖ ciphertext)`.
//! - [`seal_entry`] / [`open_entry`] apply the field codec to every textual
//!   field of an entry independently. The entry id is never encrypted.
//! - [`hash_secret`] is the one-way hash used for stored PINs and bearer tokens.
//!
//! A wrong PIN fails the GCM tag check and surfaces as
//! [`CodecError::Decrypt`]; it never yields garbage plaintext.

mod entry;
mod error;
mod field;
mod key;

pub use entry::{open_entry, seal_entry};
pub use error::CodecError;
pub use field::{decrypt_field, encrypt_field};
pub use key::{PinKey, hash_secret};
