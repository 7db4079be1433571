//! # mood-store
//!
//! Persistence gateway for the mood journal.
//!
//! [`JournalGateway`] is the seam the dialogue engine talks to. Two
//! implementations exist:
//!
//! - [`MemoryGateway`]: a mutex-guarded map, used by tests and local demos.
//! - [`LibsqlGateway`]: a libSQL database (file or `:memory:`) with embedded
//!   migrations run on open.
//!
//! Neither implementation ever sees plaintext entry content or a raw token at
//! rest: entries arrive sealed and tokens are reduced to their SHA-256 hash.

pub mod error;
mod gateway;
mod helpers;
mod libsql_gateway;
mod memory;
mod migrations;

pub use error::StoreError;
pub use gateway::JournalGateway;
pub use libsql_gateway::LibsqlGateway;
pub use memory::MemoryGateway;
