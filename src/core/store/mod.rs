//! Secret storage.
//!
//! Secrets live in a flat, content-addressed byte store: one entry per
//! secret, keyed by the secret's address. Presence of an entry is the only
//! existence signal; there is no index or metadata file.
//!
//! ## Adding a New Storage Backend
//!
//! 1. Implement the `Store` trait
//! 2. Add the implementation in a new file (e.g., `object.rs`)
//! 3. Re-export from this module
//!
//! ## Example
//!
//! ```ignore
//! struct Bucket { /* ... */ }
//!
//! impl Store for Bucket {
//!     fn namespace(&self) -> &str { &self.prefix }
//!     fn exists(&self, address: &str) -> bool { /* HEAD object */ }
//!     fn read(&self, address: &str) -> Result<Vec<u8>> { /* GET object */ }
//!     fn write(&mut self, address: &str, bytes: &[u8]) -> Result<()> { /* PUT object */ }
//!     fn addresses(&self) -> Result<Vec<Address>> { /* LIST prefix */ }
//! }
//! ```

use crate::core::types::Address;
use crate::error::Result;

mod fs;
mod memory;

pub use fs::Filesystem;
pub use memory::Memory;

pub(crate) use fs::write_atomic;

/// Key-addressed byte store holding one environment's secrets.
pub trait Store {
    /// Name of the environment this store belongs to, for messages.
    fn namespace(&self) -> &str;

    /// Check whether an entry exists at `address`.
    fn exists(&self, address: &str) -> bool;

    /// Read the entry at `address`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the entry is missing or unreadable.
    fn read(&self, address: &str) -> Result<Vec<u8>>;

    /// Create or replace the entry at `address`.
    ///
    /// A reader sees either the previous bytes or the new bytes, never a
    /// partial write.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the entry cannot be written.
    fn write(&mut self, address: &str, bytes: &[u8]) -> Result<()>;

    /// Every address currently stored, sorted.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the store cannot be enumerated.
    fn addresses(&self) -> Result<Vec<Address>>;
}
