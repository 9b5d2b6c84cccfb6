//! In-memory secret store.
//!
//! Same semantics as the filesystem store, backed by a sorted map.

use std::collections::BTreeMap;
use std::io;

use super::Store;
use crate::core::types::Address;
use crate::error::Result;

/// Secret store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    namespace: String,
    entries: BTreeMap<Address, Vec<u8>>,
}

impl Memory {
    /// Create an empty store for `namespace`.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Store for Memory {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn exists(&self, address: &str) -> bool {
        self.entries.contains_key(address)
    }

    fn read(&self, address: &str) -> Result<Vec<u8>> {
        self.entries.get(address).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no entry at {}", address)).into()
        })
    }

    fn write(&mut self, address: &str, bytes: &[u8]) -> Result<()> {
        self.entries.insert(address.to_string(), bytes.to_vec());
        Ok(())
    }

    fn addresses(&self) -> Result<Vec<Address>> {
        Ok(self.entries.keys().cloned().collect())
    }
}
