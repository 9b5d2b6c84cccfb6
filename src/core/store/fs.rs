//! Filesystem-backed secret store.
//!
//! One file per secret inside the environment directory, named by address.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Store;
use crate::core::codec;
use crate::core::types::Address;
use crate::error::Result;

/// Secret store rooted at an environment directory (`<root>/<environment>/`).
#[derive(Debug, Clone)]
pub struct Filesystem {
    namespace: String,
    dir: PathBuf,
}

impl Filesystem {
    /// Open the store for `namespace` at `dir`. The directory is not created.
    pub fn new(namespace: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            namespace: namespace.into(),
            dir: dir.into(),
        }
    }

    /// Path of the file for `address`.
    pub fn path_of(&self, address: &str) -> PathBuf {
        self.dir.join(address)
    }
}

impl Store for Filesystem {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn exists(&self, address: &str) -> bool {
        self.path_of(address).exists()
    }

    fn read(&self, address: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.path_of(address))?)
    }

    fn write(&mut self, address: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_of(address);
        write_atomic(&path, bytes)?;
        debug!(path = %path.display(), "secret written");
        Ok(())
    }

    fn addresses(&self) -> Result<Vec<Address>> {
        let mut addresses = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if codec::is_address(name) {
                    addresses.push(name.to_string());
                }
            }
        }
        addresses.sort();
        Ok(addresses)
    }
}

/// Write `bytes` to `path` through a synced sibling temp file and a rename.
///
/// # Errors
///
/// Returns an I/O error if the temp file cannot be written or renamed.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{}.tmp", file_name));

    let mut file = fs::File::create(&tmp)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}
