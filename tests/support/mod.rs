//! Test support utilities for untold integration tests.
//!
//! Provides reusable workspace setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;
use tempfile::TempDir;

/// Test workspace in an isolated temp directory.
///
/// Child processes use `.current_dir()`, so tests can safely run in
/// parallel.
pub struct Test {
    /// Temporary workspace root
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty workspace.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create a workspace with a vault for `env`.
    pub fn with_vault(env: &str) -> Self {
        let t = Self::new();
        let output = t.create_vault(env);
        assert!(
            output.status.success(),
            "Failed to create vault: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Create a workspace with a vault for `env` and secrets added.
    pub fn with_secrets(env: &str, secrets: &[(&str, &str)]) -> Self {
        let t = Self::with_vault(env);
        for (name, value) in secrets {
            let output = t.add(env, name, value);
            assert!(
                output.status.success(),
                "Failed to add secret {}: {}",
                name,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        t
    }

    /// Absolute path of `relative` inside the workspace.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Read a workspace file as a string.
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).expect("failed to read workspace file")
    }

    /// Path of the file holding secret `name` in `env`.
    pub fn secret_path(&self, env: &str, name: &str) -> PathBuf {
        self.path(env).join(address_of(name))
    }
}
