//! Constants used throughout untold.
//!
//! Centralizes file names, extensions, and sizes.

/// Configuration file name (.untold.toml).
pub const CONFIG_FILE: &str = ".untold.toml";

/// Environment used when none is given on the command line or in config.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Extension of the public key file (`<environment>.public`).
pub const PUBLIC_KEY_EXT: &str = "public";

/// Extension of the private key file (`<environment>.private`).
pub const PRIVATE_KEY_EXT: &str = "private";

/// Suffix of key files staged during rotation (`<environment>.public.next`).
pub const STAGED_KEY_SUFFIX: &str = "next";

/// Size in bytes of a public or private key.
pub const KEY_SIZE: usize = 32;

/// Length of a secret address (hex SHA-256).
pub const ADDRESS_LEN: usize = 64;

/// Gitignore entries that keep private keys out of version control.
pub const GITIGNORE_ENTRIES: &[&str] = &["*.private", "*.private.next"];

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "UNTOLD_LOG";
