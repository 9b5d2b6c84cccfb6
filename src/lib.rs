//! untold - per-environment secrets sealed with NaCl boxes, safe to commit.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Write .untold.toml, update .gitignore
//! │   ├── vault         # create-vault, rotate-vault
//! │   ├── secrets       # add-secret, show-secret, change-secret
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── codec         # base64 transport text, name -> address
//!     ├── keys          # X25519 key pairs
//!     ├── cipher/       # Sealed-box encryption
//!     ├── store/        # Content-addressed secret storage
//!     │   ├── fs        # One file per secret
//!     │   └── memory    # In-memory map
//!     ├── environment   # Paths and key files of an environment
//!     ├── secrets       # add / show / change
//!     ├── vault/        # create / rotate
//!     └── config        # .untold.toml
//! ```
//!
//! # On-disk layout
//!
//! ```text
//! prod.public               base64 public key (commit)
//! prod.private              base64 private key (never commit)
//! prod/<sha256(name)>       base64 sealed box, one per secret
//! ```

pub mod cli;
pub mod core;
pub mod error;
