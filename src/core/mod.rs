//! Core library components.
//!
//! Encoding, key pairs, sealing, storage, and the vault and secret
//! operations built on them. Nothing here prints.

pub mod cipher;
pub mod codec;
pub mod config;
pub mod constants;
pub mod environment;
pub mod keys;
pub mod secrets;
pub mod store;
pub mod types;
pub mod vault;
