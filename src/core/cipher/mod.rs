//! Cryptographic operations.
//!
//! Secrets are sealed with NaCl `crypto_box_seal`. The sender is anonymous:
//! every call generates an ephemeral X25519 key, and the output is the
//! ephemeral public key followed by the XSalsa20-Poly1305 ciphertext.
//!
//! [`open`] reports failure without a reason: a wrong key pair and a
//! tampered ciphertext look the same to the caller.

mod sealed_box;

pub use sealed_box::{open, seal, SEAL_OVERHEAD};
