//! Transport encoding and secret addressing.
//!
//! Pure functions: no state, no I/O. Key and ciphertext bytes are stored as
//! standard padded base64; secret names are stored as the hex SHA-256 of
//! their UTF-8 bytes so a directory listing reveals nothing about them.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::core::constants::KEY_SIZE;
use crate::core::types::{Address, EncodedText};
use crate::error::DecodingError;

/// Derive the storage address of a secret name.
///
/// Always 64 lowercase hex characters. Stable across runs and platforms.
pub fn derive_address(name: &str) -> Address {
    format!("{:x}", Sha256::digest(name.as_bytes()))
}

/// Check whether a file name has the shape of an address.
pub fn is_address(candidate: &str) -> bool {
    candidate.len() == crate::core::constants::ADDRESS_LEN
        && candidate
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Encode arbitrary bytes as transport text.
pub fn encode_text(bytes: &[u8]) -> EncodedText {
    STANDARD.encode(bytes)
}

/// Decode transport text back into bytes.
///
/// Surrounding ASCII whitespace (a trailing newline left by an editor) is
/// ignored.
///
/// # Errors
///
/// Returns `DecodingError::InvalidText` if the input is not valid base64.
pub fn decode_text(text: &str) -> Result<Vec<u8>, DecodingError> {
    STANDARD
        .decode(text.trim_matches(|c: char| c.is_ascii_whitespace()))
        .map_err(|e| DecodingError::InvalidText {
            what: "text".to_string(),
            reason: e.to_string(),
        })
}

/// Decode transport text into a fixed-size key.
///
/// # Errors
///
/// Returns `DecodingError::InvalidText` for malformed base64 and
/// `DecodingError::KeyLength` unless exactly 32 bytes decode.
pub fn decode_key(text: &str) -> Result<[u8; KEY_SIZE], DecodingError> {
    let bytes = decode_text(text).map_err(|e| e.about("key"))?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| DecodingError::KeyLength {
        what: "key".to_string(),
        expected: KEY_SIZE,
        actual,
    })
}
