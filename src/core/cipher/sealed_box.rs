//! NaCl sealed-box backend.
//!
//! Wire format of a sealed box: ephemeral public key (32 bytes) followed by
//! the XSalsa20-Poly1305 ciphertext, whose nonce is derived from the
//! ephemeral and recipient public keys. Compatible with libsodium's
//! `crypto_box_seal`.

use crypto_box::PublicKey;
use rand::{CryptoRng, RngCore};
use tracing::trace;
use zeroize::Zeroizing;

use crate::core::keys::KeyPair;

/// Bytes a sealed box adds to its plaintext: ephemeral key plus MAC tag.
pub const SEAL_OVERHEAD: usize = 32 + 16;

/// Seal `plaintext` so only the holder of the matching private key can
/// open it.
///
/// # Errors
///
/// Returns the opaque AEAD error if sealing fails.
pub fn seal<R: RngCore + CryptoRng>(
    recipient: &PublicKey,
    plaintext: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>, crypto_box::aead::Error> {
    trace!(plaintext_len = plaintext.len(), "sealing");

    let sealed = recipient.seal(rng, plaintext)?;

    trace!(ciphertext_len = sealed.len(), "sealed");
    Ok(sealed)
}

/// Open a sealed box against a key pair, or `None` if it does not open.
pub fn open(keys: &KeyPair, ciphertext: &[u8]) -> Option<Zeroizing<Vec<u8>>> {
    trace!(ciphertext_len = ciphertext.len(), "opening");

    // The nonce binds the recipient public key; a pair whose halves do
    // not match can never open a box, same as libsodium.
    if !keys.is_consistent() || ciphertext.len() < SEAL_OVERHEAD {
        return None;
    }

    let opened = keys.private_key().unseal(ciphertext).ok()?;

    trace!(plaintext_len = opened.len(), "opened");
    Some(Zeroizing::new(opened))
}
