//! Environment key pairs.
//!
//! A [`KeyPair`] is an X25519 public/private pair for NaCl sealed boxes.
//! Both halves are 32 bytes and are stored as base64 text in
//! `<environment>.public` and `<environment>.private`.

use crypto_box::{PublicKey, SecretKey};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::core::codec;
use crate::core::constants::KEY_SIZE;
use crate::core::types::EncodedText;
use crate::error::DecodingError;

/// A public/private key pair for one environment.
///
/// The private half zeroizes itself on drop.
#[derive(Clone)]
pub struct KeyPair {
    public: PublicKey,
    private: SecretKey,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public_text())
            .field("private", &"<redacted>")
            .finish()
    }
}

impl KeyPair {
    /// Generate a fresh pair from a cryptographically secure generator.
    pub fn generate(rng: &mut (impl RngCore + CryptoRng)) -> Self {
        let private = SecretKey::generate(rng);
        let public = private.public_key();
        Self { public, private }
    }

    /// Assemble a pair from raw key bytes.
    ///
    /// The halves are trusted to match; nothing here checks that `public`
    /// is the image of `private`.
    pub fn from_bytes(public: [u8; KEY_SIZE], private: [u8; KEY_SIZE]) -> Self {
        let private = Zeroizing::new(private);
        Self {
            public: PublicKey::from(public),
            private: SecretKey::from(*private),
        }
    }

    /// Assemble a pair from the base64 text of both halves.
    ///
    /// # Errors
    ///
    /// Returns `DecodingError` if either half is malformed or not 32 bytes.
    pub fn from_text(public: &str, private: &str) -> Result<Self, DecodingError> {
        let public = codec::decode_key(public).map_err(|e| e.about("public key"))?;
        let private =
            Zeroizing::new(codec::decode_key(private).map_err(|e| e.about("private key"))?);
        Ok(Self::from_bytes(public, *private))
    }

    /// Rebuild a pair from the base64 text of the private half alone.
    ///
    /// # Errors
    ///
    /// Returns `DecodingError` if the text is malformed or not 32 bytes.
    pub fn from_private_text(private: &str) -> Result<Self, DecodingError> {
        let bytes =
            Zeroizing::new(codec::decode_key(private).map_err(|e| e.about("private key"))?);
        let private = SecretKey::from(*bytes);
        let public = private.public_key();
        Ok(Self { public, private })
    }

    /// Public half.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Private half.
    pub fn private_key(&self) -> &SecretKey {
        &self.private
    }

    /// Whether the stored public half is the one derived from the private half.
    pub fn is_consistent(&self) -> bool {
        self.private.public_key().as_bytes() == self.public.as_bytes()
    }

    /// Base64 text of the public key.
    pub fn public_text(&self) -> EncodedText {
        codec::encode_text(self.public.as_bytes())
    }

    /// Base64 text of the private key, wiped from memory on drop.
    pub fn private_text(&self) -> Zeroizing<EncodedText> {
        let bytes = Zeroizing::new(self.private.to_bytes());
        Zeroizing::new(codec::encode_text(&bytes[..]))
    }
}

/// Decode a standalone public key from its base64 text.
///
/// # Errors
///
/// Returns `DecodingError` if the text is malformed or not 32 bytes.
pub fn public_key_from_text(text: &str) -> Result<PublicKey, DecodingError> {
    codec::decode_key(text)
        .map(PublicKey::from)
        .map_err(|e| e.about("public key"))
}
