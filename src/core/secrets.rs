//! Secret operations.
//!
//! The protocol half works on any [`Store`]: name to address, existence
//! checks, seal/open, transport encoding. The environment half adds the
//! key-file preconditions and is what the CLI calls.

use crypto_box::PublicKey;
use rand::{CryptoRng, RngCore};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::cipher;
use crate::core::codec;
use crate::core::environment::Environment;
use crate::core::keys::KeyPair;
use crate::core::store::Store;
use crate::core::types::{Address, EncodedText};
use crate::error::{
    AlreadyExistsError, DecodingError, DecryptionError, NotFoundError, Result, RotationError,
    SealError, UsageError,
};

/// Ciphertexts sealed under a new key, not yet written.
///
/// Produced by [`prepare_reseal`]; nothing in the store has changed while
/// one of these exists. Each entry keeps the bytes it replaces so a failed
/// commit can put them back.
#[derive(Debug)]
pub struct PreparedReseal {
    entries: Vec<Reseal>,
}

#[derive(Debug)]
struct Reseal {
    address: Address,
    original: Vec<u8>,
    sealed: EncodedText,
}

impl PreparedReseal {
    /// Number of secrets that will be rewritten.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is nothing to rewrite.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validate a secret name.
///
/// # Errors
///
/// Returns `UsageError::EmptySecretName` for an empty name.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(UsageError::EmptySecretName.into());
    }
    Ok(())
}

// Protocol over any store

/// Seal a new secret into `store`.
///
/// # Errors
///
/// Returns `AlreadyExistsError::Secret` if the address is taken; the
/// existing entry is left untouched.
pub fn seal_new<S, R>(
    store: &mut S,
    recipient: &PublicKey,
    name: &str,
    plaintext: &[u8],
    rng: &mut R,
) -> Result<Address>
where
    S: Store + ?Sized,
    R: RngCore + CryptoRng,
{
    validate_name(name)?;
    let address = codec::derive_address(name);
    if store.exists(&address) {
        return Err(AlreadyExistsError::Secret {
            name: name.to_string(),
            environment: store.namespace().to_string(),
        }
        .into());
    }

    seal_and_write(store, recipient, &address, plaintext, rng)?;
    Ok(address)
}

/// Re-seal an existing secret in `store` with a new value.
///
/// # Errors
///
/// Returns `NotFoundError::Secret` if nothing is stored under the name.
pub fn reseal_existing<S, R>(
    store: &mut S,
    recipient: &PublicKey,
    name: &str,
    plaintext: &[u8],
    rng: &mut R,
) -> Result<Address>
where
    S: Store + ?Sized,
    R: RngCore + CryptoRng,
{
    validate_name(name)?;
    let address = codec::derive_address(name);
    if !store.exists(&address) {
        return Err(NotFoundError::Secret {
            name: name.to_string(),
            environment: store.namespace().to_string(),
        }
        .into());
    }

    seal_and_write(store, recipient, &address, plaintext, rng)?;
    Ok(address)
}

/// Open the secret stored under `name`.
///
/// # Errors
///
/// Returns `NotFoundError::Secret` if absent, `DecodingError` if the stored
/// text is malformed, `DecryptionError::Secret` if the box does not open.
pub fn open_existing<S>(store: &S, keys: &KeyPair, name: &str) -> Result<Zeroizing<Vec<u8>>>
where
    S: Store + ?Sized,
{
    validate_name(name)?;
    let address = codec::derive_address(name);
    if !store.exists(&address) {
        return Err(NotFoundError::Secret {
            name: name.to_string(),
            environment: store.namespace().to_string(),
        }
        .into());
    }

    let raw = store.read(&address)?;
    let subject = format!("secret {:?} for {:?} environment", name, store.namespace());
    let ciphertext = decode_stored(&raw, &address).map_err(|e| e.about(subject))?;

    cipher::open(keys, &ciphertext).ok_or_else(|| {
        DecryptionError::Secret {
            name: name.to_string(),
            environment: store.namespace().to_string(),
        }
        .into()
    })
}

/// Open every stored secret and seal each under `new`.
///
/// Each secret is opened with the first pair in `openers` that can open
/// it. Nothing is written. Any secret that fails to decode or open aborts
/// the whole preparation.
///
/// # Errors
///
/// Returns `DecodingError` or `DecryptionError::Address` naming the first
/// secret that could not be recovered.
pub fn prepare_reseal<S, R>(
    store: &S,
    openers: &[&KeyPair],
    new: &PublicKey,
    rng: &mut R,
) -> Result<PreparedReseal>
where
    S: Store + ?Sized,
    R: RngCore + CryptoRng,
{
    let addresses = store.addresses()?;
    debug!(
        environment = store.namespace(),
        secrets = addresses.len(),
        "opening secrets for re-seal"
    );

    let mut opened = Vec::with_capacity(addresses.len());
    for address in addresses {
        let original = store.read(&address)?;
        let subject = format!("{} in {:?} environment", address, store.namespace());
        let ciphertext = decode_stored(&original, &address).map_err(|e| e.about(subject))?;
        let plaintext = openers
            .iter()
            .find_map(|keys| cipher::open(keys, &ciphertext))
            .ok_or_else(|| DecryptionError::Address {
                address: address.clone(),
                environment: store.namespace().to_string(),
            })?;
        opened.push((address, original, plaintext));
    }

    let mut entries = Vec::with_capacity(opened.len());
    for (address, original, plaintext) in opened {
        let sealed = cipher::seal(new, &plaintext, rng)
            .map_err(|_| SealError::Seal(store.namespace().to_string()))?;
        entries.push(Reseal {
            address,
            original,
            sealed: codec::encode_text(&sealed),
        });
    }

    Ok(PreparedReseal { entries })
}

/// Write prepared ciphertexts over their entries.
///
/// If a write fails, entries already rewritten get their original bytes
/// back before the error is returned, so the store is as it was before the
/// commit started.
///
/// # Errors
///
/// Returns the store's error for the failed write, or
/// `RotationError::Incomplete` if restoring an entry failed too. In the
/// latter case the store holds a mix of old and new ciphertexts.
pub fn commit_reseal<S>(store: &mut S, prepared: PreparedReseal) -> Result<usize>
where
    S: Store + ?Sized,
{
    let entries = prepared.entries;
    for (done, entry) in entries.iter().enumerate() {
        if let Err(e) = store.write(&entry.address, entry.sealed.as_bytes()) {
            warn!(
                environment = store.namespace(),
                address = %entry.address,
                error = %e,
                "re-seal write failed, restoring {} entries",
                done
            );
            for written in &entries[..done] {
                if let Err(restore) = store.write(&written.address, &written.original) {
                    return Err(RotationError::Incomplete {
                        environment: store.namespace().to_string(),
                        reason: format!(
                            "{}; restoring {} failed: {}",
                            e, written.address, restore
                        ),
                    }
                    .into());
                }
            }
            return Err(e);
        }
    }
    debug!(
        environment = store.namespace(),
        secrets = entries.len(),
        "re-sealed"
    );
    Ok(entries.len())
}

/// Re-seal every secret in `store` from `old` to `new`.
///
/// All secrets are opened and sealed before the first write.
///
/// # Errors
///
/// See [`prepare_reseal`] and [`commit_reseal`].
pub fn reseal_all<S, R>(store: &mut S, old: &KeyPair, new: &PublicKey, rng: &mut R) -> Result<usize>
where
    S: Store + ?Sized,
    R: RngCore + CryptoRng,
{
    let prepared = prepare_reseal(store, &[old], new, rng)?;
    commit_reseal(store, prepared)
}

fn seal_and_write<S, R>(
    store: &mut S,
    recipient: &PublicKey,
    address: &str,
    plaintext: &[u8],
    rng: &mut R,
) -> Result<()>
where
    S: Store + ?Sized,
    R: RngCore + CryptoRng,
{
    let sealed = cipher::seal(recipient, plaintext, rng)
        .map_err(|_| SealError::Seal(store.namespace().to_string()))?;
    store.write(address, codec::encode_text(&sealed).as_bytes())
}

fn decode_stored(raw: &[u8], address: &str) -> std::result::Result<Vec<u8>, DecodingError> {
    let text = std::str::from_utf8(raw).map_err(|e| DecodingError::InvalidText {
        what: address.to_string(),
        reason: e.to_string(),
    })?;
    codec::decode_text(text)
}

// Environment operations

/// Add a new secret to an environment.
///
/// # Errors
///
/// Returns `NotFoundError` if the environment directory or public key is
/// missing, `AlreadyExistsError::Secret` if the name is already stored,
/// `AlreadyExistsError::PendingRotation` while a rotation is unfinished.
pub fn add<R: RngCore + CryptoRng>(
    env: &Environment,
    name: &str,
    plaintext: &[u8],
    rng: &mut R,
) -> Result<Address> {
    validate_name(name)?;
    env.require_dir()?;
    env.require_no_pending_rotation()?;
    let recipient = env.load_public_key()?;

    let mut store = env.store();
    let address = seal_new(&mut store, &recipient, name, plaintext, rng)?;
    debug!(environment = env.name(), address = %address, "secret added");
    Ok(address)
}

/// Decrypt a secret.
///
/// `private_override` replaces the environment's private key file.
///
/// # Errors
///
/// Returns `NotFoundError` if the secret, the public key, or (without an
/// override) the private key is missing; `DecodingError` for malformed
/// stored text; `DecryptionError::Secret` for a wrong key or tampered data.
pub fn show(
    env: &Environment,
    name: &str,
    private_override: Option<&str>,
) -> Result<Zeroizing<Vec<u8>>> {
    validate_name(name)?;
    let store = env.store();
    if !store.exists(&codec::derive_address(name)) {
        return Err(NotFoundError::Secret {
            name: name.to_string(),
            environment: env.name().to_string(),
        }
        .into());
    }

    if private_override.is_none() {
        env.check_private_key_permissions();
    }
    let keys = env.load_keypair(private_override)?;

    let plaintext = open_existing(&store, &keys, name)?;
    debug!(environment = env.name(), "secret opened");
    Ok(plaintext)
}

/// Replace the value of an existing secret.
///
/// # Errors
///
/// Returns `NotFoundError` if the environment directory, public key, or
/// secret is missing, `AlreadyExistsError::PendingRotation` while a
/// rotation is unfinished.
pub fn change<R: RngCore + CryptoRng>(
    env: &Environment,
    name: &str,
    plaintext: &[u8],
    rng: &mut R,
) -> Result<Address> {
    validate_name(name)?;
    env.require_dir()?;
    env.require_no_pending_rotation()?;
    let recipient = env.load_public_key()?;

    let mut store = env.store();
    let address = reseal_existing(&mut store, &recipient, name, plaintext, rng)?;
    debug!(environment = env.name(), address = %address, "secret changed");
    Ok(address)
}
