//! Vault: key-pair lifecycle for an environment.
//!
//! `create` sets up a new environment. `rotate` replaces its key pair and
//! re-seals every secret under the new public key. The old private key is
//! only discarded once every secret holds ciphertext for the new key.

use std::fs;

use rand::{CryptoRng, RngCore};
use tracing::{debug, info, warn};

use crate::core::cipher;
use crate::core::environment::Environment;
use crate::core::keys::KeyPair;
use crate::core::secrets;
use crate::core::types::EncodedText;
use crate::error::{AlreadyExistsError, Error, Result, SealError};

/// Outcome of a successful rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation {
    /// Number of secrets re-sealed under the new key.
    pub resealed: usize,
    /// Base64 text of the new public key.
    pub public_key: EncodedText,
    /// Whether this run finished a rotation an earlier run left staged.
    pub resumed: bool,
}

/// Create the key pair and secrets directory for a new environment.
///
/// # Errors
///
/// Returns `AlreadyExistsError::Vault` if the public key, private key, or
/// secrets directory is already present. Nothing is overwritten.
pub fn create<R: RngCore + CryptoRng>(env: &Environment, rng: &mut R) -> Result<KeyPair> {
    for path in [
        env.public_key_path(),
        env.private_key_path(),
        env.secrets_dir(),
    ] {
        if path.exists() {
            return Err(AlreadyExistsError::Vault {
                environment: env.name().to_string(),
                path: path.display().to_string(),
            }
            .into());
        }
    }

    let keys = KeyPair::generate(rng);
    self_test(env, &keys, rng)?;

    fs::create_dir_all(env.secrets_dir())?;
    env.write_keys(&keys, &env.public_key_path(), &env.private_key_path())?;

    info!(environment = env.name(), "vault created");
    Ok(keys)
}

/// Replace the environment's key pair and re-seal every secret.
///
/// Steps, in order:
///
/// 1. generate a new pair, or pick up the one a previous run staged
/// 2. open every secret and seal its plaintext under the new pair, in memory
/// 3. stage the new pair as `<env>.public.next` / `<env>.private.next`
/// 4. overwrite every secret file
/// 5. write the new pair over the live key files and drop the staged ones
///
/// A failure in 1 to 3 leaves the live files untouched. A write failure in
/// 4 puts back the secret files already rewritten and removes the staged
/// pair. If that restore fails as well, or the process dies during 4 or 5,
/// the staged pair stays on disk and the next call finishes the rotation:
/// each secret is opened with the staged pair, falling back to the live one.
///
/// # Errors
///
/// Returns `NotFoundError` for a missing directory or key file,
/// `DecodingError`/`DecryptionError` if any secret cannot be recovered, and
/// `RotationError::Incomplete` if the secret files could not be restored
/// after a failed write.
pub fn rotate<R: RngCore + CryptoRng>(env: &Environment, rng: &mut R) -> Result<Rotation> {
    env.require_dir()?;
    env.require_public_key()?;
    env.require_private_key()?;

    env.check_private_key_permissions();
    let live = env.load_private_keypair()?;
    let mut store = env.store();

    let staged = env.load_staged_keypair()?;
    let resumed = staged.is_some();
    let new = match staged {
        Some(keys) => {
            warn!(environment = env.name(), "finishing interrupted rotation");
            keys
        }
        None => {
            let keys = KeyPair::generate(rng);
            self_test(env, &keys, rng)?;
            keys
        }
    };

    let openers: Vec<&KeyPair> = if resumed {
        vec![&new, &live]
    } else {
        vec![&live]
    };
    let prepared = secrets::prepare_reseal(&store, &openers, new.public_key(), rng)?;
    debug!(
        environment = env.name(),
        secrets = prepared.len(),
        "all secrets opened and re-sealed in memory"
    );

    if !resumed {
        if let Err(e) = env.write_keys(
            &new,
            &env.staged_public_key_path(),
            &env.staged_private_key_path(),
        ) {
            env.remove_staged_keys()?;
            return Err(e);
        }
    }

    let resealed = match secrets::commit_reseal(&mut store, prepared) {
        Ok(count) => count,
        Err(e @ Error::Rotation(_)) => return Err(e),
        Err(e) => {
            // Secret files are back to their previous bytes.
            if !resumed {
                env.remove_staged_keys()?;
            }
            return Err(e);
        }
    };

    env.write_keys(&new, &env.public_key_path(), &env.private_key_path())?;
    env.remove_staged_keys()?;

    info!(environment = env.name(), secrets = resealed, "vault rotated");
    Ok(Rotation {
        resealed,
        public_key: new.public_text(),
        resumed,
    })
}

/// Seal and open a sample value to confirm a fresh pair works.
fn self_test<R: RngCore + CryptoRng>(env: &Environment, keys: &KeyPair, rng: &mut R) -> Result<()> {
    const SAMPLE: &[u8] = b"untold self-test";

    let sealed = cipher::seal(keys.public_key(), SAMPLE, rng)
        .map_err(|_| SealError::SelfTest(env.name().to_string()))?;
    match cipher::open(keys, &sealed) {
        Some(opened) if opened.as_slice() == SAMPLE => Ok(()),
        _ => Err(SealError::SelfTest(env.name().to_string()).into()),
    }
}
