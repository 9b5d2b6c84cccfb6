//! Environments.
//!
//! An environment is a named namespace of secrets sharing one key pair.
//! Relative to the workspace root it owns three paths:
//!
//! ```text
//! <root>/<name>.public    base64 public key
//! <root>/<name>.private   base64 private key
//! <root>/<name>/          one file per secret, named by address
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crypto_box::PublicKey;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::constants::{PRIVATE_KEY_EXT, PUBLIC_KEY_EXT, STAGED_KEY_SUFFIX};
use crate::core::keys::{self, KeyPair};
use crate::core::store::{self, Filesystem};
use crate::core::types::EncodedText;
use crate::error::{AlreadyExistsError, NotFoundError, Result, UsageError};

/// A named environment under a workspace root.
#[derive(Debug, Clone)]
pub struct Environment {
    name: String,
    root: PathBuf,
}

impl Environment {
    /// Resolve environment `name` under `root`.
    ///
    /// # Errors
    ///
    /// Returns `UsageError::InvalidEnvironment` if the name cannot be used as
    /// a single path segment.
    pub fn new(root: impl Into<PathBuf>, name: &str) -> Result<Self> {
        validate_name(name)?;
        Ok(Self {
            name: name.to_string(),
            root: root.into(),
        })
    }

    /// Environment name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Workspace root the environment lives under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<name>.public`
    pub fn public_key_path(&self) -> PathBuf {
        self.root.join(format!("{}.{}", self.name, PUBLIC_KEY_EXT))
    }

    /// `<root>/<name>.private`
    pub fn private_key_path(&self) -> PathBuf {
        self.root.join(format!("{}.{}", self.name, PRIVATE_KEY_EXT))
    }

    /// Public key staged by an in-flight rotation.
    pub fn staged_public_key_path(&self) -> PathBuf {
        self.root.join(format!(
            "{}.{}.{}",
            self.name, PUBLIC_KEY_EXT, STAGED_KEY_SUFFIX
        ))
    }

    /// Private key staged by an in-flight rotation.
    pub fn staged_private_key_path(&self) -> PathBuf {
        self.root.join(format!(
            "{}.{}.{}",
            self.name, PRIVATE_KEY_EXT, STAGED_KEY_SUFFIX
        ))
    }

    /// `<root>/<name>/`
    pub fn secrets_dir(&self) -> PathBuf {
        self.root.join(&self.name)
    }

    /// Secret store for this environment.
    pub fn store(&self) -> Filesystem {
        Filesystem::new(self.name.clone(), self.secrets_dir())
    }

    /// Check that the secrets directory exists.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError::Environment` if it does not.
    pub fn require_dir(&self) -> Result<()> {
        if !self.secrets_dir().is_dir() {
            return Err(NotFoundError::Environment(self.name.clone()).into());
        }
        Ok(())
    }

    /// Check that the public key file exists.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError::PublicKey` if it does not.
    pub fn require_public_key(&self) -> Result<()> {
        if !self.public_key_path().exists() {
            return Err(NotFoundError::PublicKey(self.name.clone()).into());
        }
        Ok(())
    }

    /// Check that the private key file exists.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError::PrivateKey` if it does not.
    pub fn require_private_key(&self) -> Result<()> {
        if !self.private_key_path().exists() {
            return Err(NotFoundError::PrivateKey(self.name.clone()).into());
        }
        Ok(())
    }

    /// Load and decode the public key.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError::PublicKey` if the file is missing,
    /// `DecodingError` if it does not hold a 32-byte key.
    pub fn load_public_key(&self) -> Result<PublicKey> {
        self.require_public_key()?;
        let text = fs::read_to_string(self.public_key_path())?;
        let key = keys::public_key_from_text(&text)
            .map_err(|e| e.about(format!("public key for {:?} environment", self.name)))?;
        Ok(key)
    }

    /// Load the key pair, optionally with a caller-supplied private key.
    ///
    /// With `private_override` the private key file is neither required nor
    /// read.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError` for a missing key file and `DecodingError`
    /// for malformed key text.
    pub fn load_keypair(&self, private_override: Option<&str>) -> Result<KeyPair> {
        self.require_public_key()?;
        let private_text: Zeroizing<EncodedText> = match private_override {
            Some(text) => Zeroizing::new(text.to_string()),
            None => {
                self.require_private_key()?;
                Zeroizing::new(fs::read_to_string(self.private_key_path())?)
            }
        };
        let public_text = fs::read_to_string(self.public_key_path())?;

        let keys = KeyPair::from_text(&public_text, &private_text)
            .map_err(|e| e.about(format!("key pair for {:?} environment", self.name)))?;
        debug!(environment = %self.name, "key pair loaded");
        Ok(keys)
    }

    /// Key pair staged by an unfinished rotation, if its private half exists.
    ///
    /// The public half is derived from the staged private key; a staged
    /// public key file on its own is never sealed to and is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DecodingError` if the staged private key is malformed.
    pub fn load_staged_keypair(&self) -> Result<Option<KeyPair>> {
        let path = self.staged_private_key_path();
        if !path.exists() {
            return Ok(None);
        }
        let text = Zeroizing::new(fs::read_to_string(&path)?);
        let keys = KeyPair::from_private_text(&text).map_err(|e| {
            e.about(format!("staged private key for {:?} environment", self.name))
        })?;
        Ok(Some(keys))
    }

    /// Key pair derived from the live private key file alone.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError::PrivateKey` if the file is missing,
    /// `DecodingError` if it is malformed.
    pub fn load_private_keypair(&self) -> Result<KeyPair> {
        self.require_private_key()?;
        let text = Zeroizing::new(fs::read_to_string(self.private_key_path())?);
        let keys = KeyPair::from_private_text(&text)
            .map_err(|e| e.about(format!("private key for {:?} environment", self.name)))?;
        Ok(keys)
    }

    /// First staged key file found, if any.
    pub fn staged_key(&self) -> Option<PathBuf> {
        [self.staged_private_key_path(), self.staged_public_key_path()]
            .into_iter()
            .find(|path| path.exists())
    }

    /// Check that no rotation is waiting to be finished.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExistsError::PendingRotation` naming a staged key file.
    pub fn require_no_pending_rotation(&self) -> Result<()> {
        match self.staged_key() {
            Some(path) => Err(AlreadyExistsError::PendingRotation {
                environment: self.name.clone(),
                path: path.display().to_string(),
            }
            .into()),
            None => Ok(()),
        }
    }

    /// Delete any staged key files.
    ///
    /// The public half goes first so a leftover private key still marks the
    /// rotation as unfinished.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a staged file exists but cannot be removed.
    pub(crate) fn remove_staged_keys(&self) -> Result<()> {
        for path in [self.staged_public_key_path(), self.staged_private_key_path()] {
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        debug!(environment = %self.name, "staged keys removed");
        Ok(())
    }

    /// Write both key files of `keys` to the given paths.
    ///
    /// The private key file is restricted to the owner on Unix.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if either file cannot be written.
    pub(crate) fn write_keys(
        &self,
        keys: &KeyPair,
        public_path: &Path,
        private_path: &Path,
    ) -> Result<()> {
        store::write_atomic(public_path, keys.public_text().as_bytes())?;
        store::write_atomic(private_path, keys.private_text().as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(private_path, fs::Permissions::from_mode(0o600))?;
        }

        debug!(
            public = %public_path.display(),
            private = %private_path.display(),
            "key pair written"
        );
        Ok(())
    }

    /// Warn when the private key file is readable by others (Unix only).
    pub fn check_private_key_permissions(&self) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let path = self.private_key_path();
            if let Ok(metadata) = fs::metadata(&path) {
                let mode = metadata.permissions().mode() & 0o777;
                if mode & 0o077 != 0 {
                    warn!(
                        path = %path.display(),
                        mode = %format!("{:o}", mode),
                        "insecure key file permissions"
                    );
                }
            }
        }
    }
}

/// Validate an environment name.
///
/// The name becomes a path segment, so it must be non-empty, must not be
/// `.` or `..`, and must not contain a path separator or NUL.
///
/// # Errors
///
/// Returns `UsageError::InvalidEnvironment` describing the first problem.
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("cannot be empty".to_string())
    } else if name == "." || name == ".." {
        Some("cannot be a relative directory".to_string())
    } else if let Some(ch) = name.chars().find(|c| matches!(c, '/' | '\\' | '\0')) {
        Some(format!("invalid character {:?}", ch))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(UsageError::InvalidEnvironment {
            name: name.to_string(),
            reason,
        }
        .into()),
        None => Ok(()),
    }
}
