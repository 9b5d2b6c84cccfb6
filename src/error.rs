//! Error types for untold.
//!
//! One nested enum per failure category, folded into a top-level [`Error`].
//! Messages name the environment, secret, and operation involved but never
//! carry key material or plaintext.

use thiserror::Error;

/// Process exit code for a successful command.
pub const EXIT_SUCCESS: i32 = 0;

/// Process exit code for an operational failure (I/O, decoding, decryption).
pub const EXIT_FAILURE: i32 = 1;

/// Process exit code for a usage error the caller can fix.
pub const EXIT_USAGE: i32 = 2;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    AlreadyExists(#[from] AlreadyExistsError),

    #[error(transparent)]
    Decoding(#[from] DecodingError),

    #[error(transparent)]
    Decryption(#[from] DecryptionError),

    #[error(transparent)]
    Seal(#[from] SealError),

    #[error(transparent)]
    Rotation(#[from] RotationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl Error {
    /// Exit code for this error.
    ///
    /// Mistakes the user can correct by changing the invocation map to
    /// [`EXIT_USAGE`]; everything else is an operational [`EXIT_FAILURE`].
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) => EXIT_USAGE,
            Error::NotFound(NotFoundError::Secret { .. }) => EXIT_USAGE,
            Error::AlreadyExists(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}

/// Invalid or missing command input.
#[derive(Error, Debug)]
pub enum UsageError {
    #[error("argument \"{0}\" is required")]
    MissingArgument(&'static str),

    #[error("invalid environment name {name:?}: {reason}")]
    InvalidEnvironment { name: String, reason: String },

    #[error("secret name cannot be empty")]
    EmptySecretName,

    #[error("value for secret {0:?} cannot be empty")]
    EmptyValue(String),
}

/// A referenced environment, key file, or secret does not exist.
#[derive(Error, Debug)]
pub enum NotFoundError {
    #[error("directory for {0:?} environment not found")]
    Environment(String),

    #[error("public key for {0:?} environment not found")]
    PublicKey(String),

    #[error("private key for {0:?} environment not found")]
    PrivateKey(String),

    #[error("secret {name:?} for {environment:?} environment not found")]
    Secret { name: String, environment: String },
}

/// The target of a create-style operation is already present.
#[derive(Error, Debug)]
pub enum AlreadyExistsError {
    #[error("secret {name:?} for {environment:?} environment already exists")]
    Secret { name: String, environment: String },

    #[error("vault for {environment:?} environment already exists: {path}")]
    Vault { environment: String, path: String },

    #[error("rotation of {environment:?} environment is unfinished: staged key at {path}")]
    PendingRotation { environment: String, path: String },

    #[error("already initialized: {0} exists")]
    Config(String),
}

/// Stored text could not be turned back into bytes or a key.
#[derive(Error, Debug)]
pub enum DecodingError {
    #[error("decode {what}: invalid base64: {reason}")]
    InvalidText { what: String, reason: String },

    #[error("decode {what}: expected {expected} bytes, got {actual}")]
    KeyLength {
        what: String,
        expected: usize,
        actual: usize,
    },
}

impl DecodingError {
    /// Replace the subject named in the message (e.g. "public key for \"prod\"").
    pub fn about(self, subject: impl Into<String>) -> Self {
        let what = subject.into();
        match self {
            DecodingError::InvalidText { reason, .. } => {
                DecodingError::InvalidText { what, reason }
            }
            DecodingError::KeyLength {
                expected, actual, ..
            } => DecodingError::KeyLength {
                what,
                expected,
                actual,
            },
        }
    }
}

/// A sealed box could not be opened.
///
/// Wrong key and corrupted ciphertext are deliberately indistinguishable.
#[derive(Error, Debug)]
pub enum DecryptionError {
    #[error("can not decrypt secret {name:?} in {environment:?} environment")]
    Secret { name: String, environment: String },

    #[error("can not decrypt {address} in {environment:?} environment")]
    Address {
        address: String,
        environment: String,
    },
}

/// Producing a sealed box or a usable key pair failed.
#[derive(Error, Debug)]
pub enum SealError {
    #[error("sealing failed for {0:?} environment")]
    Seal(String),

    #[error("key pair self-test failed for {0:?} environment")]
    SelfTest(String),
}

/// A rotation stopped with secrets split between the live and staged keys.
///
/// Both key pairs are left on disk; running the rotation again finishes it.
#[derive(Error, Debug)]
pub enum RotationError {
    #[error("rotation of {environment:?} environment is incomplete: {reason}")]
    Incomplete { environment: String, reason: String },
}

/// Workspace configuration problems.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
