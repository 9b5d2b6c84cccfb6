//! Configuration file management.
//!
//! Handles reading and writing the optional `.untold.toml` at the workspace
//! root. A missing file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::environment;
use crate::error::{AlreadyExistsError, ConfigError, Result};

/// Workspace configuration stored in `.untold.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Metadata and defaults
    pub untold: Meta,
}

/// The `[untold]` section of the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Version of untold that wrote the file
    pub version: String,
    /// Environment used when none is given on the command line
    #[serde(default = "default_environment")]
    pub default_environment: String,
}

fn default_environment() -> String {
    constants::DEFAULT_ENVIRONMENT.to_string()
}

impl Config {
    /// Create a configuration with the current version and built-in defaults
    pub fn new() -> Self {
        Self {
            untold: Meta {
                version: env!("CARGO_PKG_VERSION").to_string(),
                default_environment: default_environment(),
            },
        }
    }

    /// Path to the configuration file under `root`
    pub fn path(root: &Path) -> PathBuf {
        root.join(constants::CONFIG_FILE)
    }

    /// Check if a configuration file exists under `root`
    pub fn exists(root: &Path) -> bool {
        Self::path(root).exists()
    }

    /// Load configuration from `root`, or defaults if there is none
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse` if the file
    /// exists but cannot be read, and `ConfigError::InvalidValue` if it
    /// fails validation.
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::path(root);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::new());
        }

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration under `root`
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails.
    pub fn save(&self, root: &Path) -> Result<()> {
        debug!("saving config");

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(Self::path(root), contents)?;

        Ok(())
    }

    /// Validate the configuration contents
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the version is empty or the
    /// default environment is not a valid environment name.
    pub fn validate(&self) -> Result<()> {
        if self.untold.version.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "version",
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        if let Err(e) = environment::validate_name(&self.untold.default_environment) {
            return Err(ConfigError::InvalidValue {
                field: "default_environment",
                reason: e.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a new `.untold.toml` under `root`.
///
/// # Errors
///
/// Returns `AlreadyExistsError::Config` if the file already exists, or
/// `ConfigError::InvalidValue` for an invalid default environment.
pub fn init(root: &Path, default_environment: Option<&str>) -> Result<Config> {
    if Config::exists(root) {
        return Err(AlreadyExistsError::Config(constants::CONFIG_FILE.to_string()).into());
    }

    let mut config = Config::new();
    if let Some(name) = default_environment {
        config.untold.default_environment = name.to_string();
    }
    config.validate()?;
    config.save(root)?;

    Ok(config)
}

/// Ensure `.gitignore` under `root` keeps private keys out of git
///
/// Appends each of [`constants::GITIGNORE_ENTRIES`] not already present.
///
/// # Returns
///
/// The entries that were added.
///
/// # Errors
///
/// Returns error if file operations fail.
pub fn ensure_gitignore(root: &Path) -> Result<Vec<&'static str>> {
    let gitignore = root.join(".gitignore");

    let existing = if gitignore.exists() {
        std::fs::read_to_string(&gitignore)?
    } else {
        String::new()
    };

    let mut updated = existing.clone();
    let mut added = Vec::new();
    for entry in constants::GITIGNORE_ENTRIES {
        if !existing.lines().any(|l| l.trim() == *entry) {
            if !updated.is_empty() && !updated.ends_with('\n') {
                updated.push('\n');
            }
            updated.push_str(entry);
            updated.push('\n');
            added.push(*entry);
        }
    }

    if updated != existing {
        std::fs::write(&gitignore, updated)?;
    }

    Ok(added)
}
