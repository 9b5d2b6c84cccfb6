//! Environment resolution helpers for CLI commands.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::environment::Environment;
use crate::error::{Result, UsageError};

/// Workspace root: the current directory.
pub fn root() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

/// Resolve which environment a command operates on.
///
/// Rules:
/// - If `--env` (or `UNTOLD_ENV`) is given, use it
/// - Otherwise use `default_environment` from `.untold.toml`, or the
///   built-in default, and warn about it
pub fn environment(root: &Path, flag: Option<&str>) -> Result<Environment> {
    let name = match flag {
        Some(name) => name.to_string(),
        None => {
            let config = Config::load(root)?;
            let name = config.untold.default_environment;
            output::warn(&format!(
                "no environment provided, using default {}",
                output::name(&name)
            ));
            name
        }
    };

    debug!(environment = %name, root = %root.display(), "environment resolved");
    Environment::new(root, &name)
}

/// Require a positional secret name.
///
/// # Errors
///
/// Returns `UsageError::MissingArgument` if the name is absent or empty.
pub fn secret_name(name: Option<&str>) -> Result<&str> {
    match name {
        Some(n) if !n.is_empty() => Ok(n),
        _ => Err(UsageError::MissingArgument("name").into()),
    }
}
