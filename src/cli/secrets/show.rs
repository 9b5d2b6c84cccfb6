//! Show command.
//!
//! Print a decrypted secret to stdout.

use tracing::info;

use crate::cli::{output, resolve};
use crate::core::secrets;
use crate::error::Result;

/// Show a secret from the resolved environment.
///
/// `key` overrides the environment's private key file.
pub fn execute(env: Option<&str>, key: Option<&str>, name: Option<&str>) -> Result<()> {
    let name = resolve::secret_name(name)?;
    let root = resolve::root()?;
    let env = resolve::environment(&root, env)?;
    info!(
        environment = env.name(),
        key_override = key.is_some(),
        "showing secret"
    );

    let value = secrets::show(&env, name, key)?;
    output::raw(&value)?;
    Ok(())
}
