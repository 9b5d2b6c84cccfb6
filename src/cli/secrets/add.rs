//! Add command.
//!
//! Store a new secret with hidden input.

use rand::rngs::OsRng;
use tracing::info;

use crate::cli::{input, output, resolve};
use crate::core::store::Store;
use crate::core::{codec, secrets};
use crate::error::{AlreadyExistsError, Result};

/// Add a secret to the resolved environment.
pub fn execute(env: Option<&str>, name: Option<&str>) -> Result<()> {
    let name = resolve::secret_name(name)?;
    let root = resolve::root()?;
    let env = resolve::environment(&root, env)?;
    info!(environment = env.name(), "adding secret");

    // Fail on preconditions before prompting for a value.
    env.require_dir()?;
    env.require_public_key()?;
    env.require_no_pending_rotation()?;
    if env.store().exists(&codec::derive_address(name)) {
        return Err(AlreadyExistsError::Secret {
            name: name.to_string(),
            environment: env.name().to_string(),
        }
        .into());
    }

    let value = input::secret_value(name, env.name())?;
    secrets::add(&env, name, value.as_bytes(), &mut OsRng)?;

    output::success(&format!(
        "secret {} for {} environment stored",
        output::name(name),
        output::name(env.name())
    ));
    Ok(())
}
