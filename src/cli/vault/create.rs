//! Create command - generate the key pair and directory for an environment.

use rand::rngs::OsRng;
use tracing::info;

use crate::cli::{output, resolve};
use crate::core::vault;
use crate::error::Result;

/// Create a vault for the resolved environment.
pub fn execute(env: Option<&str>) -> Result<()> {
    let root = resolve::root()?;
    let env = resolve::environment(&root, env)?;
    info!(environment = env.name(), "creating vault");

    let keys = vault::create(&env, &mut OsRng)?;

    output::success(&format!(
        "vault for {} environment created",
        output::name(env.name())
    ));
    output::kv("public key: ", keys.public_text());
    output::kv(
        "public file:",
        output::path(&env.public_key_path().display().to_string()),
    );
    output::kv(
        "private file:",
        output::path(&env.private_key_path().display().to_string()),
    );
    output::hint("commit the .public file and the secrets directory, never the .private file");

    Ok(())
}
