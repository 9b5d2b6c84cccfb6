//! Rotate command - replace the key pair and re-seal every secret.

use rand::rngs::OsRng;
use tracing::info;

use crate::cli::{output, resolve};
use crate::core::vault;
use crate::error::Result;

/// Execute key rotation for the resolved environment.
pub fn execute(env: Option<&str>) -> Result<()> {
    let root = resolve::root()?;
    let env = resolve::environment(&root, env)?;
    info!(environment = env.name(), "starting key rotation");

    output::progress("Re-sealing secrets under a new key pair");
    let rotation = match vault::rotate(&env, &mut OsRng) {
        Ok(rotation) => {
            output::progress_done(true);
            rotation
        }
        Err(e) => {
            output::progress_done(false);
            return Err(e);
        }
    };

    if rotation.resumed {
        output::dimmed("  finished an interrupted rotation");
    }
    output::dimmed(&format!("  re-sealed {} secret(s)", rotation.resealed));
    output::success(&format!(
        "key pair for {} environment rotated",
        output::name(env.name())
    ));
    output::kv("public key:", rotation.public_key);
    output::hint("distribute the new .private file to everyone who needs access");

    Ok(())
}
