//! Init command.
//!
//! Writes `.untold.toml` and keeps private keys out of git.

use tracing::info;

use crate::cli::{output, resolve};
use crate::core::config;
use crate::core::constants;
use crate::error::Result;

/// Initialize untold in the current directory.
pub fn execute(default_environment: Option<&str>) -> Result<()> {
    let root = resolve::root()?;
    info!(root = %root.display(), "initializing workspace");

    let config = config::init(&root, default_environment)?;
    let added = config::ensure_gitignore(&root)?;

    output::success("untold initialized");
    output::kv("config:", output::path(constants::CONFIG_FILE));
    output::kv(
        "default environment:",
        output::name(&config.untold.default_environment),
    );
    if !added.is_empty() {
        output::kv(".gitignore:", added.join(", "));
    }
    output::hint(&format!(
        "next: untold create-vault --env {}",
        config.untold.default_environment
    ));

    Ok(())
}
