//! Command-line interface.

pub mod completions;
pub mod init;
pub mod input;
pub mod output;
pub mod resolve;
pub mod secrets;
pub mod vault;

use clap::{Parser, Subcommand};

/// untold - sealed-box secrets per environment, safe to commit.
#[derive(Parser)]
#[command(
    name = "untold",
    about = "Per-environment sealed-box secrets that are safe to commit",
    version
)]
pub struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Write .untold.toml and ignore private keys in git
    Init {
        /// Environment used when --env is omitted
        #[arg(long)]
        default_env: Option<String>,
    },

    /// Create the key pair and secrets directory for an environment
    CreateVault {
        /// Environment name
        #[arg(short, long, env = "UNTOLD_ENV")]
        env: Option<String>,
    },

    /// Replace an environment's key pair and re-seal all its secrets
    RotateVault {
        /// Environment name
        #[arg(short, long, env = "UNTOLD_ENV")]
        env: Option<String>,
    },

    /// Add a new secret (value read from a hidden prompt or stdin)
    AddSecret {
        /// Environment name
        #[arg(short, long, env = "UNTOLD_ENV")]
        env: Option<String>,
        /// Secret name (e.g., db-password)
        name: Option<String>,
    },

    /// Print a secret's decrypted value
    ShowSecret {
        /// Environment name
        #[arg(short, long, env = "UNTOLD_ENV")]
        env: Option<String>,
        /// Private key to decrypt with instead of the .private file
        #[arg(short, long, env = "UNTOLD_PRIVATE_KEY", hide_env_values = true)]
        key: Option<String>,
        /// Secret name
        name: Option<String>,
    },

    /// Replace the value of an existing secret
    ChangeSecret {
        /// Environment name
        #[arg(short, long, env = "UNTOLD_ENV")]
        env: Option<String>,
        /// Secret name
        name: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Init { default_env } => init::execute(default_env.as_deref()),
        CreateVault { env } => vault::create(env.as_deref()),
        RotateVault { env } => vault::rotate(env.as_deref()),
        AddSecret { env, name } => secrets::add(env.as_deref(), name.as_deref()),
        ShowSecret { env, key, name } => {
            secrets::show(env.as_deref(), key.as_deref(), name.as_deref())
        }
        ChangeSecret { env, name } => secrets::change(env.as_deref(), name.as_deref()),
        Completions { shell } => completions::execute(shell),
    }
}
