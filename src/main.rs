//! untold - per-environment sealed-box secrets.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use untold::cli::output;
use untold::cli::{execute, Cli};
use untold::core::constants::LOG_ENV;
use untold::error::{AlreadyExistsError, Error, NotFoundError, RotationError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("untold=debug")
        } else {
            EnvFilter::new("untold=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            Error::NotFound(NotFoundError::Environment(env))
            | Error::NotFound(NotFoundError::PublicKey(env)) => {
                Some(format!("run: untold create-vault --env {}", env))
            }
            Error::NotFound(NotFoundError::PrivateKey(_)) => Some(
                "show-secret also accepts the private key via --key or UNTOLD_PRIVATE_KEY"
                    .to_string(),
            ),
            Error::NotFound(NotFoundError::Secret { name, environment }) => Some(format!(
                "run: untold add-secret --env {} {}",
                environment, name
            )),
            Error::AlreadyExists(AlreadyExistsError::Secret { name, environment }) => Some(
                format!("run: untold change-secret --env {} {}", environment, name),
            ),
            Error::AlreadyExists(AlreadyExistsError::PendingRotation { environment, .. })
            | Error::Rotation(RotationError::Incomplete { environment, .. }) => Some(format!(
                "run: untold rotate-vault --env {} to finish the rotation",
                environment
            )),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(e.exit_code());
    }
}
