//! Secret value input.
//!
//! Reads from a hidden prompt on a terminal, or one line from piped stdin.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::Password;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::error::{Result, UsageError};

/// Read the value for secret `name` in `environment`.
///
/// # Errors
///
/// Returns `UsageError::EmptyValue` for an empty value, or an I/O or
/// prompt error if input cannot be read.
pub fn secret_value(name: &str, environment: &str) -> Result<Zeroizing<String>> {
    let value = if !io::stdin().is_terminal() {
        let mut line = Zeroizing::new(String::new());
        io::stdin().lock().read_line(&mut line)?;
        Zeroizing::new(line.trim_end_matches(['\r', '\n']).to_string())
    } else {
        Zeroizing::new(
            Password::new()
                .with_prompt(format!(
                    "Value for {} in {} environment",
                    output::name(name),
                    output::name(environment)
                ))
                .interact()?,
        )
    };

    if value.is_empty() {
        return Err(UsageError::EmptyValue(name.to_string()).into());
    }

    Ok(value)
}
