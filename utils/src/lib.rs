pub mod args;
pub mod constants;
pub mod logging;
mod macros;
#[cfg(feature = "test")]
pub mod test_utils;

use std::env;

use log::trace;
use miette::{miette, Context, IntoDiagnostic, Result};

/// Checks for the existence of a given command.
///
/// # Errors
/// Will error if the command doesn't exist.
pub fn check_command_exists(command: &str) -> Result<()> {
    trace!("check_command_exists({command})");

    match which::which(command) {
        Ok(path) => {
            trace!("Using {} as {command}", path.display());
            Ok(())
        }
        Err(e) => Err(miette!(
            "Command {command} doesn't exist and is required to build the site: {e}"
        )),
    }
}

/// Gets the value of an environment variable.
///
/// # Errors
/// Will error if the env variable is not set.
pub fn get_env_var<S>(key: S) -> Result<String>
where
    S: AsRef<str>,
{
    fn inner(key: &str) -> Result<String> {
        env::var(key)
            .into_diagnostic()
            .with_context(|| format!("Failed to retrieve env var '{key}'"))
    }
    inner(key.as_ref())
}
