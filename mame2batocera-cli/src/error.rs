use thiserror::Error;

use mame2batocera_lib::{PipelineError, SettingsError};

/// Errors that end the program with a non-zero exit code.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Required path given neither as a flag nor in the settings file
    #[error("Missing {flag} (pass it on the command line or set paths.{key} in the settings file)")]
    MissingArgument { flag: &'static str, key: &'static str },

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl CliError {
    pub(crate) fn missing_argument(flag: &'static str, key: &'static str) -> Self {
        Self::MissingArgument { flag, key }
    }
}
