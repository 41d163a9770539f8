//! CLI error types.

use claw_alert_config::ConfigError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or validating a configuration failed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// One or more files failed the check.
    #[error("{failed} of {total} file(s) failed the check")]
    CheckFailed {
        /// Number of invalid files.
        failed: usize,
        /// Number of files checked.
        total: usize,
    },

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
