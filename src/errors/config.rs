use std::env::VarError;

use thiserror::Error;

/// Failures while reading `SERIAL_*` settings from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] VarError),

    /// Value present but not parseable for its key
    #[error("Could not parse {key}: {message}")]
    ParseError { key: String, message: String },
}
