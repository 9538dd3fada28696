use std::{env, str::FromStr};

use dotenvy::dotenv;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{ConfigError, SerialError};
use crate::validations::validate_chars;

/// Default serial length
pub const DEFAULT_LENGTH: usize = 6;

// Which base conversion backend a codec uses
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Arbitrary precision when compiled in, native otherwise
    #[default]
    Auto,
    /// Arbitrary precision only; a capability error without the `bignum` feature
    BigInt,
    /// `u64` arithmetic; limited to source bases up to 10
    Native,
}

// Implement FromStr trait for Backend enum to enable parsing from string
impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Backend::Auto),
            "bigint" | "bignum" | "gmp" => Ok(Backend::BigInt),
            "native" => Ok(Backend::Native),
            _ => Err(format!(
                "Invalid backend: {}. Must be one of: auto, bigint, native",
                s
            )),
        }
    }
}

// Result type for configuration functions
type ConfigResult<T> = Result<T, ConfigError>;

/// Settings a [`SerialCaster`](crate::SerialCaster) is built from.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, PartialEq, Eq)]
pub struct SerialConfig {
    /// Characters serials are written with, de-duplicated and sorted.
    /// `None` selects the 62 Latin letters and digits.
    #[validate(custom(function = "validate_chars"))]
    pub chars: Option<String>,

    /// Seed used by `encode_default`/`decode_default`; 0 disables the shuffle.
    pub seed: u32,

    /// Length used by `encode_default`.
    #[validate(range(min = 1, message = "Length must be at least 1"))]
    pub length: usize,

    /// Base conversion backend.
    pub backend: Backend,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            chars: None,
            seed: 0,
            length: DEFAULT_LENGTH,
            backend: Backend::Auto,
        }
    }
}

impl SerialConfig {
    pub fn builder() -> SerialConfigBuilder {
        SerialConfigBuilder::default()
    }

    // Load configuration from environment variables
    pub fn from_env() -> Result<Self, SerialError> {
        // Load .env file if it exists
        match dotenv() {
            Ok(_) => debug!(".env file loaded successfully"),
            Err(e) => warn!("Could not load .env file: {}", e),
        }

        let chars = match env::var("SERIAL_CHARS") {
            Ok(chars) => Some(chars),
            Err(env::VarError::NotPresent) => None,
            Err(e) => return Err(ConfigError::EnvVarError(e).into()),
        };

        let config = SerialConfig {
            chars,
            seed: get_env_or_default("SERIAL_SEED", "0")?,
            length: get_env_or_default("SERIAL_LENGTH", "6")?,
            backend: get_env_or_default("SERIAL_BACKEND", "auto")?,
        };
        config.validate()?;

        info!("Serial configuration loaded successfully");
        debug!("Loaded config: {:?}", config);

        Ok(config)
    }
}

/// Chainable construction of a [`SerialConfig`]; unset fields keep their defaults.
#[derive(Debug, Default, Clone)]
pub struct SerialConfigBuilder {
    config: SerialConfig,
}

impl SerialConfigBuilder {
    /// Custom characters (default: Latin letters and digits)
    pub fn chars(mut self, chars: impl Into<String>) -> Self {
        self.config.chars = Some(chars.into());
        self
    }

    /// Default seed (default: 0, no shuffle)
    pub fn seed(mut self, seed: u32) -> Self {
        self.config.seed = seed;
        self
    }

    /// Default serial length (default: 6)
    pub fn length(mut self, length: usize) -> Self {
        self.config.length = length;
        self
    }

    /// Conversion backend (default: auto)
    pub fn backend(mut self, backend: Backend) -> Self {
        self.config.backend = backend;
        self
    }

    pub fn build(self) -> Result<SerialConfig, SerialError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Helper function to get an env variable with a default value
fn get_env_or_default<T: FromStr>(key: &str, default: &str) -> ConfigResult<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val.parse::<T>().map_err(|e| ConfigError::ParseError {
            key: key.to_string(),
            message: e.to_string(),
        }),
        Err(env::VarError::NotPresent) => {
            debug!("{} not set, using default: {}", key, default);
            default.parse::<T>().map_err(|e| ConfigError::ParseError {
                key: format!("default for {}", key),
                message: e.to_string(),
            })
        }
        Err(e) => Err(ConfigError::EnvVarError(e)),
    }
}
