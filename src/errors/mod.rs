use thiserror::Error;

pub mod config;
pub mod converter;

pub use config::ConfigError;
pub use converter::ConverterError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerialError {
    // Caller supplied an unusable alphabet, length or option
    #[error("Configuration error: {0}")]
    Configuration(String),
    // Serial could not be decoded with this codec
    #[error("Invalid serial: {0}")]
    InvalidSerial(String),
    // Requested arithmetic backend is unavailable or too small for the input
    #[error("Capability error: {0}")]
    Capability(String),
}

impl SerialError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, SerialError::Configuration(_))
    }

    pub fn is_invalid_serial(&self) -> bool {
        matches!(self, SerialError::InvalidSerial(_))
    }

    pub fn is_capability(&self) -> bool {
        matches!(self, SerialError::Capability(_))
    }
}

impl From<ConfigError> for SerialError {
    fn from(e: ConfigError) -> Self {
        SerialError::Configuration(e.to_string())
    }
}

impl From<ConverterError> for SerialError {
    fn from(err: ConverterError) -> Self {
        match err {
            ConverterError::InvalidDigit { character, index } => SerialError::InvalidSerial(
                format!("invalid character `{}` at index {}", character, index),
            ),
            ConverterError::InvalidRadix(radix) => {
                SerialError::Configuration(format!("alphabet radix {} is not supported", radix))
            }
            ConverterError::Capability(msg) => SerialError::Capability(msg),
        }
    }
}

impl From<validator::ValidationErrors> for SerialError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Flatten field errors into a single string
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let reasons = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .clone()
                            .unwrap_or_else(|| e.code.clone())
                            .to_string()
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}: {}", field, reasons)
            })
            .collect::<Vec<_>>()
            .join("; ");
        SerialError::Configuration(message)
    }
}
