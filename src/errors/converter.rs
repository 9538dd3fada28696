use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConverterError {
    /// Digit not present in the source alphabet
    #[error("Invalid digit `{character}` at index {index}")]
    InvalidDigit { character: char, index: usize },

    /// Alphabet too small to define a positional system
    #[error("Invalid radix: {0}")]
    InvalidRadix(usize),

    /// Backend cannot represent the input
    #[error("Capability error: {0}")]
    Capability(String),
}
