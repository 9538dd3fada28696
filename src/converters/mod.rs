// src/converters/mod.rs - Base conversion backends
use std::sync::Arc;

use log::debug;

#[cfg(feature = "bignum")]
mod bignum;
mod native;

#[cfg(feature = "bignum")]
pub use bignum::BigUintConverter;
pub use native::NativeConverter;

use crate::config::Backend;
use crate::errors::{ConverterError, SerialError};
use crate::models::Alphabet;

type Result<T> = std::result::Result<T, ConverterError>;

/// Whether the arbitrary precision backend was compiled in.
pub const BIGNUM_AVAILABLE: bool = cfg!(feature = "bignum");

#[cfg_attr(test, mockall::automock)]
pub trait BaseConverter: Send + Sync {
    /// Short backend name, used in logs
    fn name(&self) -> &'static str;

    /// Converts a digit string between two positional numeral systems
    ///
    /// ### Arguments
    /// * `digits` - The number written with characters of `from`
    /// * `from` - Source alphabet; its length is the source radix
    /// * `to` - Destination alphabet; its length is the destination radix
    ///
    /// ### Returns
    /// * `Result<String>` - The same magnitude written with characters of `to`, most
    ///   significant first, without leading zero digits (zero is `to`'s first character)
    ///
    /// ### Errors
    /// * `ConverterError::InvalidDigit` - If `digits` holds a character missing from `from`
    /// * `ConverterError::InvalidRadix` - If either alphabet has fewer than 2 characters
    /// * `ConverterError::Capability` - If the backend cannot represent the magnitude
    fn convert(&self, digits: &str, from: &Alphabet, to: &Alphabet) -> Result<String>;
}

/// Radix checks shared by every backend.
fn check_radixes(from: &Alphabet, to: &Alphabet) -> Result<()> {
    for radix in [from.radix(), to.radix()] {
        if radix < 2 {
            return Err(ConverterError::InvalidRadix(radix));
        }
    }
    Ok(())
}

/// Picks a converter for `backend`, probing what was compiled in
///
/// `Backend::Auto` prefers the arbitrary precision backend and falls back to the
/// native one; asking for `Backend::BigInt` without it is a capability error.
pub fn select(backend: Backend) -> std::result::Result<Arc<dyn BaseConverter>, SerialError> {
    let converter: Arc<dyn BaseConverter> = match backend {
        Backend::Auto => auto(),
        Backend::BigInt => bigint()?,
        Backend::Native => Arc::new(NativeConverter),
    };
    debug!("Selected {} base converter for {:?}", converter.name(), backend);
    Ok(converter)
}

#[cfg(feature = "bignum")]
fn auto() -> Arc<dyn BaseConverter> {
    Arc::new(BigUintConverter)
}

#[cfg(not(feature = "bignum"))]
fn auto() -> Arc<dyn BaseConverter> {
    Arc::new(NativeConverter)
}

#[cfg(feature = "bignum")]
fn bigint() -> std::result::Result<Arc<dyn BaseConverter>, SerialError> {
    Ok(Arc::new(BigUintConverter))
}

#[cfg(not(feature = "bignum"))]
fn bigint() -> std::result::Result<Arc<dyn BaseConverter>, SerialError> {
    Err(SerialError::Capability(
        "arbitrary precision backend not compiled in, enable the `bignum` feature".to_string(),
    ))
}
