//! Encode non-negative integers into short, fixed-length serials drawn from a custom
//! alphabet (coupon codes, license keys) and decode them back.
//!
//! ```
//! use serial_caster::{SerialCaster, SerialCasterTrait, SerialConfig};
//!
//! let config = SerialConfig::builder().seed(1492).build()?;
//! let caster = SerialCaster::from_config(&config)?;
//!
//! let serial = caster.encode_default(666)?;
//! assert_eq!(serial, "00C0LH");
//! assert_eq!(caster.decode_default(&serial)?, 666);
//! # Ok::<(), serial_caster::SerialError>(())
//! ```
//!
//! The seeded shuffle is an obfuscation that keeps consecutive numbers from looking
//! consecutive. It is not encryption.

pub mod config;
pub mod converters;
pub mod errors;
pub mod models;
pub mod services;
pub mod shufflers;
pub mod utils;
pub mod validations;

pub use config::{Backend, SerialConfig, SerialConfigBuilder};
pub use converters::BaseConverter;
pub use errors::{ConfigError, ConverterError, SerialError};
pub use models::Alphabet;
pub use services::{SerialCaster, SerialCasterTrait};
pub use shufflers::{FisherYatesShuffler, Shuffler};

// Custom result type for the crate
pub type Result<T> = std::result::Result<T, SerialError>;
