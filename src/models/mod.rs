pub mod alphabet;

pub use alphabet::{Alphabet, DECIMAL_CHARS, DEFAULT_CHARS};
