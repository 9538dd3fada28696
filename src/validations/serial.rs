use std::collections::BTreeSet;

use validator::ValidationError;

use crate::errors::SerialError;

/// Smallest alphabet that still forms a positional system
pub const MIN_ALPHABET_SIZE: usize = 2;

/// The alphabet size is embedded as two decimal digits
pub const MAX_ALPHABET_SIZE: usize = 99;

/// Width of the alphabet size suffix appended to every payload
pub const SUFFIX_DIGITS: usize = 2;

/// Validates that custom characters (if provided) yield an alphabet of 2 to 99 unique
/// characters once duplicates are dropped
pub fn validate_chars(chars: &str) -> Result<(), ValidationError> {
    let unique = chars.chars().collect::<BTreeSet<_>>().len();
    if !(MIN_ALPHABET_SIZE..=MAX_ALPHABET_SIZE).contains(&unique) {
        let mut err = ValidationError::new("chars_size");
        err.message = Some(
            format!(
                "Characters must contain between {} and {} unique characters, got {}",
                MIN_ALPHABET_SIZE, MAX_ALPHABET_SIZE, unique
            )
            .into(),
        );
        return Err(err);
    }

    Ok(())
}

/// Alphabet size check done when a codec is built
pub fn validate_alphabet_size(size: usize) -> Result<(), SerialError> {
    if size < MIN_ALPHABET_SIZE {
        return Err(SerialError::Configuration(format!(
            "need a minimum of {} unique chars, got {}",
            MIN_ALPHABET_SIZE, size
        )));
    }
    if size > MAX_ALPHABET_SIZE {
        return Err(SerialError::Configuration(format!(
            "can have a maximum of {} unique chars, got {}",
            MAX_ALPHABET_SIZE, size
        )));
    }
    Ok(())
}

/// Number of digits `value` takes in `radix` (zero takes one).
pub fn digits_in_radix(mut value: u128, radix: usize) -> usize {
    let radix = radix.max(2) as u128;
    let mut digits = 1;
    while value >= radix {
        value /= radix;
        digits += 1;
    }
    digits
}

/// Shortest serial able to carry `number` with an alphabet of `radix` characters.
///
/// The numeric part plus the two suffix digits, widened when the whole payload
/// (`number` followed by the two-digit size) needs more digits, which only happens
/// for alphabets smaller than ten.
pub fn minimum_length(number: u64, radix: usize) -> usize {
    let numeric = digits_in_radix(number as u128, radix) + SUFFIX_DIGITS;
    let payload = number as u128 * 100 + radix as u128;
    numeric.max(digits_in_radix(payload, radix))
}

/// Validates a requested serial length for `number`
pub fn validate_length(number: u64, length: usize, radix: usize) -> Result<(), SerialError> {
    if length == 0 {
        return Err(SerialError::Configuration(
            "need a length of minimum 1".to_string(),
        ));
    }
    let minimum = minimum_length(number, radix);
    if length < minimum {
        return Err(SerialError::Configuration(format!(
            "need a minimum length of {} to encode {}, got {}",
            minimum, number, length
        )));
    }
    Ok(())
}
