// src/services/serial_caster.rs - Integer <-> serial encoding
use std::fmt;
use std::sync::Arc;

use log::{debug, trace};

use crate::config::{SerialConfig, DEFAULT_LENGTH};
use crate::converters::{self, BaseConverter};
use crate::errors::SerialError;
use crate::models::{Alphabet, DEFAULT_CHARS};
use crate::shufflers::{FisherYatesShuffler, Shuffler};
use crate::utils::rotate::{content_distance, rotate_left, rotate_right};
use crate::validations::{self, SUFFIX_DIGITS};

type Result<T> = std::result::Result<T, SerialError>;

pub trait SerialCasterTrait {
    /// Encodes a number into a serial of exactly `length` characters
    ///
    /// ### Arguments
    /// * `number` - The number to encode
    /// * `seed` - Obfuscation seed; 0 leaves the characters in place
    /// * `length` - The serial length, at least `minimum_length(number)`
    ///
    /// ### Errors
    /// * `SerialError::Configuration` - If `length` is 0 or too short for `number`
    /// * `SerialError::Capability` - If the conversion backend cannot handle the payload
    fn encode(&self, number: u64, seed: u32, length: usize) -> Result<String>;

    /// Decodes a serial produced by `encode` with the same alphabet and seed
    ///
    /// ### Errors
    /// * `SerialError::InvalidSerial` - If the serial holds a foreign character, is too
    ///   short, was made with another alphabet, or carries a number beyond `u64`
    /// * `SerialError::Capability` - If the conversion backend cannot handle the serial
    fn decode(&self, serial: &str, seed: u32) -> Result<u64>;
}

/// Turns integers into fixed-length serials over a custom alphabet and back.
///
/// Encoding appends the alphabet size as two decimal digits, converts the result into
/// the alphabet, left-pads it with the alphabet's first character and, for a non-zero
/// seed, shuffles the characters and rotates them by a distance derived from their
/// codes. Decoding undoes each step in reverse and checks the size suffix.
///
/// The obfuscation only hides sequential patterns; it offers no secrecy.
#[derive(Clone)]
pub struct SerialCaster {
    converter: Arc<dyn BaseConverter>,
    shuffler: Arc<dyn Shuffler>,
    alphabet: Alphabet,
    decimal: Alphabet,
    seed: u32,
    length: usize,
}

impl fmt::Debug for SerialCaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialCaster")
            .field("alphabet", &self.alphabet)
            .field("converter", &self.converter.name())
            .field("seed", &self.seed)
            .field("length", &self.length)
            .finish()
    }
}

impl SerialCaster {
    /// Builds a codec from explicit collaborators. `chars` is de-duplicated and sorted;
    /// `None` selects the default 62 characters.
    pub fn new(
        converter: Arc<dyn BaseConverter>,
        shuffler: Arc<dyn Shuffler>,
        chars: Option<&str>,
    ) -> Result<Self> {
        let alphabet = Alphabet::canonical(chars.unwrap_or(DEFAULT_CHARS));
        validations::validate_alphabet_size(alphabet.radix())?;

        debug!(
            "Serial caster ready: {} chars, {} converter",
            alphabet.radix(),
            converter.name()
        );

        Ok(Self {
            converter,
            shuffler,
            alphabet,
            decimal: Alphabet::decimal(),
            seed: 0,
            length: DEFAULT_LENGTH,
        })
    }

    pub fn from_config(config: &SerialConfig) -> Result<Self> {
        validator::Validate::validate(config)?;
        let converter = converters::select(config.backend)?;
        let mut caster = Self::new(
            converter,
            Arc::new(FisherYatesShuffler::new()),
            config.chars.as_deref(),
        )?;
        caster.seed = config.seed;
        caster.length = config.length;
        Ok(caster)
    }

    /// Default alphabet, best available backend, Fisher-Yates shuffle.
    pub fn with_defaults() -> Result<Self> {
        Self::from_config(&SerialConfig::default())
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Shortest length `encode` accepts for `number` with this alphabet.
    pub fn minimum_length(&self, number: u64) -> usize {
        validations::minimum_length(number, self.alphabet.radix())
    }

    /// `encode` with the configured seed and length
    pub fn encode_default(&self, number: u64) -> Result<String> {
        self.encode(number, self.seed, self.length)
    }

    /// `decode` with the configured seed
    pub fn decode_default(&self, serial: &str) -> Result<u64> {
        self.decode(serial, self.seed)
    }

    fn obfuscate(&self, chars: &mut [char], seed: u32) {
        if seed != 0 {
            self.shuffler.shuffle(chars, seed);
            rotate_left(chars, content_distance(chars));
        }
    }

    fn reveal(&self, chars: &mut [char], seed: u32) {
        if seed != 0 {
            rotate_right(chars, content_distance(chars));
            self.shuffler.unshuffle(chars, seed);
        }
    }
}

impl SerialCasterTrait for SerialCaster {
    fn encode(&self, number: u64, seed: u32, length: usize) -> Result<String> {
        let radix = self.alphabet.radix();
        validations::validate_length(number, length, radix)?;

        // Number followed by the alphabet size on exactly two digits
        let payload = format!("{}{:0width$}", number, radix, width = SUFFIX_DIGITS);
        let converted = self
            .converter
            .convert(&payload, &self.decimal, &self.alphabet)?;
        trace!("Payload {} converted to {}", payload, converted);

        let zero = self.alphabet.symbol(0);
        let padding = length.saturating_sub(converted.chars().count());
        let mut chars: Vec<char> = std::iter::repeat(zero)
            .take(padding)
            .chain(converted.chars())
            .collect();

        self.obfuscate(&mut chars, seed);
        Ok(chars.into_iter().collect())
    }

    fn decode(&self, serial: &str, seed: u32) -> Result<u64> {
        let mut chars: Vec<char> = serial.chars().collect();
        if chars.is_empty() {
            return Err(SerialError::InvalidSerial("serial is empty".to_string()));
        }

        self.reveal(&mut chars, seed);

        if let Some(invalid) = chars.iter().find(|c| !self.alphabet.contains(**c)) {
            return Err(SerialError::InvalidSerial(format!(
                "invalid character `{}` is present",
                invalid
            )));
        }

        let digits: String = chars.into_iter().collect();
        let decoded = self
            .converter
            .convert(&digits, &self.alphabet, &self.decimal)?;
        trace!("Serial digits {} converted to {}", digits, decoded);

        // Leading zeros of the payload do not survive conversion: a zero number keeps
        // only the suffix, and sizes below ten keep a single digit
        if decoded.len() < validations::digits_in_radix(self.alphabet.radix() as u128, 10) {
            return Err(SerialError::InvalidSerial(format!(
                "serial `{}` is too short to be valid",
                serial
            )));
        }
        let decoded = format!("{:0>width$}", decoded, width = SUFFIX_DIGITS);

        let (number, size) = decoded.split_at(decoded.len() - SUFFIX_DIGITS);
        if size.parse::<usize>().ok() != Some(self.alphabet.radix()) {
            return Err(SerialError::InvalidSerial(format!(
                "serial was not encoded with this alphabet (size {} expected, found {})",
                self.alphabet.radix(),
                size
            )));
        }

        if number.is_empty() {
            return Ok(0);
        }
        number.parse::<u64>().map_err(|e| {
            SerialError::InvalidSerial(format!("decoded number {} is invalid: {}", number, e))
        })
    }
}

#[cfg(all(test, feature = "bignum"))]
mod tests {
    use std::thread;

    use rand::{rng, Rng};

    use super::*;
    use crate::config::Backend;
    use crate::converters::{BigUintConverter, MockBaseConverter, NativeConverter};
    use crate::errors::ConverterError;
    use crate::shufflers::MockShuffler;

    const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const SEED: u32 = 1492;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn caster(chars: &str) -> SerialCaster {
        let config = SerialConfig::builder()
            .chars(chars)
            .backend(Backend::BigInt)
            .build()
            .unwrap();
        SerialCaster::from_config(&config).unwrap()
    }

    #[test]
    fn test_encode_zero() {
        init_logger();
        assert_eq!(caster(ALPHANUMERIC).encode(0, 0, 6).unwrap(), "000010");
    }

    #[test]
    fn test_encode_largest_six_char_number() {
        assert_eq!(caster(ALPHANUMERIC).encode(14_776_335, 0, 6).unwrap(), "1bzzzO");
    }

    #[test]
    fn test_default_chars_match_alphanumeric() {
        let caster = SerialCaster::with_defaults().unwrap();
        assert_eq!(caster.encode(14_776_335, 0, 6).unwrap(), "1bzzzO");
        assert_eq!(caster.decode("000HLC", 0).unwrap(), 666);
    }

    #[test]
    fn test_decode() {
        assert_eq!(caster(ALPHANUMERIC).decode("000HLC", 0).unwrap(), 666);
    }

    #[test]
    fn test_seeded_serials() {
        let caster = caster(ALPHANUMERIC);
        let expected = [
            (0, "001000"),
            (1, "00c020"),
            (666, "00C0LH"),
            (14_776_335, "zzbO1z"),
            (123_456, "a0fnp0"),
        ];
        for (number, serial) in expected {
            assert_eq!(caster.encode(number, SEED, 6).unwrap(), serial);
            assert_eq!(caster.decode(serial, SEED).unwrap(), number);
        }
        assert_eq!(caster.encode(666, SEED, 10).unwrap(), "C00000L00H");
    }

    #[test]
    fn test_round_trip_random_values() {
        let caster = caster(ALPHANUMERIC);
        let mut rng = rng();
        for _ in 0..500 {
            let number = rng.random_range(0..=14_776_335u64);
            let seed: u32 = rng.random();
            let serial = caster.encode(number, seed, 6).unwrap();
            assert_eq!(serial.chars().count(), 6);
            assert_eq!(caster.decode(&serial, seed).unwrap(), number);
        }
    }

    #[test]
    fn test_round_trip_edges_and_alphabets() -> anyhow::Result<()> {
        for chars in ["01", "abc", "0123456789", ALPHANUMERIC, "!#$%&()*+,-./:;<=>?@[]^_{|}~"] {
            let caster = caster(chars);
            for number in [0, 1, 9, 10, 99, 100, 4_294_967_295, u64::MAX] {
                let length = caster.minimum_length(number);
                for seed in [0, 1, SEED, u32::MAX] {
                    let serial = caster.encode(number, seed, length)?;
                    assert_eq!(serial.chars().count(), length);
                    assert_eq!(caster.decode(&serial, seed)?, number);

                    let longer = caster.encode(number, seed, length + 5)?;
                    assert_eq!(caster.decode(&longer, seed)?, number);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let first = caster(ALPHANUMERIC);
        let second = caster(ALPHANUMERIC);
        for number in [5, 500, 50_000] {
            assert_eq!(
                first.encode(number, SEED, 8).unwrap(),
                second.encode(number, SEED, 8).unwrap()
            );
        }
    }


    #[test]
    fn test_invalid_char_in_serial() {
        let err = caster(ALPHANUMERIC).decode("*", SEED).unwrap_err();
        assert!(err.is_invalid_serial());
        assert!(err.to_string().contains("`*`"));
    }

    #[test]
    fn test_decoded_too_short() {
        let err = caster(ALPHANUMERIC).decode("5", SEED).unwrap_err();
        assert!(err.is_invalid_serial());
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_empty_serial() {
        let caster = caster(ALPHANUMERIC);
        assert!(caster.decode("", 0).unwrap_err().is_invalid_serial());
        assert!(caster.decode("", SEED).unwrap_err().is_invalid_serial());
    }

    #[test]
    fn test_different_alphabet_is_detected() {
        let encoder = caster("01");
        let decoder = caster(ALPHANUMERIC);
        let serial = encoder.encode(14_776_335, SEED, 31).unwrap();

        let err = decoder.decode(&serial, SEED).unwrap_err();
        assert!(err.is_invalid_serial());
        assert!(err.to_string().contains("alphabet"));
    }

    #[test]
    fn test_length_not_high_enough() {
        let err = caster(ALPHANUMERIC)
            .encode(14_776_336, SEED, 6)
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("minimum length of 7"));
    }

    #[test]
    fn test_short_alphabet_needs_longer_serials() {
        let err = caster("01").encode(14_776_336, SEED, 6).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_zero_length_is_rejected() {
        assert!(caster(ALPHANUMERIC).encode(1, 0, 0).unwrap_err().is_configuration());
    }

    #[test]
    fn test_alphabet_size_limits() {
        let native = || -> Arc<dyn BaseConverter> { Arc::new(NativeConverter) };
        let shuffler = || -> Arc<dyn Shuffler> { Arc::new(FisherYatesShuffler) };

        let err = SerialCaster::new(native(), shuffler(), Some("aaaa")).err().unwrap();
        assert!(err.is_configuration());

        let hundred: String = (0..100u32).filter_map(|i| char::from_u32(0x100 + i)).collect();
        let err = SerialCaster::new(native(), shuffler(), Some(hundred.as_str())).err().unwrap();
        assert!(err.is_configuration());

        let ninety_nine: String = hundred.chars().take(99).collect();
        let caster = SerialCaster::new(native(), shuffler(), Some(ninety_nine.as_str())).unwrap();
        assert_eq!(caster.alphabet().radix(), 99);
    }

    #[test]
    fn test_number_beyond_u64_is_invalid() {
        let caster = caster(ALPHANUMERIC);
        // 2^64 followed by the suffix 62, written in the default alphabet
        let serial = BigUintConverter
            .convert("1844674407370955161662", &Alphabet::decimal(), caster.alphabet())
            .unwrap();
        let err = caster.decode(&serial, 0).unwrap_err();
        assert!(err.is_invalid_serial());
    }

    #[test]
    fn test_configured_defaults() {
        let config = SerialConfig::builder()
            .chars(ALPHANUMERIC)
            .seed(SEED)
            .length(6)
            .build()
            .unwrap();
        let caster = SerialCaster::from_config(&config).unwrap();
        assert_eq!(caster.seed(), SEED);
        assert_eq!(caster.length(), 6);
        assert_eq!(caster.encode_default(666).unwrap(), "00C0LH");
        assert_eq!(caster.decode_default("00C0LH").unwrap(), 666);
    }

    #[test]
    fn test_native_backend_encodes_but_cannot_decode_wide_alphabets() {
        let config = SerialConfig::builder()
            .chars(ALPHANUMERIC)
            .backend(Backend::Native)
            .build()
            .unwrap();
        let caster = SerialCaster::from_config(&config).unwrap();

        assert_eq!(caster.encode(14_776_335, 0, 6).unwrap(), "1bzzzO");
        assert!(caster.decode("1bzzzO", 0).unwrap_err().is_capability());
    }

    #[test]
    fn test_native_backend_round_trips_decimal_alphabet() {
        let config = SerialConfig::builder()
            .chars("0123456789")
            .backend(Backend::Native)
            .build()
            .unwrap();
        let caster = SerialCaster::from_config(&config).unwrap();

        let serial = caster.encode(123_456, SEED, 10).unwrap();
        assert_eq!(caster.decode(&serial, SEED).unwrap(), 123_456);
    }

    #[test]
    fn test_converter_capability_error_is_propagated() {
        let mut converter = MockBaseConverter::new();
        converter.expect_name().return_const("mock");
        converter
            .expect_convert()
            .times(1)
            .returning(|_, _, _| Err(ConverterError::Capability("no bignum".to_string())));

        let caster =
            SerialCaster::new(Arc::new(converter), Arc::new(FisherYatesShuffler), None).unwrap();
        let err = caster.encode(1, 0, 6).unwrap_err();
        assert_eq!(err, SerialError::Capability("no bignum".to_string()));
    }

    #[test]
    fn test_payload_is_number_and_two_digit_size() {
        let mut converter = MockBaseConverter::new();
        converter.expect_name().return_const("mock");
        converter
            .expect_convert()
            .withf(|digits, from, to| digits == "4210" && from.radix() == 10 && to.radix() == 10)
            .times(1)
            .returning(|_, _, _| Ok("4210".to_string()));

        let caster = SerialCaster::new(
            Arc::new(converter),
            Arc::new(FisherYatesShuffler),
            Some("0123456789"),
        )
        .unwrap();
        assert_eq!(caster.encode(42, 0, 6).unwrap(), "004210");
    }

    #[test]
    fn test_shuffler_only_runs_with_a_seed() {
        let mut shuffler = MockShuffler::new();
        shuffler
            .expect_shuffle()
            .withf(|_, seed| *seed == SEED)
            .times(1)
            .return_const(());
        shuffler
            .expect_unshuffle()
            .withf(|_, seed| *seed == SEED)
            .times(1)
            .return_const(());

        let caster =
            SerialCaster::new(Arc::new(BigUintConverter), Arc::new(shuffler), None).unwrap();

        assert_eq!(caster.encode(0, 0, 6).unwrap(), "000010");
        assert_eq!(caster.decode("000010", 0).unwrap(), 0);

        // Identity shuffle: only the content rotation applies
        let serial = caster.encode(0, SEED, 6).unwrap();
        assert_eq!(serial, "000100");
        assert_eq!(caster.decode(&serial, SEED).unwrap(), 0);
    }

    #[test]
    fn test_shared_across_threads() {
        let caster = Arc::new(caster(ALPHANUMERIC));
        let handles: Vec<_> = (1..=8u32)
            .map(|seed| {
                let caster = Arc::clone(&caster);
                thread::spawn(move || {
                    for number in 0..200u64 {
                        let serial = caster.encode(number, seed, 6).unwrap();
                        assert_eq!(caster.decode(&serial, seed).unwrap(), number);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_many_coupons_round_trip() {
        let caster = caster(ALPHANUMERIC);
        let coupons: Vec<String> = (1..=999u64)
            .map(|n| caster.encode(n, SEED, 6).unwrap())
            .collect();
        for (n, coupon) in (1..=999u64).zip(&coupons) {
            assert_eq!(caster.decode(coupon, SEED).unwrap(), n);
        }
    }
}
