// src/models/alphabet.rs - Positional digit sets
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::errors::ConverterError;

/// Default serial characters: digits, upper then lower case Latin letters.
pub const DEFAULT_CHARS: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Decimal digits, the alphabet of the canonical payload.
pub const DECIMAL_CHARS: &str = "0123456789";

/// An ordered set of unique characters. The index of a character is its digit value
/// and the number of characters is the radix.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// Unique characters of `chars` sorted by code point, so that any permutation of
    /// the same characters yields the same alphabet.
    pub fn canonical(chars: &str) -> Self {
        let unique: BTreeSet<char> = chars.chars().collect();
        Self::from_unique(unique.into_iter().collect())
    }

    /// Keeps the given order. Duplicates and empty input are rejected since the
    /// caller asked for a specific digit assignment.
    pub fn ordered(chars: &str) -> Result<Self, ConverterError> {
        let mut seen: HashMap<char, usize> = HashMap::new();
        let mut list = Vec::new();
        for (position, character) in chars.chars().enumerate() {
            if seen.insert(character, position).is_some() {
                return Err(ConverterError::InvalidDigit {
                    character,
                    index: position,
                });
            }
            list.push(character);
        }

        if list.is_empty() {
            return Err(ConverterError::InvalidRadix(0));
        }

        Ok(Self::from_unique(list))
    }

    pub fn decimal() -> Self {
        Self::canonical(DECIMAL_CHARS)
    }

    fn from_unique(chars: Vec<char>) -> Self {
        let index = chars.iter().enumerate().map(|(i, c)| (*c, i)).collect();
        Self { chars, index }
    }

    pub fn radix(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Digit value of `character`, if it belongs to the alphabet.
    pub fn digit(&self, character: char) -> Option<usize> {
        self.index.get(&character).copied()
    }

    /// Character for digit value `value`. Panics when `value >= radix`.
    pub fn symbol(&self, value: usize) -> char {
        self.chars[value]
    }

    /// Zero digit, used for padding.
    pub fn zero(&self) -> Option<char> {
        self.chars.first().copied()
    }

    pub fn contains(&self, character: char) -> bool {
        self.index.contains_key(&character)
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Digit values of `digits`, failing on the first character outside the alphabet.
    pub fn digits_of(&self, digits: &str) -> Result<Vec<usize>, ConverterError> {
        digits
            .chars()
            .enumerate()
            .map(|(index, character)| {
                self.digit(character)
                    .ok_or(ConverterError::InvalidDigit { character, index })
            })
            .collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::canonical(DEFAULT_CHARS)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{}", c))
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alphabet({:?}, radix {})", self.to_string(), self.radix())
    }
}
