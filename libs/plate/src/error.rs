//! Error types for plate parsing and validation.

use thiserror::Error;

/// Errors that can occur when parsing or constructing plate numbers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlateError {
    /// The input is shorter than the fixed `{letter}{digits}{letter}{letter}`
    /// prefix.
    #[error("plate string too short: {len} characters, expected at least {expected}")]
    TooShort { len: usize, expected: usize },

    /// The digit portion of the plate is not a number.
    #[error("plate digits are not numeric: '{0}'")]
    InvalidDigits(String),

    /// The digit portion exceeds the three-digit range.
    #[error("plate digits out of range: {0}, maximum is 999")]
    DigitsOutOfRange(u16),

    /// A letter character is outside the fixed plate alphabet.
    #[error("letter '{0}' is outside the plate alphabet")]
    UnknownLetter(char),

    /// The region portion is empty.
    #[error("plate region cannot be empty")]
    EmptyRegion,
}
