//! The plate number value type.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::{Letter, PlateError};

/// Number of characters before the region: one letter, three digits, two
/// letters.
const PREFIX_LEN: usize = 6;

/// A vehicle registration plate number.
///
/// A plate is three letters from the fixed alphabet, a three-digit number,
/// and a region suffix. Values are immutable once constructed; the generator
/// and the parser are the only producers.
///
/// Ordering compares digits first, then letters from the last position to the
/// first by priority. The last letter position is the least significant
/// rolling unit, matching the carry direction of the successor computation.
/// The region is a final tie-break so that equal-ordering plates are
/// identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlateNumber {
    pub(crate) letters: [Letter; 3],
    pub(crate) digits: u16,
    pub(crate) region: String,
}

impl PlateNumber {
    /// Largest value of the digit portion.
    pub const MAX_DIGITS: u16 = 999;

    /// Creates a plate from its parts.
    ///
    /// # Errors
    ///
    /// Returns `PlateError::DigitsOutOfRange` if `digits` exceeds 999, or
    /// `PlateError::EmptyRegion` if the region is blank.
    pub fn new(
        letters: [Letter; 3],
        digits: u16,
        region: impl Into<String>,
    ) -> Result<Self, PlateError> {
        if digits > Self::MAX_DIGITS {
            return Err(PlateError::DigitsOutOfRange(digits));
        }
        let region = region.into().trim().to_string();
        if region.is_empty() {
            return Err(PlateError::EmptyRegion);
        }
        Ok(Self {
            letters,
            digits,
            region,
        })
    }

    /// Parses a plate from its canonical string form.
    ///
    /// The layout is fixed: letter, three digits, letter, letter, then the
    /// region. Everything after the six-character prefix is taken as the
    /// region, trimmed.
    pub fn parse(s: &str) -> Result<Self, PlateError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() < PREFIX_LEN {
            return Err(PlateError::TooShort {
                len: chars.len(),
                expected: PREFIX_LEN,
            });
        }

        let digit_str: String = chars[1..4].iter().collect();
        let digits = digit_str
            .parse::<u16>()
            .map_err(|_| PlateError::InvalidDigits(digit_str))?;

        let letters = [
            parse_letter(chars[0])?,
            parse_letter(chars[4])?,
            parse_letter(chars[5])?,
        ];

        let region: String = chars[PREFIX_LEN..].iter().collect();

        Self::new(letters, digits, region)
    }

    /// Returns the three letters in plate order.
    #[must_use]
    pub const fn letters(&self) -> [Letter; 3] {
        self.letters
    }

    /// Returns the digit portion (0..=999).
    #[must_use]
    pub const fn digits(&self) -> u16 {
        self.digits
    }

    /// Returns the region suffix.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }
}

fn parse_letter(c: char) -> Result<Letter, PlateError> {
    Letter::from_char(c).ok_or(PlateError::UnknownLetter(c))
}

impl fmt::Display for PlateNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:03}{}{} {}",
            self.letters[0].as_char(),
            self.digits,
            self.letters[1].as_char(),
            self.letters[2].as_char(),
            self.region
        )
    }
}

impl FromStr for PlateNumber {
    type Err = PlateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for PlateNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.digits
            .cmp(&other.digits)
            .then_with(|| {
                // Letters compare from the last position down: the final
                // letter is the least significant rolling unit.
                for i in (0..3).rev() {
                    let ord = self.letters[i]
                        .priority()
                        .cmp(&other.letters[i].priority());
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                Ordering::Equal
            })
            .then_with(|| self.region.cmp(&other.region))
    }
}

impl PartialOrd for PlateNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl serde::Serialize for PlateNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for PlateNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plate(s: &str) -> PlateNumber {
        PlateNumber::parse(s).unwrap()
    }

    #[test]
    fn parse_extracts_all_parts() {
        let p = plate("А123ВС 116 RUS");
        assert_eq!(p.letters(), [Letter::A, Letter::V, Letter::S]);
        assert_eq!(p.digits(), 123);
        assert_eq!(p.region(), "116 RUS");
    }

    #[test]
    fn display_zero_pads_digits() {
        let p = PlateNumber::new([Letter::A, Letter::A, Letter::A], 7, "116 RUS").unwrap();
        assert_eq!(p.to_string(), "А007АА 116 RUS");
    }

    #[test]
    fn parse_display_roundtrip() {
        for s in ["А000АА 116 RUS", "Х999ХХ 78 RUS", "В042ЕК 750 RUS"] {
            assert_eq!(plate(s).to_string(), s);
        }
    }

    #[test]
    fn parse_rejects_short_input() {
        assert_eq!(
            PlateNumber::parse("А123В"),
            Err(PlateError::TooShort {
                len: 5,
                expected: 6
            })
        );
    }

    #[test]
    fn parse_rejects_non_numeric_digits() {
        assert_eq!(
            PlateNumber::parse("АxyzВС 116 RUS"),
            Err(PlateError::InvalidDigits("xyz".to_string()))
        );
    }

    #[test]
    fn parse_rejects_unknown_letter() {
        // Б is Cyrillic but not in the plate alphabet
        assert_eq!(
            PlateNumber::parse("Б123ВС 116 RUS"),
            Err(PlateError::UnknownLetter('Б'))
        );
    }

    #[test]
    fn parse_rejects_latin_lookalike_letters() {
        assert_eq!(
            PlateNumber::parse("A123BC 116 RUS"),
            Err(PlateError::UnknownLetter('A'))
        );
    }

    #[test]
    fn parse_rejects_empty_region() {
        assert_eq!(PlateNumber::parse("А123ВС   "), Err(PlateError::EmptyRegion));
    }

    #[test]
    fn new_rejects_digit_overflow() {
        assert_eq!(
            PlateNumber::new([Letter::A, Letter::A, Letter::A], 1000, "116 RUS"),
            Err(PlateError::DigitsOutOfRange(1000))
        );
    }

    #[test]
    fn ordering_compares_digits_first() {
        assert!(plate("А001АА 116 RUS") < plate("А002АА 116 RUS"));
        // Any digit difference outweighs any letter difference
        assert!(plate("Х001ХХ 116 RUS") < plate("А002АА 116 RUS"));
    }

    #[test]
    fn ordering_compares_letters_from_last_position() {
        // Last position decides before the middle and first positions
        assert!(plate("Х000ХА 116 RUS") < plate("А000АВ 116 RUS"));
        // Middle position decides before the first
        assert!(plate("Х000АА 116 RUS") < plate("А000ВА 116 RUS"));
        // First position decides last
        assert!(plate("А000АА 116 RUS") < plate("В000АА 116 RUS"));
    }

    #[test]
    fn ordering_uses_priorities_not_character_order() {
        // Both orders agree for the standard alphabet, but the comparison
        // must hold for every adjacent priority pair
        let mut previous = plate("А000АА 116 RUS");
        for letter in &Letter::ALPHABET[1..] {
            let next = PlateNumber::new([Letter::A, Letter::A, *letter], 0, "116 RUS").unwrap();
            assert!(previous < next);
            previous = next;
        }
    }

    #[test]
    fn equal_plates_compare_equal() {
        assert_eq!(
            plate("А123ВС 116 RUS").cmp(&plate("А123ВС 116 RUS")),
            std::cmp::Ordering::Equal
        );
    }

    #[test]
    fn region_breaks_full_ties() {
        assert_ne!(plate("А123ВС 116 RUS"), plate("А123ВС 78 RUS"));
        assert_ne!(
            plate("А123ВС 116 RUS").cmp(&plate("А123ВС 78 RUS")),
            std::cmp::Ordering::Equal
        );
    }

    #[test]
    fn serde_roundtrip_as_canonical_string() {
        let p = plate("А123ВС 116 RUS");
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"А123ВС 116 RUS\"");
        let back: PlateNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn serde_rejects_malformed_strings() {
        let result: Result<PlateNumber, _> = serde_json::from_str("\"bogus\"");
        assert!(result.is_err());
    }
}
