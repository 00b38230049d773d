//! The fixed plate letter alphabet.

use rand::distr::{Distribution, StandardUniform};
use rand::Rng;

/// A letter from the fixed 12-symbol plate alphabet.
///
/// Each letter carries a priority from 1 to 12 that defines ranking and
/// rollover order. Priorities are a permutation of 1..=12; comparison and the
/// successor computation always go through them, never through the characters'
/// Unicode order.
///
/// Variants are named by transliteration; the canonical rendering uses the
/// Cyrillic characters themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    /// А (priority 1)
    A,
    /// В (priority 2)
    V,
    /// Е (priority 3)
    E,
    /// К (priority 4)
    K,
    /// М (priority 5)
    M,
    /// Н (priority 6)
    N,
    /// О (priority 7)
    O,
    /// Р (priority 8)
    R,
    /// С (priority 9)
    S,
    /// Т (priority 10)
    T,
    /// У (priority 11)
    U,
    /// Х (priority 12)
    Kh,
}

impl Letter {
    /// Number of symbols in the alphabet.
    pub const COUNT: usize = 12;

    /// The minimum-priority symbol, used as the reset target on rollover.
    pub const MIN: Self = Self::A;

    /// All symbols in priority order.
    pub const ALPHABET: [Self; Self::COUNT] = [
        Self::A,
        Self::V,
        Self::E,
        Self::K,
        Self::M,
        Self::N,
        Self::O,
        Self::R,
        Self::S,
        Self::T,
        Self::U,
        Self::Kh,
    ];

    /// Returns the ranking priority of this letter (1..=12).
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::A => 1,
            Self::V => 2,
            Self::E => 3,
            Self::K => 4,
            Self::M => 5,
            Self::N => 6,
            Self::O => 7,
            Self::R => 8,
            Self::S => 9,
            Self::T => 10,
            Self::U => 11,
            Self::Kh => 12,
        }
    }

    /// Returns the Cyrillic character for this letter.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::A => 'А',
            Self::V => 'В',
            Self::E => 'Е',
            Self::K => 'К',
            Self::M => 'М',
            Self::N => 'Н',
            Self::O => 'О',
            Self::R => 'Р',
            Self::S => 'С',
            Self::T => 'Т',
            Self::U => 'У',
            Self::Kh => 'Х',
        }
    }

    /// Looks up a letter by its Cyrillic character.
    ///
    /// Returns `None` for any character outside the alphabet, including the
    /// Latin lookalikes of the Cyrillic symbols.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        Self::ALPHABET.iter().copied().find(|l| l.as_char() == c)
    }

    /// Returns the letter with priority exactly one greater, wrapping from
    /// the maximum priority back to priority 1.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.is_max_priority() {
            Self::MIN
        } else {
            Self::ALPHABET[self.priority() as usize]
        }
    }

    /// Returns true iff this letter holds the maximum priority in the
    /// alphabet.
    #[must_use]
    pub const fn is_max_priority(self) -> bool {
        self.priority() as usize == Self::COUNT
    }
}

impl Distribution<Letter> for StandardUniform {
    /// Draws a letter with uniform probability 1/12.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Letter {
        Letter::ALPHABET[rng.random_range(0..Letter::COUNT)]
    }
}
