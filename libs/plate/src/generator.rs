//! Pure plate sequence generation.
//!
//! Both functions are computation-only: no collision checking and no
//! exhaustion detection happens here. The allocation engine owns those
//! concerns.

use rand::Rng;

use crate::{Letter, PlateNumber};

/// Computes the deterministic successor of a plate.
///
/// Digits roll first; when they reach 999 the letters carry, advancing the
/// rightmost letter position that is not yet at maximum priority and
/// resetting every position to its right. When all three letters are at
/// maximum priority the plate wraps around to the origin of the space. The
/// region is always carried through unchanged.
#[must_use]
pub fn successor(plate: &PlateNumber) -> PlateNumber {
    if plate.digits < PlateNumber::MAX_DIGITS {
        return PlateNumber {
            letters: plate.letters,
            digits: plate.digits + 1,
            region: plate.region.clone(),
        };
    }

    let mut letters = plate.letters;
    match letters.iter().rposition(|l| !l.is_max_priority()) {
        Some(pos) => {
            letters[pos] = letters[pos].next();
            for letter in &mut letters[pos + 1..] {
                *letter = Letter::MIN;
            }
        }
        // Full wraparound: the space has cycled back to its origin.
        None => letters = [Letter::MIN; 3],
    }

    PlateNumber {
        letters,
        digits: 0,
        region: plate.region.clone(),
    }
}

/// Draws a uniformly random plate for the given region.
///
/// Digits are uniform over 0..=999 and each letter position is drawn
/// independently and uniformly over the alphabet.
#[must_use]
pub fn random_plate(region: &str) -> PlateNumber {
    let mut rng = rand::rng();
    PlateNumber {
        letters: [rng.random(), rng.random(), rng.random()],
        digits: rng.random_range(0..=PlateNumber::MAX_DIGITS),
        region: region.trim().to_string(),
    }
}
