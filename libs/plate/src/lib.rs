//! # platereg-plate
//!
//! Plate number types, ordering, and sequence generation for the platereg
//! registry.
//!
//! ## Design Principles
//!
//! - Plate numbers are immutable values with a canonical string form and
//!   strict parsing
//! - Plate numbers support roundtrip serialization (parse → format → parse)
//! - Comparison and rollover go through letter priorities, never through the
//!   letters' natural character order
//! - Generation is pure: the successor function never fails and never checks
//!   for exhaustion; that is the allocation engine's job
//!
//! ## Canonical Format
//!
//! A plate renders as `{letter}{digits:03}{letter}{letter} {region}`:
//!
//! - `А001АА 116 RUS`
//! - `В000АА 116 RUS`
//! - `Х999ХХ 116 RUS`
//!
//! The three letters come from a fixed 12-symbol Cyrillic alphabet. The final
//! letter position is the least significant rolling unit, so ordering on equal
//! digits compares letters from the last position to the first.

mod error;
mod generator;
mod letter;
mod number;

pub use error::PlateError;
pub use generator::{random_plate, successor};
pub use letter::Letter;
pub use number::PlateNumber;
