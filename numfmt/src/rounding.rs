//! FILENAME: numfmt/src/rounding.rs
//! PURPOSE: Pure numeric rounding at a given decimal place, in four modes.
//! CONTEXT: Both engines round through this function: the format engine
//! before splitting a value into digit strings, the parse engine for the
//! percentage post-pass and the final optional rounding step.

use log::trace;
use serde::{Deserialize, Serialize};

/// Rounding modes shared by the parse and format sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RoundingMode {
    /// Ties round towards positive infinity: 2.5 -> 3, -2.5 -> -2.
    #[default]
    HalfUp,
    /// Ties round towards negative infinity: 2.5 -> 2.
    HalfDown,
    /// Any fraction at the place rounds away from zero: 2.1 -> 3, -2.1 -> -3.
    AwayFromZero,
    /// Any fraction at the place is dropped towards zero: 2.9 -> 2, -2.9 -> -2.
    TowardsZero,
}

/// Round `value` at `decimal_places` decimal places.
///
/// `is_negative` feeds the directional modes (`AwayFromZero`,
/// `TowardsZero`), which pick floor or ceiling based on the sign of the
/// value being rounded.
pub fn round(value: f64, decimal_places: u32, is_negative: bool, mode: RoundingMode) -> f64 {
    let places = decimal_places as i32;

    let result = match mode {
        RoundingMode::HalfUp => {
            // floor(x + 0.5) keeps ties moving towards positive infinity
            shift(shift(value, places).half_up(), -places)
        }
        RoundingMode::HalfDown => {
            // bias by half a unit in the last place, then take the ceiling
            let bias = 5.0 / 10f64.powi(places + 1);
            shift(shift(value - bias, places).ceil(), -places)
        }
        RoundingMode::AwayFromZero => {
            let shifted = shift(value, places);
            let rounded = if is_negative { shifted.floor() } else { shifted.ceil() };
            shift(rounded, -places)
        }
        RoundingMode::TowardsZero => {
            let shifted = shift(value, places);
            let rounded = if is_negative { shifted.ceil() } else { shifted.floor() };
            shift(rounded, -places)
        }
    };

    trace!("rounded {value} to {result} ({mode:?}, {decimal_places} places)");
    result
}

/// Shift a value by a power of ten through its decimal representation.
///
/// The shift must happen in decimal, not binary: multiplying by powers of
/// ten compounds binary representation error (1.005 * 100 is slightly
/// below 100.5), while re-parsing `"{value}e{exponent}"` lands on the
/// closest double to the decimal-shifted value.
fn shift(value: f64, exponent: i32) -> f64 {
    format!("{value}e{exponent}")
        .parse()
        .unwrap_or(value * 10f64.powi(exponent))
}

trait HalfUpExt {
    fn half_up(self) -> f64;
}

impl HalfUpExt for f64 {
    fn half_up(self) -> f64 {
        // f64::round sends -2.5 to -3; ties must go towards +infinity here
        (self + 0.5).floor()
    }
}
