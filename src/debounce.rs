//! Counter debounce time conversion.
//!
//! The board stores one debounce byte per counter. Its effective debounce
//! time follows roughly `ms = 0.115 * value^2`, so the conversion from
//! milliseconds is the inverse square root, rounded half-up.

use crate::consts;
use crate::error::{Error, Result};
use log::trace;

/// Converts a debounce time in milliseconds to the hardware debounce byte.
///
/// Times above 7450 ms are clamped to 7450 ms (byte 255). Negative times
/// return `Err(Error::OutOfRange)`.
pub fn to_hardware_byte(millis: i32) -> Result<u8> {
    if millis < 0 {
        return Err(Error::OutOfRange(format!(
            "Debounce time {} ms is negative (valid 0-{} ms)",
            millis,
            consts::DEBOUNCE_MAX_MS
        )));
    }
    let millis = millis.min(consts::DEBOUNCE_MAX_MS);
    let mut value = (millis as f64 / consts::DEBOUNCE_CURVE_FACTOR).sqrt();
    if value > value.floor() + 0.49999999 {
        value += 1.0;
    }
    let byte = value as u8;
    trace!("Debounce {} ms -> hardware value {}", millis, byte);
    Ok(byte)
}

/// Nominal debounce time in milliseconds for a hardware debounce byte.
pub fn byte_to_millis(value: u8) -> f64 {
    consts::DEBOUNCE_CURVE_FACTOR * (value as f64) * (value as f64)
}
