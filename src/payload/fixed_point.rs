//! # Fixed-Point Register Encoding
//!
//! Shared numeric conventions for both link directions: 16-bit big-endian
//! registers, two's-complement sign correction and decimal scale divisors.

use crate::constants::{SIGN_BIT_16, TWOS_COMPLEMENT_16};
use crate::error::FormatterError;

/// Joins two bytes, most significant first, into a 16-bit register.
pub fn be_u16(hi: u8, lo: u8) -> u16 {
    (u16::from(hi) << 8) | u16::from(lo)
}

/// Reads the big-endian 16-bit register starting at `offset`.
pub fn read_register(data: &[u8], offset: usize) -> Result<u16, FormatterError> {
    match data.get(offset..offset + 2) {
        Some(&[hi, lo]) => Ok(be_u16(hi, lo)),
        _ => Err(FormatterError::InvalidLength {
            expected: offset + 2,
            actual: data.len(),
        }),
    }
}

/// Reinterprets a 16-bit register as two's-complement when its sign bit is set.
pub fn sign_correct(raw: u16) -> i32 {
    if raw & SIGN_BIT_16 != 0 {
        i32::from(raw) - TWOS_COMPLEMENT_16
    } else {
        i32::from(raw)
    }
}

/// Converts a raw register value into engineering units.
pub fn scale(raw: i32, divisor: f64) -> f64 {
    f64::from(raw) / divisor
}

/// Splits a value into its big-endian 16-bit wire form.
///
/// Each byte is masked to 8 bits, so values outside `0..=0xFFFF` wrap.
pub fn split_be16(value: i64) -> [u8; 2] {
    [((value >> 8) & 0xFF) as u8, (value & 0xFF) as u8]
}

/// Converts an engineering value back to its register, rounding to the
/// nearest step. Negative values come out in two's complement; values out
/// of range wrap.
pub fn to_register(value: f64, divisor: f64) -> u16 {
    ((value * divisor).round() as i64) as u16
}
