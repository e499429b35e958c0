//! Conversions for raw NEPLAN cell values
//!
//! NEPLAN writes ISO-8859-1 text with decimal commas (`0,206`). These
//! helpers turn raw bytes and cells into Rust values:
//! - [`decode_latin1`] maps each byte to the code point of the same value
//! - [`parse_decimal_comma`] accepts both `,` and `.` as decimal separator
//! - [`safe_f64_to_i32`] guards the float-to-integer step for discriminators

use std::num::ParseFloatError;

use anyhow::{anyhow, Result};

/// Decode ISO-8859-1 bytes. Every byte is a valid code point, so this
/// cannot fail.
///
/// # Examples
/// ```
/// use neplan_io::helpers::decode_latin1;
///
/// assert_eq!(decode_latin1(b"St\xfctzpunkt"), "Stützpunkt");
/// ```
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Parse a decimal-comma number. Blank cells are null.
///
/// # Examples
/// ```
/// use neplan_io::helpers::parse_decimal_comma;
///
/// assert_eq!(parse_decimal_comma("0,25").unwrap(), Some(0.25));
/// assert_eq!(parse_decimal_comma(" ").unwrap(), None);
/// assert!(parse_decimal_comma("n/a").is_err());
/// ```
pub fn parse_decimal_comma(raw: &str) -> Result<Option<f64>, ParseFloatError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.contains(',') {
        trimmed.replace(',', ".").parse::<f64>().map(Some)
    } else {
        trimmed.parse::<f64>().map(Some)
    }
}

/// Safely convert f64 to i32 with bounds checking.
///
/// Returns an error if the value is:
/// - Not finite (NaN or Infinity)
/// - Outside the range [i32::MIN, i32::MAX]
/// - Not a whole number
///
/// # Examples
/// ```
/// use neplan_io::helpers::safe_f64_to_i32;
///
/// assert_eq!(safe_f64_to_i32(8.0).unwrap(), 8);
/// assert!(safe_f64_to_i32(1.5).is_err());
/// assert!(safe_f64_to_i32(f64::NAN).is_err());
/// ```
pub fn safe_f64_to_i32(value: f64) -> Result<i32> {
    if !value.is_finite() {
        return Err(anyhow!("Cannot convert non-finite value to i32: {}", value));
    }
    if value < i32::MIN as f64 || value > i32::MAX as f64 {
        return Err(anyhow!("Value {} is outside the i32 range", value));
    }
    if value.fract() != 0.0 {
        return Err(anyhow!("Value {} is not a whole number", value));
    }
    Ok(value as i32)
}
