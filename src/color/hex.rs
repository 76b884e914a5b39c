//! `#RRGGBB` encoding and parsing.

use super::Rgb;
use crate::error::{Error, Result};

/// Format as `#RRGGBB` with uppercase digits.
#[must_use]
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

/// Parse `#RRGGBB` or `RRGGBB`, case-insensitive.
///
/// Leading `#` characters are stripped; what remains must be exactly six ASCII hex
/// digits.
///
/// # Errors
///
/// Returns [`Error::InvalidHexFormat`] for any other length or a non-hex character.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidHexFormat(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| Error::InvalidHexFormat(hex.to_string()))
    };

    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
