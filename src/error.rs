//! Error types for colorcard operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in colorcard operations.
///
/// Most of the engine is infallible: conversions take `u8` channels, histograms of
/// empty images are all-zero, and unknown color-vision-deficiency names fall back to
/// normal vision. The variants below cover malformed external input and I/O.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Hex color string is not `#RRGGBB` / `RRGGBB`.
    #[error("Invalid hex color format: {0}")]
    InvalidHexFormat(String),

    /// Zone string is not of the form `"N-(N+1)"` with N in 0..=7.
    #[error("Invalid zone: {0}")]
    InvalidZone(String),

    /// Invalid dimensions for a framebuffer, image or overlay geometry.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Invalid configuration value.
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: String,
        /// Error message describing why the value is invalid.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions { width: 0, height: 100 };
        assert!(err.to_string().contains("Invalid dimensions"));
        assert!(err.to_string().contains("0x100"));
    }

    #[test]
    fn test_invalid_hex_mentions_input() {
        let err = Error::InvalidHexFormat("GG0000".to_string());
        assert!(err.to_string().contains("GG0000"));
    }

    #[test]
    fn test_config_parse_includes_line() {
        let err = Error::ConfigParse { line: 4, message: "bad value".to_string() };
        let display = err.to_string();
        assert!(display.contains("line 4"));
        assert!(display.contains("bad value"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
