//! # Hex Encoding/Decoding Utilities
//!
//! Hex helpers used by the CLI and the log output. Payloads are usually
//! pasted from a network console as a single run of hex digits
//! (`00FF025801F404B0`), sometimes with spaces between bytes.
//!
//! ```rust
//! use telemetry_formatter::util::hex::{decode_hex, encode_hex_upper, format_hex_compact};
//!
//! let frame = decode_hex("00FF 0258 01F4 04B0").unwrap();
//! assert_eq!(frame.len(), 8);
//! assert_eq!(encode_hex_upper(&frame), "00FF025801F404B0");
//! assert_eq!(format_hex_compact(&frame[..2]), "00 ff");
//! ```

use thiserror::Error;

/// Errors that can occur during hex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Odd number of hex characters: {0}")]
    OddLength(usize),

    #[error("Empty hex string")]
    EmptyString,

    #[error("Hex decoding error: {0}")]
    DecodeError(String),
}

/// Encode bytes to lowercase hex string
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Encode bytes to uppercase hex string, the form network consoles display
pub fn encode_hex_upper(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// Decode hex string to bytes
///
/// Accepts both uppercase and lowercase hex characters.
/// Whitespace is automatically stripped.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, HexError> {
    let cleaned: String = hex_str.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.is_empty() {
        return Err(HexError::EmptyString);
    }

    if cleaned.len() % 2 != 0 {
        return Err(HexError::OddLength(cleaned.len()));
    }

    hex::decode(&cleaned).map_err(|e| HexError::DecodeError(e.to_string()))
}

/// Decode an uplink frame typed as hex
///
/// Unlike [`decode_hex`], blank input is a valid zero-length frame.
pub fn decode_frame_hex(hex_str: &str) -> Result<Vec<u8>, HexError> {
    match decode_hex(hex_str) {
        Err(HexError::EmptyString) => Ok(Vec::new()),
        other => other,
    }
}

/// Format hex data for compact display (useful for logs)
///
/// Formats data as "00 ff 02 58" with spaces between bytes.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
