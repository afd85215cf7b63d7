//! # Formatter Error Handling
//!
//! This module defines the FormatterError enum, which represents the error
//! types surfaced by the fallible codec APIs and the host JSON boundary.
//! The infallible `decode`/`encode` paths fold these into result fields.

use crate::util::hex::HexError;
use thiserror::Error;

/// Represents the different error types that can occur in the formatter crate.
#[derive(Debug, Error)]
pub enum FormatterError {
    /// A frame was shorter than its layout requires.
    #[error("Invalid payload length: expected at least {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A SET_INTERVAL value does not fit the 16-bit wire field (strict policy only).
    #[error("Interval {0} out of range (1..=65535)")]
    IntervalOutOfRange(i64),

    /// A downlink frame started with an opcode the device does not know.
    #[error("Unknown downlink opcode: 0x{0:02X}")]
    UnknownOpcode(u8),

    /// Indicates an invalid hexadecimal string was provided.
    #[error("Invalid hexadecimal string: {0}")]
    InvalidHexString(#[from] HexError),

    /// The host envelope could not be parsed or serialized.
    #[error("Invalid JSON envelope: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Indicates a file (such as a config file) could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
