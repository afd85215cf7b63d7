//! # Utility Modules
//!
//! Hex encoding/decoding used by the CLI and by frame logging.

pub mod hex;

pub use hex::{
    decode_frame_hex, decode_hex, encode_hex, encode_hex_upper, format_hex_compact, HexError,
};
