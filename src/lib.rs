//! # telemetry-formatter - Payload Formatter for an 8-Byte LoRaWAN Sensor Frame
//!
//! Translates between the sensor's fixed-layout uplink frame and engineering
//! values, and serializes device commands for the downlink. Both directions
//! are pure functions; the crate keeps no state between calls.
//!
//! ## Features
//!
//! - Uplink decode: temperature, humidity, current, pressure, derived power
//! - Downlink encode: `SET_INTERVAL` and `RESET` commands on fPort 1
//! - TTN-style JSON envelopes (`{data, warnings, errors}`)
//! - Device-side counterparts for simulation and testing
//!
//! ## Usage
//!
//! ```rust
//! use telemetry_formatter::{decode_uplink, encode_downlink, Command};
//!
//! let result = decode_uplink(&[0x00, 0xFF, 0x02, 0x58, 0x01, 0xF4, 0x04, 0xB0]);
//! let reading = result.as_measurement().unwrap();
//! assert_eq!(reading.temperature, 25.5);
//! assert_eq!(reading.power(), 1150.0);
//!
//! let frame = encode_downlink(&Command::set_interval(300));
//! assert_eq!(frame.bytes, vec![0x01, 0x01, 0x2C]);
//! assert_eq!(frame.f_port, 1);
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod formatter;
pub mod logging;
pub mod payload;
pub mod util;

pub use crate::config::{FormatterConfig, IntervalPolicy};
pub use crate::error::FormatterError;
pub use crate::formatter::{DownlinkInput, PayloadFormatter, UplinkInput};
pub use crate::logging::{init_logger, log_info};
pub use payload::{
    decode_command, encode_measurement, Command, CommandRecord, DecodeResult, DownlinkEncoder,
    EncodedFrame, Measurement, UplinkData, UplinkDecoder,
};

/// Decode an uplink frame with the default decoder.
///
/// # Arguments
/// * `bytes` - Raw frame as received from the device
///
/// # Returns
/// * `DecodeResult` - Measurement, or the short-payload marker with a warning
pub fn decode_uplink(bytes: &[u8]) -> DecodeResult {
    UplinkDecoder::new().decode(bytes)
}

/// Encode a downlink command with the default (truncating) interval policy.
///
/// # Arguments
/// * `command` - Command to serialize
///
/// # Returns
/// * `EncodedFrame` - Frame bytes on fPort 1; empty for unrecognized commands
pub fn encode_downlink(command: &Command) -> EncodedFrame {
    DownlinkEncoder::default().encode(command)
}
