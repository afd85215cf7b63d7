//! Payload Format Constants
//!
//! Wire-level constants for the 8-byte sensor uplink and the command
//! downlink. Scale divisors are part of the wire contract.

/// Minimum uplink frame length; trailing bytes are ignored
pub const UPLINK_MIN_LEN: usize = 8;

/// Temperature register offset (signed, 0.1 °C)
pub const TEMPERATURE_OFFSET: usize = 0;

/// Humidity register offset (unsigned, 0.1 %)
pub const HUMIDITY_OFFSET: usize = 2;

/// Current register offset (signed, 0.01 A)
pub const CURRENT_OFFSET: usize = 4;

/// Pressure register offset (unsigned, 0.1 hPa)
pub const PRESSURE_OFFSET: usize = 6;

/// Fixed-point divisor for temperature
pub const TEMPERATURE_SCALE: f64 = 10.0;

/// Fixed-point divisor for humidity
pub const HUMIDITY_SCALE: f64 = 10.0;

/// Fixed-point divisor for current
pub const CURRENT_SCALE: f64 = 100.0;

/// Fixed-point divisor for pressure
pub const PRESSURE_SCALE: f64 = 10.0;

/// Nominal mains voltage used to derive power from current
pub const NOMINAL_VOLTAGE: f64 = 230.0;

/// Sign bit of a 16-bit register
pub const SIGN_BIT_16: u16 = 0x8000;

/// Two's-complement correction for a 16-bit register
pub const TWOS_COMPLEMENT_16: i32 = 0x10000;

/// Downlink opcode: set reporting interval
pub const OPCODE_SET_INTERVAL: u8 = 0x01;

/// Downlink opcode: reset device
pub const OPCODE_RESET: u8 = 0xFF;

/// Interval used when SET_INTERVAL carries no (or a zero) interval, in seconds
pub const DEFAULT_INTERVAL_SECS: i64 = 60;

/// fPort used for every downlink frame
pub const DOWNLINK_FPORT: u8 = 1;

/// Command name for the set-interval downlink
pub const COMMAND_SET_INTERVAL: &str = "SET_INTERVAL";

/// Command name for the reset downlink
pub const COMMAND_RESET: &str = "RESET";

/// In-band error marker written into `data` for a short uplink
pub const PAYLOAD_TOO_SHORT: &str = "Payload too short";

/// Warning emitted alongside [`PAYLOAD_TOO_SHORT`]
pub const EXPECTED_MIN_BYTES_WARNING: &str = "Expected at least 8 bytes";
