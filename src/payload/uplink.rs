//! # Uplink Decoder
//!
//! Decodes the 8-byte sensor frame into engineering units.
//!
//! ```text
//! [TEMP_H][TEMP_L][HUM_H][HUM_L][CURR_H][CURR_L][PRES_H][PRES_L]
//! ```
//!
//! All registers are big-endian. Temperature and current are signed. Bytes
//! past offset 7 are reserved for future fields and ignored.

use crate::constants::{
    CURRENT_OFFSET, CURRENT_SCALE, EXPECTED_MIN_BYTES_WARNING, HUMIDITY_OFFSET, HUMIDITY_SCALE,
    NOMINAL_VOLTAGE, PAYLOAD_TOO_SHORT, PRESSURE_OFFSET, PRESSURE_SCALE, TEMPERATURE_OFFSET,
    TEMPERATURE_SCALE, UPLINK_MIN_LEN,
};
use crate::error::FormatterError;
use crate::payload::fixed_point::{read_register, scale, sign_correct, split_be16, to_register};
use crate::util::hex::format_hex_compact;
use log::{debug, trace, warn};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// One decoded sensor reading.
///
/// `power` is not a field; it is always derived from `current`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// °C, 0.1 resolution
    pub temperature: f64,
    /// %, 0.1 resolution
    pub humidity: f64,
    /// A, 0.01 resolution
    pub current: f64,
    /// hPa, 0.1 resolution
    pub pressure: f64,
}

impl Measurement {
    /// Apparent power in W at the nominal 230 V supply.
    pub fn power(&self) -> f64 {
        self.current.abs() * NOMINAL_VOLTAGE
    }
}

impl Serialize for Measurement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Measurement", 5)?;
        state.serialize_field("temperature", &self.temperature)?;
        state.serialize_field("humidity", &self.humidity)?;
        state.serialize_field("current", &self.current)?;
        state.serialize_field("pressure", &self.pressure)?;
        state.serialize_field("power", &self.power())?;
        state.end()
    }
}

/// The `data` part of a [`DecodeResult`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UplinkData {
    Measurement(Measurement),
    /// Frame shorter than 8 bytes. Serialized in-band as
    /// `{"error": "Payload too short"}`; consumers match on that key.
    PayloadTooShort,
}

impl Serialize for UplinkData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UplinkData::Measurement(measurement) => measurement.serialize(serializer),
            UplinkData::PayloadTooShort => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", PAYLOAD_TOO_SHORT)?;
                map.end()
            }
        }
    }
}

/// Result handed back to the integration host for every uplink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodeResult {
    pub data: UplinkData,
    pub warnings: Vec<String>,
    /// Fatal structural failures. Decode never fills this today.
    pub errors: Vec<String>,
}

impl DecodeResult {
    fn measurement(measurement: Measurement) -> Self {
        Self {
            data: UplinkData::Measurement(measurement),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn too_short() -> Self {
        Self {
            data: UplinkData::PayloadTooShort,
            warnings: vec![EXPECTED_MIN_BYTES_WARNING.to_string()],
            errors: Vec::new(),
        }
    }

    /// The decoded reading, if the frame was long enough.
    pub fn as_measurement(&self) -> Option<&Measurement> {
        match &self.data {
            UplinkData::Measurement(measurement) => Some(measurement),
            UplinkData::PayloadTooShort => None,
        }
    }
}

/// Stateless decoder for the sensor uplink frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct UplinkDecoder;

impl UplinkDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes a frame. Never fails; a short frame yields a warning result.
    pub fn decode(&self, bytes: &[u8]) -> DecodeResult {
        match self.try_decode(bytes) {
            Ok(measurement) => DecodeResult::measurement(measurement),
            Err(e) => {
                warn!("Uplink rejected: {e}");
                DecodeResult::too_short()
            }
        }
    }

    /// Decodes a frame, reporting a short frame as [`FormatterError::InvalidLength`].
    pub fn try_decode(&self, bytes: &[u8]) -> Result<Measurement, FormatterError> {
        trace!("Uplink frame: {}", format_hex_compact(bytes));

        if bytes.len() < UPLINK_MIN_LEN {
            return Err(FormatterError::InvalidLength {
                expected: UPLINK_MIN_LEN,
                actual: bytes.len(),
            });
        }

        let temperature = sign_correct(read_register(bytes, TEMPERATURE_OFFSET)?);
        let humidity = i32::from(read_register(bytes, HUMIDITY_OFFSET)?);
        let current = sign_correct(read_register(bytes, CURRENT_OFFSET)?);
        let pressure = i32::from(read_register(bytes, PRESSURE_OFFSET)?);

        if bytes.len() > UPLINK_MIN_LEN {
            debug!(
                "Ignoring {} trailing uplink bytes",
                bytes.len() - UPLINK_MIN_LEN
            );
        }

        let measurement = Measurement {
            temperature: scale(temperature, TEMPERATURE_SCALE),
            humidity: scale(humidity, HUMIDITY_SCALE),
            current: scale(current, CURRENT_SCALE),
            pressure: scale(pressure, PRESSURE_SCALE),
        };
        debug!("Decoded uplink: {measurement:?}");
        Ok(measurement)
    }
}

/// Builds the uplink frame the way the sensor firmware does: each value is
/// multiplied by its scale, rounded, and written big-endian. Out-of-range
/// values wrap.
pub fn encode_measurement(measurement: &Measurement) -> [u8; UPLINK_MIN_LEN] {
    let registers = [
        to_register(measurement.temperature, TEMPERATURE_SCALE),
        to_register(measurement.humidity, HUMIDITY_SCALE),
        to_register(measurement.current, CURRENT_SCALE),
        to_register(measurement.pressure, PRESSURE_SCALE),
    ];

    let mut frame = [0u8; UPLINK_MIN_LEN];
    for (chunk, register) in frame.chunks_exact_mut(2).zip(registers) {
        chunk.copy_from_slice(&split_be16(i64::from(register)));
    }
    frame
}
