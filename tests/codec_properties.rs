//! Property-based tests for the uplink and downlink codecs.

use proptest::prelude::*;
use telemetry_formatter::payload::fixed_point::sign_correct;
use telemetry_formatter::{
    decode_command, decode_uplink, encode_downlink, encode_measurement, Command, UplinkData,
};

fn frame(temperature: u16, humidity: u16, current: u16, pressure: u16) -> Vec<u8> {
    [temperature, humidity, current, pressure]
        .iter()
        .flat_map(|r| r.to_be_bytes())
        .collect()
}

proptest! {
    #[test]
    fn prop_decode_is_deterministic(bytes in proptest::collection::vec(any::<u8>(), 8..16)) {
        prop_assert_eq!(decode_uplink(&bytes), decode_uplink(&bytes));
    }

    #[test]
    fn prop_scale_law(t in any::<u16>(), h in any::<u16>(), c in any::<u16>(), p in any::<u16>()) {
        let result = decode_uplink(&frame(t, h, c, p));
        let reading = result.as_measurement().unwrap();
        prop_assert!((reading.temperature * 10.0 - f64::from(sign_correct(t))).abs() < 1e-6);
        prop_assert!((reading.humidity * 10.0 - f64::from(h)).abs() < 1e-6);
        prop_assert!((reading.current * 100.0 - f64::from(sign_correct(c))).abs() < 1e-6);
        prop_assert!((reading.pressure * 10.0 - f64::from(p)).abs() < 1e-6);
    }

    #[test]
    fn prop_power_law(bytes in proptest::collection::vec(any::<u8>(), 8)) {
        let result = decode_uplink(&bytes);
        let reading = result.as_measurement().unwrap();
        prop_assert_eq!(reading.power(), reading.current.abs() * 230.0);
        prop_assert!(reading.power() >= 0.0);
        let json = serde_json::to_value(reading).unwrap();
        prop_assert_eq!(json["power"].as_f64(), Some(reading.power()));
    }

    #[test]
    fn prop_length_guard(bytes in proptest::collection::vec(any::<u8>(), 0..8)) {
        let result = decode_uplink(&bytes);
        prop_assert_eq!(result.data, UplinkData::PayloadTooShort);
        prop_assert_eq!(result.warnings.len(), 1);
        prop_assert!(result.errors.is_empty());
    }

    #[test]
    fn prop_trailing_bytes_ignored(
        head in proptest::collection::vec(any::<u8>(), 8),
        tail in proptest::collection::vec(any::<u8>(), 0..32),
    ) {
        let mut extended = head.clone();
        extended.extend_from_slice(&tail);
        prop_assert_eq!(decode_uplink(&extended), decode_uplink(&head));
    }

    /// Firmware-side encoding of a decoded reading reproduces the frame.
    #[test]
    fn prop_firmware_encoding_matches(bytes in proptest::collection::vec(any::<u8>(), 8)) {
        let result = decode_uplink(&bytes);
        let reading = result.as_measurement().unwrap();
        prop_assert_eq!(encode_measurement(reading).to_vec(), bytes);
    }

    #[test]
    fn prop_set_interval_low_16_bits(interval in 1i64..=1_000_000) {
        let frame = encode_downlink(&Command::set_interval(interval));
        prop_assert_eq!(frame.f_port, 1);
        prop_assert_eq!(frame.bytes.len(), 3);
        let sent = decode_command(&frame.bytes).unwrap();
        prop_assert_eq!(sent, Some(Command::set_interval(interval & 0xFFFF)));
    }
}
