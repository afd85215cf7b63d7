#![no_main]

use libfuzzer_sys::fuzz_target;
use telemetry_formatter::{decode_command, decode_uplink, encode_measurement};

fuzz_target!(|data: &[u8]| {
    // Every input must produce a well-formed result
    let result = decode_uplink(data);

    match result.as_measurement() {
        Some(reading) => {
            assert!(data.len() >= 8);
            assert!(result.warnings.is_empty());
            assert_eq!(reading.power(), reading.current.abs() * 230.0);
            assert_eq!(&encode_measurement(reading)[..], &data[..8]);
        }
        None => {
            assert!(data.len() < 8);
            assert_eq!(result.warnings.len(), 1);
        }
    }
    assert!(result.errors.is_empty());

    // The device-side downlink parser sees the same arbitrary bytes
    let _ = decode_command(data);
});
