#![no_main]

use libfuzzer_sys::fuzz_target;
use telemetry_formatter::PayloadFormatter;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    // Malformed envelopes are errors, never panics
    let formatter = PayloadFormatter::default();
    let _ = formatter.encode_downlink_json(json);
    let _ = formatter.decode_uplink_json(json);
});
