//! Integration-host boundary.
//!
//! The network server calls the formatter with a JSON envelope per message:
//!
//! ```json
//! { "bytes": [0, 255, 2, 88, 1, 244, 4, 176], "fPort": 2, "recvTime": "..." }
//! { "data": { "command": "SET_INTERVAL", "interval": 300 } }
//! ```
//!
//! and expects `{data, warnings, errors}` or `{bytes, fPort, warnings, errors}`
//! back. Metadata other than `bytes` is accepted and ignored.

use crate::config::FormatterConfig;
use crate::error::FormatterError;
use crate::payload::downlink::{Command, CommandRecord, DownlinkEncoder, EncodedFrame};
use crate::payload::uplink::{DecodeResult, UplinkDecoder};
use serde::Deserialize;
use serde_json::Value;

/// Uplink envelope. Only `bytes` is decoded; `fPort` and `recvTime` are kept
/// as whatever JSON the host sent and used for logging only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UplinkInput {
    pub bytes: Vec<u8>,
    #[serde(default)]
    pub f_port: Option<Value>,
    #[serde(default)]
    pub recv_time: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DownlinkInput {
    #[serde(default)]
    pub data: CommandRecord,
}

/// Both directions behind one value, configured once and shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadFormatter {
    decoder: UplinkDecoder,
    encoder: DownlinkEncoder,
}

impl PayloadFormatter {
    pub fn new(config: &FormatterConfig) -> Self {
        Self {
            decoder: UplinkDecoder::new(),
            encoder: DownlinkEncoder::from_config(config),
        }
    }

    pub fn decode_uplink(&self, input: &UplinkInput) -> DecodeResult {
        log::debug!(
            "Uplink on fPort {:?} received {:?}, {} bytes",
            input.f_port,
            input.recv_time,
            input.bytes.len()
        );
        self.decoder.decode(&input.bytes)
    }

    pub fn encode_downlink(&self, input: &DownlinkInput) -> EncodedFrame {
        let command = Command::from(input.data.clone());
        self.encoder.encode(&command)
    }

    /// Decodes a JSON uplink envelope and returns the JSON result.
    pub fn decode_uplink_json(&self, json: &str) -> Result<String, FormatterError> {
        let input: UplinkInput = serde_json::from_str(json)?;
        Ok(serde_json::to_string(&self.decode_uplink(&input))?)
    }

    /// Encodes a JSON downlink envelope and returns the JSON result.
    pub fn encode_downlink_json(&self, json: &str) -> Result<String, FormatterError> {
        let input: DownlinkInput = serde_json::from_str(json)?;
        Ok(serde_json::to_string(&self.encode_downlink(&input))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_uplink_envelope_ignores_metadata() {
        let input: UplinkInput = serde_json::from_str(
            r#"{"bytes":[0,255,2,88,1,244,4,176],"fPort":2,"recvTime":"2026-01-10T12:00:00Z","devEui":"70B3D57ED0000000"}"#,
        )
        .unwrap();
        assert_eq!(input.f_port, Some(json!(2)));
        assert_eq!(input.bytes.len(), 8);
    }

    #[test]
    fn test_downlink_json_round() {
        let formatter = PayloadFormatter::default();
        let out = formatter
            .encode_downlink_json(r#"{"data":{"command":"SET_INTERVAL","interval":300}}"#)
            .unwrap();
        let out: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            out,
            json!({ "bytes": [1, 1, 44], "fPort": 1, "warnings": [], "errors": [] })
        );
    }

    #[test]
    fn test_odd_metadata_still_decodes() {
        let formatter = PayloadFormatter::default();
        for envelope in [
            r#"{"bytes":[0,255,2,88,1,244,4,176],"fPort":300}"#,
            r#"{"bytes":[0,255,2,88,1,244,4,176],"recvTime":1700000000}"#,
            r#"{"bytes":[0,255,2,88,1,244,4,176],"fPort":"1","recvTime":null}"#,
        ] {
            let out: Value =
                serde_json::from_str(&formatter.decode_uplink_json(envelope).unwrap()).unwrap();
            assert_eq!(out["data"]["temperature"], 25.5, "{envelope}");
            assert_eq!(out["warnings"], json!([]));
        }
    }

    #[test]
    fn test_bad_envelope_is_error() {
        let formatter = PayloadFormatter::default();
        assert!(matches!(
            formatter.decode_uplink_json(r#"{"bytes":[256]}"#),
            Err(FormatterError::Json(_))
        ));
        assert!(formatter.decode_uplink_json("not json").is_err());
    }
}
