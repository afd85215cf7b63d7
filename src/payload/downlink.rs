//! # Downlink Encoder
//!
//! Serializes device commands into compact frames.
//!
//! | Command      | Byte 0 | Byte 1      | Byte 2     |
//! |--------------|--------|-------------|------------|
//! | SET_INTERVAL | `0x01` | interval hi | interval lo|
//! | RESET        | `0xFF` |             |            |
//! | anything else| (empty frame)                     |
//!
//! Every frame goes out on fPort 1.

use crate::config::{FormatterConfig, IntervalPolicy};
use crate::constants::{
    COMMAND_RESET, COMMAND_SET_INTERVAL, DEFAULT_INTERVAL_SECS, DOWNLINK_FPORT, OPCODE_RESET,
    OPCODE_SET_INTERVAL,
};
use crate::error::FormatterError;
use crate::payload::fixed_point::split_be16;
use crate::util::hex::format_hex_compact;
use log::{debug, warn};
use nom::{
    error::{Error as NomError, ErrorKind},
    number::complete::{be_u16, be_u8},
    IResult,
};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const SET_INTERVAL_FRAME_LEN: usize = 3;

/// A device command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Change the reporting interval. `None` or `Some(0)` means the default
    /// of 60 s.
    SetInterval { interval: Option<i64> },
    Reset,
    /// Any other command name, or none at all. Encodes to an empty frame.
    Unrecognized(Option<String>),
}

impl Command {
    pub fn set_interval(interval: i64) -> Self {
        Command::SetInterval {
            interval: Some(interval),
        }
    }
}

/// Resolves the interval actually sent for SET_INTERVAL.
pub fn resolve_interval(interval: Option<i64>) -> i64 {
    match interval {
        Some(secs) if secs != 0 => secs,
        _ => DEFAULT_INTERVAL_SECS,
    }
}

/// Command as it arrives from the integration host:
/// `{"command": "SET_INTERVAL", "interval": 300}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommandRecord {
    #[serde(default, deserialize_with = "deserialize_command")]
    pub command: Option<String>,
    #[serde(default, deserialize_with = "deserialize_interval")]
    pub interval: Option<i64>,
}

/// Non-string command names cannot match any command and are dropped.
fn deserialize_command<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(name) => Some(name),
        _ => None,
    })
}

const INT32_MODULUS: f64 = 4_294_967_296.0;

/// Truncates a float interval toward zero. Magnitudes beyond `i64` wrap
/// modulo 2^32 instead of saturating, so the low 16 bits still follow the
/// usual integer wrap. A non-zero input never resolves to zero; it maps to
/// 2^32, which encodes as `00 00` without triggering the default.
fn wrap_float_interval(secs: f64) -> i64 {
    let truncated = secs.trunc();
    let wrapped = if truncated.abs() < 9.2e18 {
        truncated as i64
    } else {
        truncated.rem_euclid(INT32_MODULUS) as i64
    };
    if wrapped == 0 && secs != 0.0 {
        1 << 32
    } else {
        wrapped
    }
}

/// Accepts integers, floats (truncated toward zero) and the empty values
/// `null`, `false` and `""`, which fall back to the default interval.
/// Integers above `i64::MAX` wrap.
fn deserialize_interval<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    match Value::deserialize(d)? {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(secs), _, _) => Ok(Some(secs)),
            (None, Some(secs), _) => Ok(Some(secs as i64)),
            (None, None, Some(secs)) => Ok(Some(wrap_float_interval(secs))),
            (None, None, None) => Err(D::Error::custom(format!("unsupported interval {n}"))),
        },
        other => Err(D::Error::custom(format!(
            "interval must be a number, got {other}"
        ))),
    }
}

impl From<CommandRecord> for Command {
    fn from(record: CommandRecord) -> Self {
        match record.command {
            Some(ref name) if name == COMMAND_SET_INTERVAL => Command::SetInterval {
                interval: record.interval,
            },
            Some(ref name) if name == COMMAND_RESET => Command::Reset,
            command => Command::Unrecognized(command),
        }
    }
}

/// Frame handed back to the integration host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedFrame {
    pub bytes: Vec<u8>,
    #[serde(rename = "fPort")]
    pub f_port: u8,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl EncodedFrame {
    fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            f_port: DOWNLINK_FPORT,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn rejected(error: &FormatterError) -> Self {
        Self {
            errors: vec![error.to_string()],
            ..Self::new(Vec::new())
        }
    }
}

/// Stateless downlink encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct DownlinkEncoder {
    pub policy: IntervalPolicy,
}

impl DownlinkEncoder {
    pub fn new(policy: IntervalPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &FormatterConfig) -> Self {
        Self::new(config.interval_policy)
    }

    /// Encodes a command. Never fails; under [`IntervalPolicy::Strict`] a
    /// rejected interval is reported in `errors` with an empty frame.
    pub fn encode(&self, command: &Command) -> EncodedFrame {
        match self.try_encode(command) {
            Ok(bytes) => EncodedFrame::new(bytes),
            Err(e) => {
                warn!("Downlink rejected: {e}");
                EncodedFrame::rejected(&e)
            }
        }
    }

    /// Encodes a command into its frame bytes.
    pub fn try_encode(&self, command: &Command) -> Result<Vec<u8>, FormatterError> {
        let bytes = match command {
            Command::SetInterval { interval } => {
                let interval = resolve_interval(*interval);
                if self.policy == IntervalPolicy::Strict
                    && !(1..=i64::from(u16::MAX)).contains(&interval)
                {
                    return Err(FormatterError::IntervalOutOfRange(interval));
                }
                let [hi, lo] = split_be16(interval);
                vec![OPCODE_SET_INTERVAL, hi, lo]
            }
            Command::Reset => vec![OPCODE_RESET],
            Command::Unrecognized(name) => {
                debug!("No frame for unrecognized command {name:?}");
                Vec::new()
            }
        };
        debug!("Encoded downlink {command:?}: [{}]", format_hex_compact(&bytes));
        Ok(bytes)
    }
}

fn parse_command(input: &[u8]) -> IResult<&[u8], Command> {
    let (input, opcode) = be_u8(input)?;
    match opcode {
        OPCODE_SET_INTERVAL => {
            let (input, interval) = be_u16(input)?;
            Ok((input, Command::set_interval(i64::from(interval))))
        }
        OPCODE_RESET => Ok((input, Command::Reset)),
        _ => Err(nom::Err::Failure(NomError::new(input, ErrorKind::Tag))),
    }
}

/// Parses a downlink frame the way the device firmware does.
///
/// An empty frame carries no command and yields `None`.
pub fn decode_command(bytes: &[u8]) -> Result<Option<Command>, FormatterError> {
    let Some(&opcode) = bytes.first() else {
        return Ok(None);
    };

    match parse_command(bytes) {
        Ok((rest, command)) => {
            if !rest.is_empty() {
                debug!("Downlink left {} bytes unparsed", rest.len());
            }
            Ok(Some(command))
        }
        Err(nom::Err::Failure(e)) if e.code == ErrorKind::Tag => {
            Err(FormatterError::UnknownOpcode(opcode))
        }
        Err(_) => Err(FormatterError::InvalidLength {
            expected: SET_INTERVAL_FRAME_LEN,
            actual: bytes.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> Command {
        serde_json::from_str::<CommandRecord>(json).unwrap().into()
    }

    #[test]
    fn test_resolve_interval() {
        assert_eq!(resolve_interval(None), 60);
        assert_eq!(resolve_interval(Some(0)), 60);
        assert_eq!(resolve_interval(Some(300)), 300);
        assert_eq!(resolve_interval(Some(-5)), -5);
    }

    #[test]
    fn test_record_to_command() {
        assert_eq!(
            record(r#"{"command":"SET_INTERVAL","interval":300}"#),
            Command::set_interval(300)
        );
        assert_eq!(
            record(r#"{"command":"SET_INTERVAL"}"#),
            Command::SetInterval { interval: None }
        );
        assert_eq!(record(r#"{"command":"RESET"}"#), Command::Reset);
        assert_eq!(record("{}"), Command::Unrecognized(None));
        assert_eq!(record(r#"{"command":7}"#), Command::Unrecognized(None));
        assert_eq!(
            record(r#"{"command":"reset"}"#),
            Command::Unrecognized(Some("reset".to_string()))
        );
    }

    #[test]
    fn test_interval_empty_values() {
        for json in [
            r#"{"command":"SET_INTERVAL","interval":null}"#,
            r#"{"command":"SET_INTERVAL","interval":false}"#,
            r#"{"command":"SET_INTERVAL","interval":""}"#,
        ] {
            assert_eq!(record(json), Command::SetInterval { interval: None });
        }
        assert_eq!(
            record(r#"{"command":"SET_INTERVAL","interval":90.7}"#),
            Command::set_interval(90)
        );
        assert!(serde_json::from_str::<CommandRecord>(r#"{"interval":"ten"}"#).is_err());
    }

    #[test]
    fn test_huge_intervals_wrap() {
        let encoder = DownlinkEncoder::default();
        for json in [
            r#"{"command":"SET_INTERVAL","interval":10000000000000000000}"#,
            r#"{"command":"SET_INTERVAL","interval":1e20}"#,
            r#"{"command":"SET_INTERVAL","interval":-1e20}"#,
            r#"{"command":"SET_INTERVAL","interval":0.5}"#,
        ] {
            assert_eq!(
                encoder.encode(&record(json)).bytes,
                vec![0x01, 0x00, 0x00],
                "{json}"
            );
        }
        // Above i64::MAX but exact in u64; only the low 16 bits go out
        assert_eq!(
            encoder
                .encode(&record(r#"{"command":"SET_INTERVAL","interval":10000000000000000300}"#))
                .bytes,
            vec![0x01, 0x01, 0x2C]
        );
    }

    #[test]
    fn test_truncating_encode() {
        let encoder = DownlinkEncoder::default();
        assert_eq!(
            encoder.try_encode(&Command::set_interval(0x1_0001)).unwrap(),
            vec![0x01, 0x00, 0x01]
        );
        assert_eq!(
            encoder.try_encode(&Command::set_interval(-1)).unwrap(),
            vec![0x01, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_strict_encode() {
        let encoder = DownlinkEncoder::new(IntervalPolicy::Strict);
        assert_eq!(
            encoder.try_encode(&Command::set_interval(65535)).unwrap(),
            vec![0x01, 0xFF, 0xFF]
        );
        assert!(matches!(
            encoder.try_encode(&Command::set_interval(65536)),
            Err(FormatterError::IntervalOutOfRange(65536))
        ));

        let frame = encoder.encode(&Command::set_interval(-3));
        assert!(frame.bytes.is_empty());
        assert_eq!(frame.f_port, 1);
        assert_eq!(frame.errors, vec!["Interval -3 out of range (1..=65535)"]);
    }

    #[test]
    fn test_decode_command() {
        assert_eq!(decode_command(&[]).unwrap(), None);
        assert_eq!(
            decode_command(&[0x01, 0x01, 0x2C]).unwrap(),
            Some(Command::set_interval(300))
        );
        assert_eq!(decode_command(&[0xFF]).unwrap(), Some(Command::Reset));
        assert!(matches!(
            decode_command(&[0x42]),
            Err(FormatterError::UnknownOpcode(0x42))
        ));
        assert!(matches!(
            decode_command(&[0x01, 0x01]),
            Err(FormatterError::InvalidLength {
                expected: 3,
                actual: 2
            })
        ));
    }
}
