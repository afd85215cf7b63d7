//! The payload module contains the codec for both link directions: the
//! sensor uplink frame, the command downlink frame, and the fixed-point
//! conventions they share.

pub mod downlink;
pub mod fixed_point;
pub mod uplink;

pub use downlink::{
    decode_command, resolve_interval, Command, CommandRecord, DownlinkEncoder, EncodedFrame,
};
pub use uplink::{encode_measurement, DecodeResult, Measurement, UplinkData, UplinkDecoder};
