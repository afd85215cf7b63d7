//! Formatter configuration.
//!
//! Only the downlink side is configurable. The uplink layout, scale factors
//! and nominal voltage are fixed by the wire format.
//!
//! ```json
//! { "interval_policy": "strict" }
//! ```

use crate::error::FormatterError;
use serde::Deserialize;
use std::path::Path;

/// How SET_INTERVAL treats an interval that does not fit 16 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalPolicy {
    /// Mask to 16 bits and send whatever remains.
    #[default]
    Truncate,
    /// Refuse intervals outside `1..=65535`; the frame is left empty and the
    /// rejection is reported in `errors`.
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatterConfig {
    pub interval_policy: IntervalPolicy,
}

impl FormatterConfig {
    pub fn from_json_str(json: &str) -> Result<Self, FormatterError> {
        serde_json::from_str(json).map_err(|e| FormatterError::Config(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FormatterError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        log::debug!("Loaded formatter config from {}: {config:?}", path.display());
        Ok(config)
    }
}
