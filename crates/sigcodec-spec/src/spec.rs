//! Main spec types.

use serde::{Deserialize, Serialize};

use crate::input::InputSource;
use crate::scheme::Scheme;

/// Current spec version.
pub const SPEC_VERSION: u32 = 1;

/// A transmit spec: one round trip through one scheme.
///
/// The spec names the scheme with its construction parameters and the input
/// the round trip starts from. It is immutable once parsed; the engine builds
/// fresh codec instances from it for every transmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransmitSpec {
    /// Schema version; must be 1 for v1 specs.
    pub spec_version: u32,

    /// Stable identifier for the transmission.
    /// Format: `[a-z][a-z0-9_-]{2,63}`
    pub transmit_id: String,

    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Scheme and its parameters.
    pub scheme: Scheme,

    /// Input data.
    pub input: InputSource,
}

impl TransmitSpec {
    /// Creates a new spec builder.
    pub fn builder(
        transmit_id: impl Into<String>,
        scheme: Scheme,
        input: InputSource,
    ) -> TransmitSpecBuilder {
        TransmitSpecBuilder::new(transmit_id, scheme, input)
    }

    /// Parses a spec from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses a spec from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Serializes the spec to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the spec to pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the spec to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Builder for constructing TransmitSpec instances.
#[derive(Debug, Clone)]
pub struct TransmitSpecBuilder {
    transmit_id: String,
    description: Option<String>,
    scheme: Scheme,
    input: InputSource,
}

impl TransmitSpecBuilder {
    /// Creates a new spec builder.
    pub fn new(transmit_id: impl Into<String>, scheme: Scheme, input: InputSource) -> Self {
        Self {
            transmit_id: transmit_id.into(),
            description: None,
            scheme,
            input,
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builds the spec.
    pub fn build(self) -> TransmitSpec {
        TransmitSpec {
            spec_version: SPEC_VERSION,
            transmit_id: self.transmit_id,
            description: self.description,
            scheme: self.scheme,
            input: self.input,
        }
    }
}
