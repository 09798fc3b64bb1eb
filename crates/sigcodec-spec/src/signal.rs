//! Signal data types shared between specs, the engine, and reports.

use serde::{Deserialize, Serialize};

/// A discrete line level produced by a line encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalLevel {
    /// Positive pulse (+1).
    High,
    /// Negative pulse (-1).
    Low,
    /// No line signal (0).
    NoLine,
}

impl SignalLevel {
    /// Returns the numeric level (+1, -1, or 0).
    pub fn value(&self) -> i8 {
        match self {
            SignalLevel::High => 1,
            SignalLevel::Low => -1,
            SignalLevel::NoLine => 0,
        }
    }

    /// Parses a numeric level.
    pub fn from_value(value: i8) -> Option<Self> {
        match value {
            1 => Some(SignalLevel::High),
            -1 => Some(SignalLevel::Low),
            0 => Some(SignalLevel::NoLine),
            _ => None,
        }
    }

    /// Returns the level of opposite polarity. `NoLine` has no polarity.
    pub fn inverted(&self) -> Self {
        match self {
            SignalLevel::High => SignalLevel::Low,
            SignalLevel::Low => SignalLevel::High,
            SignalLevel::NoLine => SignalLevel::NoLine,
        }
    }

    /// Returns true for `High` and `Low`.
    pub fn is_pulse(&self) -> bool {
        !matches!(self, SignalLevel::NoLine)
    }
}

impl std::fmt::Display for SignalLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            SignalLevel::High => "+",
            SignalLevel::Low => "-",
            SignalLevel::NoLine => "0",
        };
        write!(f, "{}", symbol)
    }
}

/// Parameters of one sinusoid: `amplitude * sin(2*pi*frequency*t + phase) + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SinusoidParams {
    /// Peak amplitude.
    pub amplitude: f64,
    /// Frequency in Hz (must be >= 0).
    pub frequency: f64,
    /// Phase offset in radians.
    #[serde(default)]
    pub phase: f64,
    /// Vertical (DC) offset.
    #[serde(default)]
    pub offset: f64,
}

impl SinusoidParams {
    /// Creates sinusoid parameters with zero phase and offset.
    pub fn new(amplitude: f64, frequency: f64) -> Self {
        Self {
            amplitude,
            frequency,
            phase: 0.0,
            offset: 0.0,
        }
    }

    /// Sets the phase in radians.
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Sets the vertical offset.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Largest value the sinusoid reaches.
    pub fn max_value(&self) -> f64 {
        self.amplitude.abs() + self.offset
    }

    /// Smallest value the sinusoid reaches.
    pub fn min_value(&self) -> f64 {
        -self.amplitude.abs() + self.offset
    }

    /// Largest absolute slope, `2*pi*f*|A|`.
    pub fn max_slope(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.frequency * self.amplitude.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_level_serde() {
        let json = serde_json::to_string(&SignalLevel::NoLine).unwrap();
        assert_eq!(json, "\"no_line\"");

        let parsed: SignalLevel = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(parsed, SignalLevel::High);
    }

    #[test]
    fn test_signal_level_values() {
        assert_eq!(SignalLevel::High.value(), 1);
        assert_eq!(SignalLevel::Low.value(), -1);
        assert_eq!(SignalLevel::NoLine.value(), 0);
        assert_eq!(SignalLevel::from_value(-1), Some(SignalLevel::Low));
        assert_eq!(SignalLevel::from_value(2), None);
    }

    #[test]
    fn test_signal_level_inverted() {
        assert_eq!(SignalLevel::High.inverted(), SignalLevel::Low);
        assert_eq!(SignalLevel::Low.inverted(), SignalLevel::High);
        assert_eq!(SignalLevel::NoLine.inverted(), SignalLevel::NoLine);
        assert!(!SignalLevel::NoLine.is_pulse());
    }

    #[test]
    fn test_sinusoid_params_defaults() {
        let params: SinusoidParams =
            serde_json::from_str(r#"{"amplitude": 2.0, "frequency": 5.0}"#).unwrap();
        assert_eq!(params, SinusoidParams::new(2.0, 5.0));
        assert_eq!(params.max_value(), 2.0);
        assert_eq!(params.min_value(), -2.0);
    }

    #[test]
    fn test_sinusoid_params_offset_bounds() {
        let params = SinusoidParams::new(1.0, 10.0).with_offset(0.5);
        assert_eq!(params.max_value(), 1.5);
        assert_eq!(params.min_value(), -0.5);
        assert!((params.max_slope() - 2.0 * std::f64::consts::PI * 10.0).abs() < 1e-12);
    }
}
