//! Transmit report types.
//!
//! A report records one round trip: the spec it came from (by hash), the
//! intermediate signals a consumer renders, and how closely the decoded
//! output matches the input.

use serde::{Deserialize, Serialize};

use crate::error::ValidationWarning;
use crate::scheme::SchemeFamily;
use crate::signal::{SignalLevel, SinusoidParams};

/// Report schema version.
pub const REPORT_VERSION: u32 = 1;

/// The result of one transmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmitReport {
    /// Report schema version (always 1).
    pub report_version: u32,
    /// Identifier copied from the spec.
    pub transmit_id: String,
    /// Hex-encoded BLAKE3 hash of the canonicalized spec.
    pub spec_hash: String,
    /// Registry identifier of the scheme.
    pub scheme: String,
    /// Family of the scheme.
    pub family: SchemeFamily,
    /// Validation warnings raised for the spec.
    pub warnings: Vec<ReportWarning>,
    /// Signals at every stage of the round trip.
    pub trace: SignalTrace,
    /// Round-trip fidelity.
    pub metrics: RoundTripMetrics,
}

impl TransmitReport {
    /// Serializes the report to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the report to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a report from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Generates the standard report filename for a transmit ID.
    ///
    /// # Example
    ///
    /// ```
    /// use sigcodec_spec::report::TransmitReport;
    ///
    /// assert_eq!(TransmitReport::filename("hdb3-demo"), "hdb3-demo.report.json");
    /// ```
    pub fn filename(transmit_id: &str) -> String {
        format!("{}.report.json", transmit_id)
    }
}

/// Warning entry in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWarning {
    /// Warning code (e.g., "W001").
    pub code: String,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ReportWarning {
    /// Creates a new report warning.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Converts a ValidationWarning to a ReportWarning.
    pub fn from_validation_warning(warn: &ValidationWarning) -> Self {
        Self {
            code: warn.code.code().to_string(),
            message: warn.message.clone(),
            path: warn.path.clone(),
        }
    }
}

/// Intermediate signals of one round trip, shaped per family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignalTrace {
    /// Line coding: bits to levels and back.
    LineCode {
        input_bits: Vec<u8>,
        encoded: Vec<SignalLevel>,
        decoded_bits: Vec<u8>,
        /// Indices of pulses repeating the previous pulse polarity.
        violations: Vec<usize>,
    },
    /// PCM: samples to level indices and back.
    Pcm {
        times: Vec<f64>,
        input: Vec<f64>,
        codes: Vec<u32>,
        reconstructed: Vec<f64>,
    },
    /// Delta modulation: samples to bits and back.
    Dm {
        times: Vec<f64>,
        input: Vec<f64>,
        bits: Vec<u8>,
        reconstructed: Vec<f64>,
    },
    /// Keyed modulation: bits to one carrier sinusoid per symbol and back.
    Keyed {
        input_bits: Vec<u8>,
        symbols: Vec<SinusoidParams>,
        decoded_bits: Vec<u8>,
    },
    /// Continuous modulation: message to carrier waveform and back.
    Continuous {
        times: Vec<f64>,
        message: Vec<f64>,
        modulated: Vec<f64>,
        recovered: Vec<f64>,
    },
}

impl SignalTrace {
    /// Returns the trace tag used in JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            SignalTrace::LineCode { .. } => "line_code",
            SignalTrace::Pcm { .. } => "pcm",
            SignalTrace::Dm { .. } => "dm",
            SignalTrace::Keyed { .. } => "keyed",
            SignalTrace::Continuous { .. } => "continuous",
        }
    }
}

/// How closely a round trip reproduced its input.
///
/// Bit-producing round trips fill `bit_errors`; sample-producing ones fill
/// `rms_error` and `max_abs_error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundTripMetrics {
    /// Decoded output equals the input exactly.
    pub exact: bool,
    /// Number of positions where decoded bits differ from the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_errors: Option<usize>,
    /// Root-mean-square reconstruction error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rms_error: Option<f64>,
    /// Largest absolute reconstruction error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_abs_error: Option<f64>,
}

impl RoundTripMetrics {
    /// Compares decoded bits against the input.
    ///
    /// A length difference counts every missing or extra bit as an error.
    pub fn from_bits(input: &[u8], decoded: &[u8]) -> Self {
        let mismatched = input
            .iter()
            .zip(decoded.iter())
            .filter(|(a, b)| a != b)
            .count();
        let bit_errors = mismatched + input.len().abs_diff(decoded.len());
        Self {
            exact: bit_errors == 0,
            bit_errors: Some(bit_errors),
            rms_error: None,
            max_abs_error: None,
        }
    }

    /// Compares reconstructed samples against the input over their common length.
    ///
    /// A NaN error carries through to both error figures and is never exact.
    pub fn from_samples(input: &[f64], reconstructed: &[f64]) -> Self {
        let n = input.len().min(reconstructed.len());
        let mut sum_sq = 0.0;
        let mut max_abs = 0.0_f64;
        for (a, b) in input.iter().zip(reconstructed.iter()) {
            let err = (a - b).abs();
            sum_sq += err * err;
            if err.is_nan() || err > max_abs {
                max_abs = err;
            }
        }
        let rms = if n == 0 { 0.0 } else { (sum_sq / n as f64).sqrt() };
        Self {
            exact: input.len() == reconstructed.len() && max_abs == 0.0,
            bit_errors: None,
            rms_error: Some(rms),
            max_abs_error: Some(max_abs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WarningCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bit_metrics() {
        let metrics = RoundTripMetrics::from_bits(&[1, 0, 1, 1], &[1, 0, 1, 1]);
        assert!(metrics.exact);
        assert_eq!(metrics.bit_errors, Some(0));

        let metrics = RoundTripMetrics::from_bits(&[1, 0, 1, 1], &[1, 1, 1]);
        assert!(!metrics.exact);
        assert_eq!(metrics.bit_errors, Some(2));
        assert_eq!(metrics.rms_error, None);
    }

    #[test]
    fn test_sample_metrics() {
        let metrics = RoundTripMetrics::from_samples(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 2.0, 1.0]);
        assert!(!metrics.exact);
        assert_eq!(metrics.max_abs_error, Some(2.0));
        assert_eq!(metrics.rms_error, Some(1.0));

        let metrics = RoundTripMetrics::from_samples(&[0.5], &[0.5]);
        assert!(metrics.exact);
    }

    #[test]
    fn test_sample_metrics_keep_nan() {
        let metrics = RoundTripMetrics::from_samples(&[0.0, 1.0, 2.0], &[0.0, f64::NAN, 2.0]);
        assert!(!metrics.exact);
        assert!(metrics.max_abs_error.unwrap().is_nan());
        assert!(metrics.rms_error.unwrap().is_nan());

        let metrics = RoundTripMetrics::from_samples(&[f64::NAN, 1.0], &[0.0, 3.0]);
        assert!(!metrics.exact);
        assert!(metrics.max_abs_error.unwrap().is_nan());
    }

    #[test]
    fn test_trace_serde() {
        let trace = SignalTrace::LineCode {
            input_bits: vec![1, 1],
            encoded: vec![SignalLevel::High, SignalLevel::Low],
            decoded_bits: vec![1, 1],
            violations: vec![],
        };
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["kind"], "line_code");
        assert_eq!(json["encoded"][1], "low");
        assert_eq!(trace.kind(), "line_code");
    }

    #[test]
    fn test_report_roundtrip() {
        let report = TransmitReport {
            report_version: REPORT_VERSION,
            transmit_id: "dm-demo".to_string(),
            spec_hash: "ab".repeat(32),
            scheme: "dm".to_string(),
            family: SchemeFamily::AnalogToDigital,
            warnings: vec![ReportWarning::new("W004", "slope overload")],
            trace: SignalTrace::Dm {
                times: vec![0.0, 0.5],
                input: vec![0.125, 0.5],
                bits: vec![1, 1],
                reconstructed: vec![0.25, 0.5],
            },
            metrics: RoundTripMetrics::from_samples(&[0.25, 0.5], &[0.25, 0.5]),
        };

        let json = report.to_json().unwrap();
        assert!(!json.contains("bit_errors"));
        let parsed = TransmitReport::from_json(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_report_warning_from_validation() {
        let warn = ValidationWarning::new(WarningCode::OddBitPadding, "padded");
        let entry = ReportWarning::from_validation_warning(&warn);
        assert_eq!(entry.code, "W007");
        assert!(entry.path.is_none());
    }
}
