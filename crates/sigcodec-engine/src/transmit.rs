//! Main entry point for transmissions.
//!
//! This module takes a spec, validates it, materializes its input, runs the
//! scheme's encode/decode (or modulate/demodulate) round trip and records
//! the result as a report.

use sigcodec_spec::hash::canonical_spec_hash;
use sigcodec_spec::validation::validate_spec_with_budget;
use sigcodec_spec::{
    parse_bit_string, InputSource, ReportWarning, RoundTripMetrics, Scheme, SignalTrace,
    TransmitBudget, TransmitReport, TransmitSpec, REPORT_VERSION,
};
use tracing::{debug, warn};

use crate::analog_analog::{AnalogModulator, Am, Fm, Pm};
use crate::analog_digital::{AnalogCodec, Dm, Pcm};
use crate::digital_analog::{Ask, Bfsk, Bpsk, DigitalModulator, Mfsk, Qpsk};
use crate::error::{EngineError, EngineResult};
use crate::line::{violation_positions, LineCodec, LineEncoder};
use crate::rng::random_bits;
use crate::signal::{AnalogSignal, CompositeSignal};

/// Data a transmission starts from.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Binary data.
    Bits(Vec<u8>),
    /// Sampled analog signal.
    Analog(AnalogSignal),
}

impl Payload {
    /// Returns "bits" or "analog".
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Bits(_) => "bits",
            Payload::Analog(_) => "analog",
        }
    }

    /// Number of bits or samples.
    pub fn len(&self) -> usize {
        match self {
            Payload::Bits(bits) => bits.len(),
            Payload::Analog(signal) => signal.len(),
        }
    }

    /// Returns true if the payload holds no data.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Output of one round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundTrip {
    /// Signals at every stage.
    pub trace: SignalTrace,
    /// Fidelity of the decoded output.
    pub metrics: RoundTripMetrics,
}

/// Runs a transmission against the default budget.
///
/// # Arguments
/// * `spec` - The transmit spec
///
/// # Returns
/// A report with the round-trip trace, metrics and validation warnings
pub fn transmit(spec: &TransmitSpec) -> EngineResult<TransmitReport> {
    transmit_with_budget(spec, &TransmitBudget::default())
}

/// Runs a transmission against an explicit budget.
///
/// An invalid spec fails with [`EngineError::InvalidSpec`] carrying every
/// validation error.
pub fn transmit_with_budget(
    spec: &TransmitSpec,
    budget: &TransmitBudget,
) -> EngineResult<TransmitReport> {
    let warnings = validate_spec_with_budget(spec, budget)
        .into_result()
        .map_err(|errors| EngineError::InvalidSpec { errors })?;

    let spec_hash = canonical_spec_hash(spec)
        .map_err(|e| EngineError::invalid_input(format!("cannot hash spec: {}", e)))?;

    debug!(
        transmit_id = %spec.transmit_id,
        scheme = spec.scheme.id(),
        input = spec.input.tag(),
        "starting transmission"
    );

    let payload = materialize_input(&spec.input)?;
    let round_trip = run_scheme(&spec.scheme, payload)?;

    Ok(TransmitReport {
        report_version: REPORT_VERSION,
        transmit_id: spec.transmit_id.clone(),
        spec_hash,
        scheme: spec.scheme.id().to_string(),
        family: spec.scheme.family(),
        warnings: warnings
            .iter()
            .map(ReportWarning::from_validation_warning)
            .collect(),
        trace: round_trip.trace,
        metrics: round_trip.metrics,
    })
}

/// Turns an input source into concrete bits or samples.
pub fn materialize_input(input: &InputSource) -> EngineResult<Payload> {
    match input {
        InputSource::Bits { bits } => Ok(Payload::Bits(bits.clone())),
        InputSource::BitString { text } => parse_bit_string(text)
            .map(Payload::Bits)
            .map_err(|c| EngineError::invalid_input(format!("invalid bit character '{}'", c))),
        InputSource::RandomBits { count, seed } => Ok(Payload::Bits(random_bits(*count, *seed))),
        InputSource::Composite {
            sinusoids,
            sample_rate,
            duration,
        } => {
            let signal = CompositeSignal::from_params(sinusoids)?.sample(*sample_rate, *duration)?;
            Ok(Payload::Analog(signal))
        }
        InputSource::Samples {
            values,
            sample_rate,
        } => Ok(Payload::Analog(AnalogSignal::uniform(
            values.clone(),
            *sample_rate,
        )?)),
    }
}

/// Instantiates the scheme and runs one round trip over the payload.
///
/// Fails with `InvalidInput` if the payload kind does not match the scheme
/// family, and with `InvalidParameter` if the scheme parameters are invalid.
pub fn run_scheme(scheme: &Scheme, payload: Payload) -> EngineResult<RoundTrip> {
    debug!(scheme = scheme.id(), payload = payload.kind(), len = payload.len(), "running scheme");
    let round_trip = match (scheme, payload) {
        (Scheme::LineCode { encoding }, Payload::Bits(bits)) => {
            run_line_code(LineCodec::new(*encoding), bits)?
        }
        (
            Scheme::Pcm {
                n_bits,
                v_min,
                v_max,
            },
            Payload::Analog(signal),
        ) => {
            let pcm = Pcm::new(*n_bits, *v_min, *v_max)?;
            let (times, input) = signal.into_parts();
            let codes = pcm.encode(&input)?;
            let reconstructed = pcm.decode(&codes)?;
            RoundTrip {
                metrics: RoundTripMetrics::from_samples(&input, &reconstructed),
                trace: SignalTrace::Pcm {
                    times,
                    input,
                    codes,
                    reconstructed,
                },
            }
        }
        (Scheme::Dm { delta }, Payload::Analog(signal)) => {
            let dm = Dm::new(*delta)?;
            let (times, input) = signal.into_parts();
            let bits = dm.encode(&input)?;
            let reconstructed = dm.decode(&bits)?;
            RoundTrip {
                metrics: RoundTripMetrics::from_samples(&input, &reconstructed),
                trace: SignalTrace::Dm {
                    times,
                    input,
                    bits,
                    reconstructed,
                },
            }
        }
        (
            Scheme::Ask {
                carrier_freq,
                amplitude_one,
                amplitude_zero,
            },
            Payload::Bits(bits),
        ) => run_keyed(&Ask::new(*carrier_freq, *amplitude_one, *amplitude_zero)?, bits)?,
        (
            Scheme::Bfsk {
                freq_zero,
                freq_one,
                amplitude,
            },
            Payload::Bits(bits),
        ) => run_keyed(&Bfsk::new(*freq_zero, *freq_one, *amplitude)?, bits)?,
        (
            Scheme::Bpsk {
                carrier_freq,
                amplitude,
            },
            Payload::Bits(bits),
        ) => run_keyed(&Bpsk::new(*carrier_freq, *amplitude)?, bits)?,
        (
            Scheme::Mfsk {
                frequencies,
                amplitude,
            },
            Payload::Bits(bits),
        ) => run_keyed(&Mfsk::new(*frequencies, *amplitude)?, bits)?,
        (
            Scheme::Qpsk {
                carrier_freq,
                amplitude,
            },
            Payload::Bits(bits),
        ) => run_keyed(&Qpsk::new(*carrier_freq, *amplitude)?, bits)?,
        (
            Scheme::Am {
                carrier_freq,
                carrier_amplitude,
                ka,
            },
            Payload::Analog(signal),
        ) => run_continuous(&Am::new(*carrier_freq, *carrier_amplitude, *ka)?, signal)?,
        (
            Scheme::Fm {
                carrier_freq,
                carrier_amplitude,
                kf,
            },
            Payload::Analog(signal),
        ) => run_continuous(&Fm::new(*carrier_freq, *carrier_amplitude, *kf)?, signal)?,
        (
            Scheme::Pm {
                carrier_freq,
                carrier_amplitude,
                kp,
            },
            Payload::Analog(signal),
        ) => run_continuous(&Pm::new(*carrier_freq, *carrier_amplitude, *kp)?, signal)?,
        (scheme, payload) => {
            return Err(EngineError::invalid_input(format!(
                "scheme '{}' ({}) cannot take {} input",
                scheme.id(),
                scheme.family(),
                payload.kind()
            )))
        }
    };

    if let Some(errors) = round_trip.metrics.bit_errors {
        if errors > 0 {
            warn!(scheme = scheme.id(), errors, "bit round trip was not exact");
        }
    }
    debug!(
        scheme = scheme.id(),
        exact = round_trip.metrics.exact,
        rms_error = ?round_trip.metrics.rms_error,
        "round trip finished"
    );
    Ok(round_trip)
}

fn run_line_code(codec: LineCodec, bits: Vec<u8>) -> EngineResult<RoundTrip> {
    let encoded = codec.encode(&bits)?;
    let decoded_bits = codec.decode(&encoded)?;
    let violations = match codec.violation_detector() {
        Some(_) => violation_positions(&encoded),
        None => Vec::new(),
    };
    Ok(RoundTrip {
        metrics: RoundTripMetrics::from_bits(&bits, &decoded_bits),
        trace: SignalTrace::LineCode {
            input_bits: bits,
            encoded,
            decoded_bits,
            violations,
        },
    })
}

/// Keyed round trip. Metrics ignore the trailing pad bit of 4-ary schemes.
fn run_keyed(modulator: &dyn DigitalModulator, bits: Vec<u8>) -> EngineResult<RoundTrip> {
    let symbols = modulator.modulate(&bits)?;
    let decoded_bits = modulator.demodulate(&symbols)?;
    let compared = &decoded_bits[..bits.len().min(decoded_bits.len())];
    Ok(RoundTrip {
        metrics: RoundTripMetrics::from_bits(&bits, compared),
        trace: SignalTrace::Keyed {
            input_bits: bits,
            symbols: symbols.iter().map(|s| *s.params()).collect(),
            decoded_bits,
        },
    })
}

fn run_continuous(
    modulator: &dyn AnalogModulator,
    signal: AnalogSignal,
) -> EngineResult<RoundTrip> {
    let (times, message) = signal.into_parts();
    let modulated = modulator.modulate(&message, &times)?;
    let recovered = modulator.demodulate(&modulated, &times)?;
    Ok(RoundTrip {
        metrics: RoundTripMetrics::from_samples(&message, &recovered),
        trace: SignalTrace::Continuous {
            times,
            message,
            modulated,
            recovered,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sigcodec_spec::{LineEncoding, SchemeFamily, SignalLevel, SinusoidParams};

    fn spec(scheme: Scheme, input: InputSource) -> TransmitSpec {
        TransmitSpec::builder("transmit-test", scheme, input)
            .description("test transmission")
            .build()
    }

    #[test]
    fn test_materialize_bit_string() {
        let payload = materialize_input(&InputSource::BitString {
            text: "10 01".to_string(),
        })
        .unwrap();
        assert_eq!(payload, Payload::Bits(vec![1, 0, 0, 1]));
        assert!(materialize_input(&InputSource::BitString {
            text: "10x".to_string()
        })
        .is_err());
    }

    #[test]
    fn test_materialize_random_bits_is_deterministic() {
        let input = InputSource::RandomBits { count: 32, seed: 5 };
        assert_eq!(
            materialize_input(&input).unwrap(),
            materialize_input(&input).unwrap()
        );
        assert_eq!(materialize_input(&input).unwrap().len(), 32);
    }

    #[test]
    fn test_materialize_composite() {
        let payload = materialize_input(&InputSource::Composite {
            sinusoids: vec![SinusoidParams::new(1.0, 1.0)],
            sample_rate: 8.0,
            duration: 1.0,
        })
        .unwrap();
        assert_eq!(payload.kind(), "analog");
        assert_eq!(payload.len(), 8);
    }

    #[test]
    fn test_transmit_nrz_l() {
        let report = transmit(&spec(
            Scheme::line_code(LineEncoding::NrzL),
            InputSource::Bits {
                bits: vec![1, 1, 0, 1, 0, 0, 1],
            },
        ))
        .unwrap();
        assert_eq!(report.scheme, "nrz_l");
        assert_eq!(report.family, SchemeFamily::LineCoding);
        assert!(report.metrics.exact);
        assert!(report.warnings.is_empty());
        match report.trace {
            SignalTrace::LineCode {
                encoded,
                violations,
                ..
            } => {
                use SignalLevel::{High as H, Low as L};
                assert_eq!(encoded, vec![L, L, H, L, H, H, L]);
                assert!(violations.is_empty());
            }
            other => panic!("unexpected trace {}", other.kind()),
        }
    }

    #[test]
    fn test_transmit_hdb3_reports_violations() {
        let report = transmit(&spec(
            Scheme::line_code(LineEncoding::Hdb3),
            InputSource::BitString {
                text: "1000 0110 000".to_string(),
            },
        ))
        .unwrap();
        assert!(report.metrics.exact);
        match report.trace {
            SignalTrace::LineCode { violations, .. } => assert_eq!(violations, vec![4, 10]),
            other => panic!("unexpected trace {}", other.kind()),
        }
    }

    #[test]
    fn test_transmit_qpsk_odd_bits_warns_and_pads() {
        let report = transmit(&spec(
            Scheme::Qpsk {
                carrier_freq: 1000.0,
                amplitude: 1.0,
            },
            InputSource::Bits {
                bits: vec![1, 0, 1],
            },
        ))
        .unwrap();
        assert!(report.metrics.exact);
        assert!(report.warnings.iter().any(|w| w.code == "W007"));
        match report.trace {
            SignalTrace::Keyed {
                symbols,
                decoded_bits,
                ..
            } => {
                assert_eq!(symbols.len(), 2);
                assert_eq!(decoded_bits, vec![1, 0, 1, 0]);
            }
            other => panic!("unexpected trace {}", other.kind()),
        }
    }

    #[test]
    fn test_transmit_pcm_samples() {
        let report = transmit(&spec(
            Scheme::Pcm {
                n_bits: 2,
                v_min: -1.0,
                v_max: 1.0,
            },
            InputSource::Samples {
                values: vec![0.6, -0.9],
                sample_rate: 2.0,
            },
        ))
        .unwrap();
        match &report.trace {
            SignalTrace::Pcm {
                times,
                codes,
                reconstructed,
                ..
            } => {
                assert_eq!(times, &vec![0.0, 0.5]);
                assert_eq!(codes, &vec![3, 0]);
                assert_eq!(reconstructed, &vec![0.75, -0.75]);
            }
            other => panic!("unexpected trace {}", other.kind()),
        }
        assert!(!report.metrics.exact);
    }

    #[test]
    fn test_transmit_rejects_invalid_spec() {
        let bad = spec(
            Scheme::Dm { delta: -1.0 },
            InputSource::Bits { bits: vec![1] },
        );
        match transmit(&bad) {
            Err(EngineError::InvalidSpec { errors }) => {
                assert!(errors.iter().any(|e| e.code.code() == "E003"));
                assert!(errors.iter().any(|e| e.code.code() == "E004"));
            }
            other => panic!("expected InvalidSpec, got {:?}", other),
        }
    }

    #[test]
    fn test_transmit_respects_budget() {
        let big = spec(
            Scheme::line_code(LineEncoding::Manchester),
            InputSource::RandomBits {
                count: 5_000,
                seed: 1,
            },
        );
        assert!(transmit(&big).is_ok());
        assert!(matches!(
            transmit_with_budget(&big, &TransmitBudget::strict()),
            Err(EngineError::InvalidSpec { .. })
        ));
    }

    #[test]
    fn test_run_scheme_rejects_wrong_payload() {
        let result = run_scheme(
            &Scheme::line_code(LineEncoding::NrzI),
            Payload::Analog(AnalogSignal::uniform(vec![0.0], 1.0).unwrap()),
        );
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_report_hash_matches_spec_hash() {
        let s = spec(
            Scheme::line_code(LineEncoding::B8zs),
            InputSource::Bits {
                bits: vec![1, 0, 0, 0, 0, 0, 0, 0, 0],
            },
        );
        let report = transmit(&s).unwrap();
        assert_eq!(report.spec_hash, canonical_spec_hash(&s).unwrap());
        assert_eq!(report.transmit_id, "transmit-test");
    }
}
