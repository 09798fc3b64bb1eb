//! Spec validation logic.

pub mod budgets;
pub mod common;
mod scheme_params;


use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::input::{parse_bit_string, InputSource};
use crate::scheme::{Scheme, SchemeFamily};
use crate::spec::{TransmitSpec, SPEC_VERSION};

pub use budgets::{BudgetCategory, BudgetError, TransmitBudget};
pub use common::{
    validate_finite, validate_non_negative, validate_positive, validate_range,
    CommonValidationError,
};
pub use scheme_params::{PCM_MAX_BITS, PCM_MIN_BITS};

/// Regex pattern for valid transmit_id.
/// Format: starts with lowercase letter, followed by 2-63 lowercase letters, digits, underscores, or hyphens.
const TRANSMIT_ID_PATTERN: &str = r"^[a-z][a-z0-9_-]{2,63}$";

/// Carrier-to-message frequency ratio below which demodulation degrades.
const MIN_CARRIER_RATIO: f64 = 10.0;

static TRANSMIT_ID_REGEX: OnceLock<Regex> = OnceLock::new();

fn transmit_id_regex() -> &'static Regex {
    TRANSMIT_ID_REGEX
        .get_or_init(|| Regex::new(TRANSMIT_ID_PATTERN).expect("invalid regex pattern"))
}

/// Validates a spec against the default budget.
///
/// # Example
/// ```
/// use sigcodec_spec::{InputSource, LineEncoding, Scheme, TransmitSpec};
/// use sigcodec_spec::validation::validate_spec;
///
/// let spec = TransmitSpec::builder(
///     "hdb3-demo",
///     Scheme::line_code(LineEncoding::Hdb3),
///     InputSource::BitString { text: "1000 0100 0010".to_string() },
/// )
/// .description("HDB3 substitution")
/// .build();
///
/// let result = validate_spec(&spec);
/// assert!(result.is_ok());
/// ```
pub fn validate_spec(spec: &TransmitSpec) -> ValidationResult {
    validate_spec_with_budget(spec, &TransmitBudget::default())
}

/// Validates a spec against an explicit budget.
///
/// Every problem is collected; validation does not stop at the first error.
pub fn validate_spec_with_budget(spec: &TransmitSpec, budget: &TransmitBudget) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_spec_version(spec, &mut result);
    validate_transmit_id(spec, &mut result);
    scheme_params::validate_scheme_params(&spec.scheme, &mut result);
    validate_compatibility(spec, &mut result);
    validate_input(&spec.input, &mut result);
    validate_budget(&spec.input, budget, &mut result);

    check_warnings(spec, &mut result);

    result
}

/// Returns true if `id` is a valid transmit identifier.
pub fn is_valid_transmit_id(id: &str) -> bool {
    transmit_id_regex().is_match(id)
}

fn validate_spec_version(spec: &TransmitSpec, result: &mut ValidationResult) {
    if spec.spec_version != SPEC_VERSION {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsupportedSpecVersion,
            format!(
                "spec_version must be {}, got {}",
                SPEC_VERSION, spec.spec_version
            ),
            "spec_version",
        ));
    }
}

fn validate_transmit_id(spec: &TransmitSpec, result: &mut ValidationResult) {
    if !is_valid_transmit_id(&spec.transmit_id) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidTransmitId,
            format!(
                "transmit_id must match pattern '{}', got '{}'",
                TRANSMIT_ID_PATTERN, spec.transmit_id
            ),
            "transmit_id",
        ));
    }
}

fn validate_compatibility(spec: &TransmitSpec, result: &mut ValidationResult) {
    let family = spec.scheme.family();
    let kind = spec.input.kind();
    let expected = if family.takes_bits() { "bits" } else { "analog" };
    if kind.as_str() != expected {
        result.add_error(ValidationError::with_path(
            ErrorCode::SchemeInputMismatch,
            format!(
                "scheme '{}' ({}) takes {} input, got '{}'",
                spec.scheme.id(),
                family,
                expected,
                spec.input.tag()
            ),
            "input.kind",
        ));
    }
}

fn invalid_input(result: &mut ValidationResult, message: impl Into<String>, path: impl Into<String>) {
    result.add_error(ValidationError::with_path(
        ErrorCode::InvalidInput,
        message,
        path,
    ));
}

fn invalid_sampling(result: &mut ValidationResult, err: CommonValidationError, path: &str) {
    result.add_error(ValidationError::with_path(
        ErrorCode::InvalidSampling,
        err.message,
        path,
    ));
}

fn validate_input(input: &InputSource, result: &mut ValidationResult) {
    match input {
        InputSource::Bits { bits } => {
            if bits.is_empty() {
                invalid_input(result, "bits must not be empty", "input.bits");
            }
            if let Some((i, bit)) = bits.iter().enumerate().find(|(_, b)| **b > 1) {
                invalid_input(
                    result,
                    format!("bits must be 0 or 1, got {}", bit),
                    format!("input.bits[{}]", i),
                );
            }
        }
        InputSource::BitString { text } => match parse_bit_string(text) {
            Ok(bits) if bits.is_empty() => {
                invalid_input(result, "bit string must not be empty", "input.text");
            }
            Ok(_) => {}
            Err(c) => invalid_input(
                result,
                format!("bit string may only contain '0', '1' and whitespace, got '{}'", c),
                "input.text",
            ),
        },
        InputSource::RandomBits { count, .. } => {
            if *count == 0 {
                invalid_input(result, "count must be at least 1", "input.count");
            }
        }
        InputSource::Composite {
            sinusoids,
            sample_rate,
            duration,
        } => {
            if sinusoids.is_empty() {
                invalid_input(result, "sinusoids must not be empty", "input.sinusoids");
            }
            for (i, s) in sinusoids.iter().enumerate() {
                let checks = [
                    validate_finite("amplitude", s.amplitude),
                    validate_non_negative("frequency", s.frequency),
                    validate_finite("phase", s.phase),
                    validate_finite("offset", s.offset),
                ];
                for err in checks.into_iter().filter_map(Result::err) {
                    invalid_input(result, err.message, format!("input.sinusoids[{}]", i));
                }
            }
            if let Err(err) = validate_positive("sample_rate", *sample_rate) {
                invalid_sampling(result, err, "input.sample_rate");
            }
            if let Err(err) = validate_positive("duration", *duration) {
                invalid_sampling(result, err, "input.duration");
            }
        }
        InputSource::Samples {
            values,
            sample_rate,
        } => {
            if values.is_empty() {
                invalid_input(result, "values must not be empty", "input.values");
            }
            if let Some((i, v)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                invalid_input(
                    result,
                    format!("sample values must be finite, got {}", v),
                    format!("input.values[{}]", i),
                );
            }
            if let Err(err) = validate_positive("sample_rate", *sample_rate) {
                invalid_sampling(result, err, "input.sample_rate");
            }
        }
    }
}

fn validate_budget(input: &InputSource, budget: &TransmitBudget, result: &mut ValidationResult) {
    let outcome = match (input.bit_count(), input.sample_count()) {
        (Some(bits), _) => budget.check_bits(bits),
        (None, Some(samples)) => budget.check_samples(samples),
        (None, None) => Ok(()),
    };
    if let Err(err) = outcome {
        result.add_error(ValidationError::with_path(
            ErrorCode::BudgetExceeded,
            format!("{} (budget '{}')", err, budget.name),
            "input",
        ));
    }
}

/// Value bounds, slope bound and highest frequency of an analog input.
struct AnalogProfile {
    min: f64,
    max: f64,
    max_step: Option<f64>,
    max_frequency: Option<f64>,
}

fn analog_profile(input: &InputSource) -> Option<AnalogProfile> {
    match input {
        InputSource::Composite {
            sinusoids,
            sample_rate,
            ..
        } if !sinusoids.is_empty() => {
            let min = sinusoids.iter().map(|s| s.min_value()).sum();
            let max = sinusoids.iter().map(|s| s.max_value()).sum();
            let slope: f64 = sinusoids.iter().map(|s| s.max_slope()).sum();
            let max_frequency = sinusoids
                .iter()
                .map(|s| s.frequency)
                .fold(0.0_f64, f64::max);
            let max_step = (*sample_rate > 0.0).then(|| slope / sample_rate);
            Some(AnalogProfile {
                min,
                max,
                max_step,
                max_frequency: Some(max_frequency),
            })
        }
        InputSource::Samples { values, .. } if !values.is_empty() => {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let max_step = values
                .windows(2)
                .map(|w| (w[1] - w[0]).abs())
                .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |a| a.max(d))));
            Some(AnalogProfile {
                min,
                max,
                max_step,
                max_frequency: None,
            })
        }
        _ => None,
    }
}

fn check_warnings(spec: &TransmitSpec, result: &mut ValidationResult) {
    if spec.description.is_none() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::MissingDescription,
            "spec has no description",
            "description",
        ));
    }

    if matches!(spec.scheme, Scheme::Mfsk { .. } | Scheme::Qpsk { .. }) {
        if let Some(count) = spec.input.bit_count() {
            if count % 2 == 1 {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::OddBitPadding,
                    format!(
                        "{} carries 2 bits per symbol; {} bits will be padded with a trailing 0",
                        spec.scheme.id(),
                        count
                    ),
                    "input",
                ));
            }
        }
    }

    let Some(profile) = analog_profile(&spec.input) else {
        return;
    };
    let sample_rate = spec.input.sample_rate().unwrap_or(0.0);

    if let Some(max_frequency) = profile.max_frequency {
        let nyquist = 2.0 * max_frequency;
        if sample_rate > 0.0 && sample_rate < nyquist {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::BelowNyquist,
                format!(
                    "sample_rate {} Hz is below the Nyquist rate {} Hz of the input",
                    sample_rate, nyquist
                ),
                "input.sample_rate",
            ));
        }
    }

    match spec.scheme {
        Scheme::Pcm { v_min, v_max, .. } => {
            if profile.min < v_min || profile.max > v_max {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::QuantizerClipping,
                    format!(
                        "input range [{}, {}] exceeds quantizer range [{}, {}]; samples will be clamped",
                        profile.min, profile.max, v_min, v_max
                    ),
                    "scheme",
                ));
            }
        }
        Scheme::Dm { delta } => {
            if let Some(step) = profile.max_step {
                if step > delta {
                    result.add_warning(ValidationWarning::with_path(
                        WarningCode::SlopeOverload,
                        format!(
                            "input moves up to {} per sample but delta is {}; the staircase will lag",
                            step, delta
                        ),
                        "scheme.delta",
                    ));
                }
            }
        }
        Scheme::Am { ka, .. } => {
            let peak = profile.min.abs().max(profile.max.abs());
            if ka * peak > 1.0 {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::Overmodulation,
                    format!(
                        "modulation index ka*max|m| = {} exceeds 1; the envelope will fold",
                        ka * peak
                    ),
                    "scheme.ka",
                ));
            }
        }
        _ => {}
    }

    if spec.scheme.family() == SchemeFamily::AnalogToAnalog {
        let carrier_freq = match spec.scheme {
            Scheme::Am { carrier_freq, .. }
            | Scheme::Fm { carrier_freq, .. }
            | Scheme::Pm { carrier_freq, .. } => carrier_freq,
            _ => return,
        };
        if let Some(max_frequency) = profile.max_frequency {
            if carrier_freq < MIN_CARRIER_RATIO * max_frequency {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::LowCarrierRatio,
                    format!(
                        "carrier_freq {} Hz is below {}x the highest message frequency {} Hz",
                        carrier_freq, MIN_CARRIER_RATIO, max_frequency
                    ),
                    "scheme.carrier_freq",
                ));
            }
        }
        if sample_rate > 0.0 && sample_rate < 2.0 * carrier_freq {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::BelowNyquist,
                format!(
                    "sample_rate {} Hz is below twice the carrier frequency {} Hz",
                    sample_rate, carrier_freq
                ),
                "input.sample_rate",
            ));
        }
    }
}
