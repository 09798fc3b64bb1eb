//! Scheme construction parameter validation (E004).

use crate::error::{ErrorCode, ValidationError, ValidationResult};
use crate::scheme::Scheme;

use super::common::{validate_finite, validate_positive, validate_range, CommonValidationError};

/// Minimum PCM bit depth.
pub const PCM_MIN_BITS: u32 = 1;

/// Maximum PCM bit depth.
pub const PCM_MAX_BITS: u32 = 16;

fn push(result: &mut ValidationResult, field: &str, err: CommonValidationError) {
    result.add_error(ValidationError::with_path(
        ErrorCode::InvalidParameter,
        err.message,
        format!("scheme.{}", field),
    ));
}

fn check(
    result: &mut ValidationResult,
    field: &str,
    outcome: Result<(), CommonValidationError>,
) {
    if let Err(err) = outcome {
        push(result, field, err);
    }
}

/// Validates the construction parameters of a scheme.
pub(super) fn validate_scheme_params(scheme: &Scheme, result: &mut ValidationResult) {
    match scheme {
        Scheme::LineCode { .. } => {}
        Scheme::Pcm {
            n_bits,
            v_min,
            v_max,
        } => {
            check(
                result,
                "n_bits",
                validate_range(
                    "n_bits",
                    f64::from(*n_bits),
                    f64::from(PCM_MIN_BITS),
                    f64::from(PCM_MAX_BITS),
                ),
            );
            check(result, "v_min", validate_finite("v_min", *v_min));
            check(result, "v_max", validate_finite("v_max", *v_max));
            if v_min.is_finite() && v_max.is_finite() {
                if v_min >= v_max {
                    push(
                        result,
                        "v_max",
                        CommonValidationError::new(format!(
                            "v_min must be less than v_max, got v_min={} v_max={}",
                            v_min, v_max
                        )),
                    );
                } else if !(v_max - v_min).is_finite() {
                    push(
                        result,
                        "v_max",
                        CommonValidationError::new(format!(
                            "v_max - v_min overflows, got v_min={} v_max={}",
                            v_min, v_max
                        )),
                    );
                }
            }
        }
        Scheme::Dm { delta } => check(result, "delta", validate_positive("delta", *delta)),
        Scheme::Ask {
            carrier_freq,
            amplitude_one,
            amplitude_zero,
        } => {
            check(
                result,
                "carrier_freq",
                validate_positive("carrier_freq", *carrier_freq),
            );
            check(
                result,
                "amplitude_one",
                validate_finite("amplitude_one", *amplitude_one),
            );
            check(
                result,
                "amplitude_zero",
                validate_finite("amplitude_zero", *amplitude_zero),
            );
            if amplitude_one.is_finite() && amplitude_one == amplitude_zero {
                push(
                    result,
                    "amplitude_zero",
                    CommonValidationError::new(
                        "amplitude_one and amplitude_zero must differ to be distinguishable",
                    ),
                );
            }
        }
        Scheme::Bfsk {
            freq_zero,
            freq_one,
            amplitude,
        } => {
            check(result, "freq_zero", validate_positive("freq_zero", *freq_zero));
            check(result, "freq_one", validate_positive("freq_one", *freq_one));
            check(result, "amplitude", validate_positive("amplitude", *amplitude));
            if freq_zero.is_finite() && freq_zero == freq_one {
                push(
                    result,
                    "freq_one",
                    CommonValidationError::new(
                        "freq_zero and freq_one must differ to be distinguishable",
                    ),
                );
            }
        }
        Scheme::Bpsk {
            carrier_freq,
            amplitude,
        }
        | Scheme::Qpsk {
            carrier_freq,
            amplitude,
        } => {
            check(
                result,
                "carrier_freq",
                validate_positive("carrier_freq", *carrier_freq),
            );
            check(result, "amplitude", validate_positive("amplitude", *amplitude));
        }
        Scheme::Mfsk {
            frequencies,
            amplitude,
        } => {
            for (i, freq) in frequencies.iter().enumerate() {
                let name = format!("frequencies[{}]", i);
                check(result, &name, validate_positive(&name, *freq));
            }
            for i in 0..frequencies.len() {
                for j in (i + 1)..frequencies.len() {
                    if frequencies[i] == frequencies[j] {
                        push(
                            result,
                            "frequencies",
                            CommonValidationError::new(format!(
                                "frequencies must be distinct, {} repeats at [{}] and [{}]",
                                frequencies[i], i, j
                            )),
                        );
                    }
                }
            }
            check(result, "amplitude", validate_positive("amplitude", *amplitude));
        }
        Scheme::Am {
            carrier_freq,
            carrier_amplitude,
            ka,
        } => {
            validate_carrier(result, *carrier_freq, *carrier_amplitude);
            check(result, "ka", validate_positive("ka", *ka));
        }
        Scheme::Fm {
            carrier_freq,
            carrier_amplitude,
            kf,
        } => {
            validate_carrier(result, *carrier_freq, *carrier_amplitude);
            check(result, "kf", validate_positive("kf", *kf));
        }
        Scheme::Pm {
            carrier_freq,
            carrier_amplitude,
            kp,
        } => {
            validate_carrier(result, *carrier_freq, *carrier_amplitude);
            check(result, "kp", validate_positive("kp", *kp));
        }
    }
}

fn validate_carrier(result: &mut ValidationResult, carrier_freq: f64, carrier_amplitude: f64) {
    check(
        result,
        "carrier_freq",
        validate_positive("carrier_freq", carrier_freq),
    );
    check(
        result,
        "carrier_amplitude",
        validate_positive("carrier_amplitude", carrier_amplitude),
    );
}
