//! Bipolar encoders with alternating pulse polarity.

use sigcodec_spec::SignalLevel;

use super::{check_signal, pulse_to_bit, LineEncoder, ViolationDetector};
use crate::error::{check_bits, EngineResult};

/// Sends `mark` bits as alternating pulses and the other bit as `NoLine`.
///
/// The first pulse is `High`.
pub(crate) fn alternate_marks(bits: &[u8], mark: u8) -> Vec<SignalLevel> {
    let mut last = SignalLevel::Low;
    bits.iter()
        .map(|&b| {
            if b == mark {
                last = last.inverted();
                last
            } else {
                SignalLevel::NoLine
            }
        })
        .collect()
}

/// Bipolar AMI: 0 is `NoLine`, each 1 is a pulse opposite to the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BipolarAmi;

impl LineEncoder for BipolarAmi {
    fn encode(&self, bits: &[u8]) -> EngineResult<Vec<SignalLevel>> {
        check_bits(bits)?;
        Ok(alternate_marks(bits, 1))
    }

    fn decode(&self, signal: &[SignalLevel]) -> EngineResult<Vec<u8>> {
        check_signal(signal)?;
        Ok(signal.iter().map(|&s| pulse_to_bit(s, 0)).collect())
    }
}

impl ViolationDetector for BipolarAmi {}

/// Pseudoternary: 1 is `NoLine`, each 0 is a pulse opposite to the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pseudoternary;

impl LineEncoder for Pseudoternary {
    fn encode(&self, bits: &[u8]) -> EngineResult<Vec<SignalLevel>> {
        check_bits(bits)?;
        Ok(alternate_marks(bits, 0))
    }

    fn decode(&self, signal: &[SignalLevel]) -> EngineResult<Vec<u8>> {
        check_signal(signal)?;
        Ok(signal.iter().map(|&s| pulse_to_bit(s, 1)).collect())
    }
}

impl ViolationDetector for Pseudoternary {}
