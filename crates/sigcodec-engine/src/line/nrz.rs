//! Non-return-to-zero encoders.

use sigcodec_spec::SignalLevel;

use super::{check_signal, LineEncoder};
use crate::error::{check_bits, EngineError, EngineResult};

/// NRZ-Level: 0 is sent as `High`, 1 as `Low`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NrzL;

impl LineEncoder for NrzL {
    fn encode(&self, bits: &[u8]) -> EngineResult<Vec<SignalLevel>> {
        check_bits(bits)?;
        Ok(bits
            .iter()
            .map(|&b| {
                if b == 0 {
                    SignalLevel::High
                } else {
                    SignalLevel::Low
                }
            })
            .collect())
    }

    fn decode(&self, signal: &[SignalLevel]) -> EngineResult<Vec<u8>> {
        check_signal(signal)?;
        signal
            .iter()
            .enumerate()
            .map(|(i, level)| match level {
                SignalLevel::High => Ok(0),
                SignalLevel::Low => Ok(1),
                SignalLevel::NoLine => Err(no_line_at(i)),
            })
            .collect()
    }
}

/// NRZ-Invert: a 1 toggles the level, a 0 keeps it. The line starts `Low`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NrzI;

impl LineEncoder for NrzI {
    fn encode(&self, bits: &[u8]) -> EngineResult<Vec<SignalLevel>> {
        check_bits(bits)?;
        let mut level = SignalLevel::Low;
        Ok(bits
            .iter()
            .map(|&b| {
                if b == 1 {
                    level = level.inverted();
                }
                level
            })
            .collect())
    }

    fn decode(&self, signal: &[SignalLevel]) -> EngineResult<Vec<u8>> {
        check_signal(signal)?;
        let mut previous = SignalLevel::Low;
        let mut bits = Vec::with_capacity(signal.len());
        for (i, &level) in signal.iter().enumerate() {
            if !level.is_pulse() {
                return Err(no_line_at(i));
            }
            bits.push(u8::from(level != previous));
            previous = level;
        }
        Ok(bits)
    }
}

fn no_line_at(index: usize) -> EngineError {
    EngineError::invalid_input(format!(
        "NRZ signal has no_line at index {}; only high and low are valid",
        index
    ))
}
