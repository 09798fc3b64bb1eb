//! Biphase encoders: two half-bit levels per bit.

use sigcodec_spec::SignalLevel;

use super::{check_signal, LineEncoder};
use crate::error::{check_bits, EngineError, EngineResult};

/// Manchester (IEEE 802.3 convention): 1 is `Low` then `High`, 0 is `High` then `Low`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manchester;

impl LineEncoder for Manchester {
    fn encode(&self, bits: &[u8]) -> EngineResult<Vec<SignalLevel>> {
        check_bits(bits)?;
        Ok(bits
            .iter()
            .flat_map(|&b| {
                if b == 1 {
                    [SignalLevel::Low, SignalLevel::High]
                } else {
                    [SignalLevel::High, SignalLevel::Low]
                }
            })
            .collect())
    }

    fn decode(&self, signal: &[SignalLevel]) -> EngineResult<Vec<u8>> {
        check_pairs(signal)?;
        Ok(signal
            .chunks_exact(2)
            .map(|pair| u8::from(pair[0] == SignalLevel::Low && pair[1] == SignalLevel::High))
            .collect())
    }
}

/// Differential Manchester: every bit has a mid-bit transition, a 0 adds a
/// transition at the bit start. The line starts `Low`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifferentialManchester;

impl LineEncoder for DifferentialManchester {
    fn encode(&self, bits: &[u8]) -> EngineResult<Vec<SignalLevel>> {
        check_bits(bits)?;
        let mut level = SignalLevel::Low;
        let mut out = Vec::with_capacity(bits.len() * 2);
        for &b in bits {
            if b == 0 {
                level = level.inverted();
            }
            out.push(level);
            level = level.inverted();
            out.push(level);
        }
        Ok(out)
    }

    fn decode(&self, signal: &[SignalLevel]) -> EngineResult<Vec<u8>> {
        check_pairs(signal)?;
        let mut previous = SignalLevel::Low;
        Ok(signal
            .chunks_exact(2)
            .map(|pair| {
                let bit = u8::from(pair[0] == previous);
                previous = pair[1];
                bit
            })
            .collect())
    }
}

fn check_pairs(signal: &[SignalLevel]) -> EngineResult<()> {
    check_signal(signal)?;
    if signal.len() % 2 != 0 {
        return Err(EngineError::invalid_input(format!(
            "biphase signal needs an even number of levels, got {}",
            signal.len()
        )));
    }
    Ok(())
}
