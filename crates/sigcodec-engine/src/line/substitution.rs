//! Zero-run substitution codes built on AMI.
//!
//! Both codes replace long runs of zeros with patterns containing deliberate
//! bipolar violations, so the line keeps enough transitions for clock
//! recovery. Decoding walks the signal once while tracking the polarity of
//! the last pulse.

use sigcodec_spec::SignalLevel::{self, High, Low, NoLine};

use super::bipolar::alternate_marks;
use super::{check_signal, pulse_to_bit, LineEncoder, ViolationDetector};
use crate::error::{check_bits, EngineResult};

/// Length of a B8ZS zero run.
pub const B8ZS_RUN: usize = 8;

/// Length of an HDB3 zero run.
pub const HDB3_RUN: usize = 4;

/// Bipolar with 8-zero substitution.
///
/// Eight zeros become `000VB0VB`: `000+-0-+` after a positive pulse,
/// `000-+0+-` after a negative one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct B8zs;

fn b8zs_pattern(last: SignalLevel) -> [SignalLevel; B8ZS_RUN] {
    let v = last;
    let b = last.inverted();
    [NoLine, NoLine, NoLine, v, b, NoLine, b, v]
}

fn is_b8zs_pattern(window: &[SignalLevel], last: SignalLevel) -> bool {
    window[..3].iter().all(|s| !s.is_pulse())
        && window[3] == last
        && window[3].is_pulse()
        && window[4] == window[3].inverted()
        && !window[5].is_pulse()
        && window[6] == window[4]
        && window[7] == window[6].inverted()
}

impl LineEncoder for B8zs {
    fn encode(&self, bits: &[u8]) -> EngineResult<Vec<SignalLevel>> {
        check_bits(bits)?;
        let mut out = alternate_marks(bits, 1);
        let mut last = Low;
        let mut i = 0;
        while i < out.len() {
            if out[i].is_pulse() {
                last = out[i];
                i += 1;
            } else if i + B8ZS_RUN <= out.len()
                && out[i..i + B8ZS_RUN].iter().all(|s| !s.is_pulse())
            {
                let pattern = b8zs_pattern(last);
                out[i..i + B8ZS_RUN].copy_from_slice(&pattern);
                last = pattern[B8ZS_RUN - 1];
                i += B8ZS_RUN;
            } else {
                i += 1;
            }
        }
        Ok(out)
    }

    fn decode(&self, signal: &[SignalLevel]) -> EngineResult<Vec<u8>> {
        check_signal(signal)?;
        let mut bits = Vec::with_capacity(signal.len());
        let mut last = Low;
        let mut i = 0;
        while i < signal.len() {
            if i + B8ZS_RUN <= signal.len() && is_b8zs_pattern(&signal[i..i + B8ZS_RUN], last) {
                bits.extend([0; B8ZS_RUN]);
                last = signal[i + B8ZS_RUN - 1];
                i += B8ZS_RUN;
                continue;
            }
            let level = signal[i];
            if level.is_pulse() {
                last = level;
            }
            bits.push(pulse_to_bit(level, 0));
            i += 1;
        }
        Ok(bits)
    }
}

impl ViolationDetector for B8zs {}

/// High-density bipolar of order 3.
///
/// Four zeros become `000V` when an odd number of pulses was sent since the
/// last substitution, and `B00V` otherwise. `V` repeats the previous pulse
/// polarity; `B` is a normal alternating pulse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hdb3;

impl LineEncoder for Hdb3 {
    fn encode(&self, bits: &[u8]) -> EngineResult<Vec<SignalLevel>> {
        check_bits(bits)?;
        let mut out = Vec::with_capacity(bits.len());
        let mut last = Low;
        let mut pulses_since_substitution = 0usize;
        let mut i = 0;
        while i < bits.len() {
            if bits[i] == 1 {
                last = last.inverted();
                out.push(last);
                pulses_since_substitution += 1;
                i += 1;
            } else if i + HDB3_RUN <= bits.len() && bits[i..i + HDB3_RUN].iter().all(|&b| b == 0) {
                if pulses_since_substitution % 2 == 1 {
                    out.extend([NoLine, NoLine, NoLine, last]);
                } else {
                    let b = last.inverted();
                    out.extend([b, NoLine, NoLine, b]);
                    last = b;
                }
                pulses_since_substitution = 0;
                i += HDB3_RUN;
            } else {
                out.push(NoLine);
                i += 1;
            }
        }
        Ok(out)
    }

    fn decode(&self, signal: &[SignalLevel]) -> EngineResult<Vec<u8>> {
        check_signal(signal)?;
        let mut levels = signal.to_vec();
        let mut last = Low;
        for i in 0..levels.len() {
            let level = levels[i];
            if !level.is_pulse() {
                continue;
            }
            if level == last {
                levels[i] = NoLine;
                if i >= 3
                    && levels[i - 3].is_pulse()
                    && !levels[i - 2].is_pulse()
                    && !levels[i - 1].is_pulse()
                {
                    levels[i - 3] = NoLine;
                }
            }
            last = level;
        }
        Ok(levels.into_iter().map(|s| pulse_to_bit(s, 0)).collect())
    }
}

impl ViolationDetector for Hdb3 {}
