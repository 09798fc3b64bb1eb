//! Digital-to-analog modulators.
//!
//! Each transmitted symbol is one carrier [`Sinusoid`]; binary schemes carry
//! one bit per symbol, MFSK and QPSK carry a bit pair.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use sigcodec_spec::SinusoidParams;

use crate::error::{check_bits, EngineError, EngineResult};
use crate::signal::Sinusoid;

/// BPSK phase tolerance in radians for recognizing a 1.
pub const BPSK_PHASE_TOLERANCE: f64 = 0.1;

/// QPSK phases for bit pairs 00, 01, 10, 11.
pub const QPSK_PHASES: [f64; 4] = [FRAC_PI_4, 3.0 * FRAC_PI_4, -FRAC_PI_4, -3.0 * FRAC_PI_4];

/// Common trait for digital modulators.
pub trait DigitalModulator {
    /// Maps bits to one carrier sinusoid per symbol.
    ///
    /// Fails with `InvalidInput` on empty input or a value outside {0, 1}.
    fn modulate(&self, bits: &[u8]) -> EngineResult<Vec<Sinusoid>>;

    /// Recovers bits from carrier symbols.
    ///
    /// Fails with `InvalidInput` on empty input.
    fn demodulate(&self, symbols: &[Sinusoid]) -> EngineResult<Vec<u8>>;

    /// Bits carried per symbol.
    fn bits_per_symbol(&self) -> usize {
        1
    }
}

fn check_symbols(symbols: &[Sinusoid]) -> EngineResult<()> {
    if symbols.is_empty() {
        return Err(EngineError::invalid_input("symbol sequence is empty"));
    }
    Ok(())
}

fn positive(name: &str, value: f64) -> EngineResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(EngineError::invalid_param(
            name,
            format!("must be positive, got {}", value),
        ));
    }
    Ok(())
}

fn finite(name: &str, value: f64) -> EngineResult<()> {
    if !value.is_finite() {
        return Err(EngineError::invalid_param(
            name,
            format!("must be finite, got {}", value),
        ));
    }
    Ok(())
}

fn carrier(amplitude: f64, frequency: f64, phase: f64) -> EngineResult<Sinusoid> {
    Sinusoid::new(SinusoidParams::new(amplitude, frequency).with_phase(phase))
}

/// Splits bits into pairs, padding an odd-length input with a trailing 0.
fn bit_pairs(bits: &[u8]) -> impl Iterator<Item = usize> + '_ {
    bits.chunks(2)
        .map(|pair| ((pair[0] as usize) << 1) | pair.get(1).copied().unwrap_or(0) as usize)
}

fn pair_bits(index: usize) -> [u8; 2] {
    [(index >> 1) as u8 & 1, index as u8 & 1]
}

/// Amplitude shift keying.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ask {
    pub carrier_freq: f64,
    pub amplitude_one: f64,
    pub amplitude_zero: f64,
}

impl Ask {
    /// Creates an ASK modulator. The two amplitudes must differ.
    pub fn new(carrier_freq: f64, amplitude_one: f64, amplitude_zero: f64) -> EngineResult<Self> {
        positive("carrier_freq", carrier_freq)?;
        finite("amplitude_one", amplitude_one)?;
        finite("amplitude_zero", amplitude_zero)?;
        if amplitude_one == amplitude_zero {
            return Err(EngineError::invalid_param(
                "amplitude_zero",
                format!("must differ from amplitude_one ({})", amplitude_one),
            ));
        }
        Ok(Self {
            carrier_freq,
            amplitude_one,
            amplitude_zero,
        })
    }

    /// Decision threshold halfway between the two amplitudes.
    pub fn threshold(&self) -> f64 {
        (self.amplitude_one + self.amplitude_zero) / 2.0
    }
}

impl DigitalModulator for Ask {
    fn modulate(&self, bits: &[u8]) -> EngineResult<Vec<Sinusoid>> {
        check_bits(bits)?;
        bits.iter()
            .map(|&b| {
                let amplitude = if b == 1 {
                    self.amplitude_one
                } else {
                    self.amplitude_zero
                };
                carrier(amplitude, self.carrier_freq, 0.0)
            })
            .collect()
    }

    fn demodulate(&self, symbols: &[Sinusoid]) -> EngineResult<Vec<u8>> {
        check_symbols(symbols)?;
        let threshold = self.threshold();
        let one_is_high = self.amplitude_one > self.amplitude_zero;
        Ok(symbols
            .iter()
            .map(|s| u8::from((s.params().amplitude > threshold) == one_is_high))
            .collect())
    }
}

/// Binary frequency shift keying.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bfsk {
    pub freq_zero: f64,
    pub freq_one: f64,
    pub amplitude: f64,
}

impl Bfsk {
    /// Creates a BFSK modulator. The two frequencies must differ.
    pub fn new(freq_zero: f64, freq_one: f64, amplitude: f64) -> EngineResult<Self> {
        positive("freq_zero", freq_zero)?;
        positive("freq_one", freq_one)?;
        positive("amplitude", amplitude)?;
        if freq_zero == freq_one {
            return Err(EngineError::invalid_param(
                "freq_one",
                format!("must differ from freq_zero ({})", freq_zero),
            ));
        }
        Ok(Self {
            freq_zero,
            freq_one,
            amplitude,
        })
    }
}

impl DigitalModulator for Bfsk {
    fn modulate(&self, bits: &[u8]) -> EngineResult<Vec<Sinusoid>> {
        check_bits(bits)?;
        bits.iter()
            .map(|&b| {
                let frequency = if b == 1 { self.freq_one } else { self.freq_zero };
                carrier(self.amplitude, frequency, 0.0)
            })
            .collect()
    }

    fn demodulate(&self, symbols: &[Sinusoid]) -> EngineResult<Vec<u8>> {
        check_symbols(symbols)?;
        Ok(symbols
            .iter()
            .map(|s| u8::from(s.params().frequency == self.freq_one))
            .collect())
    }
}

/// Binary phase shift keying: phase 0 for 1, pi for 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bpsk {
    pub carrier_freq: f64,
    pub amplitude: f64,
}

impl Bpsk {
    pub fn new(carrier_freq: f64, amplitude: f64) -> EngineResult<Self> {
        positive("carrier_freq", carrier_freq)?;
        positive("amplitude", amplitude)?;
        Ok(Self {
            carrier_freq,
            amplitude,
        })
    }
}

impl DigitalModulator for Bpsk {
    fn modulate(&self, bits: &[u8]) -> EngineResult<Vec<Sinusoid>> {
        check_bits(bits)?;
        bits.iter()
            .map(|&b| {
                let phase = if b == 1 { 0.0 } else { PI };
                carrier(self.amplitude, self.carrier_freq, phase)
            })
            .collect()
    }

    fn demodulate(&self, symbols: &[Sinusoid]) -> EngineResult<Vec<u8>> {
        check_symbols(symbols)?;
        Ok(symbols
            .iter()
            .map(|s| u8::from(s.params().phase.abs() < BPSK_PHASE_TOLERANCE))
            .collect())
    }
}

/// 4-ary frequency shift keying.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mfsk {
    /// Frequencies for bit pairs 00, 01, 10, 11.
    pub frequencies: [f64; 4],
    pub amplitude: f64,
}

impl Mfsk {
    /// Creates an MFSK modulator. The four frequencies must be distinct.
    pub fn new(frequencies: [f64; 4], amplitude: f64) -> EngineResult<Self> {
        for (i, f) in frequencies.iter().enumerate() {
            positive(&format!("frequencies[{}]", i), *f)?;
            if frequencies[..i].contains(f) {
                return Err(EngineError::invalid_param(
                    format!("frequencies[{}]", i),
                    format!("duplicate frequency {}", f),
                ));
            }
        }
        positive("amplitude", amplitude)?;
        Ok(Self {
            frequencies,
            amplitude,
        })
    }

    fn nearest(&self, frequency: f64) -> usize {
        let mut best = 0;
        for (i, f) in self.frequencies.iter().enumerate().skip(1) {
            if (f - frequency).abs() < (self.frequencies[best] - frequency).abs() {
                best = i;
            }
        }
        best
    }
}

impl DigitalModulator for Mfsk {
    fn modulate(&self, bits: &[u8]) -> EngineResult<Vec<Sinusoid>> {
        check_bits(bits)?;
        bit_pairs(bits)
            .map(|index| carrier(self.amplitude, self.frequencies[index], 0.0))
            .collect()
    }

    /// Picks the nearest of the four frequencies for every symbol.
    fn demodulate(&self, symbols: &[Sinusoid]) -> EngineResult<Vec<u8>> {
        check_symbols(symbols)?;
        Ok(symbols
            .iter()
            .flat_map(|s| pair_bits(self.nearest(s.params().frequency)))
            .collect())
    }

    fn bits_per_symbol(&self) -> usize {
        2
    }
}

/// Quadrature phase shift keying.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Qpsk {
    pub carrier_freq: f64,
    pub amplitude: f64,
}

impl Qpsk {
    pub fn new(carrier_freq: f64, amplitude: f64) -> EngineResult<Self> {
        positive("carrier_freq", carrier_freq)?;
        positive("amplitude", amplitude)?;
        Ok(Self {
            carrier_freq,
            amplitude,
        })
    }
}

/// Wraps a phase into (-pi, pi].
pub fn normalize_phase(phase: f64) -> f64 {
    let mut p = phase % (2.0 * PI);
    if p > PI {
        p -= 2.0 * PI;
    } else if p <= -PI {
        p += 2.0 * PI;
    }
    p
}

fn qpsk_quadrant(phase: f64) -> usize {
    let p = normalize_phase(phase);
    if (0.0..FRAC_PI_2).contains(&p) {
        0
    } else if p >= FRAC_PI_2 {
        1
    } else if p >= -FRAC_PI_2 {
        2
    } else {
        3
    }
}

impl DigitalModulator for Qpsk {
    fn modulate(&self, bits: &[u8]) -> EngineResult<Vec<Sinusoid>> {
        check_bits(bits)?;
        bit_pairs(bits)
            .map(|index| carrier(self.amplitude, self.carrier_freq, QPSK_PHASES[index]))
            .collect()
    }

    fn demodulate(&self, symbols: &[Sinusoid]) -> EngineResult<Vec<u8>> {
        check_symbols(symbols)?;
        Ok(symbols
            .iter()
            .flat_map(|s| pair_bits(qpsk_quadrant(s.params().phase)))
            .collect())
    }

    fn bits_per_symbol(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn amplitudes(symbols: &[Sinusoid]) -> Vec<f64> {
        symbols.iter().map(|s| s.params().amplitude).collect()
    }

    #[test]
    fn test_ask_roundtrip() {
        let ask = Ask::new(1000.0, 1.0, 0.0).unwrap();
        let symbols = ask.modulate(&[1, 0, 1, 1]).unwrap();
        assert_eq!(amplitudes(&symbols), vec![1.0, 0.0, 1.0, 1.0]);
        assert_eq!(symbols[0].params().frequency, 1000.0);
        assert_eq!(ask.demodulate(&symbols).unwrap(), vec![1, 0, 1, 1]);
    }

    #[test]
    fn test_ask_inverted_amplitudes() {
        let ask = Ask::new(500.0, 0.2, 1.0).unwrap();
        let symbols = ask.modulate(&[0, 1, 1, 0]).unwrap();
        assert_eq!(ask.demodulate(&symbols).unwrap(), vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_ask_rejects_equal_amplitudes() {
        assert!(matches!(
            Ask::new(1000.0, 1.0, 1.0),
            Err(EngineError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_bfsk_roundtrip() {
        let bfsk = Bfsk::new(1000.0, 2000.0, 1.0).unwrap();
        let symbols = bfsk.modulate(&[0, 1, 1]).unwrap();
        let freqs: Vec<f64> = symbols.iter().map(|s| s.params().frequency).collect();
        assert_eq!(freqs, vec![1000.0, 2000.0, 2000.0]);
        assert_eq!(bfsk.demodulate(&symbols).unwrap(), vec![0, 1, 1]);
        assert!(Bfsk::new(1000.0, 1000.0, 1.0).is_err());
    }

    #[test]
    fn test_bpsk_phases() {
        let bpsk = Bpsk::new(1000.0, 2.0).unwrap();
        let symbols = bpsk.modulate(&[1, 0]).unwrap();
        assert_eq!(symbols[0].params().phase, 0.0);
        assert_eq!(symbols[1].params().phase, PI);
        assert_eq!(bpsk.demodulate(&symbols).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_bpsk_tolerance() {
        let bpsk = Bpsk::new(1000.0, 1.0).unwrap();
        let symbols = vec![
            carrier(1.0, 1000.0, 0.05).unwrap(),
            carrier(1.0, 1000.0, -0.09).unwrap(),
            carrier(1.0, 1000.0, 0.2).unwrap(),
        ];
        assert_eq!(bpsk.demodulate(&symbols).unwrap(), vec![1, 1, 0]);
    }

    #[test]
    fn test_mfsk_all_pairs() {
        let mfsk = Mfsk::new([1000.0, 2000.0, 3000.0, 4000.0], 1.0).unwrap();
        for pair in [[0, 0], [0, 1], [1, 0], [1, 1]] {
            let symbols = mfsk.modulate(&pair).unwrap();
            assert_eq!(symbols.len(), 1);
            assert_eq!(mfsk.demodulate(&symbols).unwrap(), pair.to_vec());
        }
    }

    #[test]
    fn test_mfsk_pads_odd_input() {
        let mfsk = Mfsk::new([1000.0, 2000.0, 3000.0, 4000.0], 1.0).unwrap();
        let symbols = mfsk.modulate(&[1, 1, 1]).unwrap();
        let freqs: Vec<f64> = symbols.iter().map(|s| s.params().frequency).collect();
        assert_eq!(freqs, vec![4000.0, 3000.0]);
        assert_eq!(mfsk.demodulate(&symbols).unwrap(), vec![1, 1, 1, 0]);
        assert_eq!(mfsk.bits_per_symbol(), 2);
    }

    #[test]
    fn test_mfsk_nearest_frequency() {
        let mfsk = Mfsk::new([1000.0, 2000.0, 3000.0, 4000.0], 1.0).unwrap();
        let symbols = vec![
            carrier(1.0, 2900.0, 0.0).unwrap(),
            carrier(1.0, 1100.0, 0.0).unwrap(),
        ];
        assert_eq!(mfsk.demodulate(&symbols).unwrap(), vec![1, 0, 0, 0]);
    }

    #[test]
    fn test_mfsk_rejects_duplicate_frequencies() {
        assert!(Mfsk::new([1000.0, 2000.0, 1000.0, 4000.0], 1.0).is_err());
        assert!(Mfsk::new([0.0, 2000.0, 3000.0, 4000.0], 1.0).is_err());
    }

    #[test]
    fn test_qpsk_all_pairs() {
        let qpsk = Qpsk::new(1000.0, 1.0).unwrap();
        for (index, pair) in [[0, 0], [0, 1], [1, 0], [1, 1]].iter().enumerate() {
            let symbols = qpsk.modulate(pair).unwrap();
            assert_eq!(symbols[0].params().phase, QPSK_PHASES[index]);
            assert_eq!(qpsk.demodulate(&symbols).unwrap(), pair.to_vec());
        }
    }

    #[test]
    fn test_qpsk_wrapped_phases() {
        let qpsk = Qpsk::new(1000.0, 1.0).unwrap();
        let symbols = vec![
            carrier(1.0, 1000.0, FRAC_PI_4 + 2.0 * PI).unwrap(),
            carrier(1.0, 1000.0, -3.0 * FRAC_PI_4 - 2.0 * PI).unwrap(),
            carrier(1.0, 1000.0, PI).unwrap(),
        ];
        assert_eq!(qpsk.demodulate(&symbols).unwrap(), vec![0, 0, 1, 1, 0, 1]);
    }

    #[test]
    fn test_normalize_phase() {
        assert!((normalize_phase(2.5 * PI) - FRAC_PI_2).abs() < 1e-12);
        assert!((normalize_phase(-PI) - PI).abs() < 1e-12);
        assert!((normalize_phase(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_modulators_reject_empty_and_non_binary() {
        let modulators: Vec<Box<dyn DigitalModulator>> = vec![
            Box::new(Ask::new(1000.0, 1.0, 0.0).unwrap()),
            Box::new(Bfsk::new(1000.0, 2000.0, 1.0).unwrap()),
            Box::new(Bpsk::new(1000.0, 1.0).unwrap()),
            Box::new(Mfsk::new([1.0, 2.0, 3.0, 4.0], 1.0).unwrap()),
            Box::new(Qpsk::new(1000.0, 1.0).unwrap()),
        ];
        for m in &modulators {
            assert!(matches!(m.modulate(&[]), Err(EngineError::InvalidInput { .. })));
            assert!(m.modulate(&[1, 5]).is_err());
            assert!(m.demodulate(&[]).is_err());
        }
    }
}
