//! Digital-to-digital line encoders.
//!
//! Each encoder maps a bit sequence to three-level line signals and back:
//! - `nrz` - NRZ-L and NRZ-I
//! - `bipolar` - Bipolar AMI and Pseudoternary
//! - `manchester` - Manchester and Differential Manchester
//! - `substitution` - B8ZS and HDB3 zero-run substitution
//!
//! Running state (the current level, the last pulse polarity) lives in local
//! variables of each call, so one encoder instance can be reused freely.

pub mod bipolar;
pub mod manchester;
pub mod nrz;
pub mod substitution;

use sigcodec_spec::{LineEncoding, SignalLevel};

use crate::error::{EngineError, EngineResult};

pub use bipolar::{BipolarAmi, Pseudoternary};
pub use manchester::{DifferentialManchester, Manchester};
pub use nrz::{NrzI, NrzL};
pub use substitution::{B8zs, Hdb3};

/// Common trait for line encoders.
pub trait LineEncoder {
    /// Encodes bits into line levels.
    ///
    /// Fails with `InvalidInput` on empty input or a value outside {0, 1}.
    fn encode(&self, bits: &[u8]) -> EngineResult<Vec<SignalLevel>>;

    /// Decodes line levels back into bits.
    ///
    /// Fails with `InvalidInput` on empty input.
    fn decode(&self, signal: &[SignalLevel]) -> EngineResult<Vec<u8>>;
}

/// Bipolar violation detection for pulse-alternating encoders.
pub trait ViolationDetector {
    /// Returns true iff two consecutive pulses (skipping `NoLine`) share a polarity.
    fn has_violations(&self, signal: &[SignalLevel]) -> bool {
        !violation_positions(signal).is_empty()
    }
}

/// Indices of pulses that repeat the polarity of the previous pulse.
///
/// `NoLine` levels between pulses are skipped.
pub fn violation_positions(signal: &[SignalLevel]) -> Vec<usize> {
    let mut previous: Option<SignalLevel> = None;
    let mut positions = Vec::new();
    for (i, level) in signal.iter().enumerate() {
        if !level.is_pulse() {
            continue;
        }
        if previous == Some(*level) {
            positions.push(i);
        }
        previous = Some(*level);
    }
    positions
}

pub(crate) fn check_signal(signal: &[SignalLevel]) -> EngineResult<()> {
    if signal.is_empty() {
        return Err(EngineError::invalid_input("signal is empty"));
    }
    Ok(())
}

/// Maps `NoLine` to `zero` and any pulse to `1 - zero`.
pub(crate) fn pulse_to_bit(level: SignalLevel, zero: u8) -> u8 {
    if level.is_pulse() {
        1 - zero
    } else {
        zero
    }
}

/// The closed set of line encoders, selected by `LineEncoding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCodec {
    NrzL(NrzL),
    NrzI(NrzI),
    BipolarAmi(BipolarAmi),
    Pseudoternary(Pseudoternary),
    Manchester(Manchester),
    DifferentialManchester(DifferentialManchester),
    B8zs(B8zs),
    Hdb3(Hdb3),
}

impl LineCodec {
    /// Creates the encoder for an encoding identifier.
    pub fn new(encoding: LineEncoding) -> Self {
        match encoding {
            LineEncoding::NrzL => LineCodec::NrzL(NrzL),
            LineEncoding::NrzI => LineCodec::NrzI(NrzI),
            LineEncoding::BipolarAmi => LineCodec::BipolarAmi(BipolarAmi),
            LineEncoding::Pseudoternary => LineCodec::Pseudoternary(Pseudoternary),
            LineEncoding::Manchester => LineCodec::Manchester(Manchester),
            LineEncoding::DifferentialManchester => {
                LineCodec::DifferentialManchester(DifferentialManchester)
            }
            LineEncoding::B8zs => LineCodec::B8zs(B8zs),
            LineEncoding::Hdb3 => LineCodec::Hdb3(Hdb3),
        }
    }

    /// Returns the encoding identifier.
    pub fn encoding(&self) -> LineEncoding {
        match self {
            LineCodec::NrzL(_) => LineEncoding::NrzL,
            LineCodec::NrzI(_) => LineEncoding::NrzI,
            LineCodec::BipolarAmi(_) => LineEncoding::BipolarAmi,
            LineCodec::Pseudoternary(_) => LineEncoding::Pseudoternary,
            LineCodec::Manchester(_) => LineEncoding::Manchester,
            LineCodec::DifferentialManchester(_) => LineEncoding::DifferentialManchester,
            LineCodec::B8zs(_) => LineEncoding::B8zs,
            LineCodec::Hdb3(_) => LineEncoding::Hdb3,
        }
    }

    /// Returns the violation detector, for encoders that have one.
    pub fn violation_detector(&self) -> Option<&dyn ViolationDetector> {
        match self {
            LineCodec::BipolarAmi(e) => Some(e),
            LineCodec::Pseudoternary(e) => Some(e),
            LineCodec::B8zs(e) => Some(e),
            LineCodec::Hdb3(e) => Some(e),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn LineEncoder {
        match self {
            LineCodec::NrzL(e) => e,
            LineCodec::NrzI(e) => e,
            LineCodec::BipolarAmi(e) => e,
            LineCodec::Pseudoternary(e) => e,
            LineCodec::Manchester(e) => e,
            LineCodec::DifferentialManchester(e) => e,
            LineCodec::B8zs(e) => e,
            LineCodec::Hdb3(e) => e,
        }
    }
}

impl From<LineEncoding> for LineCodec {
    fn from(encoding: LineEncoding) -> Self {
        LineCodec::new(encoding)
    }
}

impl LineEncoder for LineCodec {
    fn encode(&self, bits: &[u8]) -> EngineResult<Vec<SignalLevel>> {
        self.inner().encode(bits)
    }

    fn decode(&self, signal: &[SignalLevel]) -> EngineResult<Vec<u8>> {
        self.inner().decode(signal)
    }
}
