//! Analog-to-digital codecs: PCM quantization and delta modulation.

use sigcodec_spec::validation::{PCM_MAX_BITS, PCM_MIN_BITS};
use tracing::trace;

use crate::error::{check_bits, check_samples, EngineError, EngineResult};

/// Common trait for codecs that turn samples into symbolic codes and back.
pub trait AnalogCodec {
    /// The digital code emitted per sample.
    type Code;

    /// Encodes samples into one code per sample.
    ///
    /// Fails with `InvalidInput` on empty input or non-finite samples.
    fn encode(&self, samples: &[f64]) -> EngineResult<Vec<Self::Code>>;

    /// Reconstructs one sample per code.
    fn decode(&self, codes: &[Self::Code]) -> EngineResult<Vec<f64>>;
}

/// Uniform quantizer with `2^n_bits` levels over `[v_min, v_max)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pcm {
    n_bits: u32,
    v_min: f64,
    v_max: f64,
}

impl Pcm {
    /// Creates a quantizer.
    ///
    /// Fails with `InvalidParameter` if `n_bits` is outside [1, 16], a bound
    /// is not finite, `v_min >= v_max`, or `v_max - v_min` overflows.
    pub fn new(n_bits: u32, v_min: f64, v_max: f64) -> EngineResult<Self> {
        if !(PCM_MIN_BITS..=PCM_MAX_BITS).contains(&n_bits) {
            return Err(EngineError::invalid_param(
                "n_bits",
                format!(
                    "must be in [{}, {}], got {}",
                    PCM_MIN_BITS, PCM_MAX_BITS, n_bits
                ),
            ));
        }
        if !(v_min.is_finite() && v_max.is_finite()) {
            return Err(EngineError::invalid_param(
                "v_min",
                format!("bounds must be finite, got [{}, {}]", v_min, v_max),
            ));
        }
        if v_min >= v_max {
            return Err(EngineError::invalid_param(
                "v_max",
                format!("must exceed v_min ({}), got {}", v_min, v_max),
            ));
        }
        if !(v_max - v_min).is_finite() {
            return Err(EngineError::invalid_param(
                "v_max",
                format!("range width overflows, got [{}, {}]", v_min, v_max),
            ));
        }
        Ok(Self {
            n_bits,
            v_min,
            v_max,
        })
    }

    /// Bits per sample.
    pub fn n_bits(&self) -> u32 {
        self.n_bits
    }

    /// Number of quantization levels, `2^n_bits`.
    pub fn levels(&self) -> u32 {
        1 << self.n_bits
    }

    /// Width of one quantization interval.
    pub fn step(&self) -> f64 {
        (self.v_max - self.v_min) / self.levels() as f64
    }

    /// Largest valid level index.
    pub fn max_index(&self) -> u32 {
        self.levels() - 1
    }
}

impl AnalogCodec for Pcm {
    type Code = u32;

    fn encode(&self, samples: &[f64]) -> EngineResult<Vec<u32>> {
        check_samples(samples)?;
        let step = self.step();
        let max = self.max_index() as f64;
        Ok(samples
            .iter()
            .map(|s| ((s - self.v_min) / step).floor().clamp(0.0, max) as u32)
            .collect())
    }

    /// Reconstructs each level at its interval midpoint.
    ///
    /// Fails with `InvalidInput` on empty input or an index of `2^n_bits` or more.
    fn decode(&self, codes: &[u32]) -> EngineResult<Vec<f64>> {
        if codes.is_empty() {
            return Err(EngineError::invalid_input("level sequence is empty"));
        }
        let step = self.step();
        codes
            .iter()
            .enumerate()
            .map(|(i, &code)| {
                if code > self.max_index() {
                    return Err(EngineError::invalid_input(format!(
                        "level {} at index {} exceeds max level {}",
                        code,
                        i,
                        self.max_index()
                    )));
                }
                Ok(self.v_min + code as f64 * step + step / 2.0)
            })
            .collect()
    }
}

/// Delta modulator: one bit per sample tracking a staircase of step `delta`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dm {
    delta: f64,
}

impl Dm {
    /// Creates a delta modulator. Fails unless `delta` is positive and finite.
    pub fn new(delta: f64) -> EngineResult<Self> {
        if !(delta.is_finite() && delta > 0.0) {
            return Err(EngineError::invalid_param(
                "delta",
                format!("must be positive, got {}", delta),
            ));
        }
        Ok(Self { delta })
    }

    /// Staircase step size.
    pub fn delta(&self) -> f64 {
        self.delta
    }
}

impl AnalogCodec for Dm {
    type Code = u8;

    fn encode(&self, samples: &[f64]) -> EngineResult<Vec<u8>> {
        check_samples(samples)?;
        let mut staircase = 0.0;
        let bits: Vec<u8> = samples
            .iter()
            .map(|&s| {
                if s > staircase {
                    staircase += self.delta;
                    1
                } else {
                    staircase -= self.delta;
                    0
                }
            })
            .collect();
        trace!(samples = samples.len(), final_level = staircase, "dm encode");
        Ok(bits)
    }

    /// Replays the staircase: `+delta` per 1, `-delta` per 0, starting at 0.
    fn decode(&self, bits: &[u8]) -> EngineResult<Vec<f64>> {
        check_bits(bits)?;
        let mut staircase = 0.0;
        Ok(bits
            .iter()
            .map(|&b| {
                if b == 1 {
                    staircase += self.delta;
                } else {
                    staircase -= self.delta;
                }
                staircase
            })
            .collect())
    }
}
