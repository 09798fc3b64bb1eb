//! Input sources: the bits or samples a transmission starts from.

use serde::{Deserialize, Serialize};

use crate::signal::SinusoidParams;

/// Whether an input produces bits or analog samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Binary data.
    Bits,
    /// Real-valued samples on a uniform time grid.
    Analog,
}

impl InputKind {
    /// Returns the input kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Bits => "bits",
            InputKind::Analog => "analog",
        }
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the data for a transmission comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum InputSource {
    /// Explicit bit values.
    Bits {
        /// Bits in transmission order.
        bits: Vec<u8>,
    },
    /// A string of '0' and '1' characters. Whitespace is ignored.
    BitString {
        /// The bit text, e.g. "1101 0010".
        text: String,
    },
    /// A deterministic pseudo-random bit stream.
    RandomBits {
        /// Number of bits to draw.
        count: usize,
        /// RNG seed.
        seed: u32,
    },
    /// A sum of sinusoids sampled at `t_i = i / sample_rate`.
    Composite {
        /// Component sinusoids.
        sinusoids: Vec<SinusoidParams>,
        /// Sample rate in Hz.
        sample_rate: f64,
        /// Signal duration in seconds.
        duration: f64,
    },
    /// Raw samples at a uniform rate.
    Samples {
        /// Sample values.
        values: Vec<f64>,
        /// Sample rate in Hz.
        sample_rate: f64,
    },
}

impl InputSource {
    /// Returns whether this source yields bits or samples.
    pub fn kind(&self) -> InputKind {
        match self {
            InputSource::Bits { .. }
            | InputSource::BitString { .. }
            | InputSource::RandomBits { .. } => InputKind::Bits,
            InputSource::Composite { .. } | InputSource::Samples { .. } => InputKind::Analog,
        }
    }

    /// Returns the tag used in JSON.
    pub fn tag(&self) -> &'static str {
        match self {
            InputSource::Bits { .. } => "bits",
            InputSource::BitString { .. } => "bit_string",
            InputSource::RandomBits { .. } => "random_bits",
            InputSource::Composite { .. } => "composite",
            InputSource::Samples { .. } => "samples",
        }
    }

    /// Returns the number of bits this source yields, if it yields bits.
    pub fn bit_count(&self) -> Option<usize> {
        match self {
            InputSource::Bits { bits } => Some(bits.len()),
            InputSource::BitString { text } => {
                Some(text.chars().filter(|c| !c.is_whitespace()).count())
            }
            InputSource::RandomBits { count, .. } => Some(*count),
            _ => None,
        }
    }

    /// Returns the number of samples this source yields, if it yields samples.
    pub fn sample_count(&self) -> Option<usize> {
        match self {
            InputSource::Composite {
                sample_rate,
                duration,
                ..
            } => Some(sample_count(*sample_rate, *duration)),
            InputSource::Samples { values, .. } => Some(values.len()),
            _ => None,
        }
    }

    /// Returns the sample rate of an analog source.
    pub fn sample_rate(&self) -> Option<f64> {
        match self {
            InputSource::Composite { sample_rate, .. } | InputSource::Samples { sample_rate, .. } => {
                Some(*sample_rate)
            }
            _ => None,
        }
    }
}

/// Parses a '0'/'1' string into bits, ignoring whitespace.
///
/// Returns the offending character on failure.
pub fn parse_bit_string(text: &str) -> Result<Vec<u8>, char> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            other => Err(other),
        })
        .collect()
}

/// Number of samples in `[0, duration)` at `sample_rate`.
///
/// Products within 1e-9 of an integer are treated as that integer so that
/// e.g. 0.2 s at 50 kHz gives exactly 10 000 samples.
pub fn sample_count(sample_rate: f64, duration: f64) -> usize {
    if !(sample_rate.is_finite() && duration.is_finite()) || sample_rate <= 0.0 || duration <= 0.0
    {
        return 0;
    }
    let exact = sample_rate * duration;
    let rounded = exact.round();
    let count = if (exact - rounded).abs() < 1e-9 {
        rounded
    } else {
        exact.ceil()
    };
    if count >= usize::MAX as f64 {
        usize::MAX
    } else {
        count as usize
    }
}
