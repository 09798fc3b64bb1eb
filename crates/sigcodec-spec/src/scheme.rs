//! Scheme types: which encoder, codec, or modulator a transmission uses.
//!
//! Every parameter except PCM bit depth and DM step has a default, so a
//! spec can name a scheme without spelling out every constant.

use serde::{Deserialize, Serialize};

/// The four engine families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeFamily {
    /// Digital-to-digital line encoders.
    LineCoding,
    /// Analog-to-digital codecs (PCM, DM).
    AnalogToDigital,
    /// Digital-to-analog keyed modulators (ASK, FSK, PSK).
    DigitalToAnalog,
    /// Analog-to-analog modulators (AM, FM, PM).
    AnalogToAnalog,
}

impl SchemeFamily {
    /// Returns the family as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemeFamily::LineCoding => "line_coding",
            SchemeFamily::AnalogToDigital => "analog_to_digital",
            SchemeFamily::DigitalToAnalog => "digital_to_analog",
            SchemeFamily::AnalogToAnalog => "analog_to_analog",
        }
    }

    /// Returns true if schemes in this family consume bit inputs.
    pub fn takes_bits(&self) -> bool {
        matches!(self, SchemeFamily::LineCoding | SchemeFamily::DigitalToAnalog)
    }

    /// Returns all families.
    pub fn all() -> &'static [SchemeFamily] {
        &[
            SchemeFamily::LineCoding,
            SchemeFamily::AnalogToDigital,
            SchemeFamily::DigitalToAnalog,
            SchemeFamily::AnalogToAnalog,
        ]
    }
}

impl std::fmt::Display for SchemeFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SchemeFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line_coding" => Ok(SchemeFamily::LineCoding),
            "analog_to_digital" => Ok(SchemeFamily::AnalogToDigital),
            "digital_to_analog" => Ok(SchemeFamily::DigitalToAnalog),
            "analog_to_analog" => Ok(SchemeFamily::AnalogToAnalog),
            _ => Err(format!("unknown scheme family: {}", s)),
        }
    }
}

/// Line encoding identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEncoding {
    /// Non-return-to-zero level.
    NrzL,
    /// Non-return-to-zero inverted.
    NrzI,
    /// Bipolar alternate mark inversion.
    BipolarAmi,
    /// Pseudoternary (AMI with roles of 0 and 1 swapped).
    Pseudoternary,
    /// Manchester (IEEE 802.3 convention).
    Manchester,
    /// Differential Manchester.
    DifferentialManchester,
    /// Bipolar with 8-zero substitution.
    B8zs,
    /// High-density bipolar 3-zero.
    Hdb3,
}

impl LineEncoding {
    /// Returns the registry identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEncoding::NrzL => "nrz_l",
            LineEncoding::NrzI => "nrz_i",
            LineEncoding::BipolarAmi => "bipolar_ami",
            LineEncoding::Pseudoternary => "pseudoternary",
            LineEncoding::Manchester => "manchester",
            LineEncoding::DifferentialManchester => "differential_manchester",
            LineEncoding::B8zs => "b8zs",
            LineEncoding::Hdb3 => "hdb3",
        }
    }

    /// Returns all line encodings.
    pub fn all() -> &'static [LineEncoding] {
        &[
            LineEncoding::NrzL,
            LineEncoding::NrzI,
            LineEncoding::BipolarAmi,
            LineEncoding::Pseudoternary,
            LineEncoding::Manchester,
            LineEncoding::DifferentialManchester,
            LineEncoding::B8zs,
            LineEncoding::Hdb3,
        ]
    }
}

impl std::fmt::Display for LineEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LineEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LineEncoding::all()
            .iter()
            .copied()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| format!("unknown line encoding: {}", s))
    }
}

fn default_carrier_freq() -> f64 {
    1000.0
}

fn default_one() -> f64 {
    1.0
}

fn default_freq_one() -> f64 {
    2000.0
}

fn default_mfsk_frequencies() -> [f64; 4] {
    [1000.0, 2000.0, 3000.0, 4000.0]
}

fn default_kf() -> f64 {
    100.0
}

fn default_kp() -> f64 {
    std::f64::consts::FRAC_PI_2
}

fn default_v_min() -> f64 {
    -1.0
}

/// A transmission scheme and its construction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum Scheme {
    /// Digital-to-digital line encoding.
    LineCode {
        /// Which line encoder to use.
        encoding: LineEncoding,
    },
    /// Pulse code modulation (uniform quantizer).
    Pcm {
        /// Bits per sample, in [1, 16].
        n_bits: u32,
        /// Lower voltage bound.
        #[serde(default = "default_v_min")]
        v_min: f64,
        /// Upper voltage bound (must exceed `v_min`).
        #[serde(default = "default_one")]
        v_max: f64,
    },
    /// Delta modulation.
    Dm {
        /// Staircase step size (must be positive).
        delta: f64,
    },
    /// Amplitude shift keying.
    Ask {
        /// Carrier frequency in Hz.
        #[serde(default = "default_carrier_freq")]
        carrier_freq: f64,
        /// Amplitude for bit 1.
        #[serde(default = "default_one")]
        amplitude_one: f64,
        /// Amplitude for bit 0.
        #[serde(default)]
        amplitude_zero: f64,
    },
    /// Binary frequency shift keying.
    Bfsk {
        /// Frequency for bit 0 in Hz.
        #[serde(default = "default_carrier_freq")]
        freq_zero: f64,
        /// Frequency for bit 1 in Hz.
        #[serde(default = "default_freq_one")]
        freq_one: f64,
        /// Carrier amplitude.
        #[serde(default = "default_one")]
        amplitude: f64,
    },
    /// Binary phase shift keying.
    Bpsk {
        /// Carrier frequency in Hz.
        #[serde(default = "default_carrier_freq")]
        carrier_freq: f64,
        /// Carrier amplitude.
        #[serde(default = "default_one")]
        amplitude: f64,
    },
    /// 4-ary frequency shift keying.
    Mfsk {
        /// Frequencies for bit pairs 00, 01, 10, 11.
        #[serde(default = "default_mfsk_frequencies")]
        frequencies: [f64; 4],
        /// Carrier amplitude.
        #[serde(default = "default_one")]
        amplitude: f64,
    },
    /// Quadrature phase shift keying.
    Qpsk {
        /// Carrier frequency in Hz.
        #[serde(default = "default_carrier_freq")]
        carrier_freq: f64,
        /// Carrier amplitude.
        #[serde(default = "default_one")]
        amplitude: f64,
    },
    /// Amplitude modulation.
    Am {
        /// Carrier frequency in Hz.
        #[serde(default = "default_carrier_freq")]
        carrier_freq: f64,
        /// Carrier amplitude.
        #[serde(default = "default_one")]
        carrier_amplitude: f64,
        /// Amplitude sensitivity.
        #[serde(default = "default_one")]
        ka: f64,
    },
    /// Frequency modulation.
    Fm {
        /// Carrier frequency in Hz.
        #[serde(default = "default_carrier_freq")]
        carrier_freq: f64,
        /// Carrier amplitude.
        #[serde(default = "default_one")]
        carrier_amplitude: f64,
        /// Frequency sensitivity in Hz per unit of message amplitude.
        #[serde(default = "default_kf")]
        kf: f64,
    },
    /// Phase modulation.
    Pm {
        /// Carrier frequency in Hz.
        #[serde(default = "default_carrier_freq")]
        carrier_freq: f64,
        /// Carrier amplitude.
        #[serde(default = "default_one")]
        carrier_amplitude: f64,
        /// Phase sensitivity in radians per unit of message amplitude.
        #[serde(default = "default_kp")]
        kp: f64,
    },
}

impl Scheme {
    /// Creates a line coding scheme.
    pub fn line_code(encoding: LineEncoding) -> Self {
        Scheme::LineCode { encoding }
    }

    /// Returns the registry identifier of this scheme.
    pub fn id(&self) -> &'static str {
        match self {
            Scheme::LineCode { encoding } => encoding.as_str(),
            Scheme::Pcm { .. } => "pcm",
            Scheme::Dm { .. } => "dm",
            Scheme::Ask { .. } => "ask",
            Scheme::Bfsk { .. } => "bfsk",
            Scheme::Bpsk { .. } => "bpsk",
            Scheme::Mfsk { .. } => "mfsk",
            Scheme::Qpsk { .. } => "qpsk",
            Scheme::Am { .. } => "am",
            Scheme::Fm { .. } => "fm",
            Scheme::Pm { .. } => "pm",
        }
    }

    /// Returns the family this scheme belongs to.
    pub fn family(&self) -> SchemeFamily {
        match self {
            Scheme::LineCode { .. } => SchemeFamily::LineCoding,
            Scheme::Pcm { .. } | Scheme::Dm { .. } => SchemeFamily::AnalogToDigital,
            Scheme::Ask { .. }
            | Scheme::Bfsk { .. }
            | Scheme::Bpsk { .. }
            | Scheme::Mfsk { .. }
            | Scheme::Qpsk { .. } => SchemeFamily::DigitalToAnalog,
            Scheme::Am { .. } | Scheme::Fm { .. } | Scheme::Pm { .. } => {
                SchemeFamily::AnalogToAnalog
            }
        }
    }

    /// Returns the number of bits carried by one transmitted symbol.
    pub fn bits_per_symbol(&self) -> usize {
        match self {
            Scheme::Mfsk { .. } | Scheme::Qpsk { .. } => 2,
            _ => 1,
        }
    }
}
