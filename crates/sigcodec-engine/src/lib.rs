//! SignalCodec Engine
//!
//! This crate implements the encode/decode round trips behind a transmit
//! spec:
//! - Line coding: NRZ-L, NRZ-I, Bipolar AMI, Pseudoternary, Manchester,
//!   Differential Manchester, B8ZS and HDB3
//! - Analog-to-digital: PCM quantization and delta modulation
//! - Digital-to-analog: ASK, BFSK, BPSK, MFSK and QPSK
//! - Analog-to-analog: AM, FM and PM
//!
//! # Determinism
//!
//! Every transform is a pure function of its parameters and input. Running
//! state such as the last pulse polarity or the DM staircase lives only for
//! the duration of one call. Random bit inputs use PCG32 seeded from the spec.
//!
//! # Example
//!
//! ```
//! use sigcodec_engine::transmit;
//! use sigcodec_spec::{InputSource, LineEncoding, Scheme, TransmitSpec};
//!
//! let spec = TransmitSpec::builder(
//!     "ami-demo",
//!     Scheme::line_code(LineEncoding::BipolarAmi),
//!     InputSource::BitString { text: "0100 1101".to_string() },
//! )
//! .description("AMI round trip")
//! .build();
//!
//! let report = transmit(&spec).unwrap();
//! assert!(report.metrics.exact);
//! ```
//!
//! # Crate Structure
//!
//! - [`transmit()`] - Main entry point: spec in, report out
//! - [`line`] - Line encoders and violation detection
//! - [`analog_digital`] - PCM and DM codecs
//! - [`digital_analog`] - Keyed carrier modulators
//! - [`analog_analog`] - Continuous carrier modulators
//! - [`numeric`] - Hilbert transform and related helpers
//! - [`signal`] - Sinusoids, composite signals and sampled signals
//! - [`rng`] - Deterministic RNG

pub mod analog_analog;
pub mod analog_digital;
pub mod digital_analog;
pub mod error;
pub mod line;
pub mod numeric;
pub mod rng;
pub mod signal;
pub mod transmit;

// Re-export main types at crate root
pub use analog_analog::{Am, AnalogModulator, Fm, Pm};
pub use analog_digital::{AnalogCodec, Dm, Pcm};
pub use digital_analog::{Ask, Bfsk, Bpsk, DigitalModulator, Mfsk, Qpsk};
pub use error::{EngineError, EngineResult};
pub use line::{violation_positions, LineCodec, LineEncoder, ViolationDetector};
pub use signal::{AnalogSignal, CompositeSignal, Sinusoid};
pub use transmit::{
    materialize_input, run_scheme, transmit, transmit_with_budget, Payload, RoundTrip,
};
