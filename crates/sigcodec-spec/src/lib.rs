//! SignalCodec Transmit Spec Library
//!
//! This crate provides types, validation, and hashing for transmit specs.
//! A transmit spec is a JSON document naming one encoding or modulation
//! scheme, its construction parameters, and the bits or samples to push
//! through an encode/decode round trip.
//!
//! # Example
//!
//! ```
//! use sigcodec_spec::{InputSource, LineEncoding, Scheme, TransmitSpec};
//! use sigcodec_spec::validation::validate_spec;
//! use sigcodec_spec::hash::canonical_spec_hash;
//!
//! let spec = TransmitSpec::builder(
//!     "b8zs-demo",
//!     Scheme::line_code(LineEncoding::B8zs),
//!     InputSource::BitString { text: "1000 0000 0110".to_string() },
//! )
//! .description("B8ZS substitution of an eight-zero run")
//! .build();
//!
//! let result = validate_spec(&spec);
//! assert!(result.is_ok());
//!
//! let hash = canonical_spec_hash(&spec).unwrap();
//! println!("Spec hash: {}", hash);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types for validation
//! - [`signal`]: Signal levels and sinusoid parameters
//! - [`scheme`]: Scheme and family types with parameter defaults
//! - [`input`]: Input sources (bits and analog signals)
//! - [`spec`]: Main spec type and builder
//! - [`registry`]: Display metadata for every scheme
//! - [`validation`]: Spec validation functions and budgets
//! - [`hash`]: Canonical hashing
//! - [`report`]: Transmit report types

pub mod error;
pub mod hash;
pub mod input;
pub mod registry;
pub mod report;
pub mod scheme;
pub mod signal;
pub mod spec;
pub mod validation;

pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use hash::{canonical_spec_hash, source_hash};
pub use input::{parse_bit_string, sample_count, InputKind, InputSource};
pub use registry::SchemeInfo;
pub use report::{ReportWarning, RoundTripMetrics, SignalTrace, TransmitReport, REPORT_VERSION};
pub use scheme::{LineEncoding, Scheme, SchemeFamily};
pub use signal::{SignalLevel, SinusoidParams};
pub use spec::{TransmitSpec, TransmitSpecBuilder, SPEC_VERSION};
pub use validation::{
    is_valid_transmit_id, validate_spec, validate_spec_with_budget, BudgetCategory, BudgetError,
    TransmitBudget,
};
