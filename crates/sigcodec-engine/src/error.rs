//! Error types for the signal engine.

use sigcodec_spec::{BackendError, ValidationError};
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while constructing or running a codec.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed construction argument.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Empty, non-binary, or non-finite input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Error message.
        message: String,
    },

    /// Signal and time arrays differ in length.
    #[error("length mismatch: expected {expected} samples, found {found}")]
    LengthMismatch {
        /// Length of the reference array.
        expected: usize,
        /// Length of the mismatched array.
        found: usize,
    },

    /// The spec failed validation.
    #[error("spec validation failed with {} error(s)", errors.len())]
    InvalidSpec {
        /// The validation errors.
        errors: Vec<ValidationError>,
    },
}

impl EngineError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a length mismatch error.
    pub fn length_mismatch(expected: usize, found: usize) -> Self {
        Self::LengthMismatch { expected, found }
    }
}

impl BackendError for EngineError {
    fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidParameter { .. } => "ENGINE_001",
            EngineError::InvalidInput { .. } => "ENGINE_002",
            EngineError::LengthMismatch { .. } => "ENGINE_003",
            EngineError::InvalidSpec { .. } => "ENGINE_004",
        }
    }

    fn category(&self) -> &'static str {
        "engine"
    }
}

/// Rejects empty bit sequences and values outside {0, 1}.
pub(crate) fn check_bits(bits: &[u8]) -> EngineResult<()> {
    if bits.is_empty() {
        return Err(EngineError::invalid_input("bit sequence is empty"));
    }
    if let Some((i, bit)) = bits.iter().enumerate().find(|(_, b)| **b > 1) {
        return Err(EngineError::invalid_input(format!(
            "bit {} at index {} is not 0 or 1",
            bit, i
        )));
    }
    Ok(())
}

/// Rejects empty sample sequences and non-finite values.
pub(crate) fn check_samples(samples: &[f64]) -> EngineResult<()> {
    if samples.is_empty() {
        return Err(EngineError::invalid_input("sample sequence is empty"));
    }
    if let Some((i, v)) = samples.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(EngineError::invalid_input(format!(
            "sample {} at index {} is not finite",
            v, i
        )));
    }
    Ok(())
}
