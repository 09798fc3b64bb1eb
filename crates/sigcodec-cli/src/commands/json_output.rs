//! JSON output types for machine-readable CLI output.
//!
//! The `--json` flag on `transmit`, `validate` and `list` prints one of these
//! envelopes instead of colored text, so scripts and front ends can consume
//! the result without scraping.

use serde::{Deserialize, Serialize};
use sigcodec_engine::EngineError;
use sigcodec_spec::{BackendError, SchemeInfo, TransmitReport};

/// Error codes for CLI operations.
///
/// These codes are stable. Validation failures pass through their own
/// `E0xx` codes instead.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Unknown file extension
    pub const UNKNOWN_EXTENSION: &str = "CLI_002";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_003";
    /// Unknown budget profile
    pub const UNKNOWN_BUDGET: &str = "CLI_004";
    /// Unknown scheme family
    pub const UNKNOWN_FAMILY: &str = "CLI_005";
    /// Report could not be written
    pub const REPORT_WRITE: &str = "CLI_006";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E004", "ENGINE_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the JSON path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W004")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Sets the JSON path for this warning.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// JSON output for the `validate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    /// Whether validation succeeded (no errors)
    pub success: bool,
    /// Validation errors
    pub errors: Vec<JsonError>,
    /// Validation warnings
    pub warnings: Vec<JsonWarning>,
    /// Validation result details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ValidateResult>,
    /// Canonical spec hash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_hash: Option<String>,
    /// BLAKE3 hash of the source file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

/// Validation result details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResult {
    /// Transmit ID from the spec
    pub transmit_id: String,
    /// Registry identifier of the scheme
    pub scheme: String,
    /// Scheme family
    pub family: String,
    /// Input kind tag
    pub input: String,
    /// Budget profile used
    pub budget: String,
}

impl ValidateOutput {
    /// Creates a successful validate output.
    pub fn success(
        result: ValidateResult,
        spec_hash: String,
        source_hash: String,
        warnings: Vec<JsonWarning>,
    ) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
            spec_hash: Some(spec_hash),
            source_hash: Some(source_hash),
        }
    }

    /// Creates a failed validate output.
    pub fn failure(
        errors: Vec<JsonError>,
        warnings: Vec<JsonWarning>,
        spec_hash: Option<String>,
        source_hash: Option<String>,
    ) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
            spec_hash,
            source_hash,
        }
    }
}

/// JSON output for the `transmit` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransmitOutput {
    /// Whether the round trip ran
    pub success: bool,
    /// Errors from loading, validation or the engine
    pub errors: Vec<JsonError>,
    /// The full report (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<TransmitReport>,
    /// Path the report was written to (with `--out-dir`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<String>,
    /// BLAKE3 hash of the source file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl TransmitOutput {
    /// Creates a successful transmit output.
    pub fn success(
        report: TransmitReport,
        report_path: Option<String>,
        source_hash: String,
        duration_ms: u64,
    ) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            report: Some(report),
            report_path,
            source_hash: Some(source_hash),
            duration_ms,
        }
    }

    /// Creates a failed transmit output.
    pub fn failure(errors: Vec<JsonError>, source_hash: Option<String>, duration_ms: u64) -> Self {
        Self {
            success: false,
            errors,
            report: None,
            report_path: None,
            source_hash,
            duration_ms,
        }
    }
}

/// JSON output for the `list` command.
#[derive(Debug, Clone, Serialize)]
pub struct ListOutput {
    /// Whether the listing succeeded
    pub success: bool,
    /// Errors (unknown family filter)
    pub errors: Vec<JsonError>,
    /// Matching schemes in registry order
    pub schemes: Vec<SchemeInfo>,
}

/// Converts an InputError to a JsonError.
pub fn input_error_to_json(err: &crate::input::InputError, file: Option<&str>) -> JsonError {
    use crate::input::InputError;

    let code = match err {
        InputError::FileRead { .. } => error_codes::FILE_READ,
        InputError::UnknownExtension { .. } => error_codes::UNKNOWN_EXTENSION,
        InputError::JsonParse { .. } => error_codes::JSON_PARSE,
    };

    let mut error = JsonError::new(code, err.to_string());
    if let Some(f) = file {
        error = error.with_file(f);
    }
    error
}

/// Converts a ValidationError to a JsonError.
pub fn validation_error_to_json(err: &sigcodec_spec::ValidationError) -> JsonError {
    let mut error = JsonError::new(err.code.to_string(), &err.message);
    if let Some(ref path) = err.path {
        error = error.with_path(path);
    }
    error
}

/// Converts a ValidationWarning to a JsonWarning.
pub fn validation_warning_to_json(warn: &sigcodec_spec::ValidationWarning) -> JsonWarning {
    let mut warning = JsonWarning::new(warn.code.to_string(), &warn.message);
    if let Some(ref path) = warn.path {
        warning = warning.with_path(path);
    }
    warning
}

/// Converts an engine failure to JsonErrors.
///
/// A spec that failed validation expands to its individual validation
/// errors; everything else becomes one `ENGINE_xxx` error.
pub fn engine_error_to_json(err: &EngineError) -> Vec<JsonError> {
    match err {
        EngineError::InvalidSpec { errors } => {
            errors.iter().map(validation_error_to_json).collect()
        }
        other => vec![JsonError::new(other.code(), other.to_string())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sigcodec_spec::{ErrorCode, ValidationError};

    #[test]
    fn test_json_error_serialization() {
        let error = JsonError::new("E004", "test error")
            .with_path("scheme.n_bits")
            .with_file("test.json");

        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"E004\""));
        assert!(json.contains("\"message\":\"test error\""));
        assert!(json.contains("\"path\":\"scheme.n_bits\""));
        assert!(json.contains("\"file\":\"test.json\""));
    }

    #[test]
    fn test_json_error_optional_fields_skipped() {
        let error = JsonError::new("CLI_001", "test error");
        let json = serde_json::to_string(&error).unwrap();
        assert!(!json.contains("\"path\""));
        assert!(!json.contains("\"file\""));
    }

    #[test]
    fn test_engine_error_expands_validation_errors() {
        let err = EngineError::InvalidSpec {
            errors: vec![
                ValidationError::with_path(ErrorCode::InvalidParameter, "bad", "scheme.n_bits"),
                ValidationError::new(ErrorCode::SchemeInputMismatch, "mismatch"),
            ],
        };
        let errors = engine_error_to_json(&err);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].code, "E004");
        assert_eq!(errors[0].path.as_deref(), Some("scheme.n_bits"));
        assert_eq!(errors[1].code, "E003");
    }

    #[test]
    fn test_engine_error_uses_backend_code() {
        let errors = engine_error_to_json(&EngineError::invalid_input("empty"));
        assert_eq!(errors, vec![JsonError::new("ENGINE_002", "invalid input: empty")]);
    }

    #[test]
    fn test_transmit_failure_skips_report() {
        let output = TransmitOutput::failure(vec![JsonError::new("CLI_001", "missing")], None, 3);
        let json = serde_json::to_string_pretty(&output).unwrap();
        assert!(json.contains("\"success\": false"));
        assert!(!json.contains("\"report\""));
        assert!(!json.contains("\"source_hash\""));
    }
}
