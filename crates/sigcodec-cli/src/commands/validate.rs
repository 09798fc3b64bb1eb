//! Validate command implementation
//!
//! Checks a spec file against the validation rules and a budget without
//! running the round trip.

use anyhow::{Context, Result};
use colored::Colorize;
use sigcodec_spec::{canonical_spec_hash, validate_spec_with_budget, TransmitBudget};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    error_codes, input_error_to_json, validation_error_to_json, validation_warning_to_json,
    JsonError, JsonWarning, ValidateOutput, ValidateResult,
};
use super::resolve_budget;
use crate::input::{load_spec, LoadResult};

/// Run the validate command
///
/// # Arguments
/// * `spec_path` - Path to the spec file
/// * `budget_name` - Optional budget profile name (default, strict)
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(spec_path: &str, budget_name: Option<&str>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(spec_path, budget_name)
    } else {
        run_human(spec_path, budget_name)
    }
}

/// Run validate with human-readable (colored) output
fn run_human(spec_path: &str, budget_name: Option<&str>) -> Result<ExitCode> {
    let budget = resolve_budget(budget_name)?;

    println!("{} {}", "Validating:".cyan().bold(), spec_path);
    if budget_name.is_some() {
        println!("{} {}", "Budget:".dimmed(), budget.name);
    }

    let LoadResult { spec, source_hash } = load_spec(Path::new(spec_path))
        .with_context(|| format!("Failed to load spec file: {}", spec_path))?;

    println!("{} {}", "Source hash:".dimmed(), &source_hash[..16]);
    println!(
        "{} {} ({})",
        "Scheme:".dimmed(),
        spec.scheme.id(),
        spec.scheme.family()
    );

    let result = validate_spec_with_budget(&spec, &budget);
    print_validation_results(&result);

    if result.is_ok() {
        let hash = canonical_spec_hash(&spec).context("Failed to hash spec")?;
        println!("{} {}", "Spec hash:".dimmed(), hash);
        println!("\n{} Spec is valid", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Spec has {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}

/// Run validate with machine-readable JSON output
fn run_json(spec_path: &str, budget_name: Option<&str>) -> Result<ExitCode> {
    let budget = match budget_name.map(TransmitBudget::by_name) {
        Some(Some(budget)) => budget,
        Some(None) => {
            let error = JsonError::new(
                error_codes::UNKNOWN_BUDGET,
                format!(
                    "unknown budget profile: {} (expected default or strict)",
                    budget_name.unwrap_or_default()
                ),
            );
            let output = ValidateOutput::failure(vec![error], vec![], None, None);
            print_json(&output)?;
            return Ok(ExitCode::from(1));
        }
        None => TransmitBudget::default(),
    };

    let LoadResult { spec, source_hash } = match load_spec(Path::new(spec_path)) {
        Ok(loaded) => loaded,
        Err(e) => {
            let error = input_error_to_json(&e, Some(spec_path));
            let output = ValidateOutput::failure(vec![error], vec![], None, None);
            print_json(&output)?;
            return Ok(ExitCode::from(1));
        }
    };

    let spec_hash = canonical_spec_hash(&spec).unwrap_or_else(|_| "unknown".to_string());
    let result = validate_spec_with_budget(&spec, &budget);

    let warnings: Vec<JsonWarning> = result
        .warnings
        .iter()
        .map(validation_warning_to_json)
        .collect();

    let output = if result.is_ok() {
        let details = ValidateResult {
            transmit_id: spec.transmit_id.clone(),
            scheme: spec.scheme.id().to_string(),
            family: spec.scheme.family().to_string(),
            input: spec.input.tag().to_string(),
            budget: budget.name.clone(),
        };
        ValidateOutput::success(details, spec_hash, source_hash, warnings)
    } else {
        let errors: Vec<JsonError> = result.errors.iter().map(validation_error_to_json).collect();
        ValidateOutput::failure(errors, warnings, Some(spec_hash), Some(source_hash))
    };

    print_json(&output)?;

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn print_json(output: &ValidateOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Print validation results to the console
pub(super) fn print_validation_results(result: &sigcodec_spec::ValidationResult) {
    if !result.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for error in &result.errors {
            let path_info = error
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "x".red(),
                error.code.to_string().red(),
                path_info.dimmed(),
                error.message
            );
        }
    }

    if !result.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &result.warnings {
            let path_info = warning
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "!".yellow(),
                warning.code.to_string().yellow(),
                path_info.dimmed(),
                warning.message
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_spec(dir: &tempfile::TempDir, filename: &str, json: &str) -> std::path::PathBuf {
        let path = dir.path().join(filename);
        std::fs::write(&path, json).unwrap();
        path
    }

    const VALID: &str = r#"{
        "spec_version": 1,
        "transmit_id": "pcm-tone",
        "description": "PCM of a slow tone",
        "scheme": { "type": "pcm", "n_bits": 4 },
        "input": {
            "kind": "composite",
            "sinusoids": [{ "amplitude": 0.5, "frequency": 10.0 }],
            "sample_rate": 1000.0,
            "duration": 0.1
        }
    }"#;

    const INVALID: &str = r#"{
        "spec_version": 1,
        "transmit_id": "pcm-bits",
        "description": "PCM cannot take bits",
        "scheme": { "type": "pcm", "n_bits": 4 },
        "input": { "kind": "bits", "bits": [1, 0, 1] }
    }"#;

    #[test]
    fn validate_accepts_valid_spec() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_spec(&tmp, "spec.json", VALID);
        assert_eq!(
            run(path.to_str().unwrap(), None, false).unwrap(),
            ExitCode::SUCCESS
        );
        assert_eq!(
            run(path.to_str().unwrap(), Some("strict"), true).unwrap(),
            ExitCode::SUCCESS
        );
    }

    #[test]
    fn validate_rejects_scheme_input_mismatch() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_spec(&tmp, "spec.json", INVALID);
        assert_eq!(
            run(path.to_str().unwrap(), None, false).unwrap(),
            ExitCode::from(1)
        );
        assert_eq!(
            run(path.to_str().unwrap(), None, true).unwrap(),
            ExitCode::from(1)
        );
    }

    #[test]
    fn validate_unknown_budget() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_spec(&tmp, "spec.json", VALID);
        assert!(run(path.to_str().unwrap(), Some("huge"), false).is_err());
        assert_eq!(
            run(path.to_str().unwrap(), Some("huge"), true).unwrap(),
            ExitCode::from(1)
        );
    }

    #[test]
    fn validate_missing_file() {
        assert!(run("does/not/exist.json", None, false).is_err());
        assert_eq!(
            run("does/not/exist.json", None, true).unwrap(),
            ExitCode::from(1)
        );
    }
}
