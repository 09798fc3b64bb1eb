//! Transmit command implementation
//!
//! Loads a spec, runs its round trip through the engine and prints the
//! resulting report.

use anyhow::{Context, Result};
use colored::Colorize;
use sigcodec_engine::{transmit_with_budget, EngineError};
use sigcodec_spec::{
    SignalLevel, SignalTrace, TransmitBudget, TransmitReport, ValidationResult,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::info;

use super::json_output::{
    engine_error_to_json, error_codes, input_error_to_json, JsonError, TransmitOutput,
};
use super::resolve_budget;
use super::validate::print_validation_results;
use crate::input::{load_spec, LoadResult};

/// Levels shown in the human-readable line code preview.
const PREVIEW_LEN: usize = 32;

/// Run the transmit command
///
/// # Arguments
/// * `spec_path` - Path to the spec file
/// * `budget_name` - Optional budget profile name (default, strict)
/// * `out_dir` - Directory to write `<transmit_id>.report.json` into
/// * `json_output` - Whether to print the report as JSON
/// * `pretty` - Pretty-print JSON output
///
/// # Returns
/// Exit code: 0 if the round trip ran, 1 otherwise
pub fn run(
    spec_path: &str,
    budget_name: Option<&str>,
    out_dir: Option<&str>,
    json_output: bool,
    pretty: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(spec_path, budget_name, out_dir, pretty)
    } else {
        run_human(spec_path, budget_name, out_dir)
    }
}

/// Run transmit with human-readable (colored) output
fn run_human(spec_path: &str, budget_name: Option<&str>, out_dir: Option<&str>) -> Result<ExitCode> {
    let start = Instant::now();
    let budget = resolve_budget(budget_name)?;

    println!("{} {}", "Transmitting:".cyan().bold(), spec_path);
    if budget_name.is_some() {
        println!("{} {}", "Budget:".dimmed(), budget.name);
    }

    let LoadResult { spec, source_hash } = load_spec(Path::new(spec_path))
        .with_context(|| format!("Failed to load spec file: {}", spec_path))?;
    info!(source_hash = %source_hash, "loaded spec");

    let report = match transmit_with_budget(&spec, &budget) {
        Ok(report) => report,
        Err(EngineError::InvalidSpec { errors }) => {
            let result = ValidationResult::failure(errors);
            print_validation_results(&result);
            println!(
                "\n{} Spec has {} error(s)",
                "FAILED".red().bold(),
                result.errors.len()
            );
            return Ok(ExitCode::from(1));
        }
        Err(e) => {
            println!("\n{} {}", "FAILED".red().bold(), e);
            return Ok(ExitCode::from(1));
        }
    };

    print_report(&report);

    if let Some(dir) = out_dir {
        let path = write_report(&report, dir)?;
        println!("\n{} {}", "Report written to:".dimmed(), path.display());
    }

    let duration_ms = start.elapsed().as_millis();
    if report.metrics.exact || is_lossy(&report) {
        println!(
            "\n{} Round trip complete ({} ms)",
            "SUCCESS".green().bold(),
            duration_ms
        );
    } else {
        println!(
            "\n{} Round trip was not exact ({} ms)",
            "!".yellow(),
            duration_ms
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Run transmit with machine-readable JSON output
fn run_json(
    spec_path: &str,
    budget_name: Option<&str>,
    out_dir: Option<&str>,
    pretty: bool,
) -> Result<ExitCode> {
    let start = Instant::now();
    let elapsed = || start.elapsed().as_millis() as u64;

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
            print_json(&TransmitOutput::failure(vec![error], None, elapsed()), pretty)?;
            return Ok(ExitCode::from(1));
        }
        None => TransmitBudget::default(),
    };

    let LoadResult { spec, source_hash } = match load_spec(Path::new(spec_path)) {
        Ok(loaded) => loaded,
        Err(e) => {
            let error = input_error_to_json(&e, Some(spec_path));
            print_json(&TransmitOutput::failure(vec![error], None, elapsed()), pretty)?;
            return Ok(ExitCode::from(1));
        }
    };

    let report = match transmit_with_budget(&spec, &budget) {
        Ok(report) => report,
        Err(e) => {
            let errors = engine_error_to_json(&e);
            let output = TransmitOutput::failure(errors, Some(source_hash), elapsed());
            print_json(&output, pretty)?;
            return Ok(ExitCode::from(1));
        }
    };

    let report_path = match out_dir {
        Some(dir) => match write_report(&report, dir) {
            Ok(path) => Some(path.display().to_string()),
            Err(e) => {
                let error = JsonError::new(error_codes::REPORT_WRITE, format!("{:#}", e));
                let output = TransmitOutput::failure(vec![error], Some(source_hash), elapsed());
                print_json(&output, pretty)?;
                return Ok(ExitCode::from(1));
            }
        },
        None => None,
    };

    let output = TransmitOutput::success(report, report_path, source_hash, elapsed());
    print_json(&output, pretty)?;
    Ok(ExitCode::SUCCESS)
}

fn print_json(output: &TransmitOutput, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(output)
    } else {
        serde_json::to_string(output)
    }
    .context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Writes the report as `<transmit_id>.report.json` under `dir`.
fn write_report(report: &TransmitReport, dir: &str) -> Result<PathBuf> {
    let dir = Path::new(dir);
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    let path = dir.join(TransmitReport::filename(&report.transmit_id));
    let json = report
        .to_json_pretty()
        .context("Failed to serialize report")?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(path)
}

fn is_lossy(report: &TransmitReport) -> bool {
    sigcodec_spec::registry::by_id(&report.scheme)
        .map(|info| info.lossy)
        .unwrap_or(false)
}

fn print_report(report: &TransmitReport) {
    println!(
        "{} {} ({})",
        "Scheme:".dimmed(),
        report.scheme,
        report.family
    );
    println!("{} {}", "Spec hash:".dimmed(), report.spec_hash);

    match &report.trace {
        SignalTrace::LineCode {
            input_bits,
            encoded,
            violations,
            ..
        } => {
            println!("{} {} bits", "Input:".dimmed(), input_bits.len());
            println!(
                "{} {}{}",
                "Encoded:".dimmed(),
                level_preview(encoded),
                if encoded.len() > PREVIEW_LEN { " ..." } else { "" }
            );
            if !violations.is_empty() {
                println!("{} {:?}", "Violations:".dimmed(), violations);
            }
        }
        SignalTrace::Keyed {
            input_bits,
            symbols,
            ..
        } => {
            println!(
                "{} {} bits in {} symbols",
                "Input:".dimmed(),
                input_bits.len(),
                symbols.len()
            );
        }
        SignalTrace::Pcm { input, codes, .. } => {
            println!(
                "{} {} samples, {} codes",
                "Input:".dimmed(),
                input.len(),
                codes.len()
            );
        }
        SignalTrace::Dm { input, bits, .. } => {
            println!(
                "{} {} samples, {} bits",
                "Input:".dimmed(),
                input.len(),
                bits.len()
            );
        }
        SignalTrace::Continuous { message, .. } => {
            println!("{} {} samples", "Input:".dimmed(), message.len());
        }
    }

    let metrics = &report.metrics;
    if let Some(bit_errors) = metrics.bit_errors {
        println!("{} {}", "Bit errors:".dimmed(), bit_errors);
    }
    if let Some(rms) = metrics.rms_error {
        println!("{} {:.6}", "RMS error:".dimmed(), rms);
    }
    if let Some(max) = metrics.max_abs_error {
        println!("{} {:.6}", "Max error:".dimmed(), max);
    }

    if !report.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &report.warnings {
            println!(
                "  {} [{}]: {}",
                "!".yellow(),
                warning.code.yellow(),
                warning.message
            );
        }
    }
}

fn level_preview(levels: &[SignalLevel]) -> String {
    levels
        .iter()
        .take(PREVIEW_LEN)
        .map(SignalLevel::to_string)
        .collect()
}
