//! List command implementation
//!
//! Prints the scheme registry, optionally filtered to one family.

use anyhow::{Context, Result};
use colored::Colorize;
use sigcodec_spec::registry;
use sigcodec_spec::{SchemeFamily, SchemeInfo};
use std::process::ExitCode;

use super::json_output::{error_codes, JsonError, ListOutput};

/// Run the list command
///
/// # Arguments
/// * `family` - Optional family filter (e.g. "line_coding")
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 for an unknown family
pub fn run(family: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let filter = match family.map(str::parse::<SchemeFamily>) {
        Some(Ok(family)) => Some(family),
        Some(Err(message)) => {
            if json_output {
                let output = ListOutput {
                    success: false,
                    errors: vec![JsonError::new(error_codes::UNKNOWN_FAMILY, message)],
                    schemes: Vec::new(),
                };
                print_json(&output)?;
                return Ok(ExitCode::from(1));
            }
            anyhow::bail!("{} (expected one of: {})", message, family_names());
        }
        None => None,
    };

    let schemes = select(filter);

    if json_output {
        let output = ListOutput {
            success: true,
            errors: Vec::new(),
            schemes,
        };
        print_json(&output)?;
    } else {
        print_human(&schemes);
    }
    Ok(ExitCode::SUCCESS)
}

/// Returns the registry entries matching an optional family.
fn select(filter: Option<SchemeFamily>) -> Vec<SchemeInfo> {
    match filter {
        Some(family) => registry::by_family(family).copied().collect(),
        None => registry::all().to_vec(),
    }
}

fn family_names() -> String {
    SchemeFamily::all()
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_json(output: &ListOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn print_human(schemes: &[SchemeInfo]) {
    for family in SchemeFamily::all() {
        let members: Vec<&SchemeInfo> = schemes.iter().filter(|s| s.family == *family).collect();
        if members.is_empty() {
            continue;
        }
        println!("{}", family.as_str().cyan().bold());
        for info in members {
            let mut tags = Vec::new();
            if info.doubles_length {
                tags.push("2x length");
            }
            if info.detects_violations {
                tags.push("violations");
            }
            if info.lossy {
                tags.push("lossy");
            }
            if info.bits_per_symbol > 1 {
                tags.push("2 bits/symbol");
            }
            let tags = if tags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", tags.join(", "))
            };
            println!(
                "  {} {}{}",
                format!("{:<24}", info.id).green(),
                info.description,
                tags.dimmed()
            );
        }
        println!();
    }
}
