//! SignalCodec CLI - run encode/decode round trips from transmit specs
//!
//! This binary validates transmit specs, runs them through the engine and
//! lists the available schemes.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

// Use modules from the library crate
use sigcodec_cli::commands;

/// SignalCodec - line coding and modulation round trips
#[derive(Parser)]
#[command(name = "sigcodec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a spec's round trip and print the report
    Transmit {
        /// Path to the spec JSON file
        #[arg(short, long)]
        spec: String,

        /// Budget profile (default, strict)
        #[arg(long, value_parser = ["default", "strict"])]
        budget: Option<String>,

        /// Directory to write <transmit_id>.report.json into
        #[arg(short, long)]
        out_dir: Option<String>,

        /// Output the report as JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,
    },

    /// Validate a spec file without running it
    Validate {
        /// Path to the spec JSON file
        #[arg(short, long)]
        spec: String,

        /// Budget profile (default, strict)
        #[arg(long, value_parser = ["default", "strict"])]
        budget: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the available schemes
    List {
        /// Only list one family (line_coding, analog_to_digital, digital_to_analog, analog_to_analog)
        #[arg(short, long)]
        family: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Transmit {
            spec,
            budget,
            out_dir,
            json,
            pretty,
        } => commands::transmit::run(&spec, budget.as_deref(), out_dir.as_deref(), json, pretty),
        Commands::Validate { spec, budget, json } => {
            commands::validate::run(&spec, budget.as_deref(), json)
        }
        Commands::List { family, json } => commands::list::run(family.as_deref(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
