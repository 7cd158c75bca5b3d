//! `ftm-conformance`: validates a definition set before it is served.
//!
//! Runs the complete conformance suite across:
//! - schema references (`extends`, `schemata`, ranges, property name lists)
//! - inheritance (cycles, ancestor lists)
//! - properties (qualified names, reverse pairing)
//!
//! **Usage:**
//! ```text
//! ftm-conformance [--model <path>] [--json]
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use ftm_clients::{init_tracing, ModelArgs};
use ftm_conformance::{run_all, Severity};

/// Run the entity-type model conformance suite.
#[derive(Parser)]
#[command(
    name = "ftm-conformance",
    about = "Validate an entity-type definition set"
)]
struct Args {
    #[command(flatten)]
    model: ModelArgs,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let model = args.model.load()?;
    let report = run_all(&model);
    let failed = report.failure_count();

    if args.json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{out}");
    } else {
        println!("Model Conformance Report");
        println!("========================");
        println!();

        for result in &report.results {
            println!(
                "[{}] {}: {}",
                result.severity.as_str(),
                result.validator,
                result.message
            );
            for detail in &result.details {
                println!("       {}", detail);
            }
        }

        let passed = report
            .results
            .iter()
            .filter(|r| r.severity == Severity::Pass)
            .count();
        println!();
        println!(
            "Summary: {} passed, {} warnings, {} failed",
            passed,
            report.warning_count(),
            failed
        );
    }

    if failed > 0 {
        eprintln!("Conformance FAILED: {} check(s) did not pass.", failed);
        process::exit(1);
    }

    if !args.json {
        println!("Conformance PASSED.");
    }
    Ok(())
}
