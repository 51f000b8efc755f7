//! # Run Subcommand
//!
//! Runs a verification suite against the mock backend and prints a report.
//! The exit code is 1 when any scenario fails.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use zkcd_harness::{run_suite, SuiteConfig, SuiteReport};
use zkcd_zkp::MockBackend;

/// Report output format.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the run subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Suite file. The built-in suite runs when omitted.
    #[arg(long, env = "ZKCD_SUITE")]
    pub suite: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t)]
    pub format: ReportFormat,
}

/// Execute the run subcommand.
pub fn run_suite_command(args: &RunArgs) -> Result<u8> {
    let suite = match &args.suite {
        Some(path) => SuiteConfig::from_path(path)
            .with_context(|| format!("cannot load suite {}", path.display()))?,
        None => SuiteConfig::builtin(),
    };
    let report = execute(&suite);
    println!("{}", render(&report, args.format)?);
    Ok(if report.is_success() { 0 } else { 1 })
}

/// Run `suite` on a mock backend that knows the suite's circuits.
pub fn execute(suite: &SuiteConfig) -> SuiteReport {
    let backend = MockBackend::new(suite.registry());
    run_suite(&backend, suite)
}

fn render(report: &SuiteReport, format: ReportFormat) -> Result<String> {
    Ok(match format {
        ReportFormat::Text => report.to_string(),
        ReportFormat::Json => serde_json::to_string_pretty(report)?,
    })
}
