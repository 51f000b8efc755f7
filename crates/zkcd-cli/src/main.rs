//! # zkcd CLI entry point
//!
//! Parses command-line arguments, sets up logging, and dispatches to the
//! subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use zkcd_cli::calldata::{run_calldata, CalldataArgs};
use zkcd_cli::normalize::{run_normalize, NormalizeArgs};
use zkcd_cli::suite::{run_suite_command, RunArgs};

/// zkcd: ZK proof normalization and verifier calldata assembly.
///
/// Canonicalizes proof JSON, repacks exported Groth16/PLONK calldata into
/// verifier arguments, and runs end-to-end verification suites.
#[derive(Parser, Debug)]
#[command(name = "zkcd", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// Ignored when RUST_LOG is set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Canonicalize the numeric leaves of a proof or signals JSON file.
    Normalize(NormalizeArgs),

    /// Assemble verifier arguments from exported calldata text.
    Calldata(CalldataArgs),

    /// Run a verification suite against the mock backend.
    Run(RunArgs),
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json);

    let result = match &cli.command {
        Commands::Normalize(args) => run_normalize(args),
        Commands::Calldata(args) => run_calldata(args),
        Commands::Run(args) => run_suite_command(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
