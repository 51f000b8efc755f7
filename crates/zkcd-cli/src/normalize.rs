//! # Normalize Subcommand
//!
//! Prints the input JSON with every decimal or `0x` hex numeric string
//! rewritten as a plain decimal string. Key order is kept.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use zkcd_core::{normalize, ProofTree};

use crate::read_input;

/// Arguments for the normalize subcommand.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// JSON file holding a proof or public signals (`-` for stdin).
    pub input: PathBuf,

    /// Pretty-print the result.
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the normalize subcommand.
pub fn run_normalize(args: &NormalizeArgs) -> Result<u8> {
    let text = read_input(&args.input)?;
    println!("{}", normalize_text(&text, args.pretty)?);
    Ok(0)
}

/// Normalize a JSON document and render it back as JSON text.
pub fn normalize_text(text: &str, pretty: bool) -> Result<String> {
    let tree = ProofTree::from_json_str(text).context("input is not valid JSON")?;
    let value = normalize(tree).to_json();
    tracing::debug!(pretty, "normalized document");
    if pretty {
        Ok(serde_json::to_string_pretty(&value)?)
    } else {
        Ok(value.to_string())
    }
}
