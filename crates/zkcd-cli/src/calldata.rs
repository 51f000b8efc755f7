//! # Calldata Subcommand
//!
//! Assembles verifier arguments from the text `exportSolidityCallData`
//! produced and prints them as a JSON argument list, integers in decimal.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use zkcd_calldata::assemble;
use zkcd_core::ProofSystemKind;

use crate::read_input;

/// Proof system selector.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystemArg {
    Groth16,
    Plonk,
}

impl From<SystemArg> for ProofSystemKind {
    fn from(arg: SystemArg) -> Self {
        match arg {
            SystemArg::Groth16 => ProofSystemKind::Groth16,
            SystemArg::Plonk => ProofSystemKind::Plonk,
        }
    }
}

/// Arguments for the calldata subcommand.
#[derive(Args, Debug)]
pub struct CalldataArgs {
    /// Proof system that exported the calldata.
    #[arg(value_enum)]
    pub system: SystemArg,

    /// File holding the exported calldata text (`-` for stdin).
    pub input: PathBuf,

    /// Pretty-print the result.
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the calldata subcommand.
pub fn run_calldata(args: &CalldataArgs) -> Result<u8> {
    let text = read_input(&args.input)?;
    println!("{}", assemble_text(args.system.into(), &text, args.pretty)?);
    Ok(0)
}

/// Assemble exported calldata text and render the argument set as JSON.
pub fn assemble_text(system: ProofSystemKind, text: &str, pretty: bool) -> Result<String> {
    let args = assemble(system, text.trim())
        .with_context(|| format!("cannot assemble {system} calldata"))?;
    let value = args.to_json();
    if pretty {
        Ok(serde_json::to_string_pretty(&value)?)
    } else {
        Ok(value.to_string())
    }
}
