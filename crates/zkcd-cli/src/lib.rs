//! # zkcd-cli: Command-Line Interface
//!
//! ## Subcommands
//!
//! - `normalize`: canonicalize every numeric leaf of a proof or signals
//!   JSON document.
//! - `calldata`: assemble Groth16 or PLONK verifier arguments from the text
//!   a proving library exported.
//! - `run`: run a verification suite against the mock backend.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; behavior lives in the library crates.
//! - Results go to stdout, logs to stderr.

pub mod calldata;
pub mod normalize;
pub mod suite;

use std::path::Path;

use anyhow::{Context, Result};

/// Read a whole input file, or stdin when `path` is `-`.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        return std::io::read_to_string(std::io::stdin()).context("cannot read stdin");
    }
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}
