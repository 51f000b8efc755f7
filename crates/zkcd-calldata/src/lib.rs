//! # zkcd-calldata: Verifier Calldata Assembly
//!
//! Groth16 and PLONK verifier contracts take the same proof data in very
//! different shapes:
//!
//! - **Groth16**: `verifyProof(uint[2] a, uint[2][2] b, uint[2] c, uint[] input)`.
//! - **PLONK**: `verifyProof(bytes proof, uint[] pubSignals)`.
//!
//! Both assemblers start from the raw calldata text the proving library
//! exports for a normalized proof and produce a [`CalldataArgumentSet`].
//!
//! ## Crate Policy
//!
//! - Assembly fails only when the exported text has the wrong shape. Bad
//!   proof *values* are the verifier's business and are passed through.
//! - Element order is never changed. In particular the G2 coordinate pairs
//!   of Groth16 `b` stay in the order the proving library emitted them.

pub mod args;
pub mod error;
pub mod groth16;
pub mod plonk;

pub use args::{CalldataArgumentSet, Groth16Args, PlonkArgs};
pub use error::CalldataError;
pub use groth16::{assemble_groth16, assemble_groth16_from_elements, flatten_groth16_calldata};
pub use plonk::{assemble_plonk, split_top_level};

use zkcd_core::ProofSystemKind;

/// Assemble exported calldata text with the assembler for `system`.
pub fn assemble(system: ProofSystemKind, raw: &str) -> Result<CalldataArgumentSet, CalldataError> {
    match system {
        ProofSystemKind::Groth16 => assemble_groth16(raw).map(CalldataArgumentSet::from),
        ProofSystemKind::Plonk => assemble_plonk(raw).map(CalldataArgumentSet::from),
    }
}
