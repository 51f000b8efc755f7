//! # zkcd-zkp: Proof System Seams
//!
//! Defines how the harness reaches the two external collaborators of the
//! calldata pipeline, and ships a stand-in for both.
//!
//! ## Architecture
//!
//! - **Traits** (`traits.rs`): `ProvingEngine` (prove, export native
//!   calldata), `VerifierContract` (`verifyProof`), and `Backend`, which
//!   hands out engines and deploys a fresh verifier per circuit.
//!
//! - **Circuits** (`circuit.rs`): the multiplier circuit family and a
//!   registry of compiled circuits.
//!
//! - **Mock** (`mock/`): `MockBackend`, a transparent deterministic backend
//!   for Groth16 and PLONK. Proof elements are SHA-256 derivations bound to
//!   the circuit and its public signals; the calldata text it exports has the
//!   same shape snarkjs emits.
//!
//! ## Crate Policy
//!
//! - The mock provides NO zero-knowledge and NO soundness. Anyone can
//!   recompute a "proof" for any public signal. It exists to exercise the
//!   normalization and calldata layers end to end.

pub mod circuit;
#[cfg(feature = "mock")]
pub mod mock;
pub mod traits;

pub use circuit::{Circuit, CircuitRegistry};
#[cfg(feature = "mock")]
pub use mock::MockBackend;
pub use traits::{
    Backend, CircuitArtifacts, ContractError, ExportError, ProofOutput, ProvingEngine,
    ProvingError, VerifierContract, Witness,
};
