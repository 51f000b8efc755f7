//! # Proving Engine and Verifier Contract Traits
//!
//! The proving engine and the on-chain verifier are external collaborators.
//! These traits are the seams the harness talks to; the mock backend in
//! [`crate::mock`] implements them, and a real snarkjs/EVM binding would
//! implement the same interface.
//!
//! ## Security Invariant
//!
//! A proving failure and a verifier returning `false` are different
//! outcomes and travel through different types: `ProvingError` from
//! `prove()`, `Ok(false)` from `verify_proof()`. The harness never folds one
//! into the other.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zkcd_calldata::CalldataArgumentSet;
use zkcd_core::{NormalizedProofTree, ProofSystemKind, ProofTree};

/// Named witness values as decimal strings, e.g. `{"a": "1", "b": "2"}`.
pub type Witness = BTreeMap<String, String>;

/// Error during proof generation.
#[derive(Error, Debug)]
pub enum ProvingError {
    /// No compiled program is known for the circuit.
    #[error("unknown circuit: {0}")]
    UnknownCircuit(String),

    /// The witness omits a required input signal.
    #[error("circuit {circuit}: missing input signal {signal}")]
    MissingSignal { circuit: String, signal: String },

    /// The witness names a signal the circuit does not declare.
    #[error("circuit {circuit}: no input signal named {signal}")]
    UnknownSignal { circuit: String, signal: String },

    /// A witness value is not an unsigned integer.
    #[error("signal {signal}: not an unsigned integer: {value:?}")]
    InvalidSignal { signal: String, value: String },

    /// A witness value does not fit in the scalar field.
    #[error("signal {signal}: value is not below the scalar field modulus")]
    SignalOutOfField { signal: String },
}

/// Error while rendering a normalized proof as native calldata text.
#[derive(Error, Debug)]
pub enum ExportError {
    /// A proof field the exporter needs is absent.
    #[error("proof has no {field} field")]
    MissingField { field: &'static str },

    /// A proof field is present but not the expected integer shape.
    #[error("proof field {field} is not a well-formed element")]
    MalformedPoint { field: &'static str },

    /// Public signals are not a sequence of unsigned integers.
    #[error("public signals must be a sequence of unsigned integers")]
    MalformedSignals,
}

/// Error raised by a verifier contract call, as opposed to a `false` result.
#[derive(Error, Debug)]
pub enum ContractError {
    /// The argument set belongs to the other proof system.
    #[error("verifier expects {expected} calldata, got {found}")]
    SystemMismatch {
        expected: ProofSystemKind,
        found: ProofSystemKind,
    },

    /// No verifier can be deployed for the circuit.
    #[error("no verifier available for circuit {0}")]
    UnknownCircuit(String),

    /// The contract reverted.
    #[error("verifier reverted: {0}")]
    Reverted(String),

    /// An argument could not be encoded for the call.
    #[error("argument encoding failed: {0}")]
    MalformedBytes(String),
}

/// Paths to a circuit's compiled program and proving key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitArtifacts {
    pub circuit_id: String,
    /// Witness generator (`<id>_js/<id>.wasm`).
    pub program: PathBuf,
    /// Proving key (`.zkey`).
    pub proving_key: PathBuf,
}

impl CircuitArtifacts {
    pub fn new(
        circuit_id: impl Into<String>,
        program: impl Into<PathBuf>,
        proving_key: impl Into<PathBuf>,
    ) -> Self {
        Self {
            circuit_id: circuit_id.into(),
            program: program.into(),
            proving_key: proving_key.into(),
        }
    }

    /// The circom/snarkjs directory layout under `root`. Groth16 builds live
    /// in `<root>/<id>/` with `circuit_final.zkey`; PLONK builds in
    /// `<root>/_plonk<id>/` with `circuit_0000.zkey`. Both keep the witness
    /// generator at `<id>_js/<id>.wasm`.
    pub fn conventional(root: impl Into<PathBuf>, circuit_id: &str, system: ProofSystemKind) -> Self {
        let root = root.into();
        let (dir, key) = match system {
            ProofSystemKind::Groth16 => (root.join(circuit_id), "circuit_final.zkey"),
            ProofSystemKind::Plonk => (root.join(format!("_plonk{circuit_id}")), "circuit_0000.zkey"),
        };
        Self {
            circuit_id: circuit_id.to_string(),
            program: dir
                .join(format!("{circuit_id}_js"))
                .join(format!("{circuit_id}.wasm")),
            proving_key: dir.join(key),
        }
    }
}

/// What a proving engine hands back: the proof and its public signals,
/// both in the engine's loosely typed output format.
#[derive(Debug, Clone, PartialEq)]
pub struct ProofOutput {
    pub proof: ProofTree,
    pub public_signals: ProofTree,
}

/// A zk-SNARK proving library for one proof system.
pub trait ProvingEngine: Send + Sync {
    fn system(&self) -> ProofSystemKind;

    /// Generate a proof. Fails when the witness does not satisfy the circuit.
    fn prove(
        &self,
        circuit: &CircuitArtifacts,
        witness: &Witness,
    ) -> Result<ProofOutput, ProvingError>;

    /// Render a normalized proof and its signals as the library's native
    /// verifier calldata text.
    fn export_calldata(
        &self,
        proof: &NormalizedProofTree,
        public_signals: &NormalizedProofTree,
    ) -> Result<String, ExportError>;
}

/// A deployed on-chain verifier.
pub trait VerifierContract: Send + Sync {
    fn system(&self) -> ProofSystemKind;

    /// Call `verifyProof` with the given arguments.
    fn verify_proof(&self, args: &CalldataArgumentSet) -> Result<bool, ContractError>;
}

/// Source of proving engines and freshly deployed verifiers.
pub trait Backend {
    fn engine(&self, system: ProofSystemKind) -> &dyn ProvingEngine;

    /// Deploy a new verifier for `circuit`. Every call yields an
    /// independent contract.
    fn deploy_verifier(
        &self,
        system: ProofSystemKind,
        circuit: &CircuitArtifacts,
    ) -> Result<Box<dyn VerifierContract>, ContractError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn conventional_groth16_layout() {
        let artifacts = CircuitArtifacts::conventional(
            "contracts/circuits",
            "HelloWorld",
            ProofSystemKind::Groth16,
        );
        assert_eq!(
            artifacts.program,
            Path::new("contracts/circuits/HelloWorld/HelloWorld_js/HelloWorld.wasm")
        );
        assert_eq!(
            artifacts.proving_key,
            Path::new("contracts/circuits/HelloWorld/circuit_final.zkey")
        );
    }

    #[test]
    fn conventional_plonk_layout() {
        let artifacts = CircuitArtifacts::conventional(
            "contracts/circuits",
            "Multiplier3",
            ProofSystemKind::Plonk,
        );
        assert_eq!(
            artifacts.proving_key,
            Path::new("contracts/circuits/_plonkMultiplier3/circuit_0000.zkey")
        );
        assert_eq!(
            artifacts.program,
            Path::new("contracts/circuits/_plonkMultiplier3/Multiplier3_js/Multiplier3.wasm")
        );
    }

    #[test]
    fn errors_display_context() {
        let err = ProvingError::MissingSignal {
            circuit: "Multiplier3".into(),
            signal: "c".into(),
        };
        assert_eq!(err.to_string(), "circuit Multiplier3: missing input signal c");
        let err = ContractError::SystemMismatch {
            expected: ProofSystemKind::Plonk,
            found: ProofSystemKind::Groth16,
        };
        assert_eq!(err.to_string(), "verifier expects plonk calldata, got groth16");
    }
}
