//! # Proof System Tag
//!
//! The two proof systems whose verifier contracts this workspace targets.
//! Every argument set, engine and contract carries this tag so a Groth16
//! argument set can never be routed to a PLONK verifier unnoticed.

use serde::{Deserialize, Serialize};

/// A zk-SNARK proof system with its own verifier calldata layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofSystemKind {
    /// Groth16: `verifyProof(a, b, c, input)`.
    Groth16,
    /// PLONK: `verifyProof(proof, pubSignals)`.
    Plonk,
}

impl ProofSystemKind {
    /// Returns the identifier proving libraries use in the `protocol` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groth16 => "groth16",
            Self::Plonk => "plonk",
        }
    }
}

impl std::fmt::Display for ProofSystemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
