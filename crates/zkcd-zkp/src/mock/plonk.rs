//! # Mock PLONK
//!
//! Proofs carry nine G1 commitments and six scalar evaluations, named as
//! snarkjs names them. The exported proof blob is every word as a 32-byte
//! big-endian integer, commitments first:
//!
//! ```text
//! A B C Z T1 T2 T3 Wxi Wxiw | eval_a eval_b eval_c eval_s1 eval_s2 eval_zw
//! ```
//!
//! Commitment coordinates live in the base field, evaluations in the scalar
//! field.

use std::sync::Arc;

use num_bigint::BigUint;
use zkcd_calldata::CalldataArgumentSet;
use zkcd_core::{
    base_field_modulus, scalar_field_modulus, Fields, NormalizedProofTree, ProofSystemKind,
    ProofTree, FIELD_ELEMENT_BYTES,
};

use super::{decimal, read_coords, read_scalar, read_signals, signals_tree, word_hex, ElementDeriver};
use crate::circuit::{Circuit, CircuitRegistry};
use crate::traits::{
    CircuitArtifacts, ContractError, ExportError, ProofOutput, ProvingEngine, ProvingError,
    VerifierContract, Witness,
};

const COMMITMENTS: [&str; 9] = ["A", "B", "C", "Z", "T1", "T2", "T3", "Wxi", "Wxiw"];
const EVALUATIONS: [&str; 6] = ["eval_a", "eval_b", "eval_c", "eval_s1", "eval_s2", "eval_zw"];

/// Words in an exported proof blob.
pub const PLONK_PROOF_WORDS: usize = COMMITMENTS.len() * 2 + EVALUATIONS.len();

/// Bytes in an exported proof blob.
pub const PLONK_PROOF_BYTES: usize = PLONK_PROOF_WORDS * FIELD_ELEMENT_BYTES;

/// Proof words in blob order.
fn expected_words(deriver: &ElementDeriver, signals: &[BigUint]) -> Vec<BigUint> {
    let q = base_field_modulus();
    let r = scalar_field_modulus();
    let mut words = Vec::with_capacity(PLONK_PROOF_WORDS);
    for name in COMMITMENTS {
        words.push(deriver.derive(&format!("{name}.x"), signals, &q));
        words.push(deriver.derive(&format!("{name}.y"), signals, &q));
    }
    for name in EVALUATIONS {
        words.push(deriver.derive(name, signals, &r));
    }
    words
}

/// Mock snarkjs `plonk.fullProve` / `plonk.exportSolidityCallData`.
#[derive(Debug, Clone)]
pub struct MockPlonkEngine {
    registry: Arc<CircuitRegistry>,
}

impl MockPlonkEngine {
    pub fn new(registry: Arc<CircuitRegistry>) -> Self {
        Self { registry }
    }
}

impl ProvingEngine for MockPlonkEngine {
    fn system(&self) -> ProofSystemKind {
        ProofSystemKind::Plonk
    }

    fn prove(
        &self,
        artifacts: &CircuitArtifacts,
        witness: &Witness,
    ) -> Result<ProofOutput, ProvingError> {
        let circuit = self
            .registry
            .get(&artifacts.circuit_id)
            .ok_or_else(|| ProvingError::UnknownCircuit(artifacts.circuit_id.clone()))?;
        let signals = circuit.evaluate(witness)?;
        let words = expected_words(
            &ElementDeriver::new(ProofSystemKind::Plonk, &circuit.id),
            &signals,
        );

        let (coords, evals) = words.split_at(COMMITMENTS.len() * 2);
        let mut proof = Fields::new();
        for (name, xy) in COMMITMENTS.iter().zip(coords.chunks(2)) {
            proof.insert(
                *name,
                ProofTree::Sequence(vec![decimal(&xy[0]), decimal(&xy[1]), ProofTree::text("1")]),
            );
        }
        for (name, value) in EVALUATIONS.iter().zip(evals) {
            proof.insert(*name, decimal(value));
        }
        proof.insert("protocol", ProofTree::text("plonk"));
        proof.insert("curve", ProofTree::text("bn128"));

        tracing::debug!(
            circuit = %circuit.id,
            program = %artifacts.program.display(),
            "generated mock plonk proof"
        );
        Ok(ProofOutput {
            proof: ProofTree::Mapping(proof),
            public_signals: signals_tree(&signals),
        })
    }

    fn export_calldata(
        &self,
        proof: &NormalizedProofTree,
        public_signals: &NormalizedProofTree,
    ) -> Result<String, ExportError> {
        let tree = proof.as_tree();
        let mut blob = String::from("0x");
        for name in COMMITMENTS {
            let [x, y]: [BigUint; 2] = read_coords(tree, name)?;
            blob.push_str(&word_hex(&x)[2..]);
            blob.push_str(&word_hex(&y)[2..]);
        }
        for name in EVALUATIONS {
            blob.push_str(&word_hex(&read_scalar(tree, name)?)[2..]);
        }
        let inputs: Vec<String> = read_signals(public_signals)?
            .iter()
            .map(|v| format!("\"{}\"", word_hex(v)))
            .collect();
        Ok(format!("{blob},[{}]", inputs.join(",")))
    }
}

/// Mock of the generated Solidity PLONK verifier for one circuit.
#[derive(Debug, Clone)]
pub struct MockPlonkVerifier {
    circuit_id: String,
    public_signals: usize,
    deriver: ElementDeriver,
}

impl MockPlonkVerifier {
    pub fn deploy(circuit: &Circuit) -> Self {
        Self {
            circuit_id: circuit.id.clone(),
            public_signals: circuit.public_signal_count(),
            deriver: ElementDeriver::new(ProofSystemKind::Plonk, &circuit.id),
        }
    }
}

impl VerifierContract for MockPlonkVerifier {
    fn system(&self) -> ProofSystemKind {
        ProofSystemKind::Plonk
    }

    /// A blob that is not hex cannot be encoded as `bytes` and fails the
    /// call. Every other malformed proof returns `false`.
    fn verify_proof(&self, args: &CalldataArgumentSet) -> Result<bool, ContractError> {
        let CalldataArgumentSet::Plonk(args) = args else {
            return Err(ContractError::SystemMismatch {
                expected: ProofSystemKind::Plonk,
                found: args.system(),
            });
        };
        let body = args
            .proof_blob
            .strip_prefix("0x")
            .or_else(|| args.proof_blob.strip_prefix("0X"))
            .unwrap_or(&args.proof_blob);
        let bytes = hex::decode(body).map_err(|e| ContractError::MalformedBytes(e.to_string()))?;

        let r = scalar_field_modulus();
        if bytes.len() != PLONK_PROOF_BYTES
            || args.public_inputs.len() != self.public_signals
            || args.public_inputs.iter().any(|x| x >= &r)
        {
            tracing::debug!(
                circuit = %self.circuit_id,
                blob_bytes = bytes.len(),
                public_inputs = args.public_inputs.len(),
                "plonk verifyProof rejected malformed proof"
            );
            return Ok(false);
        }

        let words: Vec<BigUint> = bytes
            .chunks(FIELD_ELEMENT_BYTES)
            .map(BigUint::from_bytes_be)
            .collect();
        let valid = words == expected_words(&self.deriver, &args.public_inputs);
        tracing::debug!(circuit = %self.circuit_id, valid, "plonk verifyProof");
        Ok(valid)
    }
}
