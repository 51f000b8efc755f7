//! # Mock Groth16
//!
//! Proofs use the snarkjs Groth16 layout:
//!
//! ```json
//! {
//!   "pi_a": ["<x>", "<y>", "1"],
//!   "pi_b": [["<x.c0>", "<x.c1>"], ["<y.c0>", "<y.c1>"], ["1", "0"]],
//!   "pi_c": ["<x>", "<y>", "1"],
//!   "protocol": "groth16",
//!   "curve": "bn128"
//! }
//! ```
//!
//! The exported calldata swaps each G2 pair to `(c1, c0)`, which is the
//! order the EVM pairing precompile and therefore the verifier contract
//! expect.

use std::sync::Arc;

use num_bigint::BigUint;
use zkcd_calldata::CalldataArgumentSet;
use zkcd_core::{
    base_field_modulus, scalar_field_modulus, Fields, NormalizedProofTree, ProofSystemKind,
    ProofTree,
};

use super::{decimal, read_coords, read_signals, signals_tree, word_hex, ElementDeriver};
use crate::circuit::{Circuit, CircuitRegistry};
use crate::traits::{
    CircuitArtifacts, ContractError, ExportError, ProofOutput, ProvingEngine, ProvingError,
    VerifierContract, Witness,
};

/// Proof elements in proof order (`b` not yet swapped).
struct Groth16Points {
    a: [BigUint; 2],
    b: [[BigUint; 2]; 2],
    c: [BigUint; 2],
}

impl Groth16Points {
    fn derive(deriver: &ElementDeriver, signals: &[BigUint]) -> Self {
        let q = base_field_modulus();
        let e = |label: &str| deriver.derive(label, signals, &q);
        Self {
            a: [e("pi_a.x"), e("pi_a.y")],
            b: [
                [e("pi_b.x.c0"), e("pi_b.x.c1")],
                [e("pi_b.y.c0"), e("pi_b.y.c1")],
            ],
            c: [e("pi_c.x"), e("pi_c.y")],
        }
    }

    /// `b` as the verifier contract receives it.
    fn wire_b(&self) -> [[BigUint; 2]; 2] {
        let [x, y] = &self.b;
        [[x[1].clone(), x[0].clone()], [y[1].clone(), y[0].clone()]]
    }
}

fn affine(point: &[BigUint; 2]) -> ProofTree {
    ProofTree::Sequence(vec![decimal(&point[0]), decimal(&point[1]), ProofTree::text("1")])
}

/// Mock snarkjs `groth16.fullProve` / `groth16.exportSolidityCallData`.
#[derive(Debug, Clone)]
pub struct MockGroth16Engine {
    registry: Arc<CircuitRegistry>,
}

impl MockGroth16Engine {
    pub fn new(registry: Arc<CircuitRegistry>) -> Self {
        Self { registry }
    }
}

impl ProvingEngine for MockGroth16Engine {
    fn system(&self) -> ProofSystemKind {
        ProofSystemKind::Groth16
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
        let points = Groth16Points::derive(
            &ElementDeriver::new(ProofSystemKind::Groth16, &circuit.id),
            &signals,
        );

        let mut proof = Fields::new();
        proof.insert("pi_a", affine(&points.a));
        proof.insert(
            "pi_b",
            ProofTree::Sequence(vec![
                ProofTree::Sequence(points.b[0].iter().map(decimal).collect()),
                ProofTree::Sequence(points.b[1].iter().map(decimal).collect()),
                ProofTree::Sequence(vec![ProofTree::text("1"), ProofTree::text("0")]),
            ]),
        );
        proof.insert("pi_c", affine(&points.c));
        proof.insert("protocol", ProofTree::text("groth16"));
        proof.insert("curve", ProofTree::text("bn128"));

        tracing::debug!(
            circuit = %circuit.id,
            program = %artifacts.program.display(),
            "generated mock groth16 proof"
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
        let a: [BigUint; 2] = read_coords(tree, "pi_a")?;
        let c: [BigUint; 2] = read_coords(tree, "pi_c")?;
        let b_rows = tree
            .get("pi_b")
            .ok_or(ExportError::MissingField { field: "pi_b" })?
            .as_sequence()
            .ok_or(ExportError::MalformedPoint { field: "pi_b" })?;
        let mut b: [[BigUint; 2]; 2] = Default::default();
        for (row, slot) in b.iter_mut().enumerate() {
            let pair = b_rows
                .get(row)
                .and_then(ProofTree::as_sequence)
                .filter(|pair| pair.len() >= 2)
                .ok_or(ExportError::MalformedPoint { field: "pi_b" })?;
            for (i, coord) in slot.iter_mut().enumerate() {
                *coord = pair[i]
                    .to_canonical_uint()
                    .ok_or(ExportError::MalformedPoint { field: "pi_b" })?;
            }
        }
        let inputs = read_signals(public_signals)?;

        let q = |v: &BigUint| format!("\"{}\"", word_hex(v));
        Ok(format!(
            "[{}, {}],[[{}, {}],[{}, {}]],[{}, {}],[{}]",
            q(&a[0]),
            q(&a[1]),
            q(&b[0][1]),
            q(&b[0][0]),
            q(&b[1][1]),
            q(&b[1][0]),
            q(&c[0]),
            q(&c[1]),
            inputs.iter().map(q).collect::<Vec<_>>().join(",")
        ))
    }
}

/// Mock of the generated Solidity Groth16 verifier for one circuit.
#[derive(Debug, Clone)]
pub struct MockGroth16Verifier {
    circuit_id: String,
    public_signals: usize,
    deriver: ElementDeriver,
}

impl MockGroth16Verifier {
    pub fn deploy(circuit: &Circuit) -> Self {
        Self {
            circuit_id: circuit.id.clone(),
            public_signals: circuit.public_signal_count(),
            deriver: ElementDeriver::new(ProofSystemKind::Groth16, &circuit.id),
        }
    }
}

impl VerifierContract for MockGroth16Verifier {
    fn system(&self) -> ProofSystemKind {
        ProofSystemKind::Groth16
    }

    /// An input outside the scalar field reverts. A wrong input count or any
    /// other malformed proof returns `false`, as the PLONK verifier does.
    fn verify_proof(&self, args: &CalldataArgumentSet) -> Result<bool, ContractError> {
        let CalldataArgumentSet::Groth16(args) = args else {
            return Err(ContractError::SystemMismatch {
                expected: ProofSystemKind::Groth16,
                found: args.system(),
            });
        };
        let r = scalar_field_modulus();
        if args.public_inputs.iter().any(|x| x >= &r) {
            return Err(ContractError::Reverted(
                "verifier-gte-snark-scalar-field".into(),
            ));
        }

        if args.public_inputs.len() != self.public_signals {
            tracing::debug!(
                circuit = %self.circuit_id,
                public_inputs = args.public_inputs.len(),
                expected = self.public_signals,
                "groth16 verifyProof rejected input count"
            );
            return Ok(false);
        }

        let q = base_field_modulus();
        let mut coords = args.a.iter().chain(args.b.iter().flatten()).chain(args.c.iter());
        if coords.any(|v| v >= &q) {
            return Ok(false);
        }

        let expected = Groth16Points::derive(&self.deriver, &args.public_inputs);
        let valid = args.a == expected.a && args.b == expected.wire_b() && args.c == expected.c;
        tracing::debug!(circuit = %self.circuit_id, valid, "groth16 verifyProof");
        Ok(valid)
    }
}
