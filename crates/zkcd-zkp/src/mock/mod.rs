//! # Mock Backend
//!
//! A deterministic, transparent stand-in for snarkjs and the generated
//! Solidity verifiers.
//!
//! ## How It Works
//!
//! Each (proof system, circuit) pair gets a 32-byte binding key:
//!
//! ```text
//! key = SHA256("zkcd-mock" || system || 0x00 || circuit_id)
//! ```
//!
//! Every proof element is derived from that key, a label naming the
//! element, and the public signals, then reduced into the right field:
//!
//! ```text
//! element = SHA256(key || label || 0x00 || len(s_0) || s_0 || ...) mod p
//! ```
//!
//! The prover emits these elements in snarkjs's proof layout; the verifier
//! recomputes them from the public inputs it is called with and compares.
//! A proof therefore verifies only for the circuit and public signals it was
//! produced for.
//!
//! ## Security Warning
//!
//! **NOT PRIVATE, NOT SOUND.** Anyone can derive a valid "proof" for any
//! public signal. Use only to exercise calldata handling.

pub mod groth16;
pub mod plonk;

use std::sync::Arc;

use num_bigint::BigUint;
use sha2::{Digest, Sha256};
use zkcd_core::{NormalizedProofTree, ProofSystemKind, ProofTree};

use crate::circuit::CircuitRegistry;
use crate::traits::{
    Backend, CircuitArtifacts, ContractError, ExportError, ProvingEngine, VerifierContract,
};

pub use groth16::{MockGroth16Engine, MockGroth16Verifier};
pub use plonk::{MockPlonkEngine, MockPlonkVerifier};

const DOMAIN_TAG: &[u8] = b"zkcd-mock";

/// Derives proof elements for one (system, circuit) binding.
#[derive(Debug, Clone)]
pub(crate) struct ElementDeriver {
    key: [u8; 32],
}

impl ElementDeriver {
    pub(crate) fn new(system: ProofSystemKind, circuit_id: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN_TAG);
        hasher.update(system.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(circuit_id.as_bytes());
        Self {
            key: hasher.finalize().into(),
        }
    }

    pub(crate) fn derive(&self, label: &str, signals: &[BigUint], modulus: &BigUint) -> BigUint {
        let mut hasher = Sha256::new();
        hasher.update(self.key);
        hasher.update(label.as_bytes());
        hasher.update([0u8]);
        for signal in signals {
            let bytes = signal.to_bytes_be();
            hasher.update((bytes.len() as u32).to_be_bytes());
            hasher.update(&bytes);
        }
        BigUint::from_bytes_be(&hasher.finalize()) % modulus
    }
}

/// `"0x"` followed by the value as 64 zero-padded hex digits.
pub(crate) fn word_hex(value: &BigUint) -> String {
    format!("0x{:0>64}", value.to_str_radix(16))
}

/// Decimal string leaf, the way snarkjs writes proof elements.
pub(crate) fn decimal(value: &BigUint) -> ProofTree {
    ProofTree::DecimalString(value.to_string())
}

pub(crate) fn signals_tree(signals: &[BigUint]) -> ProofTree {
    ProofTree::Sequence(signals.iter().map(decimal).collect())
}

/// Read the public signals out of a normalized tree.
pub(crate) fn read_signals(signals: &NormalizedProofTree) -> Result<Vec<BigUint>, ExportError> {
    signals
        .as_tree()
        .as_sequence()
        .ok_or(ExportError::MalformedSignals)?
        .iter()
        .map(|s| s.to_canonical_uint().ok_or(ExportError::MalformedSignals))
        .collect()
}

/// Read the first `N` integers of the sequence stored under `field`.
pub(crate) fn read_coords<const N: usize>(
    proof: &ProofTree,
    field: &'static str,
) -> Result<[BigUint; N], ExportError> {
    let items = proof
        .get(field)
        .ok_or(ExportError::MissingField { field })?
        .as_sequence()
        .ok_or(ExportError::MalformedPoint { field })?;
    if items.len() < N {
        return Err(ExportError::MalformedPoint { field });
    }
    let mut out: [BigUint; N] = std::array::from_fn(|_| BigUint::default());
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = item
            .to_canonical_uint()
            .ok_or(ExportError::MalformedPoint { field })?;
    }
    Ok(out)
}

/// Read a scalar field.
pub(crate) fn read_scalar(proof: &ProofTree, field: &'static str) -> Result<BigUint, ExportError> {
    proof
        .get(field)
        .ok_or(ExportError::MissingField { field })?
        .to_canonical_uint()
        .ok_or(ExportError::MalformedPoint { field })
}

/// Transparent mock backend for both proof systems.
///
/// Engines share one immutable circuit registry. Each `deploy_verifier`
/// call returns a new, independent contract.
#[derive(Debug, Clone)]
pub struct MockBackend {
    registry: Arc<CircuitRegistry>,
    groth16: MockGroth16Engine,
    plonk: MockPlonkEngine,
}

impl MockBackend {
    pub fn new(registry: CircuitRegistry) -> Self {
        let registry = Arc::new(registry);
        Self {
            groth16: MockGroth16Engine::new(Arc::clone(&registry)),
            plonk: MockPlonkEngine::new(Arc::clone(&registry)),
            registry,
        }
    }

    pub fn registry(&self) -> &CircuitRegistry {
        &self.registry
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(CircuitRegistry::with_builtin())
    }
}

impl Backend for MockBackend {
    fn engine(&self, system: ProofSystemKind) -> &dyn ProvingEngine {
        match system {
            ProofSystemKind::Groth16 => &self.groth16,
            ProofSystemKind::Plonk => &self.plonk,
        }
    }

    fn deploy_verifier(
        &self,
        system: ProofSystemKind,
        circuit: &CircuitArtifacts,
    ) -> Result<Box<dyn VerifierContract>, ContractError> {
        let compiled = self
            .registry
            .get(&circuit.circuit_id)
            .ok_or_else(|| ContractError::UnknownCircuit(circuit.circuit_id.clone()))?;
        tracing::debug!(circuit = %compiled.id, %system, "deployed mock verifier");
        Ok(match system {
            ProofSystemKind::Groth16 => Box::new(MockGroth16Verifier::deploy(compiled)),
            ProofSystemKind::Plonk => Box::new(MockPlonkVerifier::deploy(compiled)),
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use zkcd_calldata::{assemble, CalldataArgumentSet};
    use zkcd_core::{normalize, scalar_field_modulus};

    /// Prove, export and assemble the Multiplier3 calldata for one witness.
    fn calldata(system: ProofSystemKind, a: u64, b: u64, c: u64) -> CalldataArgumentSet {
        let backend = MockBackend::default();
        let engine = backend.engine(system);
        let artifacts = CircuitArtifacts::conventional("contracts/circuits", "Multiplier3", system);
        let witness = [("a", a), ("b", b), ("c", c)]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let out = engine.prove(&artifacts, &witness).unwrap();
        let raw = engine
            .export_calldata(&normalize(out.proof), &normalize(out.public_signals))
            .unwrap();
        assemble(system, &raw).unwrap()
    }

    fn verify(system: ProofSystemKind, args: &CalldataArgumentSet) -> bool {
        let artifacts = CircuitArtifacts::new("Multiplier3", "m.wasm", "m.zkey");
        MockBackend::default()
            .deploy_verifier(system, &artifacts)
            .unwrap()
            .verify_proof(args)
            .unwrap()
    }

    fn shift_signal(args: &mut CalldataArgumentSet, delta: u64) {
        let inputs = match args {
            CalldataArgumentSet::Groth16(g) => &mut g.public_inputs,
            CalldataArgumentSet::Plonk(p) => &mut p.public_inputs,
        };
        inputs[0] = (&inputs[0] + delta) % scalar_field_modulus();
    }

    proptest! {
        /// Every satisfying witness yields calldata the verifier accepts.
        #[test]
        fn round_trip_verifies(a in any::<u64>(), b in any::<u64>(), c in any::<u64>(), plonk in any::<bool>()) {
            let system = if plonk { ProofSystemKind::Plonk } else { ProofSystemKind::Groth16 };
            let args = calldata(system, a, b, c);
            let product = BigUint::from(a) * b * c;
            prop_assert_eq!(args.public_inputs(), &[product][..]);
            prop_assert!(verify(system, &args));
        }

        /// Changing the public signal after proving is always rejected.
        #[test]
        fn changed_signal_rejected(a in any::<u64>(), b in any::<u64>(), c in any::<u64>(), delta in 1u64..1_000, plonk in any::<bool>()) {
            let system = if plonk { ProofSystemKind::Plonk } else { ProofSystemKind::Groth16 };
            let mut args = calldata(system, a, b, c);
            shift_signal(&mut args, delta);
            prop_assert!(!verify(system, &args));
        }
    }
}
