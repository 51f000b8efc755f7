//! # Circuit Registry
//!
//! Circuits in this workspace belong to the multiplier family used by the
//! verifier test suites: every input signal is private and the single public
//! output is their product in the BN254 scalar field.
//!
//! - `HelloWorld`: `c <== a * b`.
//! - `Multiplier3`: `d <== a * b * c`.
//!
//! Further members can be declared in a suite file.

use std::collections::HashMap;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use zkcd_core::{parse_canonical_int, scalar_field_modulus};

use crate::traits::{ProvingError, Witness};

/// A multiplier circuit: named private inputs, one public product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    pub id: String,
    /// Input signal names in declaration order.
    pub inputs: Vec<String>,
}

impl Circuit {
    pub fn product(id: impl Into<String>, inputs: &[&str]) -> Self {
        Self {
            id: id.into(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn hello_world() -> Self {
        Self::product("HelloWorld", &["a", "b"])
    }

    pub fn multiplier3() -> Self {
        Self::product("Multiplier3", &["a", "b", "c"])
    }

    /// Number of public signals the circuit declares.
    pub fn public_signal_count(&self) -> usize {
        1
    }

    /// Compute the public signals for `witness`, checking it against the
    /// circuit's declared inputs.
    pub fn evaluate(&self, witness: &Witness) -> Result<Vec<BigUint>, ProvingError> {
        if let Some(extra) = witness.keys().find(|k| !self.inputs.contains(k)) {
            return Err(ProvingError::UnknownSignal {
                circuit: self.id.clone(),
                signal: extra.clone(),
            });
        }

        let modulus = scalar_field_modulus();
        let mut product = BigUint::from(1u32);
        for name in &self.inputs {
            let raw = witness.get(name).ok_or_else(|| ProvingError::MissingSignal {
                circuit: self.id.clone(),
                signal: name.clone(),
            })?;
            let value = parse_canonical_int(raw).ok_or_else(|| ProvingError::InvalidSignal {
                signal: name.clone(),
                value: raw.clone(),
            })?;
            if value >= modulus {
                return Err(ProvingError::SignalOutOfField {
                    signal: name.clone(),
                });
            }
            product = product * value % &modulus;
        }
        Ok(vec![product])
    }
}

/// Compiled circuits known to a backend, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct CircuitRegistry {
    circuits: HashMap<String, Circuit>,
}

impl CircuitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `HelloWorld` and `Multiplier3`.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Circuit::hello_world());
        registry.register(Circuit::multiplier3());
        registry
    }

    /// Add a circuit, replacing any previous circuit with the same id.
    pub fn register(&mut self, circuit: Circuit) {
        self.circuits.insert(circuit.id.clone(), circuit);
    }

    pub fn get(&self, id: &str) -> Option<&Circuit> {
        self.circuits.get(id)
    }

    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn witness(pairs: &[(&str, &str)]) -> Witness {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn hello_world_multiplies() {
        let out = Circuit::hello_world()
            .evaluate(&witness(&[("a", "1"), ("b", "2")]))
            .unwrap();
        assert_eq!(out, vec![BigUint::from(2u32)]);
    }

    #[test]
    fn multiplier3_multiplies() {
        let out = Circuit::multiplier3()
            .evaluate(&witness(&[("a", "1"), ("b", "2"), ("c", "3")]))
            .unwrap();
        assert_eq!(out, vec![BigUint::from(6u32)]);
    }

    #[test]
    fn product_wraps_in_scalar_field() {
        let r_minus_one = scalar_field_modulus() - 1u32;
        let out = Circuit::hello_world()
            .evaluate(&witness(&[("a", &r_minus_one.to_string()), ("b", "2")]))
            .unwrap();
        // (r - 1) * 2 = 2r - 2 ≡ r - 2
        assert_eq!(out, vec![scalar_field_modulus() - 2u32]);
    }

    #[test]
    fn missing_signal() {
        let err = Circuit::multiplier3()
            .evaluate(&witness(&[("a", "1"), ("b", "2")]))
            .unwrap_err();
        assert!(matches!(err, ProvingError::MissingSignal { ref signal, .. } if signal == "c"));
    }

    #[test]
    fn unknown_signal() {
        let err = Circuit::hello_world()
            .evaluate(&witness(&[("a", "1"), ("b", "2"), ("z", "3")]))
            .unwrap_err();
        assert!(matches!(err, ProvingError::UnknownSignal { ref signal, .. } if signal == "z"));
    }

    #[test]
    fn invalid_signal() {
        let err = Circuit::hello_world()
            .evaluate(&witness(&[("a", "one"), ("b", "2")]))
            .unwrap_err();
        assert!(matches!(err, ProvingError::InvalidSignal { .. }));
    }

    #[test]
    fn signal_out_of_field() {
        let r = scalar_field_modulus().to_string();
        let err = Circuit::hello_world()
            .evaluate(&witness(&[("a", &r), ("b", "2")]))
            .unwrap_err();
        assert!(matches!(err, ProvingError::SignalOutOfField { .. }));
    }

    #[test]
    fn registry_builtin() {
        let registry = CircuitRegistry::with_builtin();
        assert_eq!(registry.len(), 2);
        assert!(registry.get("HelloWorld").is_some());
        assert!(registry.get("Multiplier3").is_some());
        assert!(registry.get("Multiplier4").is_none());
    }
}
