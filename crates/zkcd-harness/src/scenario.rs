//! # Scenarios
//!
//! A scenario names a proof system, a circuit, and one of three kinds of
//! input. The kind fixes the expected `verifyProof` result:
//!
//! | kind | input | path to the verifier | expected |
//! |---|---|---|---|
//! | `positive` | satisfying witness | prove, normalize, export, assemble | `true` |
//! | `relation_negative` | satisfying witness plus replacement public inputs | same as positive | `false` |
//! | `structural_negative` | literal verifier arguments | passed straight to the verifier | `false` |
//!
//! In YAML the kind is a `kind:` tag next to the common fields:
//!
//! ```yaml
//! - name: groth16-multiplier3-wrong-product
//!   system: groth16
//!   circuit: Multiplier3
//!   kind: relation_negative
//!   witness: { a: "1", b: "2", c: "3" }
//!   public_inputs: ["7"]
//! ```
//!
//! Witness values and literal arguments are quoted strings, as in a snarkjs
//! `input.json`.

use serde::{Deserialize, Serialize};
use zkcd_calldata::{CalldataArgumentSet, Groth16Args, PlonkArgs};
use zkcd_core::{parse_canonical_int, ProofSystemKind};
use zkcd_zkp::Witness;

use crate::error::ConfigError;

/// One end-to-end verification case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub system: ProofSystemKind,
    pub circuit: String,
    #[serde(flatten)]
    pub kind: ScenarioKind,
}

/// What the scenario feeds the verifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioKind {
    /// A real proof for a satisfying witness.
    Positive { witness: Witness },

    /// A real proof whose public signals are replaced before export.
    RelationNegative {
        witness: Witness,
        public_inputs: Vec<String>,
    },

    /// Hand-written verifier arguments.
    StructuralNegative { args: LiteralArgs },
}

impl ScenarioKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive { .. } => "positive",
            Self::RelationNegative { .. } => "relation_negative",
            Self::StructuralNegative { .. } => "structural_negative",
        }
    }
}

/// Verifier arguments written out by hand, integers as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralArgs {
    Groth16 {
        a: [String; 2],
        b: [[String; 2]; 2],
        c: [String; 2],
        public_inputs: Vec<String>,
    },
    Plonk {
        proof_blob: String,
        public_inputs: Vec<String>,
    },
}

impl LiteralArgs {
    /// Groth16 arguments with every coordinate and `inputs` public inputs
    /// set to zero.
    pub fn zeroed_groth16(inputs: usize) -> Self {
        let pair = || ["0".to_string(), "0".to_string()];
        Self::Groth16 {
            a: pair(),
            b: [pair(), pair()],
            c: pair(),
            public_inputs: vec!["0".to_string(); inputs],
        }
    }

    pub fn plonk(proof_blob: &str, public_inputs: &[&str]) -> Self {
        Self::Plonk {
            proof_blob: proof_blob.to_string(),
            public_inputs: public_inputs.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn system(&self) -> ProofSystemKind {
        match self {
            Self::Groth16 { .. } => ProofSystemKind::Groth16,
            Self::Plonk { .. } => ProofSystemKind::Plonk,
        }
    }

    /// Parse every integer. The PLONK blob is passed through as written.
    pub fn to_argument_set(&self, scenario: &str) -> Result<CalldataArgumentSet, ConfigError> {
        let int = |value: &String| {
            parse_canonical_int(value).ok_or_else(|| ConfigError::InvalidLiteral {
                scenario: scenario.to_string(),
                value: value.clone(),
            })
        };
        let pair = |p: &[String; 2]| Ok::<_, ConfigError>([int(&p[0])?, int(&p[1])?]);
        Ok(match self {
            Self::Groth16 {
                a,
                b,
                c,
                public_inputs,
            } => Groth16Args {
                a: pair(a)?,
                b: [pair(&b[0])?, pair(&b[1])?],
                c: pair(c)?,
                public_inputs: public_inputs.iter().map(&int).collect::<Result<_, _>>()?,
            }
            .into(),
            Self::Plonk {
                proof_blob,
                public_inputs,
            } => PlonkArgs {
                proof_blob: proof_blob.clone(),
                public_inputs: public_inputs.iter().map(&int).collect::<Result<_, _>>()?,
            }
            .into(),
        })
    }
}

fn witness(pairs: &[(&str, &str)]) -> Witness {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Scenario {
    pub fn positive(
        name: &str,
        system: ProofSystemKind,
        circuit: &str,
        signals: &[(&str, &str)],
    ) -> Self {
        Self {
            name: name.to_string(),
            system,
            circuit: circuit.to_string(),
            kind: ScenarioKind::Positive {
                witness: witness(signals),
            },
        }
    }

    pub fn relation_negative(
        name: &str,
        system: ProofSystemKind,
        circuit: &str,
        signals: &[(&str, &str)],
        public_inputs: &[&str],
    ) -> Self {
        Self {
            name: name.to_string(),
            system,
            circuit: circuit.to_string(),
            kind: ScenarioKind::RelationNegative {
                witness: witness(signals),
                public_inputs: public_inputs.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    pub fn structural_negative(
        name: &str,
        system: ProofSystemKind,
        circuit: &str,
        args: LiteralArgs,
    ) -> Self {
        Self {
            name: name.to_string(),
            system,
            circuit: circuit.to_string(),
            kind: ScenarioKind::StructuralNegative { args },
        }
    }

    /// The `verifyProof` result this scenario requires.
    pub fn expected(&self) -> bool {
        matches!(self.kind, ScenarioKind::Positive { .. })
    }
}
