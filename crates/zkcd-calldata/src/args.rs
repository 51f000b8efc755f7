//! # Calldata Argument Sets
//!
//! The positional arguments of each verifier's `verifyProof` entry point.
//! Integers are unsigned; on the wire they are `uint256`.

use num_bigint::BigUint;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use zkcd_core::{normalize, ProofSystemKind, ProofTree};

use crate::error::CalldataError;

/// Arguments for `verifyProof(a, b, c, input)` on a Groth16 verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Groth16Args {
    /// G1 point `(x, y)`.
    pub a: [BigUint; 2],
    /// G2 point as two coordinate pairs, in emission order.
    pub b: [[BigUint; 2]; 2],
    /// G1 point `(x, y)`.
    pub c: [BigUint; 2],
    pub public_inputs: Vec<BigUint>,
}

impl Groth16Args {
    /// All coordinates zero, with `inputs` zero public inputs.
    pub fn zeroed(inputs: usize) -> Self {
        let pair = || [BigUint::default(), BigUint::default()];
        Self {
            a: pair(),
            b: [pair(), pair()],
            c: pair(),
            public_inputs: vec![BigUint::default(); inputs],
        }
    }
}

/// Arguments for `verifyProof(proof, pubSignals)` on a PLONK verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlonkArgs {
    /// The proof as exported: `0x`-prefixed hex, passed verbatim.
    pub proof_blob: String,
    pub public_inputs: Vec<BigUint>,
}

/// A proof-system-tagged set of verifier arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalldataArgumentSet {
    Groth16(Groth16Args),
    Plonk(PlonkArgs),
}

impl CalldataArgumentSet {
    pub fn system(&self) -> ProofSystemKind {
        match self {
            Self::Groth16(_) => ProofSystemKind::Groth16,
            Self::Plonk(_) => ProofSystemKind::Plonk,
        }
    }

    pub fn public_inputs(&self) -> &[BigUint] {
        match self {
            Self::Groth16(args) => &args.public_inputs,
            Self::Plonk(args) => &args.public_inputs,
        }
    }

    /// Render as the JSON argument list a contract client would send,
    /// integers as decimal strings.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Groth16(args) => json!([
                dec_all(&args.a),
                [dec_all(&args.b[0]), dec_all(&args.b[1])],
                dec_all(&args.c),
                dec_all(&args.public_inputs),
            ]),
            Self::Plonk(args) => json!([args.proof_blob, dec_all(&args.public_inputs)]),
        }
    }
}

impl From<Groth16Args> for CalldataArgumentSet {
    fn from(args: Groth16Args) -> Self {
        Self::Groth16(args)
    }
}

impl From<PlonkArgs> for CalldataArgumentSet {
    fn from(args: PlonkArgs) -> Self {
        Self::Plonk(args)
    }
}

impl Serialize for CalldataArgumentSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

fn dec_all(values: &[BigUint]) -> Vec<String> {
    values.iter().map(BigUint::to_string).collect()
}

/// Canonicalize a flat element sequence and require every element to be
/// an unsigned integer.
pub(crate) fn canonical_uints(elements: Vec<ProofTree>) -> Result<Vec<BigUint>, CalldataError> {
    elements
        .into_iter()
        .map(|element| normalize(element).into_inner())
        .enumerate()
        .map(|(index, item)| {
            item.to_canonical_uint()
                .ok_or_else(|| CalldataError::NonNumericElement {
                    index,
                    value: item.to_json().to_string(),
                })
        })
        .collect()
}
