//! # Groth16 Calldata Assembly
//!
//! The proving library exports Groth16 calldata as nested JSON-ish text:
//!
//! ```text
//! ["0x..","0x.."],[["0x..","0x.."],["0x..","0x.."]],["0x..","0x.."],["0x..",...]
//! ```
//!
//! Assembly flattens that text into one element sequence and slices it by
//! position:
//!
//! | positions | argument |
//! |---|---|
//! | `0..2` | `a` |
//! | `2..4` | `b[0]` |
//! | `4..6` | `b[1]` |
//! | `6..8` | `c` |
//! | `8..` | `input` |
//!
//! The G2 pairs in `b` are copied in emission order. Verifier contracts
//! expect the proving library's ordering, which already differs from the
//! `(c0, c1)` order of the raw proof, so swapping here would break
//! verification of every valid proof.

use zkcd_core::{classify_text, ProofTree};

use crate::args::{canonical_uints, Groth16Args};
use crate::error::CalldataError;

/// Number of leading elements holding `a`, `b` and `c`.
pub const GROTH16_POINT_ELEMENTS: usize = 8;

/// Strip quotes, brackets and whitespace, then split on commas.
///
/// An empty trailing public-input array `[]` contributes no elements, and
/// neither does text that is empty once stripped. Any other blank segment
/// is kept as an empty text leaf so assembly reports it at its position
/// instead of shifting every later element one slot.
pub fn flatten_groth16_calldata(raw: &str) -> Vec<ProofTree> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let stripped: String = compact
        .chars()
        .filter(|c| !matches!(c, '"' | '[' | ']'))
        .collect();
    if stripped.is_empty() {
        return Vec::new();
    }
    let mut segments: Vec<&str> = stripped.split(',').collect();
    if compact.ends_with(",[]") && segments.last() == Some(&"") {
        segments.pop();
    }
    segments.into_iter().map(classify_text).collect()
}

/// Assemble Groth16 verifier arguments from exported calldata text.
pub fn assemble_groth16(raw: &str) -> Result<Groth16Args, CalldataError> {
    assemble_groth16_from_elements(flatten_groth16_calldata(raw))
}

/// Assemble Groth16 verifier arguments from an already flattened sequence.
///
/// Every element is canonicalized; the number of public inputs is whatever
/// follows the eight point coordinates and is not checked against the
/// circuit.
pub fn assemble_groth16_from_elements(
    elements: Vec<ProofTree>,
) -> Result<Groth16Args, CalldataError> {
    if elements.len() < GROTH16_POINT_ELEMENTS {
        return Err(CalldataError::InsufficientFlattenedLength {
            found: elements.len(),
        });
    }

    let values = canonical_uints(elements)?;
    let (points, inputs) = values.split_at(GROTH16_POINT_ELEMENTS);
    let pair = |i: usize| [points[i].clone(), points[i + 1].clone()];

    let args = Groth16Args {
        a: pair(0),
        b: [pair(2), pair(4)],
        c: pair(6),
        public_inputs: inputs.to_vec(),
    };
    tracing::debug!(
        public_inputs = args.public_inputs.len(),
        "assembled groth16 calldata"
    );
    Ok(args)
}
