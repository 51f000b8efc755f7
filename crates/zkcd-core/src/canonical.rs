//! # Numeric Canonicalization
//!
//! This module defines `NormalizedProofTree`, the sole construction path for
//! proof data handed to calldata export and assembly.
//!
//! ## Rules
//!
//! Applied recursively, first match wins:
//!
//! 1. `DecimalString` → base-10 `Integer`.
//! 2. `HexString` → base-16 `Integer`.
//! 3. `Sequence` → every element normalized, order and length kept.
//! 4. `Null` → `Null`. Checked before mappings so it is never destructured.
//! 5. `Mapping` → same keys in the same order, values normalized.
//! 6. Everything else (`Integer`, `Opaque`) → unchanged.
//!
//! Normalization is total and idempotent: a normalized tree contains no
//! decimal or hex string leaves, so a second pass has nothing to convert.

use num_bigint::{BigInt, BigUint};
use num_traits::Num;

use crate::tree::{is_decimal, is_hex, OpaqueScalar, ProofTree};

/// A proof tree whose numeric leaves are all canonical integers.
///
/// # Invariants
///
/// - The only constructor is [`normalize()`].
/// - No `DecimalString` or `HexString` leaf remains anywhere in the tree.
/// - Shape, sequence order and mapping key order match the input tree.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProofTree(ProofTree);

impl NormalizedProofTree {
    /// Access the normalized tree.
    pub fn as_tree(&self) -> &ProofTree {
        &self.0
    }

    pub fn into_inner(self) -> ProofTree {
        self.0
    }

    /// Render back to JSON with integers as decimal strings.
    pub fn to_json(&self) -> serde_json::Value {
        self.0.to_json()
    }
}

impl AsRef<ProofTree> for NormalizedProofTree {
    fn as_ref(&self) -> &ProofTree {
        &self.0
    }
}

/// Convert every numeric leaf of `tree` into a canonical integer.
pub fn normalize(tree: ProofTree) -> NormalizedProofTree {
    NormalizedProofTree(normalize_value(tree))
}

fn normalize_value(tree: ProofTree) -> ProofTree {
    match tree {
        ProofTree::DecimalString(digits) => parse_leaf(digits, 10, 0),
        ProofTree::HexString(hex) => parse_leaf(hex, 16, 2),
        ProofTree::Sequence(items) => {
            ProofTree::Sequence(items.into_iter().map(normalize_value).collect())
        }
        ProofTree::Null => ProofTree::Null,
        ProofTree::Mapping(fields) => ProofTree::Mapping(
            fields
                .into_iter()
                .map(|(k, v)| (k, normalize_value(v)))
                .collect(),
        ),
        other @ (ProofTree::Integer(_) | ProofTree::Opaque(_)) => other,
    }
}

/// Parse a string leaf. A hand-built leaf whose text does not actually
/// parse is demoted to opaque text, which keeps normalization total.
fn parse_leaf(text: String, radix: u32, prefix: usize) -> ProofTree {
    match text
        .get(prefix..)
        .and_then(|digits| BigUint::from_str_radix(digits, radix).ok())
    {
        Some(value) => ProofTree::Integer(BigInt::from(value)),
        None => ProofTree::Opaque(OpaqueScalar::Text(text)),
    }
}

/// Canonicalize a single scalar string.
///
/// Returns `None` for anything that is neither all ASCII digits nor
/// `0x`-prefixed hex.
pub fn parse_canonical_int(text: &str) -> Option<BigUint> {
    if is_decimal(text) {
        BigUint::from_str_radix(text, 10).ok()
    } else if is_hex(text) {
        BigUint::from_str_radix(&text[2..], 16).ok()
    } else {
        None
    }
}
