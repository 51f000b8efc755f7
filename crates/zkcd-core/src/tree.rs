//! # Proof Tree: Closed Representation of Proof and Signal Data
//!
//! Proving libraries hand back proofs and public signals as loosely typed
//! JSON: group element coordinates as decimal strings, curve identifiers as
//! plain text, occasional `null`s, nested arrays for G2 points. `ProofTree`
//! captures that shape as an exhaustive enum.
//!
//! ## Classification
//!
//! String leaves are classified by [`classify_text()`] in a fixed order:
//!
//! 1. one or more ASCII digits → `DecimalString`;
//! 2. `0x` followed by one or more hex digits → `HexString`;
//! 3. anything else → `Opaque(Text)`.
//!
//! The `0x` prefix is the only disambiguator: `"1234"` is decimal even
//! though every character is also a hex digit.

use num_bigint::{BigInt, BigUint};
use num_traits::Num;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

use crate::error::TreeError;

/// A proof artifact or public-signal structure.
#[derive(Debug, Clone, PartialEq)]
pub enum ProofTree {
    /// A canonical arbitrary-precision integer.
    Integer(BigInt),
    /// A string of ASCII decimal digits, not yet parsed.
    DecimalString(String),
    /// A `0x`-prefixed hex string, not yet parsed.
    HexString(String),
    /// An ordered sequence.
    Sequence(Vec<ProofTree>),
    /// A mapping with unique keys in insertion order.
    Mapping(Fields),
    /// JSON `null`.
    Null,
    /// A leaf with no numeric meaning.
    Opaque(OpaqueScalar),
}

/// Leaves that normalization passes through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum OpaqueScalar {
    Bool(bool),
    /// A JSON number that is not an integer.
    Number(Number),
    Text(String),
}

/// Classify a string leaf as decimal, hex, or opaque text.
pub fn classify_text(text: &str) -> ProofTree {
    if is_decimal(text) {
        ProofTree::DecimalString(text.to_string())
    } else if is_hex(text) {
        ProofTree::HexString(text.to_string())
    } else {
        ProofTree::Opaque(OpaqueScalar::Text(text.to_string()))
    }
}

pub(crate) fn is_decimal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

pub(crate) fn is_hex(text: &str) -> bool {
    text.strip_prefix("0x")
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()))
}

impl ProofTree {
    /// Build a canonical integer leaf.
    pub fn integer(value: impl Into<BigInt>) -> Self {
        Self::Integer(value.into())
    }

    /// Build a string leaf, classifying it.
    pub fn text(value: &str) -> Self {
        classify_text(value)
    }

    /// Convert a `serde_json::Value` into a tree.
    ///
    /// Integral JSON numbers become `Integer` directly, including literals
    /// wider than 64 bits; non-integral numbers are kept opaque. Object key order is whatever the `Value` carries,
    /// which is source order with `serde_json`'s `preserve_order` feature.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Opaque(OpaqueScalar::Bool(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i.into())
                } else if let Some(u) = n.as_u64() {
                    Self::Integer(u.into())
                } else if let Ok(wide) = n.to_string().parse::<BigInt>() {
                    Self::Integer(wide)
                } else {
                    Self::Opaque(OpaqueScalar::Number(n))
                }
            }
            Value::String(s) => classify_text(&s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from_json).collect()),
            Value::Object(map) => Self::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Parse JSON text into a tree.
    pub fn from_json_str(text: &str) -> Result<Self, TreeError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_json(value))
    }

    /// Render the tree as JSON. Integers are written as decimal strings,
    /// the representation proving libraries read back.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Integer(i) => Value::String(i.to_string()),
            Self::DecimalString(s) | Self::HexString(s) => Value::String(s.clone()),
            Self::Sequence(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Mapping(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_json()))
                    .collect(),
            ),
            Self::Null => Value::Null,
            Self::Opaque(OpaqueScalar::Bool(b)) => Value::Bool(*b),
            Self::Opaque(OpaqueScalar::Number(n)) => Value::Number(n.clone()),
            Self::Opaque(OpaqueScalar::Text(s)) => Value::String(s.clone()),
        }
    }

    /// Look up a mapping field. `None` for non-mappings.
    pub fn get(&self, key: &str) -> Option<&ProofTree> {
        match self {
            Self::Mapping(fields) => fields.get(key),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ProofTree]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Self::Integer(i) => Some(i),
            _ => None,
        }
    }

    /// The unsigned canonical value of a numeric leaf.
    ///
    /// Decimal and hex strings are parsed; `Integer` leaves must be
    /// non-negative. Everything else is `None`.
    pub fn to_canonical_uint(&self) -> Option<BigUint> {
        match self {
            Self::Integer(i) => i.to_biguint(),
            Self::DecimalString(s) => BigUint::from_str_radix(s, 10).ok(),
            Self::HexString(s) => s
                .strip_prefix("0x")
                .and_then(|digits| BigUint::from_str_radix(digits, 16).ok()),
            _ => None,
        }
    }

    /// True for leaves that carry a numeric value.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Integer(_) | Self::DecimalString(_) | Self::HexString(_)
        )
    }
}

impl From<Value> for ProofTree {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

impl Serialize for ProofTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ProofTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}

/// Mapping fields with unique keys, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fields(Vec<(String, ProofTree)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. An existing key keeps its position and has its value
    /// replaced; the old value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: ProofTree) -> Option<ProofTree> {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ProofTree> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProofTree)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ProofTree)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, ProofTree)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

impl IntoIterator for Fields {
    type Item = (String, ProofTree);
    type IntoIter = std::vec::IntoIter<(String, ProofTree)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
