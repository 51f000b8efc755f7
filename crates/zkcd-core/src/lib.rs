//! # zkcd-core: Proof Tree and Numeric Canonicalization
//!
//! This crate is the leaf of the zkcd workspace. It defines the tree type
//! that proof artifacts and public signals travel in, and the canonicalizer
//! that turns every numeric leaf of such a tree into an arbitrary-precision
//! integer.
//!
//! ## Key Design Principles
//!
//! 1. **Closed tagged variant.** `ProofTree` is an exhaustive enum. String
//!    leaves are classified exactly once, when the tree is built, as decimal,
//!    `0x` hex, or opaque text. Normalization is a structural `match`, never
//!    runtime type probing.
//!
//! 2. **`NormalizedProofTree` newtype.** The only constructor is
//!    [`normalize()`]. Anything that needs canonical integers (calldata
//!    export, assembly) accepts the newtype, so an un-normalized tree cannot
//!    reach the wire by accident.
//!
//! 3. **Order is data.** Mapping keys keep their insertion order and
//!    sequences keep their length and order. Verifier contracts are
//!    positional, so reordering is a correctness bug.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `zkcd-*` crates.
//! - Normalization never fails.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod error;
pub mod field;
pub mod system;
pub mod tree;

pub use canonical::{normalize, parse_canonical_int, NormalizedProofTree};
pub use error::TreeError;
pub use field::{base_field_modulus, scalar_field_modulus, FIELD_ELEMENT_BYTES};
pub use system::ProofSystemKind;
pub use tree::{classify_text, Fields, OpaqueScalar, ProofTree};
