//! # Calldata Errors
//!
//! Every variant here means the exported calldata text no longer matches the
//! format the assemblers were written against, i.e. the upstream proving
//! library changed. None of them is recoverable by retrying.

use thiserror::Error;

/// Error while assembling verifier calldata.
#[derive(Error, Debug)]
pub enum CalldataError {
    /// PLONK calldata did not split into exactly two top-level fields.
    #[error("malformed PLONK calldata: expected 2 top-level fields, found {fields}")]
    MalformedCalldataShape {
        /// Number of top-level fields found.
        fields: usize,
    },

    /// The flattened Groth16 sequence cannot hold `a`, `b` and `c`.
    #[error("groth16 calldata too short: need at least 8 elements, found {found}")]
    InsufficientFlattenedLength {
        /// Number of elements found.
        found: usize,
    },

    /// An element that must be an integer is neither decimal nor hex.
    #[error("calldata element {index} is not an unsigned integer: {value}")]
    NonNumericElement {
        /// Position in the flattened sequence.
        index: usize,
        /// The element as it appeared.
        value: String,
    },

    /// The PLONK public-input field is not a JSON literal.
    #[error("PLONK public inputs are not valid JSON: {0}")]
    InvalidPublicInputs(#[from] serde_json::Error),

    /// The PLONK public-input field is JSON but not an array.
    #[error("PLONK public inputs must be a JSON array, found: {0}")]
    PublicInputsNotArray(String),
}
