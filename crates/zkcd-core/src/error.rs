//! # Error Types
//!
//! Normalization itself is total. The only fallible step in this crate is
//! reading a tree out of JSON text, which surfaces the `serde_json` error
//! with the offending line and column.

use thiserror::Error;

/// Error while building a `ProofTree` from external input.
#[derive(Error, Debug)]
pub enum TreeError {
    /// The input was not valid JSON.
    #[error("proof tree is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
