//! # Hash Provider Error Types
//!
//! Structured errors for the hash-to-field providers in `peace-crypto`.

use thiserror::Error;

/// Errors from hash-to-field providers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The Poseidon permutation rejected its parameters or inputs.
    #[error("Poseidon hash failed: {0}")]
    Poseidon(String),

    /// A provider name did not match any known provider.
    #[error("unknown hash provider: {0} (expected: poseidon, sha256)")]
    UnknownProvider(String),
}
