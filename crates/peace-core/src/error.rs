//! # Error Types
//!
//! Encoding and canonicalization failures. Both belong to the
//! "input rejected" tier: they are raised before any hashing or backend
//! call and the caller recovers by correcting the input.

use thiserror::Error;

/// Error while encoding application data into bytes or field elements.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// An unsigned integer does not fit in the requested fixed width.
    #[error("integer {value} does not fit in {width} bytes")]
    IntegerOverflow {
        /// The value that was being encoded.
        value: u128,
        /// The requested width in bytes.
        width: usize,
    },

    /// The requested fixed width is outside `1..=32`.
    #[error("unsupported encoding width: {0} bytes (expected 1..=32)")]
    UnsupportedWidth(usize),

    /// A hex string was empty or contained non-hex characters.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// A decoded address is longer than 20 bytes.
    #[error("address too long: {0} bytes (maximum 20)")]
    AddressTooLong(usize),

    /// A decimal string was empty or contained non-digit characters.
    #[error("invalid decimal: {0}")]
    InvalidDecimal(String),

    /// A value is not strictly less than the BN254 scalar field modulus.
    #[error("value is not a field element (must be below the BN254 modulus): {0}")]
    NotInField(String),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
