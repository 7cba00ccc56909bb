//! # peace-core: Foundational Types for the Peace Message Protocol
//!
//! This crate is the leaf of the workspace. It owns every conversion
//! between raw application data and BN254 scalar field elements, and it
//! makes no cryptographic judgment of its own.
//!
//! ## Key Design Principles
//!
//! 1. **`FieldElement` newtype.** The inner 32 big-endian bytes are private.
//!    Every constructor enforces `0 <= v < P`, so a value that escaped the
//!    field cannot be represented.
//!
//! 2. **`CanonicalBytes` newtype.** All identifier digests (the message id)
//!    flow through `CanonicalBytes::new()`, which fixes the field order of
//!    the serialized record and rejects floats.
//!
//! 3. **Fixed-width encodings.** Integers and addresses are encoded to
//!    fixed-width big-endian byte strings before hashing. Overflow is an
//!    error, never a silent truncation.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `peace-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod codec;
pub mod digest;
pub mod error;
pub mod field;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use codec::{
    address_to_bytes, concat, hash_to_field, normalize, text_to_field, uint_to_bytes,
    ContractAddress, ADDRESS_LEN,
};
pub use digest::{sha256, sha256_digest, Sha256Accumulator};
pub use error::{CanonicalizationError, EncodingError};
pub use field::{FieldElement, BN254_MODULUS_DECIMAL};
pub use temporal::{now_unix_seconds, timestamp_bucket, TIMESTAMP_BUCKET_SECONDS};
