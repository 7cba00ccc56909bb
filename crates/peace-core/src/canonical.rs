//! # Canonical Serialization: Fixed-Order Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for bytes
//! used in identifier digests (the message id).
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()`, which rejects floats and
//! then serializes to compact JSON. Any function that computes an identifier
//! digest accepts `&CanonicalBytes`, so a record cannot be hashed through an
//! ad hoc serialization path.
//!
//! ## Field Order
//!
//! The field order of the hashed record is part of the protocol. Serialization
//! goes straight from the `Serialize` impl to bytes, so a struct is emitted in
//! declaration order and never passes through a key-sorting map. Records that
//! feed a digest must therefore be declared as structs, not maps.
//!
//! ## Cross-Language Compatibility
//!
//! Output matches JavaScript's `JSON.stringify` for the same record with the
//! same key order: compact separators, non-ASCII characters emitted as raw
//! UTF-8, control characters escaped (`\n`, `\t`, ... and `\u00XX` in
//! lowercase hex), integers without exponent or fraction.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by fixed-order canonical serialization.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - Numbers are integers, never floats.
/// - Separators are compact (no whitespace).
/// - Struct fields appear in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::FloatRejected` if the value contains a
    /// float. Returns `CanonicalizationError::SerializationFailed` if JSON
    /// serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        // The value tree is only inspected, never serialized: `serde_json::Map`
        // sorts keys, which would discard the declared field order.
        let inspected = serde_json::to_value(obj)?;
        reject_floats(&inspected)?;
        let bytes = serde_json::to_vec(obj)?;
        Ok(Self(bytes))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively reject non-integer numbers.
fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(())
        }
        Value::Object(map) => map.values().try_for_each(reject_floats),
        Value::Array(arr) => arr.iter().try_for_each(reject_floats),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Serialize)]
    struct Preimage {
        text: String,
        ts: u64,
    }

    proptest! {
        /// Canonicalization is deterministic and yields valid JSON.
        #[test]
        fn canonical_bytes_deterministic(text in "\\PC{0,40}", ts in any::<u64>()) {
            let record = Preimage { text, ts };
            let a = CanonicalBytes::new(&record).unwrap();
            let b = CanonicalBytes::new(&record).unwrap();
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
            let parsed: Result<Value, _> = serde_json::from_slice(a.as_bytes());
            prop_assert!(parsed.is_ok());
        }
    }
}
