//! # SHA-256 Digests
//!
//! The fixed 256-bit digest underlying `hash_to_field`, the simulation hash
//! provider, and the mock proof backend.
//!
//! Identifier digests (the message id) must be computed from
//! [`CanonicalBytes`] through [`sha256_digest()`], so that the byte layout of
//! the hashed record is fixed by construction. Raw-byte hashing through
//! [`sha256()`] and [`Sha256Accumulator`] is reserved for inputs whose layout
//! is already fixed-width (field words, integer encodings, addresses).

use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// SHA-256 of a raw byte string.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 of canonical bytes.
pub fn sha256_digest(data: &CanonicalBytes) -> [u8; 32] {
    sha256(data.as_bytes())
}

/// Incremental SHA-256 over several fixed-layout byte strings.
#[derive(Clone, Default)]
pub struct Sha256Accumulator {
    hasher: Sha256,
}

impl Sha256Accumulator {
    /// Start an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed more bytes.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.hasher.update(data);
        self
    }

    /// Finish and return the 32-byte digest.
    pub fn finalize(self) -> [u8; 32] {
        self.hasher.finalize().into()
    }

    /// Finish and return the digest as lowercase hex.
    pub fn finalize_hex(self) -> String {
        hex::encode(self.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sha256_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn accumulator_matches_one_shot() {
        let mut acc = Sha256Accumulator::new();
        acc.update(b"a").update(b"bc");
        assert_eq!(acc.finalize(), sha256(b"abc"));
    }

    #[test]
    fn accumulator_hex_is_64_chars() {
        let mut acc = Sha256Accumulator::new();
        acc.update(b"peace");
        let hex = acc.finalize_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn canonical_digest_matches_raw_digest() {
        let cb = CanonicalBytes::new(&serde_json::json!({})).unwrap();
        assert_eq!(sha256_digest(&cb), sha256(b"{}"));
        // SHA256("{}")
        assert_eq!(
            hex::encode(sha256_digest(&cb)),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }
}
