//! # SHA-256 Field Hasher: Simulation Provider
//!
//! Encodes each input as a 32-byte big-endian word, concatenates the words
//! in order, and maps the result through `hash_to_field`. Deterministic and
//! field-valid, but the external circuit does not compute it: commitments
//! built with this provider cannot be proven by the real backend. Use it
//! for development and tests with the mock backend.

use peace_core::{concat, hash_to_field, FieldElement};

use crate::error::HashError;
use crate::hasher::FieldHasher;

/// SHA-256 over concatenated field words, reduced mod `P`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256FieldHasher;

impl Sha256FieldHasher {
    /// Create the provider.
    pub fn new() -> Self {
        Self
    }
}

fn hash_words(inputs: &[FieldElement]) -> FieldElement {
    let parts: Vec<&[u8]> = inputs.iter().map(|fe| fe.as_bytes().as_slice()).collect();
    hash_to_field(&concat(&parts))
}

impl FieldHasher for Sha256FieldHasher {
    fn name(&self) -> &'static str {
        "sha256"
    }

    fn hash2(&self, inputs: [FieldElement; 2]) -> Result<FieldElement, HashError> {
        Ok(hash_words(&inputs))
    }

    fn hash5(&self, inputs: [FieldElement; 5]) -> Result<FieldElement, HashError> {
        Ok(hash_words(&inputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_hash2_vector() {
        let h = Sha256FieldHasher::new()
            .hash2([FieldElement::from_u64(1), FieldElement::from_u64(2)])
            .unwrap();
        assert_eq!(
            h.to_hex(),
            "0x1529595e73ccab6b37ea20aa9971bf903130a7d57d4ee0e3f58b038854e4116b"
        );
    }

    #[test]
    fn known_hash5_vector() {
        let h = Sha256FieldHasher::new()
            .hash5([1u64, 2, 3, 4, 5].map(FieldElement::from_u64))
            .unwrap();
        assert_eq!(
            h.to_hex(),
            "0xf24729168d4450a5681beafa5e3a899ac28bd17bf5a4877dab37bcd834e1634"
        );
    }

    #[test]
    fn zeros_hash_to_nonzero() {
        let h = Sha256FieldHasher::new()
            .hash2([FieldElement::ZERO, FieldElement::ZERO])
            .unwrap();
        assert_eq!(
            h.to_hex(),
            "0x3b075046b71ff5f8e0792de4b82ddc979fcb3b8c03abe12972e65c57759fb46"
        );
    }
}
