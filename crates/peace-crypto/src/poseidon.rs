//! # Poseidon: Circuit-Native Hash
//!
//! circomlib-compatible Poseidon over the BN254 scalar field (x^5 S-box,
//! 8 full rounds, circom round constants and MDS matrices). This is the
//! production provider: the external circuit computes the same function,
//! so commitments built here are provable there.

use ark_bn254::Fr;
use light_poseidon::{Poseidon, PoseidonHasher as _};
use peace_core::FieldElement;

use crate::error::HashError;
use crate::hasher::FieldHasher;

/// circomlib Poseidon for arities 2 and 5.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseidonHasher;

impl PoseidonHasher {
    /// Create the provider.
    pub fn new() -> Self {
        Self
    }
}

fn poseidon(inputs: &[FieldElement]) -> Result<FieldElement, HashError> {
    // Parameters depend on the width; the sponge itself holds mutable state.
    let mut sponge = Poseidon::<Fr>::new_circom(inputs.len())
        .map_err(|e| HashError::Poseidon(e.to_string()))?;
    let elements: Vec<Fr> = inputs.iter().map(FieldElement::to_fr).collect();
    let out = sponge
        .hash(&elements)
        .map_err(|e| HashError::Poseidon(e.to_string()))?;
    Ok(FieldElement::from_fr(out))
}

impl FieldHasher for PoseidonHasher {
    fn name(&self) -> &'static str {
        "poseidon"
    }

    fn hash2(&self, inputs: [FieldElement; 2]) -> Result<FieldElement, HashError> {
        poseidon(&inputs)
    }

    fn hash5(&self, inputs: [FieldElement; 5]) -> Result<FieldElement, HashError> {
        poseidon(&inputs)
    }
}
