//! # Mock Proof Backend
//!
//! A transparent backend with the same contract as the real Groth16 one,
//! for development and tests without the circuit toolchain.
//!
//! ## How It Works
//!
//! - `prove()` re-evaluates the circuit relation
//!   `h == Hash2(Hash5(textHashF, chainIdF, contractF, 0, tsBucketF), sF)`
//!   with the injected hash provider and refuses unsatisfying witnesses.
//!   The proof blob is a fresh random nonce (`a[0]`) followed by seven
//!   coordinates `hashToField(SHA256(domain || nonce || i || signals))`.
//! - `verify()` recomputes the seven coordinates from the nonce and the
//!   supplied public signals and checks equality.
//!
//! Public signals are deterministic; the blob is not, as with a real prover.
//!
//! ## Security Warning
//!
//! **NOT ZERO-KNOWLEDGE AND NOT SOUND.** Anyone who knows the public
//! signals can forge a proof that `verify()` accepts. This backend exists
//! only to exercise the protocol plumbing.

use std::sync::Arc;

use peace_core::{FieldElement, Sha256Accumulator};
use peace_crypto::FieldHasher;
use rand::RngCore;

use crate::backend::{
    BackendOutput, CircuitInputs, Groth16Proof, ProofBackend, PUBLIC_SIGNAL_COUNT,
};
use crate::commitment::derive_commitment;
use crate::error::BackendError;

/// Domain separator for mock proof coordinates.
const MOCK_DOMAIN: &[u8] = b"peace-mock-groth16-v1";

/// Mock verifying key: verification is recomputation, so it holds nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockVerifyingKey;

/// Transparent in-process proof backend.
#[derive(Debug, Clone)]
pub struct MockProofBackend {
    hasher: Arc<dyn FieldHasher>,
}

impl MockProofBackend {
    /// Create a backend that checks the relation with `hasher`.
    ///
    /// Use the same provider as the commitment builder, or every witness
    /// will be rejected.
    pub fn new(hasher: Arc<dyn FieldHasher>) -> Self {
        Self { hasher }
    }

    /// The (empty) verifying key.
    pub fn verifying_key(&self) -> MockVerifyingKey {
        MockVerifyingKey
    }
}

fn derive_coordinate(nonce: &FieldElement, index: u8, signals: &[FieldElement]) -> FieldElement {
    let mut acc = Sha256Accumulator::new();
    acc.update(MOCK_DOMAIN).update(nonce.as_bytes()).update(&[index]);
    for signal in signals {
        acc.update(signal.as_bytes());
    }
    FieldElement::from_be_bytes_mod_order(&acc.finalize())
}

fn build_proof(nonce: FieldElement, signals: &[FieldElement]) -> Groth16Proof {
    let coord = |i: u8| derive_coordinate(&nonce, i, signals).to_decimal();
    Groth16Proof {
        a: [nonce.to_decimal(), coord(1)],
        b: [[coord(2), coord(3)], [coord(4), coord(5)]],
        c: [coord(6), coord(7)],
    }
}

impl ProofBackend for MockProofBackend {
    type VerifyingKey = MockVerifyingKey;

    fn name(&self) -> &'static str {
        "mock"
    }

    fn prove(&self, inputs: &CircuitInputs) -> Result<BackendOutput, BackendError> {
        let public = inputs.public_inputs()?;
        let s_f = inputs.witness()?;
        let [text_hash_f, chain_id_f, contract_f, ts_bucket_f, h] = public;

        let (_, expected_h) = derive_commitment(
            self.hasher.as_ref(),
            [text_hash_f, chain_id_f, contract_f, ts_bucket_f],
            s_f,
        )
        .map_err(|e| BackendError::Execution(e.to_string()))?;
        if expected_h != h {
            return Err(BackendError::UnsatisfiedConstraint(format!(
                "h does not equal Hash2(d, sF) under {}",
                self.hasher.name()
            )));
        }

        let mut nonce_bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = FieldElement::from_be_bytes_mod_order(&nonce_bytes);

        tracing::debug!(hasher = self.hasher.name(), "mock proof generated");

        Ok(BackendOutput {
            proof: build_proof(nonce, &public),
            public_signals: public.to_vec(),
        })
    }

    fn verify(
        &self,
        _vk: &Self::VerifyingKey,
        public_signals: &[FieldElement],
        proof: &Groth16Proof,
    ) -> Result<bool, BackendError> {
        let mut coordinates = Vec::with_capacity(8);
        for (i, raw) in proof.coordinates().iter().enumerate() {
            let fe = FieldElement::from_decimal(raw)
                .map_err(|e| BackendError::MalformedProof(format!("coordinate {i}: {e}")))?;
            coordinates.push(fe);
        }
        if public_signals.len() != PUBLIC_SIGNAL_COUNT {
            return Ok(false);
        }

        let nonce = coordinates[0];
        let valid = coordinates
            .iter()
            .enumerate()
            .skip(1)
            .all(|(i, fe)| *fe == derive_coordinate(&nonce, i as u8, public_signals));
        Ok(valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::CommitmentBuilder;
    use crate::config::ProtocolConfig;
    use peace_crypto::{PoseidonHasher, Sha256FieldHasher};

    fn setup() -> (CommitmentBuilder, MockProofBackend) {
        let hasher: Arc<dyn FieldHasher> = Arc::new(Sha256FieldHasher::new());
        (
            CommitmentBuilder::new(ProtocolConfig::default(), hasher.clone()),
            MockProofBackend::new(hasher),
        )
    }

    fn inputs_for(builder: &CommitmentBuilder) -> CircuitInputs {
        let c = builder
            .create_commitment("Peace on earth", "dove", 1_700_000_000)
            .unwrap();
        CircuitInputs::from_field_elements(c.field_elements())
    }

    #[test]
    fn prove_echoes_public_signals_in_order() {
        let (builder, backend) = setup();
        let inputs = inputs_for(&builder);
        let out = backend.prove(&inputs).unwrap();
        assert_eq!(out.public_signals, inputs.public_inputs().unwrap().to_vec());
    }

    #[test]
    fn prove_then_verify_roundtrip() {
        let (builder, backend) = setup();
        let out = backend.prove(&inputs_for(&builder)).unwrap();
        let vk = backend.verifying_key();
        assert!(backend.verify(&vk, &out.public_signals, &out.proof).unwrap());
    }

    #[test]
    fn proofs_are_randomized_but_both_verify() {
        let (builder, backend) = setup();
        let inputs = inputs_for(&builder);
        let p1 = backend.prove(&inputs).unwrap();
        let p2 = backend.prove(&inputs).unwrap();
        assert_ne!(p1.proof, p2.proof);
        assert_eq!(p1.public_signals, p2.public_signals);
        let vk = backend.verifying_key();
        assert!(backend.verify(&vk, &p2.public_signals, &p1.proof).unwrap());
    }

    #[test]
    fn wrong_witness_is_unsatisfied() {
        let (builder, backend) = setup();
        let mut inputs = inputs_for(&builder);
        inputs.s_f = FieldElement::from_u64(1).to_decimal();
        assert!(matches!(
            backend.prove(&inputs),
            Err(BackendError::UnsatisfiedConstraint(_))
        ));
    }

    #[test]
    fn hasher_mismatch_is_unsatisfied() {
        let (builder, _) = setup();
        let poseidon_backend = MockProofBackend::new(Arc::new(PoseidonHasher::new()));
        assert!(matches!(
            poseidon_backend.prove(&inputs_for(&builder)),
            Err(BackendError::UnsatisfiedConstraint(_))
        ));
    }

    #[test]
    fn altered_signal_fails_verification() {
        let (builder, backend) = setup();
        let out = backend.prove(&inputs_for(&builder)).unwrap();
        let mut signals = out.public_signals.clone();
        signals[4] = FieldElement::from_u64(99);
        assert!(!backend
            .verify(&MockVerifyingKey, &signals, &out.proof)
            .unwrap());
    }

    #[test]
    fn altered_coordinate_fails_verification() {
        let (builder, backend) = setup();
        let out = backend.prove(&inputs_for(&builder)).unwrap();
        let mut proof = out.proof.clone();
        proof.c[1] = "12345".into();
        assert!(!backend
            .verify(&MockVerifyingKey, &out.public_signals, &proof)
            .unwrap());
    }

    #[test]
    fn non_field_coordinate_is_malformed() {
        let (builder, backend) = setup();
        let out = backend.prove(&inputs_for(&builder)).unwrap();
        let mut proof = out.proof.clone();
        proof.b[0][1] = "not-a-number".into();
        match backend.verify(&MockVerifyingKey, &out.public_signals, &proof) {
            Err(BackendError::MalformedProof(msg)) => assert!(msg.contains("coordinate 3")),
            other => panic!("expected MalformedProof, got {other:?}"),
        }
    }

    #[test]
    fn wrong_signal_count_does_not_verify() {
        let (builder, backend) = setup();
        let out = backend.prove(&inputs_for(&builder)).unwrap();
        assert!(!backend
            .verify(&MockVerifyingKey, &out.public_signals[..4], &out.proof)
            .unwrap());
    }
}
