//! # Proof Verification
//!
//! Rejects forged or mismatched proofs before paying for a pairing check.
//!
//! The verifier recomputes the four public field elements from the claimed
//! message and timestamp, appends the commitment to check (an externally
//! trusted value when the caller has one, otherwise the proof's own fifth
//! signal), and compares the result element-wise with the proof's public
//! signals. Any mismatch returns `false` without calling the backend. Only
//! a full match is handed to the backend's cryptographic `verify`.
//!
//! ## Security Invariant
//!
//! Without an expected commitment, the check binds message, chain, contract
//! and time window only. Callers that know the commitment (for example from
//! the ledger) must pass it, or a valid proof for a different secret is
//! accepted.

use std::str::FromStr;
use std::sync::Arc;

use peace_core::FieldElement;

use crate::backend::{Groth16Proof, ProofBackend, PUBLIC_SIGNAL_COUNT};
use crate::commitment::CommitmentBuilder;
use crate::error::{BackendError, VerificationError};
use crate::orchestrator::ProofData;
use crate::payload::TransportPayload;

/// Checks proofs for one chain and contract.
#[derive(Debug)]
pub struct Verifier<B: ProofBackend> {
    builder: CommitmentBuilder,
    backend: B,
    verifying_key: B::VerifyingKey,
}

impl<B: ProofBackend> Verifier<B> {
    /// Create a verifier. Configuration and key are fixed from here on.
    pub fn new(builder: CommitmentBuilder, backend: B, verifying_key: B::VerifyingKey) -> Self {
        Self {
            builder,
            backend,
            verifying_key,
        }
    }

    /// The commitment builder used to recompute expected fields.
    pub fn builder(&self) -> &CommitmentBuilder {
        &self.builder
    }

    /// The proof backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Verify a proof produced by the orchestrator.
    pub fn verify_proof(
        &self,
        data: &ProofData,
        expected_text: &str,
        expected_timestamp: u64,
        expected_commitment: Option<FieldElement>,
    ) -> Result<bool, VerificationError> {
        self.verify_signals(
            &data.public_signals,
            &data.proof,
            expected_text,
            expected_timestamp,
            expected_commitment,
        )
    }

    /// Verify a received transport payload.
    pub fn verify_payload(
        &self,
        payload: &TransportPayload,
        expected_text: &str,
        expected_timestamp: u64,
        expected_commitment: Option<FieldElement>,
    ) -> Result<bool, VerificationError> {
        self.verify_signals(
            &payload.public_signals,
            &payload.proof,
            expected_text,
            expected_timestamp,
            expected_commitment,
        )
    }

    /// Verify raw public signals (hex or decimal strings) and a proof.
    ///
    /// # Errors
    ///
    /// - [`VerificationError::SignalCount`] unless exactly five signals are given.
    /// - [`VerificationError::MalformedSignal`] for an unparsable signal.
    /// - [`VerificationError::Backend`] if the backend could not run its check.
    ///
    /// A proof that does not verify is `Ok(false)`.
    pub fn verify_signals(
        &self,
        public_signals: &[String],
        proof: &Groth16Proof,
        expected_text: &str,
        expected_timestamp: u64,
        expected_commitment: Option<FieldElement>,
    ) -> Result<bool, VerificationError> {
        if public_signals.len() != PUBLIC_SIGNAL_COUNT {
            return Err(VerificationError::SignalCount {
                expected: PUBLIC_SIGNAL_COUNT,
                actual: public_signals.len(),
            });
        }
        let actual = public_signals
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                FieldElement::from_str(raw.trim())
                    .map_err(|source| VerificationError::MalformedSignal { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let fields = self
            .builder
            .calculate_field_elements(expected_text, expected_timestamp)?;
        let commitment_to_check = expected_commitment.unwrap_or(actual[4]);
        let expected = fields.signals(commitment_to_check);

        if let Some(index) = expected.iter().zip(&actual).position(|(e, a)| e != a) {
            tracing::debug!(
                index,
                expected = %expected[index],
                actual = %actual[index],
                "public signal mismatch"
            );
            return Ok(false);
        }

        let valid = self
            .backend
            .verify(&self.verifying_key, &actual, proof)?;
        tracing::info!(backend = self.backend.name(), valid, "proof checked");
        Ok(valid)
    }
}

impl<B: ProofBackend + 'static> Verifier<B> {
    /// [`verify_proof`](Self::verify_proof) on the blocking thread pool.
    pub async fn verify_proof_async(
        self: &Arc<Self>,
        data: ProofData,
        expected_text: String,
        expected_timestamp: u64,
        expected_commitment: Option<FieldElement>,
    ) -> Result<bool, VerificationError> {
        let this = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            this.verify_proof(&data, &expected_text, expected_timestamp, expected_commitment)
        })
        .await
        .map_err(|e| {
            VerificationError::Backend(BackendError::Execution(format!(
                "verification task did not complete: {e}"
            )))
        })?
    }
}
