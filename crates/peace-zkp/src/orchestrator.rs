//! # Proof Orchestration
//!
//! Turns plaintext into a verifiable artifact:
//!
//! 1. Build the commitment (validation errors propagate unchanged).
//! 2. Encode the six circuit inputs as decimal strings.
//! 3. Call the backend's `prove` once. Failures are wrapped as
//!    [`ProtocolError::ProofGeneration`] and never retried.
//! 4. Take the backend's public signals as returned; their order is the
//!    circuit's declared order and is not recomputed here.
//! 5. Derive the message id and package everything as [`ProofData`].
//!
//! Proof generation is CPU-bound and can take seconds with a real backend.
//! Async callers use [`ProofOrchestrator::generate_proof_async`], which runs
//! the call on the tokio blocking pool. An in-flight proof cannot be
//! cancelled; dropping the future abandons the result.

use std::sync::Arc;
use std::time::Instant;

use peace_core::FieldElement;
use serde::Serialize;

use crate::backend::{CircuitInputs, Groth16Proof, ProofBackend, PUBLIC_SIGNAL_COUNT};
use crate::commitment::{Commitment, CommitmentBuilder};
use crate::config::PROTOCOL_SCHEME;
use crate::error::{BackendError, ProtocolError};
use crate::message_id::calculate_message_id;

/// A proof together with everything needed to check and identify it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofData {
    /// The backend's Groth16 proof.
    pub proof: Groth16Proof,
    /// `[textHashF, chainIdF, contractF, tsBucketF, h]` as `0x` hex.
    pub public_signals: Vec<String>,
    /// The commitment the proof was generated for. Serializes without the
    /// secret or witness elements.
    pub commitment: Commitment,
    /// Identifier of the message under [`PROTOCOL_SCHEME`].
    pub message_id: FieldElement,
}

/// Drives a proof backend for one chain and contract.
#[derive(Debug)]
pub struct ProofOrchestrator<B: ProofBackend> {
    builder: CommitmentBuilder,
    backend: B,
}

impl<B: ProofBackend> ProofOrchestrator<B> {
    /// Create an orchestrator. The builder's configuration is fixed from here on.
    pub fn new(builder: CommitmentBuilder, backend: B) -> Self {
        Self { builder, backend }
    }

    /// The commitment builder.
    pub fn builder(&self) -> &CommitmentBuilder {
        &self.builder
    }

    /// The proof backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Commit to `text` and `secret` at `timestamp` and prove knowledge of the secret.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::Validation`] for rejected inputs (the backend is not called).
    /// - [`ProtocolError::ProofGeneration`] if the backend fails or returns a
    ///   signal vector of the wrong length.
    pub fn generate_proof(
        &self,
        text: &str,
        secret: &str,
        timestamp: u64,
    ) -> Result<ProofData, ProtocolError> {
        let commitment = self.builder.create_commitment(text, secret, timestamp)?;
        let inputs = CircuitInputs::from_field_elements(commitment.field_elements());

        let backend = self.backend.name();
        tracing::info!(backend, commitment = %commitment.commitment(), "generating proof");
        let started = Instant::now();

        let output = self.backend.prove(&inputs).map_err(|e| {
            tracing::error!(backend, error = %e, "proof generation failed");
            ProtocolError::ProofGeneration(e)
        })?;

        if output.public_signals.len() != PUBLIC_SIGNAL_COUNT {
            tracing::error!(
                backend,
                returned = output.public_signals.len(),
                "backend returned wrong number of public signals"
            );
            return Err(ProtocolError::ProofGeneration(
                BackendError::UnexpectedSignalCount {
                    expected: PUBLIC_SIGNAL_COUNT,
                    actual: output.public_signals.len(),
                },
            ));
        }

        let message_id = calculate_message_id(&commitment, PROTOCOL_SCHEME)?;

        tracing::info!(
            backend,
            elapsed_ms = started.elapsed().as_millis() as u64,
            message_id = %message_id,
            "proof generated"
        );

        Ok(ProofData {
            proof: output.proof,
            public_signals: output.public_signals.iter().map(FieldElement::to_hex).collect(),
            commitment,
            message_id,
        })
    }
}

impl<B: ProofBackend + 'static> ProofOrchestrator<B> {
    /// [`generate_proof`](Self::generate_proof) on the blocking thread pool.
    pub async fn generate_proof_async(
        self: &Arc<Self>,
        text: String,
        secret: String,
        timestamp: u64,
    ) -> Result<ProofData, ProtocolError> {
        let this = Arc::clone(self);
        tokio::task::spawn_blocking(move || this.generate_proof(&text, &secret, timestamp))
            .await
            .map_err(|e| {
                ProtocolError::ProofGeneration(BackendError::Execution(format!(
                    "proof task did not complete: {e}"
                )))
            })?
    }
}
