//! # peace-zkp: Commitments, Proofs, and Verification
//!
//! Binds a message to a secret, a chain, a contract, and a one-minute time
//! window, and proves knowledge of the secret without revealing it.
//!
//! ## Architecture
//!
//! - **Commitment** (`commitment.rs`): `CommitmentBuilder` validates
//!   inputs, computes the seven field elements, and derives
//!   `d = Hash5(textHashF, chainIdF, contractF, 0, tsBucketF)` and
//!   `h = Hash2(d, sF)`.
//!
//! - **Backend** (`backend.rs`): the `ProofBackend` trait, the compile-time
//!   contract that makes the mock and snarkjs backends interchangeable.
//!
//! - **Mock** (`mock.rs`): `MockProofBackend` checks the circuit relation
//!   in-process and emits placeholder Groth16 coordinates. Not zero-knowledge.
//!
//! - **snarkjs** (`snarkjs.rs`): `SnarkjsBackend` drives an external
//!   `snarkjs groth16` binary against a compiled circuit.
//!
//! - **Orchestrator** (`orchestrator.rs`): `ProofOrchestrator` turns
//!   plaintext into `ProofData`, including the message id.
//!
//! - **Verifier** (`verifier.rs`): `Verifier` recomputes the public signals
//!   and consults the backend only when they match.
//!
//! ## Crate Policy
//!
//! - Depends on `peace-core` and `peace-crypto` internally.
//! - Backends are chosen at construction time and never swapped.
//! - No `unsafe` code.

pub mod backend;
pub mod commitment;
pub mod config;
pub mod error;
pub mod message_id;
pub mod mock;
pub mod orchestrator;
pub mod payload;
pub mod snarkjs;
pub mod verifier;

pub use backend::{BackendOutput, CircuitInputs, Groth16Proof, ProofBackend, PUBLIC_SIGNAL_COUNT};
pub use commitment::{
    derive_commitment, validate_inputs, Commitment, CommitmentBuilder, FieldElements,
    PublicFields, KIOSK_SLOT,
};
pub use config::{BackendKind, PeaceConfig, ProtocolConfig, SnarkjsConfig, PROTOCOL_SCHEME};
pub use error::{
    BackendError, ConfigError, ErrorKind, ProtocolError, ValidationError, VerificationError,
};
pub use message_id::{calculate_message_id, MessageIdPreimage};
pub use mock::{MockProofBackend, MockVerifyingKey};
pub use orchestrator::{ProofData, ProofOrchestrator};
pub use payload::TransportPayload;
pub use snarkjs::{SnarkjsBackend, SnarkjsProof, SnarkjsVerifyingKey};
pub use verifier::Verifier;
