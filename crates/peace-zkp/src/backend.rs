//! # Proof Backend Capability
//!
//! The interface the orchestrator and verifier drive. A backend owns the
//! arithmetic circuit and its keys; this crate only hands it circuit inputs
//! and public signals.
//!
//! ## Contract
//!
//! - `prove` receives the six circuit inputs as decimal strings and returns
//!   a proof together with the public signals, echoed in the circuit's
//!   declared order `[textHashF, chainIdF, contractF, tsBucketF, h]`.
//! - `verify` returns `Ok(false)` for a proof that does not verify. `Err`
//!   is reserved for failures to run the check at all.
//!
//! Implementations must be `Send + Sync`: one backend instance serves
//! concurrent proof generations with no coordination.

use std::fmt;

use peace_core::FieldElement;
use serde::{Deserialize, Serialize};

use crate::commitment::FieldElements;
use crate::error::BackendError;

/// Number of public signals the circuit exposes.
pub const PUBLIC_SIGNAL_COUNT: usize = 5;

/// The circuit input record.
///
/// Serializes with exactly the circuit's signal names, in circuit order.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitInputs {
    /// Public: hash of the normalized message.
    pub text_hash_f: String,
    /// Public: chain id.
    pub chain_id_f: String,
    /// Public: contract address.
    pub contract_f: String,
    /// Public: one-minute time bucket.
    pub ts_bucket_f: String,
    /// Public: the commitment.
    pub h: String,
    /// Private input.
    pub s_f: String,
}

impl CircuitInputs {
    /// Encode a commitment's field elements as decimal strings.
    pub fn from_field_elements(fe: &FieldElements) -> Self {
        Self {
            text_hash_f: fe.text_hash_f.to_decimal(),
            chain_id_f: fe.chain_id_f.to_decimal(),
            contract_f: fe.contract_f.to_decimal(),
            ts_bucket_f: fe.ts_bucket_f.to_decimal(),
            h: fe.h.to_decimal(),
            s_f: fe.s_f.to_decimal(),
        }
    }

    /// Parse the five public inputs, in signal order.
    pub fn public_inputs(&self) -> Result<[FieldElement; PUBLIC_SIGNAL_COUNT], BackendError> {
        Ok([
            parse_input("textHashF", &self.text_hash_f)?,
            parse_input("chainIdF", &self.chain_id_f)?,
            parse_input("contractF", &self.contract_f)?,
            parse_input("tsBucketF", &self.ts_bucket_f)?,
            parse_input("h", &self.h)?,
        ])
    }

    /// Parse the private input.
    pub fn witness(&self) -> Result<FieldElement, BackendError> {
        parse_input("sF", &self.s_f)
    }
}

fn parse_input(name: &str, value: &str) -> Result<FieldElement, BackendError> {
    FieldElement::from_decimal(value)
        .map_err(|e| BackendError::InvalidInputs(format!("{name}: {e}")))
}

impl fmt::Debug for CircuitInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitInputs")
            .field("text_hash_f", &self.text_hash_f)
            .field("chain_id_f", &self.chain_id_f)
            .field("contract_f", &self.contract_f)
            .field("ts_bucket_f", &self.ts_bucket_f)
            .field("h", &self.h)
            .field("s_f", &"<redacted>")
            .finish()
    }
}

/// A Groth16 proof as three groups of encoded curve coordinates.
///
/// Coordinates are opaque to the protocol and passed through unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Groth16Proof {
    /// G1 point `A`.
    pub a: [String; 2],
    /// G2 point `B`, two coordinate pairs.
    pub b: [[String; 2]; 2],
    /// G1 point `C`.
    pub c: [String; 2],
}

impl Groth16Proof {
    /// All eight coordinates: `a`, then `b` row-major, then `c`.
    pub fn coordinates(&self) -> [&str; 8] {
        [
            self.a[0].as_str(),
            self.a[1].as_str(),
            self.b[0][0].as_str(),
            self.b[0][1].as_str(),
            self.b[1][0].as_str(),
            self.b[1][1].as_str(),
            self.c[0].as_str(),
            self.c[1].as_str(),
        ]
    }
}

/// What a successful `prove` returns.
#[derive(Debug, Clone)]
pub struct BackendOutput {
    /// The generated proof.
    pub proof: Groth16Proof,
    /// Public signals in the circuit's declared order.
    pub public_signals: Vec<FieldElement>,
}

/// A proving system bound to the commitment circuit.
pub trait ProofBackend: Send + Sync {
    /// Key material needed to verify proofs.
    type VerifyingKey: Clone + Send + Sync;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Generate a proof for the given circuit inputs.
    fn prove(&self, inputs: &CircuitInputs) -> Result<BackendOutput, BackendError>;

    /// Check a proof against public signals.
    fn verify(
        &self,
        vk: &Self::VerifyingKey,
        public_signals: &[FieldElement],
        proof: &Groth16Proof,
    ) -> Result<bool, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> FieldElements {
        FieldElements {
            text_hash_f: FieldElement::from_u64(1),
            chain_id_f: FieldElement::from_u64(2),
            contract_f: FieldElement::from_u64(3),
            ts_bucket_f: FieldElement::from_u64(4),
            s_f: FieldElement::from_u64(42),
            d: FieldElement::from_u64(6),
            h: FieldElement::from_u64(7),
        }
    }

    #[test]
    fn circuit_inputs_serialize_in_circuit_order() {
        let inputs = CircuitInputs::from_field_elements(&sample_fields());
        assert_eq!(
            serde_json::to_string(&inputs).unwrap(),
            r#"{"textHashF":"1","chainIdF":"2","contractF":"3","tsBucketF":"4","h":"7","sF":"42"}"#
        );
    }

    #[test]
    fn circuit_inputs_parse_back() {
        let inputs = CircuitInputs::from_field_elements(&sample_fields());
        let public = inputs.public_inputs().unwrap();
        assert_eq!(public, [1u64, 2, 3, 4, 7].map(FieldElement::from_u64));
        assert_eq!(inputs.witness().unwrap(), FieldElement::from_u64(42));
    }

    #[test]
    fn circuit_inputs_reject_non_field_values() {
        let mut inputs = CircuitInputs::from_field_elements(&sample_fields());
        inputs.h = "0x7".into();
        match inputs.public_inputs() {
            Err(BackendError::InvalidInputs(msg)) => assert!(msg.starts_with("h:")),
            other => panic!("expected InvalidInputs, got {other:?}"),
        }
    }

    #[test]
    fn circuit_inputs_debug_redacts_witness() {
        let inputs = CircuitInputs::from_field_elements(&sample_fields());
        let debug = format!("{inputs:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("42"));
    }

    #[test]
    fn groth16_proof_json_shape() {
        let proof = Groth16Proof {
            a: ["1".into(), "2".into()],
            b: [["3".into(), "4".into()], ["5".into(), "6".into()]],
            c: ["7".into(), "8".into()],
        };
        let json = serde_json::to_value(&proof).unwrap();
        assert_eq!(json["b"][1][0], "5");
        assert_eq!(
            proof.coordinates(),
            ["1", "2", "3", "4", "5", "6", "7", "8"]
        );
    }
}
