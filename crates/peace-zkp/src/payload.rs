//! # Transport Payload
//!
//! The compact record handed to QR encoders and network submitters:
//! `{tx, pub, proof}`. `tx` is the on-chain transaction reference once the
//! message has been posted; before that it is absent.

use serde::{Deserialize, Serialize};

use crate::backend::Groth16Proof;
use crate::orchestrator::ProofData;

/// `{tx, pub, proof}` as consumed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportPayload {
    /// Transaction reference, if posted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx: Option<String>,
    /// Public signals as `0x` hex strings.
    #[serde(rename = "pub")]
    pub public_signals: Vec<String>,
    /// The Groth16 proof.
    pub proof: Groth16Proof,
}

impl TransportPayload {
    /// Build the payload for a proof, optionally with a transaction reference.
    pub fn from_proof_data(data: &ProofData, tx: Option<String>) -> Self {
        Self {
            tx,
            public_signals: data.public_signals.clone(),
            proof: data.proof.clone(),
        }
    }

    /// Compact JSON for transport.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a received payload.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(tx: Option<&str>) -> TransportPayload {
        TransportPayload {
            tx: tx.map(str::to_string),
            public_signals: vec!["0x1".into(), "0x2".into()],
            proof: Groth16Proof {
                a: ["1".into(), "2".into()],
                b: [["3".into(), "4".into()], ["5".into(), "6".into()]],
                c: ["7".into(), "8".into()],
            },
        }
    }

    #[test]
    fn uses_pub_key() {
        let json = payload(Some("0xabc")).to_json().unwrap();
        assert!(json.starts_with(r#"{"tx":"0xabc","pub":["0x1","0x2"],"proof":"#));
    }

    #[test]
    fn absent_tx_is_omitted_and_parses_back() {
        let p = payload(None);
        let json = p.to_json().unwrap();
        assert!(!json.contains("\"tx\""));
        assert_eq!(TransportPayload::from_json(&json).unwrap(), p);
    }

    #[test]
    fn rejects_missing_proof() {
        assert!(TransportPayload::from_json(r#"{"pub":[]}"#).is_err());
    }
}
