//! # Verify Subcommand
//!
//! Checks a [`ProofDocument`] against a claimed message. Exits 0 when the
//! proof verifies and 1 when it does not. The document's message id is
//! recomputed from the verified commitment; a mismatch also exits 1.
//! Malformed documents are errors.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use peace_core::{normalize, FieldElement};
use peace_zkp::{
    BackendKind, CommitmentBuilder, MessageIdPreimage, MockProofBackend, MockVerifyingKey,
    PeaceConfig, ProofBackend, SnarkjsBackend, TransportPayload, Verifier, PROTOCOL_SCHEME,
};

use crate::context;
use crate::prove::ProofDocument;

/// Arguments for `peace verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Proof document written by `peace prove`.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// The message the proof is claimed to be for.
    #[arg(long)]
    pub text: String,

    /// Claimed timestamp (default: the document's).
    #[arg(long)]
    pub timestamp: Option<u64>,

    /// Trusted commitment to check the proof against (hex or decimal).
    #[arg(long)]
    pub commitment: Option<FieldElement>,
}

/// Execute `peace verify`.
pub fn run_verify(args: &VerifyArgs, config: &PeaceConfig) -> Result<u8> {
    let document = ProofDocument::load(&args.file)?;
    let timestamp = args.timestamp.unwrap_or(document.timestamp);
    let builder = context::builder(config);

    let valid = match config.backend {
        BackendKind::Mock => {
            let backend = MockProofBackend::new(config.hasher.build());
            check(builder, backend, MockVerifyingKey, &document.payload, args, timestamp)?
        }
        BackendKind::Snarkjs => {
            let backend = SnarkjsBackend::new(config.snarkjs.clone());
            let key = backend
                .load_verifying_key()
                .context("failed to load verification key")?;
            check(builder, backend, key, &document.payload, args, timestamp)?
        }
    };

    if !valid {
        println!("FAIL: proof does not match the claimed message");
        return Ok(1);
    }

    let message_id = recompute_message_id(&document.payload, &args.text, timestamp)?;
    if document.scheme != PROTOCOL_SCHEME || message_id != document.message_id {
        println!("FAIL: message id does not match the proven message");
        println!("  Expected: {message_id}");
        return Ok(1);
    }

    println!("OK: proof is valid");
    println!("  Message id: {message_id}");
    Ok(0)
}

/// The id of the message the verified signals commit to.
fn recompute_message_id(
    payload: &TransportPayload,
    text: &str,
    timestamp: u64,
) -> Result<FieldElement> {
    let h: FieldElement = payload
        .public_signals
        .last()
        .context("proof has no public signals")?
        .parse()
        .context("malformed commitment signal")?;
    let text = normalize(text);
    MessageIdPreimage::from_parts(&text, h, timestamp, PROTOCOL_SCHEME)
        .message_id()
        .context("failed to derive message id")
}

fn check<B: ProofBackend>(
    builder: CommitmentBuilder,
    backend: B,
    key: B::VerifyingKey,
    payload: &TransportPayload,
    args: &VerifyArgs,
    timestamp: u64,
) -> Result<bool> {
    Verifier::new(builder, backend, key)
        .verify_payload(payload, &args.text, timestamp, args.commitment)
        .context("failed to verify proof")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prove::{run_prove, ProveArgs};

    fn prove_to(dir: &std::path::Path, config: &PeaceConfig) -> PathBuf {
        let out = dir.join("proof.json");
        let args = ProveArgs {
            text: "Peace on earth".into(),
            secret: "olive branch".into(),
            timestamp: Some(1_700_000_000),
            tx: None,
            out: Some(out.clone()),
        };
        run_prove(&args, config).unwrap();
        out
    }

    fn verify_args(file: PathBuf, text: &str) -> VerifyArgs {
        VerifyArgs {
            file,
            text: text.into(),
            timestamp: None,
            commitment: None,
        }
    }

    #[test]
    fn valid_proof_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let config = PeaceConfig::default();
        let file = prove_to(dir.path(), &config);
        assert_eq!(run_verify(&verify_args(file, "Peace on earth"), &config).unwrap(), 0);
    }

    #[test]
    fn wrong_text_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let config = PeaceConfig::default();
        let file = prove_to(dir.path(), &config);
        assert_eq!(run_verify(&verify_args(file, "War"), &config).unwrap(), 1);
    }

    #[test]
    fn other_minute_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let config = PeaceConfig::default();
        let file = prove_to(dir.path(), &config);
        let mut args = verify_args(file, "Peace on earth");
        args.timestamp = Some(1_700_000_000 + 60);
        assert_eq!(run_verify(&args, &config).unwrap(), 1);
    }

    #[test]
    fn wrong_commitment_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let config = PeaceConfig::default();
        let file = prove_to(dir.path(), &config);
        let mut args = verify_args(file, "Peace on earth");
        args.commitment = Some(FieldElement::ONE);
        assert_eq!(run_verify(&args, &config).unwrap(), 1);
    }

    fn rewrite(file: &std::path::Path, edit: impl FnOnce(&mut ProofDocument)) {
        let mut document = ProofDocument::load(file).unwrap();
        edit(&mut document);
        std::fs::write(file, serde_json::to_string(&document).unwrap()).unwrap();
    }

    #[test]
    fn message_id_matches_recomputation() {
        let dir = tempfile::tempdir().unwrap();
        let config = PeaceConfig::default();
        let file = prove_to(dir.path(), &config);
        let document = ProofDocument::load(&file).unwrap();
        let recomputed =
            recompute_message_id(&document.payload, "  Peace on earth\r\n", 1_700_000_000)
                .unwrap();
        assert_eq!(recomputed, document.message_id);
    }

    #[test]
    fn altered_message_id_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let config = PeaceConfig::default();
        let file = prove_to(dir.path(), &config);
        rewrite(&file, |doc| doc.message_id = FieldElement::ONE);
        assert_eq!(run_verify(&verify_args(file, "Peace on earth"), &config).unwrap(), 1);
    }

    #[test]
    fn unknown_scheme_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let config = PeaceConfig::default();
        let file = prove_to(dir.path(), &config);
        rewrite(&file, |doc| doc.scheme = 2);
        assert_eq!(run_verify(&verify_args(file, "Peace on earth"), &config).unwrap(), 1);
    }

    #[test]
    fn corrupt_document_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("proof.json");
        std::fs::write(&file, "{not json").unwrap();
        let err = run_verify(&verify_args(file, "x"), &PeaceConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse proof document"));
    }
}
