//! # Prove Subcommand
//!
//! Generates a proof for a message and writes a [`ProofDocument`]: the
//! transport payload plus the message id, timestamp and scheme a verifier
//! needs to check it. The scheme is always [`PROTOCOL_SCHEME`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use peace_core::{now_unix_seconds, FieldElement};
use peace_zkp::{
    BackendKind, CommitmentBuilder, MockProofBackend, PeaceConfig, ProofBackend, ProofData,
    ProofOrchestrator, SnarkjsBackend, TransportPayload, PROTOCOL_SCHEME,
};
use serde::{Deserialize, Serialize};

use crate::context;

/// Arguments for `peace prove`.
#[derive(Args, Debug)]
pub struct ProveArgs {
    /// Message text.
    #[arg(long)]
    pub text: String,

    /// Secret passphrase.
    #[arg(long)]
    pub secret: String,

    /// Unix timestamp in seconds (default: now).
    #[arg(long)]
    pub timestamp: Option<u64>,

    /// Transaction reference to include in the payload.
    #[arg(long)]
    pub tx: Option<String>,

    /// Write the document here instead of stdout.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

/// The file `peace prove` writes and `peace verify` reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofDocument {
    /// Message id claimed by the prover; `peace verify` recomputes it.
    pub message_id: FieldElement,
    /// Raw timestamp the commitment was made at.
    pub timestamp: u64,
    /// Protocol version tag.
    pub scheme: u32,
    /// The proof and its public signals.
    pub payload: TransportPayload,
}

impl ProofDocument {
    /// Package proof data for transport.
    pub fn new(data: &ProofData, tx: Option<String>) -> Self {
        Self {
            message_id: data.message_id,
            timestamp: data.commitment.timestamp(),
            scheme: PROTOCOL_SCHEME,
            payload: TransportPayload::from_proof_data(data, tx),
        }
    }

    /// Read a document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read proof document: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse proof document: {}", path.display()))
    }
}

/// Execute `peace prove`.
pub fn run_prove(args: &ProveArgs, config: &PeaceConfig) -> Result<u8> {
    let timestamp = args.timestamp.unwrap_or_else(now_unix_seconds);
    let builder = context::builder(config);
    let data = match config.backend {
        BackendKind::Mock => {
            let backend = MockProofBackend::new(config.hasher.build());
            generate(builder, backend, &args.text, &args.secret, timestamp)?
        }
        BackendKind::Snarkjs => {
            let backend = SnarkjsBackend::new(config.snarkjs.clone());
            generate(builder, backend, &args.text, &args.secret, timestamp)?
        }
    };

    let document = ProofDocument::new(&data, args.tx.clone());
    let json = serde_json::to_string_pretty(&document).context("failed to serialize proof")?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write proof: {}", path.display()))?;
            println!("OK: proof written to {}", path.display());
            println!("  Message id: {}", document.message_id);
        }
        None => println!("{json}"),
    }
    Ok(0)
}

fn generate<B: ProofBackend>(
    builder: CommitmentBuilder,
    backend: B,
    text: &str,
    secret: &str,
    timestamp: u64,
) -> Result<ProofData> {
    ProofOrchestrator::new(builder, backend)
        .generate_proof(text, secret, timestamp)
        .context("failed to generate proof")
}
