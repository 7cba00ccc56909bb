//! # Message-Id Subcommand
//!
//! Derives the identifier of a message without generating a proof.

use anyhow::{Context, Result};
use clap::Args;
use peace_core::{now_unix_seconds, FieldElement};
use peace_zkp::{calculate_message_id, PeaceConfig, PROTOCOL_SCHEME};

use crate::context;

/// Arguments for `peace message-id`.
#[derive(Args, Debug)]
pub struct MessageIdArgs {
    /// Message text.
    #[arg(long)]
    pub text: String,

    /// Secret passphrase.
    #[arg(long)]
    pub secret: String,

    /// Unix timestamp in seconds (default: now).
    #[arg(long)]
    pub timestamp: Option<u64>,
}

/// Execute `peace message-id`.
pub fn run_message_id(args: &MessageIdArgs, config: &PeaceConfig) -> Result<u8> {
    println!("{}", derive(args, config)?);
    Ok(0)
}

fn derive(args: &MessageIdArgs, config: &PeaceConfig) -> Result<FieldElement> {
    let timestamp = args.timestamp.unwrap_or_else(now_unix_seconds);
    let commitment = context::builder(config)
        .create_commitment(&args.text, &args.secret, timestamp)
        .context("failed to create commitment")?;
    calculate_message_id(&commitment, PROTOCOL_SCHEME)
        .context("failed to derive message id")
}
