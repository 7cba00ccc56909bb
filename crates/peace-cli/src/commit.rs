//! # Commit Subcommand
//!
//! Prints the seven field elements and the commitment for a message,
//! without generating a proof. The field report includes the secret's
//! field element; `--json` carries only the public values.

use anyhow::{Context, Result};
use clap::Args;
use peace_core::now_unix_seconds;
use peace_zkp::{Commitment, PeaceConfig};

use crate::context;

/// Arguments for `peace commit`.
#[derive(Args, Debug)]
pub struct CommitArgs {
    /// Message text.
    #[arg(long)]
    pub text: String,

    /// Secret passphrase.
    #[arg(long)]
    pub secret: String,

    /// Unix timestamp in seconds (default: now).
    #[arg(long)]
    pub timestamp: Option<u64>,

    /// Print the commitment as JSON instead of a field report.
    #[arg(long)]
    pub json: bool,
}

/// Execute `peace commit`.
pub fn run_commit(args: &CommitArgs, config: &PeaceConfig) -> Result<u8> {
    let commitment = build(args, config)?;
    if args.json {
        println!("{}", render_json(&commitment)?);
    } else {
        println!("{}", commitment.field_report());
        println!("commitment: {}", commitment.commitment());
    }
    Ok(0)
}

fn build(args: &CommitArgs, config: &PeaceConfig) -> Result<Commitment> {
    let timestamp = args.timestamp.unwrap_or_else(now_unix_seconds);
    context::builder(config)
        .create_commitment(&args.text, &args.secret, timestamp)
        .context("failed to create commitment")
}

fn render_json(commitment: &Commitment) -> Result<String> {
    serde_json::to_string_pretty(commitment).context("failed to serialize commitment")
}

#[cfg(test)]
mod tests {
    use super::*;
    use peace_crypto::HasherKind;

    fn args(text: &str, secret: &str) -> CommitArgs {
        CommitArgs {
            text: text.to_string(),
            secret: secret.to_string(),
            timestamp: Some(1_700_000_000),
            json: true,
        }
    }

    #[test]
    fn known_commitment_with_sha256_provider() {
        let config = PeaceConfig {
            hasher: HasherKind::Sha256,
            ..PeaceConfig::default()
        };
        let commitment = build(&args("Hello", "secret"), &config).unwrap();
        assert_eq!(
            commitment.commitment().to_hex(),
            "0x1118081fad0c4bc26957336ed347ac1a2cdc29195bc5052d867847de39b468b8"
        );
        assert_eq!(run_commit(&args("Hello", "secret"), &config).unwrap(), 0);
    }

    #[test]
    fn json_output_carries_only_public_elements() {
        let config = PeaceConfig {
            hasher: HasherKind::Sha256,
            ..PeaceConfig::default()
        };
        let commitment = build(&args("Hello", "secret"), &config).unwrap();
        let json = render_json(&commitment).unwrap();
        let fe = commitment.field_elements();
        assert!(json.contains(&fe.h.to_hex()));
        assert!(json.contains(&fe.text_hash_f.to_hex()));
        assert!(!json.contains(&fe.s_f.to_hex()));
        assert!(!json.contains(&fe.d.to_hex()));
        assert!(!json.contains("\"secret\""));
    }

    #[test]
    fn empty_secret_is_error() {
        let err = run_commit(&args("Hello", ""), &PeaceConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("secret passphrase cannot be empty"));
    }
}
