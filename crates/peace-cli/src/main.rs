//! # peace CLI entry point
//!
//! Parses command-line arguments, resolves configuration, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use peace_cli::commit::{run_commit, CommitArgs};
use peace_cli::context::load_config;
use peace_cli::message_id::{run_message_id, MessageIdArgs};
use peace_cli::prove::{run_prove, ProveArgs};
use peace_cli::verify::{run_verify, VerifyArgs};
use peace_crypto::HasherKind;
use peace_zkp::BackendKind;

/// Peace message protocol CLI
///
/// Commits a message to a secret, chain, contract and one-minute window,
/// proves knowledge of the secret, and verifies such proofs.
#[derive(Parser, Debug)]
#[command(name = "peace", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Proof backend: mock or snarkjs.
    #[arg(long, global = true)]
    backend: Option<BackendKind>,

    /// Hash provider: poseidon or sha256.
    #[arg(long, global = true)]
    hasher: Option<HasherKind>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the field elements and commitment for a message.
    Commit(CommitArgs),

    /// Generate a proof and write the transport document.
    Prove(ProveArgs),

    /// Verify a proof document against a claimed message.
    Verify(VerifyArgs),

    /// Derive the message id.
    MessageId(MessageIdArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("peace CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match load_config(cli.config.as_deref(), cli.backend, cli.hasher) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match &cli.command {
        Commands::Commit(args) => run_commit(args, &config),
        Commands::Prove(args) => run_prove(args, &config),
        Commands::Verify(args) => run_verify(args, &config),
        Commands::MessageId(args) => run_message_id(args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
