//! # Configuration Resolution
//!
//! Layers the YAML file, environment overrides, and command-line flags
//! into one [`PeaceConfig`], then builds the commitment builder from it.

use std::path::Path;

use anyhow::{Context, Result};
use peace_crypto::HasherKind;
use peace_zkp::{BackendKind, CommitmentBuilder, PeaceConfig};

/// Resolve the effective configuration.
///
/// Flags win over the environment, which wins over the file.
pub fn load_config(
    path: Option<&Path>,
    backend: Option<BackendKind>,
    hasher: Option<HasherKind>,
) -> Result<PeaceConfig> {
    let base = match path {
        Some(path) => PeaceConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => PeaceConfig::default(),
    };
    let mut config = base
        .with_env_overrides()
        .context("invalid environment override")?;
    if let Some(backend) = backend {
        config.backend = backend;
    }
    if let Some(hasher) = hasher {
        config.hasher = hasher;
    }
    tracing::debug!(
        chain_id = config.protocol.chain_id,
        contract = %config.protocol.contract_address,
        hasher = %config.hasher,
        backend = %config.backend,
        "resolved configuration"
    );
    Ok(config)
}

/// Build a commitment builder for `config`.
pub fn builder(config: &PeaceConfig) -> CommitmentBuilder {
    CommitmentBuilder::new(config.protocol.clone(), config.hasher.build())
}
