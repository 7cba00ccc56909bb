//! # Configuration
//!
//! Protocol parameters, backend selection, and snarkjs artifact paths.
//!
//! Values come from three layers, later layers winning:
//!
//! 1. Built-in defaults (Base mainnet chain id, the demo contract address).
//! 2. An optional YAML file with `protocol`, `hasher`, `backend` and
//!    `snarkjs` sections.
//! 3. Environment overrides: `PEACE_CHAIN_ID`, `PEACE_CONTRACT_ADDRESS`,
//!    `PEACE_HASHER`.
//!
//! Malformed overrides are errors. Once a builder, orchestrator or verifier
//! is constructed its configuration is read-only.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use peace_core::ContractAddress;
use peace_crypto::{HasherKind, HASHER_ENV};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable overriding the chain id.
pub const CHAIN_ID_ENV: &str = "PEACE_CHAIN_ID";

/// Environment variable overriding the contract address.
pub const CONTRACT_ADDRESS_ENV: &str = "PEACE_CONTRACT_ADDRESS";

/// Base mainnet.
pub const DEFAULT_CHAIN_ID: u64 = 8453;

/// Contract address used when none is configured.
pub const DEFAULT_CONTRACT_ADDRESS: [u8; 20] = [
    0x12, 0x34, 0x56, 0x78, 0x90, 0x12, 0x34, 0x56, 0x78, 0x90, 0x12, 0x34, 0x56, 0x78, 0x90,
    0x12, 0x34, 0x56, 0x78, 0x90,
];

/// Protocol version carried in every message id. Not configurable.
pub const PROTOCOL_SCHEME: u32 = 1;

/// Chain and contract binding for commitments.
///
/// Unknown YAML keys, including a stray `scheme`, are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// EVM chain id.
    pub chain_id: u64,
    /// Contract the messages are posted to.
    pub contract_address: ContractAddress,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            contract_address: ContractAddress::from_bytes(DEFAULT_CONTRACT_ADDRESS),
        }
    }
}

impl ProtocolConfig {
    /// Apply `PEACE_CHAIN_ID` and `PEACE_CONTRACT_ADDRESS` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a set variable is malformed.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (the environment in production).
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = lookup(CHAIN_ID_ENV) {
            self.chain_id = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidChainId(raw.clone()))?;
        }
        if let Some(raw) = lookup(CONTRACT_ADDRESS_ENV) {
            self.contract_address = raw
                .trim()
                .parse()
                .map_err(ConfigError::InvalidContractAddress)?;
        }
        Ok(self)
    }
}

/// Which proof backend drives proving and verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Transparent in-process backend; no zero-knowledge.
    #[default]
    Mock,
    /// The compiled circuit driven through the snarkjs CLI.
    Snarkjs,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => f.write_str("mock"),
            Self::Snarkjs => f.write_str("snarkjs"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "snarkjs" => Ok(Self::Snarkjs),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Paths to the snarkjs binary and the compiled circuit artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnarkjsConfig {
    /// snarkjs executable (resolved through `PATH` when bare).
    pub binary: PathBuf,
    /// Witness generator compiled from the circuit.
    pub circuit_wasm: PathBuf,
    /// Groth16 proving key.
    pub proving_key: PathBuf,
    /// Groth16 verification key (JSON).
    pub verification_key: PathBuf,
}

impl Default for SnarkjsConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("snarkjs"),
            circuit_wasm: PathBuf::from("./build/peace_js/peace.wasm"),
            proving_key: PathBuf::from("./setup/peace_fixed_final.zkey"),
            verification_key: PathBuf::from("./setup/verification_key_fixed.json"),
        }
    }
}

/// The full configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeaceConfig {
    /// Chain and contract binding.
    pub protocol: ProtocolConfig,
    /// Hash-to-field provider.
    pub hasher: HasherKind,
    /// Proof backend.
    pub backend: BackendKind,
    /// snarkjs artifact locations.
    pub snarkjs: SnarkjsConfig,
}

impl PeaceConfig {
    /// Parse a YAML document. Missing sections take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Apply all environment overrides.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        self.protocol = self.protocol.with_overrides(&lookup)?;
        if let Some(raw) = lookup(HASHER_ENV) {
            if !raw.trim().is_empty() {
                self.hasher = raw.trim().parse()?;
            }
        }
        Ok(self)
    }
}
