//! # Hash-to-Field Capability
//!
//! The commitment protocol needs exactly two fixed-arity hashes over the
//! BN254 scalar field: `Hash5` to bind the public context and `Hash2` to
//! bind that context to the secret. Both are modelled as one capability,
//! [`FieldHasher`], injected into the commitment builder, the mock proof
//! backend, and the verifier.
//!
//! Arity is carried in the type (`[FieldElement; 2]`, `[FieldElement; 5]`),
//! so a call with the wrong number of inputs does not compile.
//!
//! ## Provider Selection
//!
//! [`HasherKind`] names the available providers. The process-level choice
//! comes from `PEACE_HASHER` (`poseidon` or `sha256`, default `poseidon`).

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use peace_core::FieldElement;
use serde::{Deserialize, Serialize};

use crate::error::HashError;
use crate::poseidon::PoseidonHasher;
use crate::sha256::Sha256FieldHasher;

/// Environment variable selecting the hash provider.
pub const HASHER_ENV: &str = "PEACE_HASHER";

/// Fixed-arity hash over the BN254 scalar field.
pub trait FieldHasher: Send + Sync + fmt::Debug {
    /// Short provider name for logs and reports.
    fn name(&self) -> &'static str;

    /// Hash two field elements.
    fn hash2(&self, inputs: [FieldElement; 2]) -> Result<FieldElement, HashError>;

    /// Hash five field elements.
    fn hash5(&self, inputs: [FieldElement; 5]) -> Result<FieldElement, HashError>;
}

/// The available hash-to-field providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HasherKind {
    /// circomlib Poseidon; matches the external circuit.
    #[default]
    Poseidon,
    /// SHA-256 over concatenated field words; not circuit-compatible.
    Sha256,
}

impl HasherKind {
    /// Instantiate the provider.
    pub fn build(self) -> Arc<dyn FieldHasher> {
        match self {
            Self::Poseidon => Arc::new(PoseidonHasher::new()),
            Self::Sha256 => Arc::new(Sha256FieldHasher::new()),
        }
    }

    /// Read the provider choice from `PEACE_HASHER`.
    ///
    /// Returns the default provider when the variable is unset.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::UnknownProvider`] when the variable names an
    /// unknown provider.
    pub fn from_env() -> Result<Self, HashError> {
        let kind = Self::from_env_value(std::env::var(HASHER_ENV).ok().as_deref())?;
        tracing::debug!(provider = %kind, "hash provider selected from environment");
        Ok(kind)
    }

    /// Resolve an optional provider name, defaulting when absent or blank.
    pub fn from_env_value(value: Option<&str>) -> Result<Self, HashError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(name) => name.parse(),
        }
    }

    /// The lowercase provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poseidon => "poseidon",
            Self::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for HasherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HasherKind {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "poseidon" => Ok(Self::Poseidon),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            other => Err(HashError::UnknownProvider(other.to_string())),
        }
    }
}
