//! # Protocol Error Types
//!
//! One `thiserror` enum per failure tier, plus the umbrella
//! [`ProtocolError`] returned by the builder and orchestrator.
//!
//! ## Tiers
//!
//! | Tier           | Types                                              |
//! |----------------|----------------------------------------------------|
//! | input rejected | [`ValidationError`], `EncodingError`, malformed [`VerificationError`] |
//! | proof failed   | `ProtocolError::ProofGeneration` wrapping [`BackendError`] |
//! | system         | [`ConfigError`], `HashError`, backend failures during verification |
//!
//! A proof that simply does not verify is not an error: verification
//! returns `Ok(false)`.

use std::path::PathBuf;

use peace_core::{CanonicalizationError, EncodingError};
use peace_crypto::HashError;
use thiserror::Error;

/// Rejection of commitment inputs, raised before any hashing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The message text is empty after normalization.
    #[error("message text cannot be empty")]
    EmptyMessage,

    /// The secret passphrase is empty after normalization.
    #[error("secret passphrase cannot be empty")]
    EmptySecret,

    /// The normalized secret contains a line feed or a tab.
    #[error("secret passphrase cannot contain line breaks or tabs")]
    InvalidSecretFormat,
}

/// Failure inside a proof backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The circuit inputs are not valid field elements.
    #[error("invalid circuit inputs: {0}")]
    InvalidInputs(String),

    /// The witness does not satisfy the circuit relation.
    #[error("circuit constraint not satisfied: {0}")]
    UnsatisfiedConstraint(String),

    /// A proof blob could not be decoded.
    #[error("malformed proof: {0}")]
    MalformedProof(String),

    /// The backend returned a public signal vector of the wrong length.
    #[error("backend returned {actual} public signals, expected {expected}")]
    UnexpectedSignalCount {
        /// Signals the circuit declares.
        expected: usize,
        /// Signals actually returned.
        actual: usize,
    },

    /// The prover or verifier process failed.
    #[error("backend execution failed: {0}")]
    Execution(String),

    /// Filesystem or process I/O failed.
    #[error("backend I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend JSON could not be read or written.
    #[error("backend serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Malformed verification input, distinct from a proof that does not verify.
#[derive(Error, Debug)]
pub enum VerificationError {
    /// The proof does not carry exactly five public signals.
    #[error("expected {expected} public signals, got {actual}")]
    SignalCount {
        /// Signals the protocol defines.
        expected: usize,
        /// Signals present in the proof.
        actual: usize,
    },

    /// A public signal is not a parsable field element.
    #[error("public signal {index} is not a field element: {source}")]
    MalformedSignal {
        /// Position in the signal vector.
        index: usize,
        /// Parse failure.
        #[source]
        source: EncodingError,
    },

    /// The expected context could not be encoded.
    #[error("failed to encode expected fields: {0}")]
    Encoding(#[from] EncodingError),

    /// The backend's cryptographic check failed to run.
    #[error("backend verification failed: {0}")]
    Backend(#[from] BackendError),
}

/// Invalid or unreadable configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A chain id override is not an unsigned integer.
    #[error("invalid chain id: {0:?}")]
    InvalidChainId(String),

    /// A contract address override is not a 20-byte hex address.
    #[error("invalid contract address: {0}")]
    InvalidContractAddress(#[source] EncodingError),

    /// A hash provider name is unknown.
    #[error("{0}")]
    Hasher(#[from] HashError),

    /// A backend name is unknown.
    #[error("unknown proof backend: {0} (expected: mock, snarkjs)")]
    UnknownBackend(String),

    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Remediation class of a [`ProtocolError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied bad input and can correct it.
    InputRejected,
    /// The proof backend failed to produce a proof.
    ProofFailed,
    /// Configuration, provider, or backend infrastructure failure.
    System,
}

/// Umbrella error for commitment, proof, and verification operations.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Commitment inputs were rejected.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A value could not be encoded to a field element.
    #[error("encoding failed: {0}")]
    Encoding(#[from] EncodingError),

    /// The message id record could not be canonicalized.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// The hash provider failed.
    #[error("hash provider failed: {0}")]
    Hash(#[from] HashError),

    /// The proof backend failed to produce a proof. Not retried.
    #[error("proof generation failed: {0}")]
    ProofGeneration(#[source] BackendError),

    /// Verification inputs were malformed.
    #[error("verification failed: {0}")]
    Verification(#[from] VerificationError),

    /// Configuration was invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ProtocolError {
    /// Classify the error by remediation path.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::Encoding(_) | Self::Canonicalization(_) => {
                ErrorKind::InputRejected
            }
            Self::Verification(VerificationError::Backend(_)) => ErrorKind::System,
            Self::Verification(_) => ErrorKind::InputRejected,
            Self::ProofGeneration(_) => ErrorKind::ProofFailed,
            Self::Hash(_) | Self::Config(_) => ErrorKind::System,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages() {
        assert_eq!(
            ValidationError::EmptyMessage.to_string(),
            "message text cannot be empty"
        );
        assert_eq!(
            ValidationError::EmptySecret.to_string(),
            "secret passphrase cannot be empty"
        );
        assert!(ValidationError::InvalidSecretFormat
            .to_string()
            .contains("line breaks or tabs"));
    }

    #[test]
    fn signal_count_display() {
        let err = VerificationError::SignalCount {
            expected: 5,
            actual: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains('4'));
    }

    #[test]
    fn malformed_signal_names_index() {
        let err = VerificationError::MalformedSignal {
            index: 3,
            source: EncodingError::InvalidHex("0xzz".into()),
        };
        assert!(err.to_string().contains("signal 3"));
    }

    #[test]
    fn kinds_follow_remediation_paths() {
        let input: ProtocolError = ValidationError::EmptySecret.into();
        assert_eq!(input.kind(), ErrorKind::InputRejected);

        let encoding: ProtocolError = EncodingError::UnsupportedWidth(0).into();
        assert_eq!(encoding.kind(), ErrorKind::InputRejected);

        let proof = ProtocolError::ProofGeneration(BackendError::Execution("boom".into()));
        assert_eq!(proof.kind(), ErrorKind::ProofFailed);

        let malformed: ProtocolError = VerificationError::SignalCount {
            expected: 5,
            actual: 0,
        }
        .into();
        assert_eq!(malformed.kind(), ErrorKind::InputRejected);

        let backend: ProtocolError =
            VerificationError::Backend(BackendError::Execution("no binary".into())).into();
        assert_eq!(backend.kind(), ErrorKind::System);

        let config: ProtocolError = ConfigError::InvalidChainId("abc".into()).into();
        assert_eq!(config.kind(), ErrorKind::System);
    }

    #[test]
    fn proof_generation_wraps_backend_message() {
        let err = ProtocolError::ProofGeneration(BackendError::UnsatisfiedConstraint(
            "h mismatch".into(),
        ));
        assert!(err.to_string().contains("h mismatch"));
    }
}
