//! # snarkjs Backend
//!
//! Drives the externally compiled peace circuit through the snarkjs CLI:
//!
//! ```text
//! snarkjs groth16 fullprove input.json peace.wasm peace.zkey proof.json public.json
//! snarkjs groth16 verify verification_key.json public.json proof.json
//! ```
//!
//! Every call works in its own temporary directory, removed on return, so
//! concurrent calls share nothing.
//!
//! snarkjs exits non-zero and prints `Invalid proof` when a proof does not
//! verify; that outcome is `Ok(false)`. Any other non-zero exit is
//! [`BackendError::Execution`].

use std::path::Path;
use std::process::{Command, Output};

use peace_core::FieldElement;
use serde::{Deserialize, Serialize};

use crate::backend::{BackendOutput, CircuitInputs, Groth16Proof, ProofBackend};
use crate::config::SnarkjsConfig;
use crate::error::BackendError;

/// Output marker snarkjs prints for a proof that does not verify.
const INVALID_PROOF_MARKER: &str = "Invalid proof";

/// A proof in snarkjs JSON form (projective coordinates).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnarkjsProof {
    /// `A` as `[x, y, z]`.
    pub pi_a: Vec<String>,
    /// `B` as three coordinate pairs.
    pub pi_b: Vec<Vec<String>>,
    /// `C` as `[x, y, z]`.
    pub pi_c: Vec<String>,
    /// Always `groth16`.
    #[serde(default = "default_protocol")]
    pub protocol: String,
    /// Always `bn128`.
    #[serde(default = "default_curve")]
    pub curve: String,
}

fn default_protocol() -> String {
    "groth16".to_string()
}

fn default_curve() -> String {
    "bn128".to_string()
}

impl From<&Groth16Proof> for SnarkjsProof {
    fn from(proof: &Groth16Proof) -> Self {
        Self {
            pi_a: vec![proof.a[0].clone(), proof.a[1].clone(), "1".into()],
            pi_b: vec![
                proof.b[0].to_vec(),
                proof.b[1].to_vec(),
                vec!["1".into(), "0".into()],
            ],
            pi_c: vec![proof.c[0].clone(), proof.c[1].clone(), "1".into()],
            protocol: default_protocol(),
            curve: default_curve(),
        }
    }
}

impl TryFrom<SnarkjsProof> for Groth16Proof {
    type Error = BackendError;

    fn try_from(proof: SnarkjsProof) -> Result<Self, Self::Error> {
        fn pair(values: &[String], what: &str) -> Result<[String; 2], BackendError> {
            match values {
                [x, y, ..] => Ok([x.clone(), y.clone()]),
                _ => Err(BackendError::MalformedProof(format!(
                    "{what} has {} coordinates, expected at least 2",
                    values.len()
                ))),
            }
        }

        let (b0, b1) = match proof.pi_b.as_slice() {
            [b0, b1, ..] => (pair(b0, "pi_b[0]")?, pair(b1, "pi_b[1]")?),
            _ => {
                return Err(BackendError::MalformedProof(format!(
                    "pi_b has {} rows, expected at least 2",
                    proof.pi_b.len()
                )))
            }
        };
        Ok(Self {
            a: pair(&proof.pi_a, "pi_a")?,
            b: [b0, b1],
            c: pair(&proof.pi_c, "pi_c")?,
        })
    }
}

/// A Groth16 verification key as exported by `snarkjs zkey export verificationkey`.
#[derive(Debug, Clone, PartialEq)]
pub struct SnarkjsVerifyingKey(serde_json::Value);

impl SnarkjsVerifyingKey {
    /// Wrap an already-parsed key.
    pub fn from_json(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// The key JSON.
    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Read a verification key file.
pub fn load_verifying_key(path: &Path) -> Result<SnarkjsVerifyingKey, BackendError> {
    let bytes = std::fs::read(path)?;
    Ok(SnarkjsVerifyingKey(serde_json::from_slice(&bytes)?))
}

/// Groth16 over the compiled circuit, via the snarkjs CLI.
#[derive(Debug, Clone)]
pub struct SnarkjsBackend {
    config: SnarkjsConfig,
}

impl SnarkjsBackend {
    /// Create a backend using the configured binary and artifacts.
    pub fn new(config: SnarkjsConfig) -> Self {
        Self { config }
    }

    /// The artifact configuration.
    pub fn config(&self) -> &SnarkjsConfig {
        &self.config
    }

    /// Load the configured verification key.
    pub fn load_verifying_key(&self) -> Result<SnarkjsVerifyingKey, BackendError> {
        load_verifying_key(&self.config.verification_key)
    }

    fn run(&self, command: &mut Command) -> Result<Output, BackendError> {
        tracing::debug!(binary = %self.config.binary.display(), "invoking snarkjs");
        Ok(command.output()?)
    }
}

fn process_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text.trim().to_string()
}

impl ProofBackend for SnarkjsBackend {
    type VerifyingKey = SnarkjsVerifyingKey;

    fn name(&self) -> &'static str {
        "snarkjs"
    }

    fn prove(&self, inputs: &CircuitInputs) -> Result<BackendOutput, BackendError> {
        let dir = tempfile::tempdir()?;
        let input_path = dir.path().join("input.json");
        let proof_path = dir.path().join("proof.json");
        let public_path = dir.path().join("public.json");
        std::fs::write(&input_path, serde_json::to_vec(inputs)?)?;

        let output = self.run(
            Command::new(&self.config.binary)
                .args(["groth16", "fullprove"])
                .arg(&input_path)
                .arg(&self.config.circuit_wasm)
                .arg(&self.config.proving_key)
                .arg(&proof_path)
                .arg(&public_path),
        )?;
        if !output.status.success() {
            return Err(BackendError::Execution(format!(
                "groth16 fullprove exited with {}: {}",
                output.status,
                process_output(&output)
            )));
        }

        let proof: SnarkjsProof = serde_json::from_slice(&std::fs::read(&proof_path)?)?;
        let raw_signals: Vec<String> = serde_json::from_slice(&std::fs::read(&public_path)?)?;
        let public_signals = raw_signals
            .iter()
            .enumerate()
            .map(|(i, s)| {
                FieldElement::from_decimal(s).map_err(|e| {
                    BackendError::Execution(format!("public signal {i} is not a field element: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BackendOutput {
            proof: Groth16Proof::try_from(proof)?,
            public_signals,
        })
    }

    fn verify(
        &self,
        vk: &Self::VerifyingKey,
        public_signals: &[FieldElement],
        proof: &Groth16Proof,
    ) -> Result<bool, BackendError> {
        let dir = tempfile::tempdir()?;
        let vk_path = dir.path().join("verification_key.json");
        let public_path = dir.path().join("public.json");
        let proof_path = dir.path().join("proof.json");

        let decimals: Vec<String> = public_signals.iter().map(FieldElement::to_decimal).collect();
        std::fs::write(&vk_path, serde_json::to_vec(vk.as_json())?)?;
        std::fs::write(&public_path, serde_json::to_vec(&decimals)?)?;
        std::fs::write(&proof_path, serde_json::to_vec(&SnarkjsProof::from(proof))?)?;

        let output = self.run(
            Command::new(&self.config.binary)
                .args(["groth16", "verify"])
                .arg(&vk_path)
                .arg(&public_path)
                .arg(&proof_path),
        )?;
        if output.status.success() {
            return Ok(true);
        }
        let text = process_output(&output);
        if text.contains(INVALID_PROOF_MARKER) {
            return Ok(false);
        }
        Err(BackendError::Execution(format!(
            "groth16 verify exited with {}: {text}",
            output.status
        )))
    }
}
