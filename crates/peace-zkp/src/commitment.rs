//! # Commitment Construction
//!
//! Builds the two-stage commitment that binds a message to a secret
//! passphrase, a chain, a contract, and a one-minute time window:
//!
//! ```text
//! d = Hash5(textHashF, chainIdF, contractF, 0, tsBucketF)
//! h = Hash2(d, sF)
//! ```
//!
//! The four public inputs of `d` are recomputable by anyone who knows the
//! message and timestamp; `sF` is the witness. The fourth slot of `Hash5`
//! is a constant zero ([`KIOSK_SLOT`]) reserved for a venue identifier the
//! current protocol version does not bind.
//!
//! ## Validation
//!
//! Inputs are checked before any hashing, in this order: empty message,
//! empty secret, then line feeds or tabs in the (normalized) secret.

use std::fmt;
use std::sync::Arc;

use peace_core::{
    hash_to_field, normalize, now_unix_seconds, text_to_field, timestamp_bucket, uint_to_bytes,
    EncodingError, FieldElement,
};
use peace_crypto::{FieldHasher, HashError};
use serde::Serialize;

use crate::config::ProtocolConfig;
use crate::error::{ProtocolError, ValidationError};

/// Constant occupying the reserved venue slot of `Hash5`.
pub const KIOSK_SLOT: FieldElement = FieldElement::ZERO;

/// Width of the chain id encoding in bytes.
const CHAIN_ID_WIDTH: usize = 32;

/// Width of the timestamp bucket encoding in bytes.
const TS_BUCKET_WIDTH: usize = 8;

/// The secret-independent half of a commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicFields {
    /// `textToField(text)`.
    pub text_hash_f: FieldElement,
    /// Field encoding of the chain id.
    pub chain_id_f: FieldElement,
    /// Field encoding of the contract address.
    pub contract_f: FieldElement,
    /// Field encoding of the timestamp bucket.
    pub ts_bucket_f: FieldElement,
    /// The message after normalization.
    pub normalized_text: String,
    /// The raw timestamp in seconds.
    pub timestamp: u64,
    /// `floor(timestamp / 60)`.
    pub ts_bucket: u64,
}

impl PublicFields {
    /// The four public inputs of `d`, in circuit order.
    pub fn inputs(&self) -> [FieldElement; 4] {
        [
            self.text_hash_f,
            self.chain_id_f,
            self.contract_f,
            self.ts_bucket_f,
        ]
    }

    /// The public signal vector for a given commitment value.
    pub fn signals(&self, commitment: FieldElement) -> [FieldElement; 5] {
        [
            self.text_hash_f,
            self.chain_id_f,
            self.contract_f,
            self.ts_bucket_f,
            commitment,
        ]
    }
}

/// All seven field elements of a commitment.
///
/// Only the public values are serialized; `s_f` and `d` are witness
/// values and stay in memory.
#[derive(Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldElements {
    /// `hash_to_field` of the normalized message.
    pub text_hash_f: FieldElement,
    /// The chain id as a field element.
    pub chain_id_f: FieldElement,
    /// The contract address as a field element.
    pub contract_f: FieldElement,
    /// The one-minute time bucket.
    pub ts_bucket_f: FieldElement,
    /// Witness: field encoding of the secret.
    #[serde(skip)]
    pub s_f: FieldElement,
    /// Intermediate `Hash5` of the public context.
    #[serde(skip)]
    pub d: FieldElement,
    /// The public commitment.
    pub h: FieldElement,
}

impl FieldElements {
    /// Labelled elements in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FieldElement)> {
        [
            ("textHashF", self.text_hash_f),
            ("chainIdF", self.chain_id_f),
            ("contractF", self.contract_f),
            ("tsBucketF", self.ts_bucket_f),
            ("sF", self.s_f),
            ("d", self.d),
            ("h", self.h),
        ]
        .into_iter()
    }

    /// Whether every element is below the field modulus.
    pub fn all_valid(&self) -> bool {
        self.iter()
            .all(|(_, fe)| FieldElement::try_from_be_bytes(fe.to_be_bytes()).is_ok())
    }

    /// `[textHashF, chainIdF, contractF, tsBucketF, h]`.
    pub fn public_signals(&self) -> [FieldElement; 5] {
        [
            self.text_hash_f,
            self.chain_id_f,
            self.contract_f,
            self.ts_bucket_f,
            self.h,
        ]
    }
}

impl fmt::Debug for FieldElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldElements")
            .field("text_hash_f", &self.text_hash_f)
            .field("chain_id_f", &self.chain_id_f)
            .field("contract_f", &self.contract_f)
            .field("ts_bucket_f", &self.ts_bucket_f)
            .field("s_f", &"<redacted>")
            .field("d", &self.d)
            .field("h", &self.h)
            .finish()
    }
}

/// A commitment to a message and a secret passphrase.
///
/// Immutable once built. The secret is retained for proof generation but
/// never serialized or printed.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Commitment {
    text: String,
    #[serde(skip)]
    secret: String,
    timestamp: u64,
    field_elements: FieldElements,
}

impl Commitment {
    /// The normalized message.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The normalized secret passphrase.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// The timestamp in seconds.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// All seven field elements.
    pub fn field_elements(&self) -> &FieldElements {
        &self.field_elements
    }

    /// The public commitment value `h`.
    pub fn commitment(&self) -> FieldElement {
        self.field_elements.h
    }

    /// Human-readable listing of the field elements.
    pub fn field_report(&self) -> String {
        let mut out = String::new();
        for (label, fe) in self.field_elements.iter() {
            out.push_str(&format!("{:<11} {}\n", format!("{label}:"), fe));
        }
        out.push_str(&format!(
            "all field elements valid: {}\n",
            self.field_elements.all_valid()
        ));
        out
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commitment")
            .field("text", &self.text)
            .field("secret", &"<redacted>")
            .field("timestamp", &self.timestamp)
            .field("field_elements", &self.field_elements)
            .finish()
    }
}

/// Check commitment inputs and return the normalized text and secret.
pub fn validate_inputs(text: &str, secret: &str) -> Result<(String, String), ValidationError> {
    let text = normalize(text);
    if text.is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    let secret = normalize(secret);
    if secret.is_empty() {
        return Err(ValidationError::EmptySecret);
    }
    if secret.contains(['\n', '\t']) {
        return Err(ValidationError::InvalidSecretFormat);
    }
    Ok((text, secret))
}

/// Evaluate the commitment relation: returns `(d, h)`.
///
/// This is the function the circuit constrains; the mock backend calls it
/// to check a witness.
pub fn derive_commitment(
    hasher: &dyn FieldHasher,
    public: [FieldElement; 4],
    s_f: FieldElement,
) -> Result<(FieldElement, FieldElement), HashError> {
    let [text_hash_f, chain_id_f, contract_f, ts_bucket_f] = public;
    let d = hasher.hash5([text_hash_f, chain_id_f, contract_f, KIOSK_SLOT, ts_bucket_f])?;
    let h = hasher.hash2([d, s_f])?;
    Ok((d, h))
}

/// Deterministic commitment construction for one chain and contract.
#[derive(Debug, Clone)]
pub struct CommitmentBuilder {
    config: ProtocolConfig,
    hasher: Arc<dyn FieldHasher>,
}

impl CommitmentBuilder {
    /// Create a builder bound to `config`, hashing with `hasher`.
    pub fn new(config: ProtocolConfig, hasher: Arc<dyn FieldHasher>) -> Self {
        Self { config, hasher }
    }

    /// The protocol configuration.
    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// The hash provider.
    pub fn hasher(&self) -> &dyn FieldHasher {
        self.hasher.as_ref()
    }

    /// Derive the four public field elements for a message and timestamp.
    ///
    /// Needs no secret and performs no validation: verifiers call this with
    /// the claimed plaintext.
    pub fn calculate_field_elements(
        &self,
        text: &str,
        timestamp: u64,
    ) -> Result<PublicFields, EncodingError> {
        let normalized_text = normalize(text);
        let text_hash_f = text_to_field(&normalized_text);

        let chain_id_f =
            hash_to_field(&uint_to_bytes(u128::from(self.config.chain_id), CHAIN_ID_WIDTH)?);

        let contract_f = hash_to_field(self.config.contract_address.as_bytes());

        let ts_bucket = timestamp_bucket(timestamp);
        let ts_bucket_f = hash_to_field(&uint_to_bytes(u128::from(ts_bucket), TS_BUCKET_WIDTH)?);

        Ok(PublicFields {
            text_hash_f,
            chain_id_f,
            contract_f,
            ts_bucket_f,
            normalized_text,
            timestamp,
            ts_bucket,
        })
    }

    /// Build a commitment.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::Validation`] for empty or malformed inputs.
    /// - [`ProtocolError::Encoding`] / [`ProtocolError::Hash`] if encoding or
    ///   the hash provider fails.
    pub fn create_commitment(
        &self,
        text: &str,
        secret: &str,
        timestamp: u64,
    ) -> Result<Commitment, ProtocolError> {
        let (_, normalized_secret) = validate_inputs(text, secret)?;
        let public = self.calculate_field_elements(text, timestamp)?;
        let s_f = text_to_field(&normalized_secret);
        let (d, h) = derive_commitment(self.hasher(), public.inputs(), s_f)?;

        tracing::debug!(
            hasher = self.hasher.name(),
            chain_id = self.config.chain_id,
            ts_bucket = public.ts_bucket,
            commitment = %h,
            "commitment created"
        );

        Ok(Commitment {
            text: public.normalized_text,
            secret: normalized_secret,
            timestamp,
            field_elements: FieldElements {
                text_hash_f: public.text_hash_f,
                chain_id_f: public.chain_id_f,
                contract_f: public.contract_f,
                ts_bucket_f: public.ts_bucket_f,
                s_f,
                d,
                h,
            },
        })
    }

    /// Build a commitment stamped with the current time.
    pub fn create_commitment_now(
        &self,
        text: &str,
        secret: &str,
    ) -> Result<Commitment, ProtocolError> {
        self.create_commitment(text, secret, now_unix_seconds())
    }
}
