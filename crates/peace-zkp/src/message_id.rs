//! # Message Identifier
//!
//! `messageId = hashToField(canonical({text, h, ts, scheme}))`, with the
//! record serialized as compact JSON in exactly that field order. The
//! browser client computes the same bytes with `JSON.stringify`, so the
//! order is fixed by a struct rather than left to a map.

use peace_core::{sha256_digest, CanonicalBytes, CanonicalizationError, FieldElement};
use serde::Serialize;

use crate::commitment::Commitment;

/// The hashed message record. Field order is part of the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageIdPreimage<'a> {
    /// The normalized message.
    pub text: &'a str,
    /// The commitment as `0x` hex.
    pub h: String,
    /// The raw timestamp in seconds, not the bucket.
    pub ts: u64,
    /// Protocol version tag.
    pub scheme: u32,
}

impl<'a> MessageIdPreimage<'a> {
    /// The record for a commitment under a protocol scheme.
    pub fn new(commitment: &'a Commitment, scheme: u32) -> Self {
        Self::from_parts(
            commitment.text(),
            commitment.commitment(),
            commitment.timestamp(),
            scheme,
        )
    }

    /// The record for a message known only by its public parts, as on the
    /// verifying side. `text` must already be normalized.
    pub fn from_parts(text: &'a str, h: FieldElement, ts: u64, scheme: u32) -> Self {
        Self {
            text,
            h: h.to_hex(),
            ts,
            scheme,
        }
    }

    /// Hash the canonical record into the field.
    pub fn message_id(&self) -> Result<FieldElement, CanonicalizationError> {
        let canonical = CanonicalBytes::new(self)?;
        Ok(FieldElement::from_be_bytes_mod_order(&sha256_digest(&canonical)))
    }
}

/// Derive the message id of a commitment.
pub fn calculate_message_id(
    commitment: &Commitment,
    scheme: u32,
) -> Result<FieldElement, CanonicalizationError> {
    MessageIdPreimage::new(commitment, scheme).message_id()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::commitment::CommitmentBuilder;
    use crate::config::ProtocolConfig;
    use peace_crypto::Sha256FieldHasher;

    fn commitment(text: &str, ts: u64) -> Commitment {
        CommitmentBuilder::new(ProtocolConfig::default(), Arc::new(Sha256FieldHasher::new()))
            .create_commitment(text, "secret", ts)
            .unwrap()
    }

    #[test]
    fn known_vector() {
        let c = commitment("Hello", 1_700_000_000);
        let preimage = MessageIdPreimage::new(&c, 1);
        let canonical = CanonicalBytes::new(&preimage).unwrap();
        assert_eq!(
            std::str::from_utf8(canonical.as_bytes()).unwrap(),
            r#"{"text":"Hello","h":"0x1118081fad0c4bc26957336ed347ac1a2cdc29195bc5052d867847de39b468b8","ts":1700000000,"scheme":1}"#
        );
        assert_eq!(
            calculate_message_id(&c, 1).unwrap().to_hex(),
            "0x7861729906481f8fe4112c55569eb7234e94fe5b0e0d9c3458f002817164e92"
        );
    }

    #[test]
    fn raw_timestamp_is_hashed_not_bucket() {
        let a = commitment("Hello", 1_700_000_000);
        let b = commitment("Hello", 1_700_000_001);
        assert_eq!(a.commitment(), b.commitment());
        assert_ne!(
            calculate_message_id(&a, 1).unwrap(),
            calculate_message_id(&b, 1).unwrap()
        );
    }

    #[test]
    fn scheme_changes_id() {
        let c = commitment("Hello", 0);
        assert_ne!(
            calculate_message_id(&c, 1).unwrap(),
            calculate_message_id(&c, 2).unwrap()
        );
    }

    #[test]
    fn public_parts_give_the_same_id() {
        let c = commitment("Hello", 1_700_000_000);
        let from_parts = MessageIdPreimage::from_parts("Hello", c.commitment(), 1_700_000_000, 1)
            .message_id()
            .unwrap();
        assert_eq!(from_parts, calculate_message_id(&c, 1).unwrap());
    }

    #[test]
    fn uses_normalized_text() {
        let a = commitment("Hello", 0);
        let b = commitment("  Hello\n", 0);
        assert_eq!(
            calculate_message_id(&a, 1).unwrap(),
            calculate_message_id(&b, 1).unwrap()
        );
    }
}
