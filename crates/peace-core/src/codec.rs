//! # Field Codec: Application Data to Field Elements
//!
//! All conversions between raw application data and [`FieldElement`]s.
//! Nothing here makes a cryptographic judgment: the digest is a fixed
//! SHA-256 followed by reduction modulo the BN254 order.
//!
//! ## Text Normalization
//!
//! Text is normalized before it is hashed so that visually identical
//! messages typed on different platforms commit to the same value:
//!
//! 1. Unicode NFC.
//! 2. Trim leading and trailing whitespace.
//! 3. CRLF and lone CR become LF.
//!
//! ## Fixed-Width Encodings
//!
//! Integers are encoded big-endian and zero-padded to a fixed width (8 bytes
//! for the timestamp bucket, 32 bytes for the chain id). Addresses are
//! left-padded to 20 bytes.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use unicode_normalization::UnicodeNormalization;

use crate::digest::sha256;
use crate::error::EncodingError;
use crate::field::FieldElement;

/// Length of a contract address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Widest fixed-width integer encoding supported (one field word).
const MAX_WIDTH: usize = 32;

/// Normalize text: NFC, trim, then collapse CRLF and lone CR to LF.
///
/// Trimming follows JavaScript's `String.prototype.trim`, not
/// [`str::trim`]: U+FEFF is stripped and U+0085 is kept.
pub fn normalize(text: &str) -> String {
    let composed: String = text.nfc().collect();
    composed
        .trim_matches(is_js_whitespace)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

/// ECMAScript `WhiteSpace` and `LineTerminator` code points.
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000A}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// SHA-256 the bytes, read the digest as a big-endian integer, reduce mod `P`.
pub fn hash_to_field(bytes: &[u8]) -> FieldElement {
    FieldElement::from_be_bytes_mod_order(&sha256(bytes))
}

/// `hash_to_field(UTF8(normalize(text)))`.
pub fn text_to_field(text: &str) -> FieldElement {
    hash_to_field(normalize(text).as_bytes())
}

/// Encode an unsigned integer as exactly `width` big-endian bytes.
///
/// # Errors
///
/// - [`EncodingError::UnsupportedWidth`] unless `1 <= width <= 32`.
/// - [`EncodingError::IntegerOverflow`] if `value` needs more than `width` bytes.
pub fn uint_to_bytes(value: u128, width: usize) -> Result<Vec<u8>, EncodingError> {
    if width == 0 || width > MAX_WIDTH {
        return Err(EncodingError::UnsupportedWidth(width));
    }
    let significant = ((128 - value.leading_zeros() as usize) + 7) / 8;
    if significant > width {
        return Err(EncodingError::IntegerOverflow { value, width });
    }
    let be = value.to_be_bytes();
    let mut out = vec![0u8; width];
    out[width - significant..].copy_from_slice(&be[be.len() - significant..]);
    Ok(out)
}

/// Parse a hex address (optional `0x`/`0X` prefix) into 20 bytes,
/// left-padding with zeros.
///
/// # Errors
///
/// - [`EncodingError::InvalidHex`] for an empty string or non-hex characters.
/// - [`EncodingError::AddressTooLong`] if the value needs more than 20 bytes.
pub fn address_to_bytes(address: &str) -> Result<[u8; ADDRESS_LEN], EncodingError> {
    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(EncodingError::InvalidHex(address.to_string()));
    }
    let significant = digits.trim_start_matches('0');
    if significant.len() > ADDRESS_LEN * 2 {
        return Err(EncodingError::AddressTooLong(significant.len().div_ceil(2)));
    }
    let padded = format!("{significant:0>40}");
    let mut bytes = [0u8; ADDRESS_LEN];
    hex::decode_to_slice(&padded, &mut bytes)
        .map_err(|e| EncodingError::InvalidHex(format!("{address}: {e}")))?;
    Ok(bytes)
}

/// Concatenate byte sequences in argument order.
pub fn concat(parts: &[&[u8]]) -> Vec<u8> {
    let total = parts.iter().map(|p| p.len()).sum();
    let mut out = Vec::with_capacity(total);
    for part in parts {
        out.extend_from_slice(part);
    }
    out
}

/// A 20-byte contract address.
///
/// Parsed through [`address_to_bytes`]; rendered as `0x` + 40 lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContractAddress([u8; ADDRESS_LEN]);

impl ContractAddress {
    /// Wrap raw address bytes.
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// The raw 20 address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl FromStr for ContractAddress {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        address_to_bytes(s).map(Self)
    }
}

impl std::fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl std::fmt::Debug for ContractAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ContractAddress({self})")
    }
}

impl Serialize for ContractAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ContractAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
