//! # Field Elements: BN254 Scalar Field Values
//!
//! Defines `FieldElement`, the arithmetic domain of the hash providers and
//! the proof system.
//!
//! ## Security Invariant
//!
//! A `FieldElement` always holds a value `v` with `0 <= v < P`, where `P` is
//! the BN254 scalar field order. The inner bytes are private and every
//! constructor either reduces modulo `P` explicitly
//! ([`FieldElement::from_be_bytes_mod_order`]) or rejects out-of-range input
//! ([`FieldElement::try_from_be_bytes`], [`FieldElement::from_hex`],
//! [`FieldElement::from_decimal`]).
//!
//! ## Text Forms
//!
//! - Hex: `0x` followed by minimal lowercase hex digits (`0x0` for zero).
//!   This is the form used for public signals at the system boundary.
//! - Decimal: the proof backend's convention for circuit inputs.

use std::str::FromStr;

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EncodingError;

/// The BN254 scalar field order `P`, in decimal.
pub const BN254_MODULUS_DECIMAL: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

/// `P` as 32 big-endian bytes.
const MODULUS_BE: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

/// An element of the BN254 scalar field, stored as 32 big-endian bytes.
///
/// Ordering and equality are numeric (big-endian byte order coincides with
/// numeric order for fixed-width encodings).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FieldElement([u8; 32]);

impl FieldElement {
    /// The additive identity.
    pub const ZERO: Self = Self([0u8; 32]);

    /// The multiplicative identity.
    pub const ONE: Self = {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        Self(bytes)
    };

    /// Interpret `bytes` as a big-endian unsigned integer of any length and
    /// reduce it modulo `P`.
    pub fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        Self::from_fr(Fr::from_be_bytes_mod_order(bytes))
    }

    /// Accept 32 big-endian bytes only if they already encode a value below `P`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::NotInField`] when the value is `>= P`.
    pub fn try_from_be_bytes(bytes: [u8; 32]) -> Result<Self, EncodingError> {
        if bytes < MODULUS_BE {
            Ok(Self(bytes))
        } else {
            Err(EncodingError::NotInField(format!("0x{}", hex::encode(bytes))))
        }
    }

    /// Embed a `u64`. Always below `P`.
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// The 32-byte big-endian encoding.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Borrow the 32-byte big-endian encoding.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns true for the additive identity.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Convert from the arkworks BN254 scalar type.
    pub fn from_fr(fr: Fr) -> Self {
        let raw = fr.into_bigint().to_bytes_be();
        let mut bytes = [0u8; 32];
        // Right-aligned: the value is big-endian.
        let offset = 32usize.saturating_sub(raw.len());
        bytes[offset..].copy_from_slice(&raw[raw.len().saturating_sub(32)..]);
        Self(bytes)
    }

    /// Convert to the arkworks BN254 scalar type.
    pub fn to_fr(&self) -> Fr {
        Fr::from_be_bytes_mod_order(&self.0)
    }

    /// Render as `0x` + minimal lowercase hex.
    pub fn to_hex(&self) -> String {
        let full = hex::encode(self.0);
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{trimmed}")
        }
    }

    /// Parse a hex string with an optional `0x`/`0X` prefix.
    ///
    /// Leading zeros and odd digit counts are accepted.
    ///
    /// # Errors
    ///
    /// - [`EncodingError::InvalidHex`] for an empty string or non-hex characters.
    /// - [`EncodingError::NotInField`] when the value is `>= P`.
    pub fn from_hex(s: &str) -> Result<Self, EncodingError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(EncodingError::InvalidHex(s.to_string()));
        }
        let significant = digits.trim_start_matches('0');
        if significant.len() > 64 {
            return Err(EncodingError::NotInField(s.to_string()));
        }
        let padded = format!("{significant:0>64}");
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| EncodingError::InvalidHex(format!("{s}: {e}")))?;
        Self::try_from_be_bytes(bytes)
    }

    /// Render as a decimal string.
    pub fn to_decimal(&self) -> String {
        BigUint::from_bytes_be(&self.0).to_string()
    }

    /// Parse a decimal string of ASCII digits.
    ///
    /// # Errors
    ///
    /// - [`EncodingError::InvalidDecimal`] for an empty string or non-digits.
    /// - [`EncodingError::NotInField`] when the value is `>= P`.
    pub fn from_decimal(s: &str) -> Result<Self, EncodingError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EncodingError::InvalidDecimal(s.to_string()));
        }
        let value = BigUint::parse_bytes(s.as_bytes(), 10)
            .ok_or_else(|| EncodingError::InvalidDecimal(s.to_string()))?;
        if value >= BigUint::from_bytes_be(&MODULUS_BE) {
            return Err(EncodingError::NotInField(s.to_string()));
        }
        let raw = value.to_bytes_be();
        let mut bytes = [0u8; 32];
        bytes[32 - raw.len()..].copy_from_slice(&raw);
        Ok(Self(bytes))
    }
}

impl From<Fr> for FieldElement {
    fn from(fr: Fr) -> Self {
        Self::from_fr(fr)
    }
}

impl From<FieldElement> for Fr {
    fn from(fe: FieldElement) -> Self {
        fe.to_fr()
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

/// Parses `0x`-prefixed input as hex and anything else as decimal.
impl FromStr for FieldElement {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("0x") || s.starts_with("0X") {
            Self::from_hex(s)
        } else {
            Self::from_decimal(s)
        }
    }
}

impl std::fmt::Display for FieldElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FieldElement({})", self.to_hex())
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
