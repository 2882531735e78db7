//! # SIN: System Identification Numbers
//!
//! A SIN is the shareable handle for a BitAuth identity, derived from the
//! public key the way the Bitcoin identity protocol describes:
//!
//! ```text
//! public_key (33 bytes)
//!     -> hash160(public_key)                        20 bytes
//!     -> 0x0F || 0x02 || hash160                    22 bytes
//!     -> append checksum (double SHA-256, 4 bytes)  26 bytes
//!     -> base58                                     Tf4X4AGGNe43f...
//! ```
//!
//! `0x0F` is the SIN version byte and `0x02` marks an ephemeral SIN.
//!
//! The last step goes through hex: payload and checksum are written as one
//! hex string, parsed as a single big integer, and that integer is
//! base58-encoded. Because the version byte is non-zero this agrees with
//! plain base58check over the same 26 bytes.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{
    sin_type_name, CHECKSUM_LENGTH, HASH160_LENGTH, SIN_PAYLOAD_LENGTH, SIN_TYPE_EPHEMERAL,
    SIN_VERSION,
};
use crate::crypto::hash::{checksum, hash160};

/// Offset of the hash160 inside a decoded SIN.
const KEY_HASH_OFFSET: usize = 2;

/// Offset of the checksum inside a decoded SIN.
const CHECKSUM_OFFSET: usize = KEY_HASH_OFFSET + HASH160_LENGTH;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while parsing a SIN string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SinError {
    /// The text isn't valid base58.
    #[error("base58 decode error: {0}")]
    Base58Decode(String),

    /// The decoded payload has the wrong size.
    #[error("invalid SIN length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes.
        got: usize,
    },

    /// The first byte isn't the SIN version byte.
    #[error("invalid SIN version byte: 0x{0:02x}")]
    InvalidVersion(u8),

    /// The SIN type isn't one we handle.
    #[error("unsupported SIN type: {0}")]
    UnsupportedType(String),

    /// The trailing four bytes don't match the payload.
    #[error("SIN checksum mismatch")]
    ChecksumMismatch,
}

// ---------------------------------------------------------------------------
// Sin
// ---------------------------------------------------------------------------

/// An ephemeral SIN.
///
/// # Examples
///
/// ```
/// use bitauth::identity::Sin;
///
/// let public_key =
///     hex::decode("023f5d74e874b2f7c784729fc93b7d38a3c28129d27321b2e4f7cde09d7609adff")
///         .unwrap();
/// let sin = Sin::from_public_key(&public_key);
/// assert_eq!(sin.as_str(), "TeyP7pTjXKMoZuHPvDpoUfopfjrHCosFB7W");
///
/// let parsed: Sin = sin.as_str().parse().unwrap();
/// assert_eq!(parsed, sin);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Sin {
    /// The base58 text.
    encoded: String,

    /// hash160 of the public key this SIN was derived from.
    key_hash: [u8; HASH160_LENGTH],
}

impl Sin {
    /// Derive the SIN for a public key.
    ///
    /// The key bytes are hashed as given; callers decide whether they want
    /// the compressed or uncompressed encoding to be the identity.
    pub fn from_public_key(public_key: &[u8]) -> Self {
        let key_hash = hash160(public_key);

        let mut payload = Vec::with_capacity(CHECKSUM_OFFSET);
        payload.push(SIN_VERSION);
        payload.push(SIN_TYPE_EPHEMERAL);
        payload.extend_from_slice(&key_hash);

        let checksum_hex = hex::encode(checksum(&payload));
        let digits = format!(
            "{}{}",
            hex::encode(&payload),
            &checksum_hex[..2 * CHECKSUM_LENGTH]
        );

        // Always non-empty hex with a non-zero leading byte.
        let value = BigUint::parse_bytes(digits.as_bytes(), 16)
            .unwrap_or_else(|| unreachable!("hex::encode output is valid hex"));
        let encoded = bs58::encode(value.to_bytes_be()).into_string();

        Self { encoded, key_hash }
    }

    /// Parse a SIN string, checking its layout and checksum.
    pub fn parse(text: &str) -> Result<Self, SinError> {
        let decoded = bs58::decode(text)
            .into_vec()
            .map_err(|e| SinError::Base58Decode(e.to_string()))?;

        if decoded.len() != SIN_PAYLOAD_LENGTH {
            return Err(SinError::InvalidLength {
                expected: SIN_PAYLOAD_LENGTH,
                got: decoded.len(),
            });
        }
        if decoded[0] != SIN_VERSION {
            return Err(SinError::InvalidVersion(decoded[0]));
        }
        if decoded[1] != SIN_TYPE_EPHEMERAL {
            return Err(SinError::UnsupportedType(sin_type_name(decoded[1])));
        }

        let (payload, chk) = decoded.split_at(CHECKSUM_OFFSET);
        if checksum(payload) != chk {
            return Err(SinError::ChecksumMismatch);
        }

        let mut key_hash = [0u8; HASH160_LENGTH];
        key_hash.copy_from_slice(&payload[KEY_HASH_OFFSET..]);

        Ok(Self {
            encoded: text.to_string(),
            key_hash,
        })
    }

    /// The base58 text.
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// The hash160 embedded in this SIN.
    pub fn key_hash(&self) -> &[u8; HASH160_LENGTH] {
        &self.key_hash
    }

    /// Whether `public_key` is the key this SIN was derived from.
    pub fn matches_public_key(&self, public_key: &[u8]) -> bool {
        hash160(public_key) == self.key_hash
    }
}

impl FromStr for Sin {
    type Err = SinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sin::parse(s)
    }
}

impl fmt::Display for Sin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl fmt::Debug for Sin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sin({})", self.encoded)
    }
}

impl Serialize for Sin {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encoded)
    }
}

impl<'de> Deserialize<'de> for Sin {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Sin::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const VECTORS: [(&str, &str); 3] = [
        (
            "02F840A04114081690223B7069071A70D6DABB891763B638CC20C7EC3BD58E6C86",
            "TfG4ScDgysrSpodWD4Re5UtXmcLbY5CiUHA",
        ),
        (
            "023f5d74e874b2f7c784729fc93b7d38a3c28129d27321b2e4f7cde09d7609adff",
            "TeyP7pTjXKMoZuHPvDpoUfopfjrHCosFB7W",
        ),
        (
            "02df9eca865f13a977f9dcca0f503aba8efd580a153958e29bb7147ec8c0c1a3dc",
            "Tf4X4AGGNe43fGWMzPzA5Aved3tgZXCoPRF",
        ),
    ];

    /// base58 of an arbitrary 26-byte payload with a correct checksum.
    fn encode_payload(version: u8, sin_type: u8) -> String {
        let mut payload = vec![version, sin_type];
        payload.extend_from_slice(&[0x11; HASH160_LENGTH]);
        let chk = checksum(&payload);
        payload.extend_from_slice(&chk);
        bs58::encode(payload).into_string()
    }

    #[test]
    fn reference_vectors() {
        for (public_key, expected) in VECTORS {
            let bytes = hex::decode(public_key).unwrap();
            assert_eq!(Sin::from_public_key(&bytes).as_str(), expected);
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        let bytes = hex::decode(VECTORS[1].0).unwrap();
        assert_eq!(Sin::from_public_key(&bytes), Sin::from_public_key(&bytes));
    }

    #[test]
    fn different_keys_different_sins() {
        let a = Sin::from_public_key(&hex::decode(VECTORS[0].0).unwrap());
        let b = Sin::from_public_key(&hex::decode(VECTORS[2].0).unwrap());
        assert_ne!(a, b);
    }

    #[test]
    fn parse_roundtrip() {
        for (public_key, text) in VECTORS {
            let parsed = Sin::parse(text).unwrap();
            let bytes = hex::decode(public_key).unwrap();
            assert_eq!(parsed, Sin::from_public_key(&bytes));
            assert!(parsed.matches_public_key(&bytes));
            assert_eq!(parsed.key_hash(), &hash160(&bytes));
        }
    }

    #[test]
    fn matches_rejects_other_key() {
        let sin = Sin::parse(VECTORS[0].1).unwrap();
        let other = hex::decode(VECTORS[1].0).unwrap();
        assert!(!sin.matches_public_key(&other));
    }

    #[test]
    fn corrupted_sin_rejected() {
        let original = VECTORS[1].1;
        let mid = original.len() / 2;
        let replacement = if &original[mid..mid + 1] == "z" { "y" } else { "z" };
        let corrupted = format!("{}{}{}", &original[..mid], replacement, &original[mid + 1..]);
        assert!(Sin::parse(&corrupted).is_err());
    }

    #[test]
    fn invalid_base58_rejected() {
        // '0', 'O', 'I' and 'l' are not in the base58 alphabet.
        assert!(matches!(
            Sin::parse("T0OIl"),
            Err(SinError::Base58Decode(_))
        ));
    }

    #[test]
    fn wrong_length_rejected() {
        let short = bs58::encode([SIN_VERSION, SIN_TYPE_EPHEMERAL, 0x01]).into_string();
        assert_eq!(
            Sin::parse(&short),
            Err(SinError::InvalidLength {
                expected: 26,
                got: 3
            })
        );
    }

    #[test]
    fn wrong_version_rejected() {
        let text = encode_payload(0x10, SIN_TYPE_EPHEMERAL);
        assert_eq!(Sin::parse(&text), Err(SinError::InvalidVersion(0x10)));
    }

    #[test]
    fn unsupported_type_rejected() {
        let text = encode_payload(SIN_VERSION, 0x01);
        assert_eq!(
            Sin::parse(&text),
            Err(SinError::UnsupportedType("unknown(0x01)".to_string()))
        );
    }

    #[test]
    fn valid_arbitrary_payload_parses() {
        let text = encode_payload(SIN_VERSION, SIN_TYPE_EPHEMERAL);
        let sin = Sin::parse(&text).unwrap();
        assert_eq!(sin.key_hash(), &[0x11; HASH160_LENGTH]);
    }

    #[test]
    fn sin_serde_json_roundtrip() {
        let sin = Sin::parse(VECTORS[2].1).unwrap();
        let json = serde_json::to_string(&sin).unwrap();
        assert_eq!(json, format!("\"{}\"", VECTORS[2].1));
        let recovered: Sin = serde_json::from_str(&json).unwrap();
        assert_eq!(sin, recovered);
    }

    #[test]
    fn sin_deserialize_rejects_garbage() {
        let result: Result<Sin, _> = serde_json::from_str("\"not a sin\"");
        assert!(result.is_err());
    }
}
