//! # Key Management
//!
//! secp256k1 key material and the ECDSA signature value.
//!
//! - [`PrivateKey`]: a 32-byte scalar in `[1, N-1]`. Zeroized on drop.
//! - [`PublicKey`]: the SEC1 compressed encoding of `d·G`, 33 bytes.
//! - [`Signature`]: an `(R, S)` pair with one canonical DER form.
//!
//! ## Security considerations
//!
//! - Private key bytes are never logged and never appear in `Debug` output.
//! - Public keys built from untrusted bytes always go through the curve
//!   provider's point decoder, so a `PublicKey` is always on the curve.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use zeroize::Zeroize;

use super::curve::{secp256k1_order, CurveProvider, Secp256k1};
use super::der::{self, DerError};
use crate::config::{COMPRESSED_PUBLIC_KEY_LENGTH, PRIVATE_KEY_LENGTH};
use crate::error;

/// Errors that can occur during key operations.
///
/// Reports only the shape of the problem, never key contents.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid secret key bytes: expected {expected} bytes, got {got}")]
    InvalidSecretKey { expected: usize, got: usize },

    #[error("secret key is zero or not below the curve order")]
    SecretKeyOutOfRange,

    #[error("invalid public key bytes: not a point on secp256k1")]
    InvalidPublicKey,

    #[error("invalid hex encoding")]
    InvalidHex,
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// A secp256k1 private scalar.
///
/// `PrivateKey` does NOT implement `Serialize`. Exporting a
/// secret should be an explicit call to [`to_hex`](Self::to_hex).
#[derive(Clone)]
pub struct PrivateKey {
    bytes: [u8; PRIVATE_KEY_LENGTH],
}

impl PrivateKey {
    /// Build a key from 32 big-endian bytes, checking `1 <= d < N`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(KeyError::InvalidSecretKey {
                expected: PRIVATE_KEY_LENGTH,
                got: bytes.len(),
            });
        }
        let scalar = BigUint::from_bytes_be(bytes);
        if scalar.is_zero() || &scalar >= secp256k1_order() {
            return Err(KeyError::SecretKeyOutOfRange);
        }
        let mut arr = [0u8; PRIVATE_KEY_LENGTH];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Parse a hex-encoded key (64 characters, either case).
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let mut bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidHex)?;
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    /// The scalar `d` as an integer.
    ///
    /// The returned `BigUint` is not zeroized on drop. Keep it short-lived.
    pub fn scalar(&self) -> BigUint {
        BigUint::from_bytes_be(&self.bytes)
    }

    /// Raw 32-byte big-endian scalar. Handle with care.
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LENGTH] {
        self.bytes
    }

    /// Lowercase hex of the scalar. Handle with care.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Derive the matching public key, `d·G`.
    pub fn public_key<C: CurveProvider>(&self, curve: &C) -> PublicKey {
        PublicKey::from_private_key(curve, self)
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl PartialEq for PrivateKey {
    /// Compares the derived public keys rather than the secret bytes.
    fn eq(&self, other: &Self) -> bool {
        self.public_key(&Secp256k1) == other.public_key(&Secp256k1)
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret key material in debug output. Not even partially.
        write!(f, "PrivateKey(pub={})", self.public_key(&Secp256k1).to_hex())
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A secp256k1 public key in SEC1 compressed form.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: [u8; COMPRESSED_PUBLIC_KEY_LENGTH],
}

impl PublicKey {
    /// `d·G`, compressed.
    ///
    /// A valid private key never yields the point at infinity, so the
    /// compression cannot fail.
    pub fn from_private_key<C: CurveProvider>(curve: &C, private_key: &PrivateKey) -> Self {
        let point = curve.scalar_base_multiply(&private_key.scalar());
        let bytes = curve
            .compress_point(&point)
            .unwrap_or_else(|_| unreachable!("d in [1, N-1] never maps to infinity"));
        Self { bytes }
    }

    /// Parse SEC1 bytes (compressed or uncompressed) and normalize to the
    /// compressed form. Rejects anything that isn't a curve point.
    pub fn from_sec1_bytes<C: CurveProvider>(curve: &C, bytes: &[u8]) -> Result<Self, KeyError> {
        let point = curve
            .decompress_point(bytes)
            .map_err(|_| KeyError::InvalidPublicKey)?;
        let bytes = curve
            .compress_point(&point)
            .map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    /// Parse a hex-encoded SEC1 public key.
    pub fn from_hex<C: CurveProvider>(curve: &C, hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidHex)?;
        Self::from_sec1_bytes(curve, &bytes)
    }

    /// Decode back into the provider's point type.
    pub fn to_point<C: CurveProvider>(&self, curve: &C) -> Result<C::Point, KeyError> {
        curve
            .decompress_point(&self.bytes)
            .map_err(|_| KeyError::InvalidPublicKey)
    }

    pub fn as_bytes(&self) -> &[u8; COMPRESSED_PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    /// Lowercase hex, 66 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl Serialize for PublicKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PublicKey::from_hex(&Secp256k1, &s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// An ECDSA signature: the integer pair `(R, S)`.
///
/// Components are arbitrary-precision so that anything a DER parser hands
/// back can be represented; range checks against `N` happen at
/// verification time.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    pub fn r(&self) -> &BigUint {
        &self.r
    }

    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Canonical DER encoding.
    pub fn to_der(&self) -> Result<Vec<u8>, DerError> {
        der::encode(&self.r, &self.s)
    }

    /// Parse a DER signature.
    pub fn from_der(bytes: &[u8]) -> Result<Self, DerError> {
        let (r, s) = der::decode(bytes)?;
        Ok(Self { r, s })
    }

    /// Lowercase hex of the DER encoding.
    pub fn to_hex(&self) -> Result<String, DerError> {
        self.to_der().map(hex::encode)
    }

    /// Parse a hex-encoded DER signature.
    pub fn from_hex(hex_str: &str) -> error::Result<Self> {
        let bytes = hex::decode(hex_str)?;
        Ok(Self::from_der(&bytes)?)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature(r={:x}, s={:x})", self.r, self.s)
    }
}
