//! # Hashing Utilities
//!
//! The fixed hash compositions BitAuth needs, and nothing else:
//!
//! - **SHA-256**: the message digest fed to ECDSA.
//! - **double SHA-256**: Bitcoin's checksum construction.
//! - **hash160**: `RIPEMD-160(SHA-256(x))`, the 20-byte fingerprint of a
//!   public key that sits inside every SIN.
//!
//! Output matches every other Bitcoin-style implementation byte for byte.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::config::{CHECKSUM_LENGTH, DIGEST_LENGTH, HASH160_LENGTH};

/// SHA-256 of `data`, as an owned byte vector.
///
/// # Example
///
/// ```
/// use bitauth::crypto::sha256;
///
/// let hash = sha256(b"bitauth");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> Vec<u8> {
    Sha256::digest(data).to_vec()
}

/// SHA-256 into a stack array. The signer and verifier read this straight
/// into an integer.
pub fn sha256_array(data: &[u8]) -> [u8; DIGEST_LENGTH] {
    Sha256::digest(data).into()
}

/// `SHA-256(SHA-256(data))`.
pub fn double_sha256(data: &[u8]) -> [u8; DIGEST_LENGTH] {
    sha256_array(&sha256_array(data))
}

/// Compute `RIPEMD-160(SHA-256(data))`.
///
/// # Example
///
/// ```
/// use bitauth::crypto::hash160;
///
/// let fingerprint = hash160(b"some public key bytes");
/// assert_eq!(fingerprint.len(), 20);
/// ```
pub fn hash160(data: &[u8]) -> [u8; HASH160_LENGTH] {
    Ripemd160::digest(sha256_array(data)).into()
}

/// The first four bytes of `double_sha256(data)`.
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let full = double_sha256(data);
    let mut output = [0u8; CHECKSUM_LENGTH];
    output.copy_from_slice(&full[..CHECKSUM_LENGTH]);
    output
}
