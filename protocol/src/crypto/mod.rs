//! # Cryptographic Primitives for BitAuth
//!
//! Everything that touches a key, a hash, or a signature lives here:
//!
//! - **curve**: the [`CurveProvider`] seam and its `k256`-backed
//!   secp256k1 implementation.
//! - **hash**: SHA-256, double SHA-256, hash160, checksums.
//! - **der**: the two-integer DER codec for signatures.
//! - **keys**: private scalars, compressed public keys, `(R, S)` pairs.
//! - **signatures**: ECDSA sign and verify.
//!
//! Curve arithmetic comes from an audited crate. What we write ourselves is
//! the glue ECDSA needs on top: nonce handling, the modular arithmetic on R
//! and S, and the DER byte layout.

pub mod curve;
pub mod der;
pub mod hash;
pub mod keys;
pub mod signatures;

pub use curve::{CurveProvider, Secp256k1};
pub use der::DerError;
pub use hash::{checksum, double_sha256, hash160, sha256, sha256_array};
pub use keys::{KeyError, PrivateKey, PublicKey, Signature};
pub use signatures::{message_digest, sign, sign_with_nonce, verify, verify_der};
