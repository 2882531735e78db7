// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # BitAuth Core Library
//!
//! Identity and message signing for the BitAuth scheme: secp256k1 keys,
//! ECDSA signatures carried as DER hex, and SINs (System Identification
//! Numbers) as the public handle of an identity.
//!
//! ## Architecture
//!
//! - **crypto**: curve backend, hashes, the DER codec, keys, sign/verify.
//! - **identity**: SIN derivation and parsing, identity generation.
//! - **api**: the hex-in, hex-out functions most callers want.
//! - **config**: protocol constants.
//! - **error**: the crate-wide error type.
//!
//! ## Quick start
//!
//! ```
//! let identity = bitauth::generate_identity().unwrap();
//! let signature = bitauth::sign(b"hello", &identity.encoded_private_key()).unwrap();
//! assert!(bitauth::verify_signature(
//!     b"hello",
//!     &signature,
//!     &identity.encoded_public_key(),
//! ));
//! ```
//!
//! ## Ground rules
//!
//! 1. Verification answers yes or no. It never errors and never explains
//!    itself to the caller.
//! 2. Randomness failures are errors, never silently papered over.
//! 3. Private key material is never logged.

pub mod api;
pub mod config;
pub mod crypto;
pub mod error;
pub mod identity;

#[cfg(test)]
mod testing;

pub use api::{derive_sin, generate_identity, public_key_from_private_key, sign, verify_signature};
pub use error::{Error, Result};
pub use identity::{IdentityRecord, Sin};
