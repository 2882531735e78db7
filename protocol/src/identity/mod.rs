//! # Identity Module
//!
//! BitAuth identities. A participant holds a secp256k1 keypair and is known
//! to others by the SIN derived from the public key.
//!
//! 1. **Keys** live in [`crate::crypto::keys`]. Sign things, prove ownership.
//! 2. **SIN** ([`sin`]) is the base58 handle users share. Checksummed and
//!    tied to one public key through hash160.
//! 3. **Factory** ([`factory`]) draws a fresh private key and returns the
//!    whole bundle as an [`IdentityRecord`].
//!
//! Only ephemeral SINs (type `0x02`) are produced or accepted.

pub mod factory;
pub mod sin;

pub use factory::{IdentityFactory, IdentityRecord};
pub use sin::{Sin, SinError};
