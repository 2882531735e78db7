//! # Hex API
//!
//! The text-in, text-out surface of the crate. Keys and signatures travel as
//! hex strings, SINs as base58. Everything here runs on secp256k1 with the
//! operating system's random source.
//!
//! Output hex is always lowercase. Input hex may use either case.

use rand::rngs::OsRng;

use crate::crypto::{self, PrivateKey, Secp256k1};
use crate::error::{Error, Result};
use crate::identity::{IdentityFactory, IdentityRecord, Sin};

/// Sign `message` and return the DER signature as hex.
///
/// ```
/// let signature = bitauth::sign(
///     b"hello",
///     "1217a587403374c5b21897bda9eaaa88f7315c931e4cb1d40f24fcf8f4d34419",
/// )
/// .unwrap();
/// assert!(signature.starts_with("30"));
/// ```
pub fn sign(message: &[u8], private_key_hex: &str) -> Result<String> {
    let private_key = PrivateKey::from_hex(private_key_hex)?;
    let signature = crypto::sign(&Secp256k1, &mut OsRng, message, &private_key)?;
    Ok(signature.to_hex()?)
}

/// Check a hex DER signature against a hex public key.
///
/// Anything that fails to decode counts as an invalid signature.
pub fn verify_signature(message: &[u8], signature_hex: &str, public_key_hex: &str) -> bool {
    let (signature, public_key) = match (hex::decode(signature_hex), hex::decode(public_key_hex)) {
        (Ok(signature), Ok(public_key)) => (signature, public_key),
        _ => {
            tracing::debug!("verification rejected: input is not hex");
            return false;
        }
    };
    crypto::verify_der(&Secp256k1, message, &signature, &public_key)
}

/// The SIN for a hex public key.
///
/// The decoded bytes are hashed as given and are not checked against the
/// curve. Empty input is rejected.
pub fn derive_sin(public_key_hex: &str) -> Result<Sin> {
    let public_key = hex::decode(public_key_hex)?;
    if public_key.is_empty() {
        return Err(Error::MalformedInput("empty public key".to_string()));
    }
    Ok(Sin::from_public_key(&public_key))
}

/// A fresh identity drawn from the OS random source.
pub fn generate_identity() -> Result<IdentityRecord> {
    IdentityFactory::new(Secp256k1).generate(&mut OsRng)
}

/// The compressed public key, as hex, for a hex private key.
pub fn public_key_from_private_key(private_key_hex: &str) -> Result<String> {
    let private_key = PrivateKey::from_hex(private_key_hex)?;
    Ok(private_key.public_key(&Secp256k1).to_hex())
}
