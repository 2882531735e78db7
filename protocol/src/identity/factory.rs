//! Fresh identities: a private key, its compressed public key, and the SIN.

use rand_core::{CryptoRng, RngCore};
use std::fmt;
use zeroize::Zeroize;

use super::sin::Sin;
use crate::config::{MAX_NONCE_ATTEMPTS, PRIVATE_KEY_LENGTH};
use crate::crypto::curve::CurveProvider;
use crate::crypto::keys::{KeyError, PrivateKey, PublicKey};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// IdentityRecord
// ---------------------------------------------------------------------------

/// A complete BitAuth identity.
///
/// Immutable once built. The private key never shows up in `Debug` output.
#[derive(Clone)]
pub struct IdentityRecord {
    private_key: PrivateKey,
    public_key: PublicKey,
    sin: Sin,
}

impl IdentityRecord {
    /// Rebuild the record for an existing private key.
    pub fn from_private_key<C: CurveProvider>(curve: &C, private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key(curve);
        let sin = Sin::from_public_key(public_key.as_bytes());
        Self {
            private_key,
            public_key,
            sin,
        }
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn sin(&self) -> &Sin {
        &self.sin
    }

    /// The private key as 64 lowercase hex characters.
    pub fn encoded_private_key(&self) -> String {
        self.private_key.to_hex()
    }

    /// The compressed public key as 66 lowercase hex characters.
    pub fn encoded_public_key(&self) -> String {
        self.public_key.to_hex()
    }
}

impl fmt::Debug for IdentityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityRecord")
            .field("public_key", &self.public_key)
            .field("sin", &self.sin)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// IdentityFactory
// ---------------------------------------------------------------------------

/// Generates identities on a given curve.
///
/// # Examples
///
/// ```
/// use bitauth::crypto::Secp256k1;
/// use bitauth::identity::IdentityFactory;
/// use rand::rngs::OsRng;
///
/// let factory = IdentityFactory::new(Secp256k1::new());
/// let identity = factory.generate(&mut OsRng).unwrap();
/// assert!(identity.sin().matches_public_key(identity.public_key().as_bytes()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdentityFactory<C> {
    curve: C,
}

impl<C: CurveProvider> IdentityFactory<C> {
    pub fn new(curve: C) -> Self {
        Self { curve }
    }

    pub fn curve(&self) -> &C {
        &self.curve
    }

    /// Draw a private key in `[1, N-1]` from `rng` and derive the rest.
    ///
    /// Out-of-range draws are discarded, up to [`MAX_NONCE_ATTEMPTS`] times.
    /// A failing random source aborts generation.
    pub fn generate<R>(&self, rng: &mut R) -> Result<IdentityRecord>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let mut seed = [0u8; PRIVATE_KEY_LENGTH];

        for attempt in 1..=MAX_NONCE_ATTEMPTS {
            rng.try_fill_bytes(&mut seed)?;
            let candidate = PrivateKey::from_bytes(&seed);
            seed.zeroize();

            match candidate {
                Ok(private_key) => {
                    let record = IdentityRecord::from_private_key(&self.curve, private_key);
                    tracing::debug!(sin = %record.sin, attempt, "generated identity");
                    return Ok(record);
                }
                Err(KeyError::SecretKeyOutOfRange) => {
                    tracing::debug!(attempt, "private key draw out of range, drawing another");
                }
                Err(other) => return Err(other.into()),
            }
        }

        tracing::warn!(
            attempts = MAX_NONCE_ATTEMPTS,
            "random source never produced a usable private key"
        );
        Err(Error::NonceExhausted {
            attempts: MAX_NONCE_ATTEMPTS,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::curve::Secp256k1;
    use crate::crypto::signatures::{sign, verify};
    use crate::testing::{FailingRng, ScriptedRng};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const KNOWN_PRIVATE_KEY: &str =
        "1217a587403374c5b21897bda9eaaa88f7315c931e4cb1d40f24fcf8f4d34419";
    const KNOWN_PUBLIC_KEY: &str =
        "023f5d74e874b2f7c784729fc93b7d38a3c28129d27321b2e4f7cde09d7609adff";
    const KNOWN_SIN: &str = "TeyP7pTjXKMoZuHPvDpoUfopfjrHCosFB7W";

    fn chunk(hex_str: &str) -> [u8; 32] {
        hex::decode(hex_str).unwrap().try_into().unwrap()
    }

    fn order_bytes() -> [u8; 32] {
        chunk("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
    }

    #[test]
    fn record_from_known_key() {
        let key = PrivateKey::from_hex(KNOWN_PRIVATE_KEY).unwrap();
        let record = IdentityRecord::from_private_key(&Secp256k1::new(), key);

        assert_eq!(record.encoded_private_key(), KNOWN_PRIVATE_KEY);
        assert_eq!(record.encoded_public_key(), KNOWN_PUBLIC_KEY);
        assert_eq!(record.sin().as_str(), KNOWN_SIN);
    }

    #[test]
    fn generated_identity_is_self_consistent() {
        let curve = Secp256k1::new();
        let factory = IdentityFactory::new(curve);
        let mut rng = StdRng::seed_from_u64(7);
        let record = factory.generate(&mut rng).unwrap();

        assert_eq!(record.encoded_private_key().len(), 64);
        assert_eq!(record.encoded_public_key().len(), 66);
        assert_eq!(record.private_key().public_key(&curve), *record.public_key());
        assert_eq!(
            *record.sin(),
            Sin::from_public_key(record.public_key().as_bytes())
        );

        let signature = sign(&curve, &mut rng, b"hello", record.private_key()).unwrap();
        assert!(verify(&curve, b"hello", &signature, record.public_key()));
    }

    #[test]
    fn two_identities_differ() {
        let factory = IdentityFactory::new(Secp256k1::new());
        let mut rng = StdRng::seed_from_u64(99);
        let a = factory.generate(&mut rng).unwrap();
        let b = factory.generate(&mut rng).unwrap();
        assert_ne!(a.public_key(), b.public_key());
        assert_ne!(a.sin(), b.sin());
    }

    #[test]
    fn out_of_range_draws_are_redrawn() {
        let mut rng = ScriptedRng::new(vec![
            [0u8; 32],
            order_bytes(),
            [0xff; 32],
            chunk(KNOWN_PRIVATE_KEY),
        ]);
        let record = IdentityFactory::new(Secp256k1::new())
            .generate(&mut rng)
            .unwrap();

        assert_eq!(rng.draws(), 4);
        assert_eq!(record.encoded_public_key(), KNOWN_PUBLIC_KEY);
    }

    #[test]
    fn unusable_source_exhausts() {
        let mut rng = ScriptedRng::new(vec![[0u8; 32]]);
        let result = IdentityFactory::new(Secp256k1::new()).generate(&mut rng);

        assert!(matches!(
            result,
            Err(Error::NonceExhausted { attempts }) if attempts == MAX_NONCE_ATTEMPTS
        ));
        assert_eq!(rng.draws(), MAX_NONCE_ATTEMPTS);
    }

    #[test]
    fn entropy_failure_is_fatal() {
        let result = IdentityFactory::new(Secp256k1::new()).generate(&mut FailingRng);
        assert!(matches!(result, Err(Error::EntropyFailure(_))));
    }

    #[test]
    fn debug_hides_private_key() {
        let key = PrivateKey::from_hex(KNOWN_PRIVATE_KEY).unwrap();
        let record = IdentityRecord::from_private_key(&Secp256k1::new(), key);
        let debug = format!("{:?}", record);
        assert!(!debug.contains(KNOWN_PRIVATE_KEY));
        assert!(debug.contains(KNOWN_SIN));
    }
}
