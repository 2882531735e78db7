//! # Digital Signatures
//!
//! ECDSA over secp256k1, written out step by step against a
//! [`CurveProvider`].
//!
//! ## Conventions
//!
//! - The message is hashed exactly once with SHA-256 before signing, and the
//!   verifier does the same. Both sides go through [`message_digest`], so the
//!   convention can't drift between them.
//! - The nonce `k` is 32 bytes drawn from the caller's random source. Values
//!   outside `[1, N-1]`, and values that lead to `R == 0` or `S == 0`, are
//!   discarded and redrawn, up to [`MAX_NONCE_ATTEMPTS`] times.
//! - A failing random source is an error. There is no fallback.
//! - The raw nonce bytes are wiped after each draw. The integer copies of
//!   `d` and `k` live in `BigUint`s, which cannot be wiped, and stay in
//!   freed heap memory until it is reused.
//!
//! ## Verification is a predicate
//!
//! [`verify`] and [`verify_der`] return `bool`. A bad key, a malformed DER
//! blob, an out-of-range component, and a wrong signature all look the same
//! to the caller. The reason is logged at debug level and goes no further.

use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use super::curve::CurveProvider;
use super::hash::sha256_array;
use super::keys::{PrivateKey, PublicKey, Signature};
use crate::config::{MAX_NONCE_ATTEMPTS, NONCE_LENGTH};
use crate::error::{Error, Result};

/// `SHA-256(message)` read as a big-endian integer.
pub fn message_digest(message: &[u8]) -> BigUint {
    BigUint::from_bytes_be(&sha256_array(message))
}

/// Sign `message` with `private_key`, drawing the nonce from `rng`.
///
/// # Example
///
/// ```
/// use bitauth::crypto::{sign, verify, PrivateKey, Secp256k1};
/// use rand::rngs::OsRng;
///
/// let curve = Secp256k1::new();
/// let key = PrivateKey::from_hex(
///     "1217a587403374c5b21897bda9eaaa88f7315c931e4cb1d40f24fcf8f4d34419",
/// )
/// .unwrap();
/// let signature = sign(&curve, &mut OsRng, b"hello", &key).unwrap();
/// assert!(verify(&curve, b"hello", &signature, &key.public_key(&curve)));
/// ```
pub fn sign<C, R>(
    curve: &C,
    rng: &mut R,
    message: &[u8],
    private_key: &PrivateKey,
) -> Result<Signature>
where
    C: CurveProvider,
    R: RngCore + CryptoRng + ?Sized,
{
    let e = message_digest(message);
    let d = private_key.scalar();
    let mut nonce = [0u8; NONCE_LENGTH];

    for attempt in 1..=MAX_NONCE_ATTEMPTS {
        rng.try_fill_bytes(&mut nonce)?;
        let k = BigUint::from_bytes_be(&nonce);
        nonce.zeroize();

        if let Some(signature) = compute_signature(curve, &e, &d, &k) {
            return Ok(signature);
        }
        tracing::debug!(attempt, "nonce rejected, drawing another");
    }

    tracing::warn!(
        attempts = MAX_NONCE_ATTEMPTS,
        "random source never produced a usable nonce"
    );
    Err(Error::NonceExhausted {
        attempts: MAX_NONCE_ATTEMPTS,
    })
}

/// Sign with a caller-chosen nonce.
///
/// Reusing a nonce across two messages reveals the private key. This exists
/// for reproducing known signatures, not for everyday signing.
pub fn sign_with_nonce<C: CurveProvider>(
    curve: &C,
    message: &[u8],
    private_key: &PrivateKey,
    nonce: &BigUint,
) -> Result<Signature> {
    let e = message_digest(message);
    compute_signature(curve, &e, &private_key.scalar(), nonce).ok_or(Error::InvalidNonce)
}

/// Verify a typed signature against a typed public key.
pub fn verify<C: CurveProvider>(
    curve: &C,
    message: &[u8],
    signature: &Signature,
    public_key: &PublicKey,
) -> bool {
    match public_key.to_point(curve) {
        Ok(point) => verify_point(curve, message, signature, &point),
        Err(_) => {
            tracing::debug!("verification rejected: public key does not decode");
            false
        }
    }
}

/// Verify a DER signature against SEC1 public key bytes, straight off the
/// wire.
pub fn verify_der<C: CurveProvider>(
    curve: &C,
    message: &[u8],
    signature_der: &[u8],
    public_key: &[u8],
) -> bool {
    let point = match curve.decompress_point(public_key) {
        Ok(point) => point,
        Err(err) => {
            tracing::debug!(%err, "verification rejected: bad public key");
            return false;
        }
    };
    let signature = match Signature::from_der(signature_der) {
        Ok(signature) => signature,
        Err(err) => {
            tracing::debug!(%err, "verification rejected: bad DER");
            return false;
        }
    };
    verify_point(curve, message, &signature, &point)
}

/// Steps 3 and 4 of ECDSA signing for a given nonce. `None` means the nonce
/// is unusable and another one is needed.
fn compute_signature<C: CurveProvider>(
    curve: &C,
    e: &BigUint,
    d: &BigUint,
    k: &BigUint,
) -> Option<Signature> {
    let n = curve.order();
    if k.is_zero() || k >= n {
        return None;
    }

    let point = curve.scalar_base_multiply(k);
    let r = curve.x_coordinate(&point)? % n;
    if r.is_zero() {
        return None;
    }

    // s = k^-1 * (e + d*r) mod n
    let s = (mod_inverse(k, n) * (e + d * &r)) % n;
    if s.is_zero() {
        return None;
    }

    Some(Signature::new(r, s))
}

fn verify_point<C: CurveProvider>(
    curve: &C,
    message: &[u8],
    signature: &Signature,
    public_point: &C::Point,
) -> bool {
    let n = curve.order();
    let (r, s) = (signature.r(), signature.s());
    if r.is_zero() || r >= n || s.is_zero() || s >= n {
        tracing::debug!("verification rejected: component out of range");
        return false;
    }

    let e = message_digest(message);
    let w = mod_inverse(s, n);
    let u1 = (&e * &w) % n;
    let u2 = (r * &w) % n;

    let candidate = curve.add_points(
        &curve.scalar_base_multiply(&u1),
        &curve.scalar_multiply(public_point, &u2),
    );

    match curve.x_coordinate(&candidate) {
        Some(x) => &(x % n) == r,
        None => {
            tracing::debug!("verification rejected: u1*G + u2*Q is infinity");
            false
        }
    }
}

/// `a^-1 mod n` for prime `n`, by Fermat's little theorem.
fn mod_inverse(a: &BigUint, n: &BigUint) -> BigUint {
    a.modpow(&(n - 2u32), n)
}
